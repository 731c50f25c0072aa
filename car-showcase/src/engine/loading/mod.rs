//! Startup asset loading for the showcase.
//!
//! The catalog gates the transition into `Running`; the studio environment
//! loads alongside it and is only reported on.

/// Car catalog loading, validation and the transition to `Running`.
pub mod catalog_loader;

/// Studio environment cubemap loading and readiness reporting.
pub mod environment_loader;
