//! Asset definitions for the showcase.
//!
//! The catalog is the only data asset; car models, logos and environment
//! maps are referenced from it or from the shared path constants.

/// Car catalog entries, specs and validation.
pub mod catalog;
