//! Shared configuration for the car showcase viewer.
//!
//! Values here are fixed at build time: framing, materials, lighting rig,
//! camera clamps, asset paths and the DOM contract of the host page.

/// Orbit camera projection and interaction clamps.
pub mod camera;

/// Element ids and selectors the wasm build binds to.
pub mod dom;

/// Studio lighting rig.
pub mod lighting;

/// Relative asset paths served next to the wasm bundle.
pub mod paths;

/// Model framing, material override and tone mapping.
pub mod render_settings;
