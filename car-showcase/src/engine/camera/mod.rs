//! Viewport camera for inspecting the showcased car.
//!
//! Damped orbit/pan/zoom around the origin with fixed distance and polar
//! angle clamps, driven by mouse input.

/// Orbit camera resource and controller system.
pub mod orbit_camera;
