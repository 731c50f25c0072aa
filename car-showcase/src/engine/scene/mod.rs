//! Scene decoration and per-model processing.
//!
//! Holds the one-time studio rig plus the helpers applied to each car when
//! it finishes loading: bounding-box normalisation and the material override.

/// Studio lighting rig: ambient fill, key, rim and bounce lights.
pub mod lighting;

/// Material override applied to every mesh of a loaded car.
pub mod materials;

/// Hierarchy bounds and fit-to-size normalisation.
///
/// Scales a model uniformly so its largest dimension matches the target,
/// then recentres it on the origin.
pub mod normalise;
