use bevy::math::Vec3;
use std::f32::consts::PI;

pub const FIELD_OF_VIEW_DEGREES: f32 = 65.0;
pub const NEAR_PLANE: f32 = 0.9;
pub const FAR_PLANE: f32 = 1000.0;

pub const START_POSITION: Vec3 = Vec3::new(6.0, 2.0, 6.0);

/// Fraction of orbit/pan velocity shed every frame.
pub const DAMPING_FACTOR: f32 = 0.04;

pub const MIN_DISTANCE: f32 = 7.0;
pub const MAX_DISTANCE: f32 = 9.0;

/// Polar angle is measured from +Y.
pub const MIN_POLAR_ANGLE: f32 = PI / 3.0;
pub const MAX_POLAR_ANGLE: f32 = PI / 2.5;

/// Radians of orbit per pixel of drag.
pub const ROTATE_SPEED: f32 = 0.005;

/// World units of pan per pixel of drag at unit distance.
pub const PAN_SPEED: f32 = 0.0015;

/// Radius multiplier per wheel line scrolled towards the model.
pub const ZOOM_STEP: f32 = 0.95;
