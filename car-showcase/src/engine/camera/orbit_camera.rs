use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    DAMPING_FACTOR, MAX_DISTANCE, MAX_POLAR_ANGLE, MIN_DISTANCE, MIN_POLAR_ANGLE, PAN_SPEED,
    ROTATE_SPEED, ZOOM_STEP,
};

/// Damped orbit around a target point, with distance and polar clamps.
///
/// Polar angle is measured from +Y, azimuth around +Y starting at +Z.
/// Input accumulates into velocities; each frame applies a `damping`
/// fraction of them and decays the rest.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    orbit_velocity: Vec2,
    pan_velocity: Vec3,
    zoom_scale: f32,
}

impl OrbitCamera {
    /// Orbit state reproducing a camera at `position` looking at `target`,
    /// clamped into the allowed range.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(f32::EPSILON);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        let mut camera = Self {
            target,
            radius,
            polar,
            azimuth,
            damping: DAMPING_FACTOR,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            min_polar: MIN_POLAR_ANGLE,
            max_polar: MAX_POLAR_ANGLE,
            orbit_velocity: Vec2::ZERO,
            pan_velocity: Vec3::ZERO,
            zoom_scale: 1.0,
        };
        camera.clamp();
        camera
    }

    /// Drag by `delta` pixels: x orbits around Y, y tilts the polar angle.
    pub fn rotate(&mut self, delta: Vec2) {
        self.orbit_velocity += Vec2::new(-delta.x, -delta.y) * ROTATE_SPEED;
    }

    /// Slide the target in the view plane by `delta` pixels.
    pub fn pan(&mut self, delta: Vec2, right: Vec3, up: Vec3) {
        let distance_scale = self.radius * PAN_SPEED;
        self.pan_velocity += (-right * delta.x + up * delta.y) * distance_scale;
    }

    /// Positive `lines` move towards the target.
    pub fn zoom(&mut self, lines: f32) {
        self.zoom_scale *= ZOOM_STEP.powf(lines);
    }

    /// Advance one frame and return the eye position.
    pub fn update(&mut self) -> Vec3 {
        self.azimuth += self.orbit_velocity.x * self.damping;
        self.polar += self.orbit_velocity.y * self.damping;
        self.target += self.pan_velocity * self.damping;
        self.radius *= self.zoom_scale;
        self.zoom_scale = 1.0;

        self.orbit_velocity *= 1.0 - self.damping;
        self.pan_velocity *= 1.0 - self.damping;

        self.clamp();
        self.eye()
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + Vec3::new(
                sin_polar * sin_azimuth,
                cos_polar,
                sin_polar * cos_azimuth,
            ) * self.radius
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    fn clamp(&mut self) {
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        self.polar = self.polar.clamp(self.min_polar, self.max_polar);
    }
}

/// Left drag orbits, right drag pans, wheel zooms.
///
/// Input is ignored while any UI node is hovered or pressed; damping still
/// runs so a drag in progress settles.
pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    interactions: Query<&Interaction>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    if interactions
        .iter()
        .any(|interaction| *interaction != Interaction::None)
    {
        mouse_motion.clear();
        scroll_events.clear();
        orbit.update();
        *camera_transform = orbit.transform();
        return;
    }

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(mouse_delta);
        } else if mouse_button.pressed(MouseButton::Right) {
            let right = camera_transform.right().as_vec3();
            let up = camera_transform.up().as_vec3();
            orbit.pan(mouse_delta, right, up);
        }
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }

    orbit.update();
    *camera_transform = orbit.transform();
}
