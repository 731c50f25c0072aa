use bevy::math::Vec3;

/// Illuminance (lux) a directional light of intensity 1.0 produces.
pub const DIRECTIONAL_LUX_PER_INTENSITY: f32 = 10_000.0;

/// Ambient brightness a fill of intensity 1.0 produces.
pub const AMBIENT_BRIGHTNESS_PER_INTENSITY: f32 = 500.0;

/// A directional light aimed at the origin from `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLightSpec {
    pub name: &'static str,
    /// 0xRRGGBB
    pub colour: u32,
    pub intensity: f32,
    pub position: Vec3,
    pub casts_shadows: bool,
}

/// Soft white fill.
pub const AMBIENT_COLOUR: u32 = 0xffffff;
pub const AMBIENT_INTENSITY: f32 = 0.55;

/// Key light as shipped: zero intensity, near-black colour, placed at the
/// origin so it has no direction. Kept as-is pending product review.
pub const KEY_LIGHT: DirectionalLightSpec = DirectionalLightSpec {
    name: "KeyLight",
    colour: 0x00000f,
    intensity: 0.0,
    position: Vec3::ZERO,
    casts_shadows: true,
};

/// Rim light for edges.
pub const RIM_LIGHT: DirectionalLightSpec = DirectionalLightSpec {
    name: "RimLight",
    colour: 0xffffff,
    intensity: 0.4,
    position: Vec3::new(-10.0, 6.0, -4.0),
    casts_shadows: false,
};

/// Bounce light from below the floor.
pub const BOUNCE_LIGHT: DirectionalLightSpec = DirectionalLightSpec {
    name: "BounceLight",
    colour: 0xffffff,
    intensity: 0.9,
    position: Vec3::new(0.0, -5.0, 0.0),
    casts_shadows: false,
};

pub const STUDIO_LIGHTS: [DirectionalLightSpec; 3] = [KEY_LIGHT, RIM_LIGHT, BOUNCE_LIGHT];
