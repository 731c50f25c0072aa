/// Largest bounding-box dimension a showcased car is scaled to.
pub const TARGET_MODEL_SIZE: f32 = 7.5;

/// General-purpose framing size for models other than cars.
pub const DEFAULT_TARGET_SIZE: f32 = 8.0;

/// Fixed surface parameters forced onto every mesh of a loaded car.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialOverride {
    pub metallic: f32,
    pub perceptual_roughness: f32,
    /// Multiplier on the studio environment map contribution.
    pub environment_intensity: f32,
    pub casts_shadows: bool,
}

pub const CAR_MATERIAL_OVERRIDE: MaterialOverride = MaterialOverride {
    metallic: 0.5,
    perceptual_roughness: 0.18,
    environment_intensity: 1.0,
    casts_shadows: true,
};

/// Linear exposure multiplier applied before ACES tone mapping.
pub const TONE_MAPPING_EXPOSURE: f32 = 1.45;

/// Environment map light intensity (cd/m²) at an environment multiplier of 1.0.
pub const ENVIRONMENT_MAP_INTENSITY: f32 = 1500.0;
