use bevy::prelude::*;
use constants::lighting::{
    AMBIENT_BRIGHTNESS_PER_INTENSITY, AMBIENT_COLOUR, AMBIENT_INTENSITY,
    DIRECTIONAL_LUX_PER_INTENSITY, DirectionalLightSpec, STUDIO_LIGHTS,
};

/// Marker for lights belonging to the studio rig.
#[derive(Component)]
pub struct StudioLight;

/// 0xRRGGBB to an sRGB colour.
pub fn hex_colour(hex: u32) -> Color {
    Color::srgb_u8(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

/// Place a directional light at `light.position` looking at the origin.
///
/// A light placed exactly at the origin has no direction; it keeps the
/// default forward orientation rather than being dropped.
pub fn directional_light_bundle(light: &DirectionalLightSpec) -> impl Bundle {
    let transform = if light.position.length_squared() > f32::EPSILON {
        Transform::from_translation(light.position).looking_at(Vec3::ZERO, Vec3::Y)
    } else {
        Transform::from_translation(light.position)
    };

    (
        DirectionalLight {
            color: hex_colour(light.colour),
            illuminance: light.intensity * DIRECTIONAL_LUX_PER_INTENSITY,
            shadows_enabled: light.casts_shadows,
            ..default()
        },
        transform,
        StudioLight,
        Name::new(light.name),
    )
}

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: hex_colour(AMBIENT_COLOUR),
        brightness: AMBIENT_INTENSITY * AMBIENT_BRIGHTNESS_PER_INTENSITY,
        ..default()
    });

    for light in &STUDIO_LIGHTS {
        if light.intensity <= 0.0 {
            warn!(
                "{} has zero intensity and contributes no light; kept as configured",
                light.name
            );
        }
        commands.spawn(directional_light_bundle(light));
    }
}
