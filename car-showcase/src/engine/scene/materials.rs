use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use constants::render_settings::MaterialOverride;

/// Force the showcase surface parameters onto every mesh in `entities`.
///
/// glTF materials are shared between primitives, so the same asset may be
/// visited more than once; the override is idempotent. Environment intensity
/// has no per-material slot in `StandardMaterial` and is applied on the
/// camera's `EnvironmentMapLight` instead.
pub fn apply_material_override(
    entities: impl IntoIterator<Item = Entity>,
    mesh_materials: &Query<&MeshMaterial3d<StandardMaterial>>,
    materials: &mut Assets<StandardMaterial>,
    commands: &mut Commands,
    settings: &MaterialOverride,
) -> usize {
    let mut overridden = 0;

    for entity in entities {
        let Ok(handle) = mesh_materials.get(entity) else {
            continue;
        };

        if let Some(material) = materials.get_mut(&handle.0) {
            material.metallic = settings.metallic;
            material.perceptual_roughness = settings.perceptual_roughness;
        }

        if settings.casts_shadows {
            commands.entity(entity).remove::<NotShadowCaster>();
        } else {
            commands.entity(entity).insert(NotShadowCaster);
        }
        overridden += 1;
    }

    overridden
}
