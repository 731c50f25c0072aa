use bevy::asset::LoadState;
use bevy::gltf::{Gltf, GltfAssetLabel};
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::paths::MODEL_SCENE_INDEX;
use constants::render_settings::{CAR_MATERIAL_OVERRIDE, TARGET_MODEL_SIZE};

use crate::engine::assets::catalog::ShowcaseCatalog;
use crate::engine::scene::materials::apply_material_override;
use crate::engine::scene::normalise::{
    collect_model_bounds, descendants_with_transforms, normalise_transform,
};
use crate::showcase::lifecycle::{
    LoadFailure, LoadOutcome, ModelHandles, ModelLifecycle, PendingLoad, ShowcaseModel,
};
use crate::showcase::selection::LoadModelRequest;

/// Marks a showcase scene root whose instance has finished spawning.
#[derive(Component, Debug)]
pub struct ModelSceneReady;

/// Retire the current car and start fetching the requested one.
///
/// Only the last request of a frame is honoured; earlier ones would be
/// retired immediately anyway.
pub fn start_model_loads(
    mut commands: Commands,
    mut requests: EventReader<LoadModelRequest>,
    mut lifecycle: ResMut<ModelLifecycle>,
    mut outcomes: EventWriter<LoadOutcome>,
    catalog: Res<ShowcaseCatalog>,
    asset_server: Res<AssetServer>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    let Some(entry) = catalog.get(request.index) else {
        outcomes.write(LoadOutcome::Failed {
            index: request.index,
            generation: lifecycle.generation(),
            reason: LoadFailure::IndexOutOfRange {
                index: request.index,
                len: catalog.len(),
            },
        });
        return;
    };

    let ticket = lifecycle.begin();
    for root in &ticket.retired {
        commands.entity(*root).despawn();
    }

    let gltf: Handle<Gltf> = asset_server.load(entry.model_path.clone());
    let scene: Handle<Scene> =
        asset_server.load(GltfAssetLabel::Scene(MODEL_SCENE_INDEX).from_asset(entry.model_path.clone()));

    // Hidden until normalised so the car never flashes at native scale.
    let root = commands
        .spawn((
            Name::new(format!("Car: {}", entry.name)),
            ShowcaseModel {
                generation: ticket.generation,
                index: request.index,
            },
            SceneRoot(scene.clone()),
            Transform::IDENTITY,
            Visibility::Hidden,
        ))
        .id();

    lifecycle.track(PendingLoad {
        generation: ticket.generation,
        index: request.index,
        root,
        handles: ModelHandles { gltf, scene },
    });

    info!(
        "→ Loading {} from {} (generation {}, retired {})",
        entry.name,
        entry.model_path,
        ticket.generation,
        ticket.retired.len()
    );
}

/// Surface fetch/parse failures of the in-flight load.
pub fn poll_pending_model(
    mut commands: Commands,
    mut lifecycle: ResMut<ModelLifecycle>,
    mut outcomes: EventWriter<LoadOutcome>,
    catalog: Res<ShowcaseCatalog>,
    asset_server: Res<AssetServer>,
    scenes: Res<Assets<Scene>>,
) {
    let Some(pending) = lifecycle.pending() else {
        return;
    };
    let Some(entry) = catalog.get(pending.index) else {
        return;
    };

    let failure = match asset_server.get_load_state(&pending.handles.gltf) {
        Some(LoadState::Failed(error)) => Some(LoadFailure::Asset {
            path: entry.model_path.clone(),
            reason: error.to_string(),
        }),
        Some(LoadState::Loaded) if !scenes.contains(&pending.handles.scene) => {
            Some(LoadFailure::MissingScene {
                path: entry.model_path.clone(),
                scene: MODEL_SCENE_INDEX,
            })
        }
        _ => None,
    };

    let Some(reason) = failure else {
        return;
    };

    let generation = pending.generation;
    if let Some(failed) = lifecycle.fail(generation) {
        commands.entity(failed.root).despawn();
        error!("✗ Could not load {}: {}", entry.name, reason);
        outcomes.write(LoadOutcome::Failed {
            index: failed.index,
            generation,
            reason,
        });
    }
}

/// Flag showcase roots whose scene instance is in the world.
pub fn mark_model_scene_ready(
    trigger: Trigger<SceneInstanceReady>,
    models: Query<(), With<ShowcaseModel>>,
    mut commands: Commands,
) {
    let root = trigger.target();
    if models.contains(root) {
        commands.entity(root).insert(ModelSceneReady);
    }
}

/// Normalise, restyle and reveal a freshly spawned car, then promote it to
/// the active slot. Stale generations are despawned instead.
pub fn finalise_ready_models(
    mut commands: Commands,
    ready: Query<(Entity, &ShowcaseModel), Added<ModelSceneReady>>,
    mut lifecycle: ResMut<ModelLifecycle>,
    mut outcomes: EventWriter<LoadOutcome>,
    catalog: Res<ShowcaseCatalog>,
    children: Query<&Children>,
    transforms: Query<&Transform>,
    mesh_handles: Query<&Mesh3d>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    meshes: Res<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (root, model) in &ready {
        if !lifecycle.is_current(model.generation, root) {
            debug!(
                "Discarding stale car {} (generation {}, latest {})",
                model.index,
                model.generation,
                lifecycle.generation()
            );
            commands.entity(root).despawn();
            continue;
        }

        let Some(entry) = catalog.get(model.index) else {
            continue;
        };

        let normalised = collect_model_bounds(root, &children, &transforms, &mesh_handles, &meshes)
            .and_then(|bounds| normalise_transform(&bounds, TARGET_MODEL_SIZE));

        let Some(transform) = normalised else {
            if let Some(failed) = lifecycle.fail(model.generation) {
                commands.entity(failed.root).despawn();
            }
            let reason = LoadFailure::EmptyScene {
                path: entry.model_path.clone(),
            };
            error!("✗ Could not frame {}: {}", entry.name, reason);
            outcomes.write(LoadOutcome::Failed {
                index: model.index,
                generation: model.generation,
                reason,
            });
            continue;
        };

        let descendants = descendants_with_transforms(root, &children, &transforms)
            .into_iter()
            .map(|(entity, _)| entity);
        let restyled = apply_material_override(
            descendants,
            &mesh_materials,
            &mut materials,
            &mut commands,
            &CAR_MATERIAL_OVERRIDE,
        );

        commands
            .entity(root)
            .insert((transform, Visibility::Inherited));
        lifecycle.promote(model.generation, root);

        info!(
            "✓ Loaded {} (scale {:.4}, {} meshes restyled)",
            entry.name, transform.scale.x, restyled
        );
        outcomes.write(LoadOutcome::Loaded {
            index: model.index,
            generation: model.generation,
        });
    }
}
