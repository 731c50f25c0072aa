//! Car showcase: catalog navigation, model lifecycle and the specs panel.
//!
//! ## Flow
//!
//! ```text
//! SelectionEvent (button / key / DOM / RPC)
//!   └─> CarSelection wraps the index ──> LoadModelRequest
//!         └─> ModelLifecycle::begin retires the shown car, opens a generation
//!               └─> SceneRoot spawned hidden, glTF fetched
//!                     ├─> fetch failed ──────────────> LoadOutcome::Failed
//!                     └─> SceneInstanceReady
//!                           └─> normalise + material override + reveal
//!                                 └─> LoadOutcome::Loaded ──> ShowcasePanel
//! ```
//!
//! Completions carry the generation that requested them. Anything older than
//! the latest request is despawned on arrival and never reaches the panel.

/// Page button listeners and DOM panel sync (wasm), plus the click queue.
pub mod dom;

/// Generation-tracked ownership of the displayed car and in-flight load.
pub mod lifecycle;

/// Systems that fetch, frame and reveal car models.
pub mod loader;

/// Platform-neutral specs panel view model.
pub mod panel;

/// Catalog index with wraparound and the selection events feeding it.
pub mod selection;

/// In-engine specs panel and navigation buttons (native only).
#[cfg(not(target_arch = "wasm32"))]
pub mod ui;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use dom::drain_dom_buttons;
use lifecycle::{LoadOutcome, ModelLifecycle};
use loader::{finalise_ready_models, mark_model_scene_ready, poll_pending_model, start_model_loads};
use panel::{ShowcasePanel, apply_load_outcomes, mark_panel_loading};
use selection::{LoadModelRequest, SelectionEvent, handle_selection_events, request_initial_model};

/// Registers selection, model lifecycle and panel systems.
pub struct ShowcasePlugin;

impl Plugin for ShowcasePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelLifecycle>()
            .init_resource::<ShowcasePanel>()
            .add_event::<SelectionEvent>()
            .add_event::<LoadModelRequest>()
            .add_event::<LoadOutcome>()
            .add_observer(mark_model_scene_ready)
            .add_systems(OnEnter(AppState::Running), request_initial_model)
            .add_systems(
                Update,
                (
                    drain_dom_buttons,
                    handle_selection_events,
                    mark_panel_loading,
                    start_model_loads,
                    poll_pending_model,
                    finalise_ready_models,
                    apply_load_outcomes,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            );

        #[cfg(target_arch = "wasm32")]
        {
            app.add_systems(Startup, dom::setup_dom_buttons)
                .add_systems(Update, dom::sync_dom_panel);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(Startup, ui::spawn_showcase_ui).add_systems(
                Update,
                (
                    ui::handle_navigation_buttons,
                    ui::handle_navigation_keys,
                    ui::sync_native_panel,
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::shipped_catalog;
    use crate::showcase::lifecycle::{LoadPhase, ShowcaseModel};
    use crate::showcase::loader::ModelSceneReady;
    use crate::showcase::panel::PanelStatus;
    use crate::showcase::selection::{CarSelection, SelectionCommand, SelectionSource};
    use bevy::gltf::Gltf;
    use constants::render_settings::{CAR_MATERIAL_OVERRIDE, TARGET_MODEL_SIZE};

    /// Headless app running the lifecycle chain. No glTF loader is
    /// registered, so every real fetch fails; fetch polling is left out
    /// unless a test wants to observe that failure.
    fn showcase_app() -> App {
        lifecycle_app(false)
    }

    fn lifecycle_app(poll_fetches: bool) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_asset::<Scene>()
            .init_asset::<Gltf>()
            .insert_resource(shipped_catalog())
            .insert_resource(CarSelection::new(shipped_catalog().len()))
            .init_resource::<ModelLifecycle>()
            .init_resource::<ShowcasePanel>()
            .add_event::<SelectionEvent>()
            .add_event::<LoadModelRequest>()
            .add_event::<LoadOutcome>();

        app.add_systems(
            Update,
            (
                handle_selection_events,
                mark_panel_loading,
                start_model_loads,
                poll_pending_model.run_if(move || poll_fetches),
                finalise_ready_models,
                apply_load_outcomes,
            )
                .chain(),
        );
        app
    }

    /// Run frames until the in-flight load settles. Asset failures arrive
    /// from the IO task pool, so this may take a few frames.
    fn settle(app: &mut App) {
        for _ in 0..500 {
            app.update();
            if app.world().resource::<ModelLifecycle>().phase() == LoadPhase::Idle {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        panic!("load never settled");
    }

    /// Stand in for the scene spawner: hang a 2×1×4 box with a metal-free
    /// material under the pending root and flag it ready.
    fn complete_pending_load(app: &mut App) -> Entity {
        let root = app
            .world()
            .resource::<ModelLifecycle>()
            .pending()
            .map(|pending| pending.root)
            .expect("a load should be in flight");

        let world = app.world_mut();
        let mesh = world
            .resource_mut::<Assets<Mesh>>()
            .add(Cuboid::new(2.0, 1.0, 4.0));
        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                metallic: 0.0,
                perceptual_roughness: 1.0,
                ..default()
            });
        world.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_xyz(3.0, 0.0, 0.0),
            ChildOf(root),
        ));
        world.entity_mut(root).insert(ModelSceneReady);

        app.update();
        root
    }

    fn press(app: &mut App, command: SelectionCommand) {
        app.world_mut().send_event(SelectionEvent {
            command,
            source: SelectionSource::Button,
        });
        app.update();
    }

    fn model_roots(app: &mut App) -> Vec<Entity> {
        let mut query = app
            .world_mut()
            .query_filtered::<Entity, With<ShowcaseModel>>();
        query.iter(app.world()).collect()
    }

    #[test]
    fn cycling_the_catalog_updates_the_panel_and_wraps() {
        let mut app = showcase_app();
        press(&mut app, SelectionCommand::Select(0));
        complete_pending_load(&mut app);
        assert_eq!(app.world().resource::<ShowcasePanel>().name, "M 5-SERIES");

        let mut names = Vec::new();
        for _ in 0..5 {
            press(&mut app, SelectionCommand::Next);
            complete_pending_load(&mut app);
            names.push(app.world().resource::<ShowcasePanel>().name.clone());
        }

        assert_eq!(
            names,
            ["REVUELTO", "GT3 RS", "SKYLINE R34", "SRT HELLCAT", "M 5-SERIES"]
        );
        assert_eq!(app.world().resource::<CarSelection>().index(), 0);
        assert_eq!(model_roots(&mut app).len(), 1);
    }

    #[test]
    fn previous_from_first_car_shows_the_last() {
        let mut app = showcase_app();
        press(&mut app, SelectionCommand::Previous);
        complete_pending_load(&mut app);

        let panel = app.world().resource::<ShowcasePanel>();
        assert_eq!(panel.index, Some(4));
        assert_eq!(panel.name, "SRT HELLCAT");
    }

    #[test]
    fn loaded_car_is_normalised_restyled_and_revealed() {
        let mut app = showcase_app();
        press(&mut app, SelectionCommand::Select(2));

        let root = app.world().resource::<ModelLifecycle>().pending().map(|p| p.root);
        let root = root.expect("pending load");
        assert_eq!(app.world().get::<Visibility>(root), Some(&Visibility::Hidden));

        complete_pending_load(&mut app);

        let world = app.world();
        let transform = world.get::<Transform>(root).expect("root transform");
        // Largest side is 4.0.
        let expected_scale = TARGET_MODEL_SIZE / 4.0;
        assert!((transform.scale.x - expected_scale).abs() < 1e-5);
        // Box centre sits at x = 3 before scaling.
        assert!((transform.translation.x + 3.0 * expected_scale).abs() < 1e-4);
        assert_eq!(world.get::<Visibility>(root), Some(&Visibility::Inherited));

        let materials = world.resource::<Assets<StandardMaterial>>();
        let (_, material) = materials.iter().next().expect("material");
        assert_eq!(material.metallic, CAR_MATERIAL_OVERRIDE.metallic);
        assert_eq!(
            material.perceptual_roughness,
            CAR_MATERIAL_OVERRIDE.perceptual_roughness
        );

        let lifecycle = world.resource::<ModelLifecycle>();
        assert_eq!(lifecycle.active().map(|a| a.root), Some(root));
        assert_eq!(
            world.resource::<ShowcasePanel>().status,
            PanelStatus::Ready
        );
    }

    #[test]
    fn switching_despawns_the_previous_hierarchy() {
        let mut app = showcase_app();
        press(&mut app, SelectionCommand::Select(0));
        let first = complete_pending_load(&mut app);
        let first_child = app
            .world()
            .get::<Children>(first)
            .map(|children| children[0])
            .expect("mesh child");

        press(&mut app, SelectionCommand::Next);

        assert!(app.world().get_entity(first).is_err());
        assert!(app.world().get_entity(first_child).is_err());
        assert!(app.world().resource::<ModelLifecycle>().active().is_none());
    }

    #[test]
    fn loading_the_same_car_twice_matches_loading_it_once() {
        let mut app = showcase_app();
        press(&mut app, SelectionCommand::Select(3));
        complete_pending_load(&mut app);
        let once = app.world().resource::<ShowcasePanel>().clone();

        press(&mut app, SelectionCommand::Retry);
        complete_pending_load(&mut app);

        assert_eq!(*app.world().resource::<ShowcasePanel>(), once);
        assert_eq!(model_roots(&mut app).len(), 1);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut app = showcase_app();
        press(&mut app, SelectionCommand::Select(1));
        let slow = app
            .world()
            .resource::<ModelLifecycle>()
            .pending()
            .map(|p| p.root)
            .expect("pending load");

        // A second request retires the first before it completes.
        press(&mut app, SelectionCommand::Select(3));
        assert!(app.world().get_entity(slow).is_err());

        complete_pending_load(&mut app);
        let panel = app.world().resource::<ShowcasePanel>();
        assert_eq!(panel.name, "SKYLINE R34");
        assert_eq!(model_roots(&mut app).len(), 1);
    }

    #[test]
    fn scene_without_meshes_fails_and_leaves_viewport_empty() {
        let mut app = showcase_app();
        press(&mut app, SelectionCommand::Select(0));
        let root = app
            .world()
            .resource::<ModelLifecycle>()
            .pending()
            .map(|p| p.root)
            .expect("pending load");

        app.world_mut().entity_mut(root).insert(ModelSceneReady);
        app.update();

        assert!(app.world().get_entity(root).is_err());
        let panel = app.world().resource::<ShowcasePanel>();
        assert_eq!(panel.name, "M 5-SERIES");
        assert!(matches!(panel.status, PanelStatus::LoadFailed { .. }));
        assert!(app.world().resource::<ModelLifecycle>().active().is_none());
    }

    #[test]
    fn failed_fetch_empties_viewport_and_retry_opens_a_new_generation() {
        let mut app = lifecycle_app(true);
        press(&mut app, SelectionCommand::Select(1));
        let (generation, root) = app
            .world()
            .resource::<ModelLifecycle>()
            .pending()
            .map(|p| (p.generation, p.root))
            .expect("pending load");

        settle(&mut app);

        assert!(app.world().get_entity(root).is_err());
        assert!(app.world().resource::<ModelLifecycle>().active().is_none());
        assert!(model_roots(&mut app).is_empty());
        let panel = app.world().resource::<ShowcasePanel>();
        assert_eq!(panel.name, "REVUELTO");
        assert!(matches!(
            &panel.status,
            PanelStatus::LoadFailed { name, .. } if name == "REVUELTO"
        ));

        press(&mut app, SelectionCommand::Retry);
        let lifecycle = app.world().resource::<ModelLifecycle>();
        assert_eq!(lifecycle.phase(), LoadPhase::Loading);
        assert!(lifecycle.generation() > generation);
        assert!(matches!(
            app.world().resource::<ShowcasePanel>().status,
            PanelStatus::Loading { .. }
        ));

        settle(&mut app);
        assert!(matches!(
            app.world().resource::<ShowcasePanel>().status,
            PanelStatus::LoadFailed { .. }
        ));
    }
}
