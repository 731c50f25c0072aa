use bevy::asset::AssetMetaCheck;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::render::camera::Exposure;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::camera::{FAR_PLANE, FIELD_OF_VIEW_DEGREES, NEAR_PLANE, START_POSITION};
use constants::render_settings::{
    CAR_MATERIAL_OVERRIDE, ENVIRONMENT_MAP_INTENSITY, TONE_MAPPING_EXPOSURE,
};

use crate::engine::assets::catalog::ShowcaseCatalog;
use crate::engine::camera::orbit_camera::{OrbitCamera, camera_controller};
use crate::engine::core::app_state::{AppState, log_state_transitions};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::catalog_loader::{CatalogLoader, load_catalog_system, start_loading};
use crate::engine::loading::environment_loader::{EnvironmentMaps, report_environment_loading};
use crate::engine::scene::lighting::spawn_lighting;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::showcase::ShowcasePlugin;

const LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn,car_showcase=debug";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers ShowcaseCatalog as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ShowcaseCatalog>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(ShowcasePlugin)
        .init_resource::<CatalogLoader>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            load_catalog_system.run_if(in_state(AppState::LoadingCatalog)),
        )
        .add_systems(
            Update,
            (
                camera_controller,
                report_environment_loading,
                log_state_transitions,
            ),
        );

    app
}

/// Linear exposure multiplier to EV100, relative to Bevy's Blender-matched
/// default. Doubling the multiplier is one stop brighter.
pub fn exposure_ev100(multiplier: f32) -> f32 {
    Exposure::EV100_BLENDER - multiplier.log2()
}

fn spawn_camera(commands: &mut Commands, environment: &EnvironmentMaps) {
    let orbit = OrbitCamera::from_position(START_POSITION, Vec3::ZERO);

    commands.spawn((
        Name::new("ShowcaseCamera"),
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        Tonemapping::AcesFitted,
        Exposure {
            ev100: exposure_ev100(TONE_MAPPING_EXPOSURE),
        },
        Msaa::Sample4,
        EnvironmentMapLight {
            diffuse_map: environment.diffuse.clone(),
            specular_map: environment.specular.clone(),
            intensity: ENVIRONMENT_MAP_INTENSITY * CAR_MATERIAL_OVERRIDE.environment_intensity,
            ..default()
        },
        orbit.transform(),
    ));

    commands.insert_resource(orbit);
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("=== CAR SHOWCASE ===");

    let environment = EnvironmentMaps::load(&asset_server);
    spawn_lighting(&mut commands);
    spawn_camera(&mut commands, &environment);
    commands.insert_resource(environment);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
