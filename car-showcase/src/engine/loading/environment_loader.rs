use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::paths::{ENVIRONMENT_DIFFUSE_MAP, ENVIRONMENT_SPECULAR_MAP};

/// Prefiltered studio cubemaps lighting every car. Loaded once at startup
/// and shared by the camera's environment map light.
#[derive(Resource, Debug, Clone)]
pub struct EnvironmentMaps {
    pub diffuse: Handle<Image>,
    pub specular: Handle<Image>,
    reported: bool,
}

impl EnvironmentMaps {
    pub fn load(asset_server: &AssetServer) -> Self {
        info!("→ Loading studio environment");
        Self {
            diffuse: asset_server.load(ENVIRONMENT_DIFFUSE_MAP),
            specular: asset_server.load(ENVIRONMENT_SPECULAR_MAP),
            reported: false,
        }
    }
}

/// Log once when the environment is ready or could not be loaded. The scene
/// still renders without it, lit by the studio lights alone.
pub fn report_environment_loading(
    mut environment: ResMut<EnvironmentMaps>,
    asset_server: Res<AssetServer>,
) {
    if environment.reported {
        return;
    }

    let states = [
        (ENVIRONMENT_DIFFUSE_MAP, asset_server.get_load_state(&environment.diffuse)),
        (ENVIRONMENT_SPECULAR_MAP, asset_server.get_load_state(&environment.specular)),
    ];

    for (path, state) in &states {
        if let Some(LoadState::Failed(error)) = state {
            warn!("Studio environment map {} failed: {}", path, error);
            environment.reported = true;
            return;
        }
    }

    if states
        .iter()
        .all(|(_, state)| matches!(state, Some(LoadState::Loaded)))
    {
        info!("✓ Studio environment loaded");
        environment.reported = true;
    }
}
