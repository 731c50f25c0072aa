use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::paths::CATALOG_PATH;

use crate::engine::assets::catalog::ShowcaseCatalog;
use crate::engine::core::app_state::AppState;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::showcase::panel::{PanelStatus, ShowcasePanel};
use crate::showcase::selection::CarSelection;

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<ShowcaseCatalog>>,
}

// Start the loading process
pub fn start_loading(mut catalog_loader: ResMut<CatalogLoader>, asset_server: Res<AssetServer>) {
    info!("→ Loading catalog from {}", CATALOG_PATH);
    catalog_loader.handle = Some(asset_server.load(CATALOG_PATH));
}

/// Publish the catalog as a resource once parsed and valid, then start
/// running. A missing, unparsable or invalid catalog parks the app in
/// `CatalogFailed`.
pub fn load_catalog_system(
    catalog_loader: Res<CatalogLoader>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
    mut panel: ResMut<ShowcasePanel>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    asset_server: Res<AssetServer>,
    catalogs: Res<Assets<ShowcaseCatalog>>,
) {
    let Some(ref handle) = catalog_loader.handle else {
        return;
    };

    let result = match catalogs.get(handle) {
        Some(catalog) => catalog.validate().map(|()| catalog.clone()).map_err(|e| e.to_string()),
        None => match asset_server.get_load_state(handle) {
            Some(LoadState::Failed(error)) => Err(error.to_string()),
            _ => return,
        },
    };

    match result {
        Ok(catalog) => {
            info!("✓ Catalog loaded with {} cars", catalog.len());
            rpc_interface.send_notification(
                "catalog_loaded",
                serde_json::json!({
                    "count": catalog.len(),
                    "cars": catalog.cars,
                }),
            );
            commands.insert_resource(CarSelection::new(catalog.len()));
            commands.insert_resource(catalog);
            info!("→ Transitioning to Running state");
            next_state.set(AppState::Running);
        }
        Err(reason) => {
            error!("✗ Catalog {} unusable: {}", CATALOG_PATH, reason);
            panel.status = PanelStatus::CatalogUnavailable { reason };
            next_state.set(AppState::CatalogFailed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::shipped_catalog;
    use bevy::state::app::StatesPlugin;

    fn loader_app(catalog: ShowcaseCatalog) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .init_asset::<ShowcaseCatalog>()
            .init_state::<AppState>()
            .init_resource::<ShowcasePanel>()
            .init_resource::<WebRpcInterface>()
            .add_systems(
                Update,
                load_catalog_system.run_if(in_state(AppState::LoadingCatalog)),
            );

        let handle = app
            .world_mut()
            .resource_mut::<Assets<ShowcaseCatalog>>()
            .add(catalog);
        app.insert_resource(CatalogLoader {
            handle: Some(handle),
        });
        app
    }

    #[test]
    fn valid_catalog_enters_running_with_selection_at_first_car() {
        let mut app = loader_app(shipped_catalog());
        app.update();
        app.update();

        assert_eq!(
            app.world().resource::<State<AppState>>().get(),
            &AppState::Running
        );
        let selection = app.world().resource::<CarSelection>();
        assert_eq!((selection.index(), selection.len()), (0, 5));
        assert_eq!(app.world().resource::<ShowcaseCatalog>().len(), 5);
    }

    #[test]
    fn empty_catalog_is_reported_and_never_runs() {
        let mut app = loader_app(ShowcaseCatalog { cars: Vec::new() });
        app.update();
        app.update();

        assert_eq!(
            app.world().resource::<State<AppState>>().get(),
            &AppState::CatalogFailed
        );
        assert!(app.world().get_resource::<CarSelection>().is_none());
        assert_eq!(
            app.world().resource::<ShowcasePanel>().status,
            PanelStatus::CatalogUnavailable {
                reason: "catalog contains no cars".to_string()
            }
        );
    }
}
