use bevy::prelude::*;
use serde::Serialize;

use crate::engine::assets::catalog::{CatalogEntry, ShowcaseCatalog};
use crate::showcase::lifecycle::{LoadOutcome, ModelLifecycle};
use crate::showcase::selection::LoadModelRequest;

/// What the panel's status line reports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelStatus {
    #[default]
    Idle,
    Loading {
        name: String,
    },
    Ready,
    LoadFailed {
        name: String,
        reason: String,
    },
    CatalogUnavailable {
        reason: String,
    },
}

impl PanelStatus {
    /// Short user-facing line; empty once a car is on screen.
    pub fn message(&self) -> String {
        match self {
            Self::Idle => "Loading catalog…".to_string(),
            Self::Loading { name } => format!("Loading {name}…"),
            Self::Ready => String::new(),
            Self::LoadFailed { name, .. } => format!("Could not load {name}"),
            Self::CatalogUnavailable { .. } => "Car catalog unavailable".to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::LoadFailed { .. } | Self::CatalogUnavailable { .. })
    }
}

/// Platform-neutral view model of the specs panel. The native UI and the DOM
/// bridge both render from this resource.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShowcasePanel {
    pub index: Option<usize>,
    pub name: String,
    pub logo_path: String,
    pub price: String,
    pub top_speed: String,
    pub power: String,
    pub gearbox: String,
    pub status: PanelStatus,
}

impl ShowcasePanel {
    pub fn show_entry(&mut self, index: usize, entry: &CatalogEntry) {
        self.index = Some(index);
        self.name.clone_from(&entry.name);
        self.logo_path.clone_from(&entry.logo_path);
        self.price.clone_from(&entry.specs.price);
        self.top_speed.clone_from(&entry.specs.top_speed);
        self.power.clone_from(&entry.specs.power);
        self.gearbox.clone_from(&entry.specs.gearbox);
    }
}

pub fn mark_panel_loading(
    mut requests: EventReader<LoadModelRequest>,
    catalog: Res<ShowcaseCatalog>,
    mut panel: ResMut<ShowcasePanel>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };
    if let Some(entry) = catalog.get(request.index) {
        panel.status = PanelStatus::Loading {
            name: entry.name.clone(),
        };
    }
}

/// Reflect finished loads in the panel. Outcomes from superseded
/// generations are ignored.
pub fn apply_load_outcomes(
    mut outcomes: EventReader<LoadOutcome>,
    lifecycle: Res<ModelLifecycle>,
    catalog: Res<ShowcaseCatalog>,
    mut panel: ResMut<ShowcasePanel>,
) {
    for outcome in outcomes.read() {
        let (generation, status) = match outcome {
            LoadOutcome::Loaded { generation, .. } => (*generation, PanelStatus::Ready),
            LoadOutcome::Failed {
                index,
                generation,
                reason,
            } => {
                let name = catalog
                    .get(*index)
                    .map_or_else(|| format!("car {index}"), |entry| entry.name.clone());
                (
                    *generation,
                    PanelStatus::LoadFailed {
                        name,
                        reason: reason.to_string(),
                    },
                )
            }
        };

        if generation != lifecycle.generation() {
            continue;
        }

        if let Some(entry) = catalog.get(outcome.index()) {
            panel.show_entry(outcome.index(), entry);
        }
        panel.status = status;
    }
}
