use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display specs shown in the side panel. Values are preformatted strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSpecs {
    pub price: String,
    pub top_speed: String,
    pub power: String,
    pub gearbox: String,
}

/// One showcased car: display name, logo image, glTF binary and specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub logo_path: String,
    pub model_path: String,
    pub specs: CarSpecs,
}

/// Car catalog as a Bevy asset. Mirrors `catalog.json` exactly.
/// Entries are addressed by position; the order in the file is the
/// order the next/previous controls walk.
#[derive(Asset, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypePath, Resource)]
pub struct ShowcaseCatalog {
    pub cars: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog contains no cars")]
    Empty,
    #[error("catalog entry {index} has an empty {field}")]
    BlankField { index: usize, field: &'static str },
}

impl ShowcaseCatalog {
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.cars.get(index)
    }

    /// Reject catalogs the viewer cannot cycle through.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.cars.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, car) in self.cars.iter().enumerate() {
            let fields = [
                ("name", &car.name),
                ("logo_path", &car.logo_path),
                ("model_path", &car.model_path),
            ];
            if let Some((field, _)) = fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
                return Err(CatalogError::BlankField { index, field });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn shipped_catalog() -> ShowcaseCatalog {
    serde_json::from_str(include_str!("../../../assets/catalog.json"))
        .expect("shipped catalog.json should parse")
}
