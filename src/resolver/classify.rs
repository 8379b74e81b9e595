//! Name classification.
//!
//! Lookup order:
//!
//! 1. Custom catalog, exact name
//! 2. Status registry, when statuses are not customized (`StatusEffectMode::None`)
//! 3. Built-in catalog, exact name
//!
//! A status name shadows a built-in effect of the same name so toggling
//! "Prone" always toggles the platform status.

use crate::effects::{CatalogSource, EffectCatalog, EffectDefinition};
use crate::host::StatusEffectMode;
use crate::status::{StatusDescriptor, StatusRegistry};

/// What a name refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    Status(StatusDescriptor),
    Catalog(EffectDefinition),
    NotFound,
}

impl Classification {
    #[must_use]
    pub fn is_found(&self) -> bool {
        !matches!(self, Classification::NotFound)
    }
}

/// Classify `name` against the catalog and the status registry.
#[must_use]
pub fn classify(
    name: &str,
    catalog: &EffectCatalog,
    statuses: &StatusRegistry,
    mode: StatusEffectMode,
    exhaustion_id: &str,
) -> Classification {
    if let Some(definition) = catalog.find_custom(name) {
        return Classification::Catalog(definition.clone());
    }

    if mode == StatusEffectMode::None {
        if let Some(descriptor) = statuses.describe(name, exhaustion_id) {
            return Classification::Status(descriptor);
        }
    }

    match catalog.find_with_source(name) {
        Some((definition, CatalogSource::BuiltIn)) => Classification::Catalog(definition.clone()),
        _ => Classification::NotFound,
    }
}
