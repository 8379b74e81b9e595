//! Effect catalog for definition lookup.
//!
//! The `EffectCatalog` stores two sets of definitions: the built-in set
//! shipped with the crate and the custom set authored by users. Lookup by
//! name prefers custom over built-in, so a user can shadow a shipped effect.
//!
//! The catalog is built once per process and shared by `Arc` between the
//! resolver and the applier.

use rustc_hash::FxHashMap;

use super::definition::EffectDefinition;

/// Which half of the catalog a definition came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogSource {
    BuiltIn,
    Custom,
}

/// Catalog of effect definitions.
///
/// ## Example
///
/// ```
/// use convenient_effects::effects::{EffectCatalog, EffectDefinition};
///
/// let mut catalog = EffectCatalog::new();
/// catalog.register(EffectDefinition::new("Bless"));
/// catalog.register_custom(EffectDefinition::new("Bless").with_description("house rule"));
///
/// let found = catalog.find("Bless").unwrap();
/// assert!(found.is_custom);
/// assert_eq!(found.description, "house rule");
/// ```
#[derive(Clone, Debug, Default)]
pub struct EffectCatalog {
    builtin: FxHashMap<String, EffectDefinition>,
    custom: FxHashMap<String, EffectDefinition>,
}

impl EffectCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the default built-in definitions.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for definition in super::builtin::definitions() {
            catalog.register(definition);
        }
        catalog
    }

    /// Register a built-in definition.
    ///
    /// Panics if a built-in definition with the same name already exists.
    pub fn register(&mut self, definition: EffectDefinition) {
        if self.builtin.contains_key(&definition.name) {
            panic!("Effect {:?} already registered", definition.name);
        }
        self.builtin.insert(definition.name.clone(), definition);
    }

    /// Register or replace a custom definition.
    ///
    /// The definition is stamped `is_custom`. Returns the replaced definition.
    pub fn register_custom(&mut self, mut definition: EffectDefinition) -> Option<EffectDefinition> {
        definition.is_custom = true;
        self.custom.insert(definition.name.clone(), definition)
    }

    /// Remove a custom definition.
    pub fn remove_custom(&mut self, name: &str) -> Option<EffectDefinition> {
        self.custom.remove(name)
    }

    /// Find a definition by exact name, custom first.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&EffectDefinition> {
        self.find_custom(name).or_else(|| self.find_builtin(name))
    }

    /// Find a definition and report which half it came from.
    #[must_use]
    pub fn find_with_source(&self, name: &str) -> Option<(&EffectDefinition, CatalogSource)> {
        self.find_custom(name)
            .map(|d| (d, CatalogSource::Custom))
            .or_else(|| self.find_builtin(name).map(|d| (d, CatalogSource::BuiltIn)))
    }

    /// Find a custom definition by exact name.
    #[must_use]
    pub fn find_custom(&self, name: &str) -> Option<&EffectDefinition> {
        self.custom.get(name)
    }

    /// Find a built-in definition by exact name.
    #[must_use]
    pub fn find_builtin(&self, name: &str) -> Option<&EffectDefinition> {
        self.builtin.get(name)
    }

    /// Check if a name resolves in either half.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Number of distinct names across both halves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builtin.len()
            + self
                .custom
                .keys()
                .filter(|name| !self.builtin.contains_key(*name))
                .count()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builtin.is_empty() && self.custom.is_empty()
    }

    /// All visible definitions (custom shadowing built-in), sorted by name.
    pub fn definitions(&self) -> Vec<&EffectDefinition> {
        let mut all: Vec<_> = self
            .custom
            .values()
            .chain(
                self.builtin
                    .values()
                    .filter(|d| !self.custom.contains_key(&d.name)),
            )
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }
}
