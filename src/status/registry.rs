//! The platform's status vocabulary and status-effect factory.
//!
//! Statuses are platform-level conditions (Blinded, Prone, Exhaustion...)
//! addressable by id. Most carry a fixed identity token so that the one
//! instance on an actor can always be found by token; generic statuses
//! without a token are found by their single status id instead.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::EffectId;
use crate::effects::EffectData;

use super::descriptor::{ExhaustionChange, StatusDescriptor};
use super::parse::parse_status_name;

/// Token prefix of the standard condition set.
pub const STANDARD_TOKEN_PREFIX: &str = "dnd5e";

const STANDARD_CONDITIONS: &[(&str, &str)] = &[
    ("blinded", "Blinded"),
    ("charmed", "Charmed"),
    ("dead", "Dead"),
    ("deafened", "Deafened"),
    ("exhaustion", "Exhaustion"),
    ("frightened", "Frightened"),
    ("grappled", "Grappled"),
    ("incapacitated", "Incapacitated"),
    ("invisible", "Invisible"),
    ("paralyzed", "Paralyzed"),
    ("petrified", "Petrified"),
    ("poisoned", "Poisoned"),
    ("prone", "Prone"),
    ("restrained", "Restrained"),
    ("stunned", "Stunned"),
    ("unconscious", "Unconscious"),
];

const GENERIC_STATUSES: &[(&str, &str)] = &[
    ("bleeding", "Bleeding"),
    ("concentrating", "Concentrating"),
    ("flying", "Flying"),
    ("hiding", "Hiding"),
    ("marked", "Marked"),
];

/// One entry of the status vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffectConfig {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub fixed_token: Option<EffectId>,
}

impl StatusEffectConfig {
    /// Create a status without a fixed token.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            icon: format!("icons/svg/{id}.svg"),
            id,
            label: label.into(),
            fixed_token: None,
        }
    }

    /// Set a fixed identity token (builder pattern).
    #[must_use]
    pub fn with_token(mut self, token: EffectId) -> Self {
        self.fixed_token = Some(token);
        self
    }

    /// Set the icon (builder pattern).
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// Registry of platform statuses.
///
/// ## Example
///
/// ```
/// use convenient_effects::status::{ExhaustionChange, StatusRegistry};
///
/// let registry = StatusRegistry::with_defaults();
///
/// let prone = registry.describe("prone", "exhaustion").unwrap();
/// assert_eq!(prone.label, "Prone");
/// assert!(prone.fixed_token.is_some());
///
/// let tired = registry.describe("Exhaustion -1", "exhaustion").unwrap();
/// assert_eq!(tired.exhaustion, ExhaustionChange::Delta(-1));
///
/// assert!(registry.describe("Prone 2", "exhaustion").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StatusRegistry {
    entries: Vec<StatusEffectConfig>,
    by_id: FxHashMap<String, usize>,
    by_name: FxHashMap<String, usize>,
}

impl StatusRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the standard conditions (fixed tokens) and a
    /// few generic statuses (no tokens).
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (id, label) in STANDARD_CONDITIONS {
            registry.register(
                StatusEffectConfig::new(*id, *label)
                    .with_token(EffectId::padded(STANDARD_TOKEN_PREFIX, id)),
            );
        }
        for (id, label) in GENERIC_STATUSES {
            registry.register(StatusEffectConfig::new(*id, *label));
        }
        registry
    }

    /// Register a status.
    ///
    /// Panics if the id is already registered.
    pub fn register(&mut self, status: StatusEffectConfig) {
        if self.by_id.contains_key(&status.id) {
            panic!("Status {:?} already registered", status.id);
        }
        let index = self.entries.len();
        self.by_id.insert(status.id.clone(), index);
        self.by_name.insert(status.id.to_lowercase(), index);
        self.by_name.insert(status.label.to_lowercase(), index);
        self.entries.push(status);
    }

    /// Get a status by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StatusEffectConfig> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    /// Find a status by id or label, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&StatusEffectConfig> {
        self.by_name.get(&name.to_lowercase()).map(|&i| &self.entries[i])
    }

    /// All statuses in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectConfig> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a free-text name to a status descriptor.
    ///
    /// Only the exhaustion status accepts a numeric suffix; a suffix on any
    /// other status means the name is not a status name.
    #[must_use]
    pub fn describe(&self, name: &str, exhaustion_id: &str) -> Option<StatusDescriptor> {
        let parsed = parse_status_name(name)?;
        let status = self
            .find_by_name(parsed.base)
            // Labels ending in digits only match by their full name.
            .or_else(|| self.find_by_name(name.trim()).filter(|_| parsed.suffix.is_some()))?;

        let exhaustion = if status.id == exhaustion_id {
            ExhaustionChange::from_suffix(parsed.suffix)
        } else if parsed.suffix.is_none() || self.find_by_name(name.trim()).is_some() {
            ExhaustionChange::NotExhaustion
        } else {
            return None;
        };

        Some(StatusDescriptor {
            status_id: status.id.clone(),
            label: status.label.clone(),
            fixed_token: status.fixed_token.clone(),
            exhaustion,
        })
    }

    /// Build a fresh, unsaved effect for the status.
    ///
    /// The effect is named after the status, uses its icon and represents
    /// exactly that status. The fixed token, if any, is returned alongside
    /// so the caller can create the effect under it.
    #[must_use]
    pub fn from_status_id(&self, id: &str) -> Option<(EffectData, Option<EffectId>)> {
        let status = self.get(id)?;
        let mut data = EffectData::new(status.label.clone());
        data.icon = Some(status.icon.clone());
        data.statuses.push(status.id.clone());
        Some((data, status.fixed_token.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = StatusRegistry::with_defaults();
        assert_eq!(registry.len(), STANDARD_CONDITIONS.len() + GENERIC_STATUSES.len());

        let blinded = registry.get("blinded").unwrap();
        assert_eq!(blinded.fixed_token, Some(EffectId::new("dnd5eblinded0000")));

        let bleeding = registry.get("bleeding").unwrap();
        assert_eq!(bleeding.fixed_token, None);
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let registry = StatusRegistry::with_defaults();
        assert_eq!(registry.find_by_name("PRONE").unwrap().id, "prone");
        assert_eq!(registry.find_by_name("Unconscious").unwrap().id, "unconscious");
        assert!(registry.find_by_name("Bless").is_none());
    }

    #[test]
    fn test_describe_plain_status() {
        let registry = StatusRegistry::with_defaults();
        let descriptor = registry.describe("Blinded", "exhaustion").unwrap();
        assert_eq!(descriptor.status_id, "blinded");
        assert_eq!(descriptor.exhaustion, ExhaustionChange::NotExhaustion);
    }

    #[test]
    fn test_describe_exhaustion_variants() {
        let registry = StatusRegistry::with_defaults();
        let change = |name: &str| registry.describe(name, "exhaustion").unwrap().exhaustion;

        assert_eq!(change("Exhaustion"), ExhaustionChange::Increment);
        assert_eq!(change("Exhaustion +2"), ExhaustionChange::Delta(2));
        assert_eq!(change("Exhaustion -1"), ExhaustionChange::Delta(-1));
        assert_eq!(change("Exhaustion 4"), ExhaustionChange::Level(4));
    }

    #[test]
    fn test_describe_rejects_suffix_on_other_status() {
        let registry = StatusRegistry::with_defaults();
        assert!(registry.describe("Prone 2", "exhaustion").is_none());
        assert!(registry.describe("Bless", "exhaustion").is_none());
        assert!(registry.describe("Exhaustion abc", "exhaustion").is_none());
    }

    #[test]
    fn test_describe_label_ending_in_digits() {
        let mut registry = StatusRegistry::new();
        registry.register(StatusEffectConfig::new("cover2", "Cover 2"));

        let descriptor = registry.describe("Cover 2", "exhaustion").unwrap();
        assert_eq!(descriptor.status_id, "cover2");
        assert_eq!(descriptor.exhaustion, ExhaustionChange::NotExhaustion);
    }

    #[test]
    fn test_factory() {
        let registry = StatusRegistry::with_defaults();
        let (data, token) = registry.from_status_id("prone").unwrap();

        assert_eq!(data.name, "Prone");
        assert!(data.is_single_status("prone"));
        assert_eq!(token, Some(EffectId::new("dnd5eprone000000")));
        assert!(!data.flags.convenient);

        let (_, token) = registry.from_status_id("concentrating").unwrap();
        assert_eq!(token, None);

        assert!(registry.from_status_id("bless").is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_panics() {
        let mut registry = StatusRegistry::new();
        registry.register(StatusEffectConfig::new("prone", "Prone"));
        registry.register(StatusEffectConfig::new("prone", "Prone"));
    }
}
