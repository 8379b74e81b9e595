//! Persisted user settings.
//!
//! Two settings affect resolution:
//!
//! - the status-effect mode: whether catalog effects are exposed as status
//!   effects, and if so whether they add to or replace the platform's own;
//! - the allow-list of catalog effect names exposed that way.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// How catalog effects relate to the platform's status effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEffectMode {
    /// Platform statuses only; status names resolve as statuses.
    #[default]
    None,
    /// Allow-listed catalog effects are offered next to platform statuses.
    Add,
    /// Allow-listed catalog effects replace platform statuses.
    Replace,
}

/// Access to persisted settings.
pub trait SettingsStore: Send + Sync {
    fn status_effect_mode(&self) -> StatusEffectMode;

    /// Allow-listed catalog effect names, in insertion order.
    fn status_effect_names(&self) -> Vec<String>;

    /// Add a name to the allow-list. Adding a present name is a no-op.
    fn add_status_effect(&self, name: &str);

    /// Remove a name from the allow-list. Removing an absent name is a no-op.
    fn remove_status_effect(&self, name: &str);
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct SettingsData {
    mode: StatusEffectMode,
    status_effect_names: Vec<String>,
}

/// In-memory settings.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    data: RwLock<SettingsData>,
}

impl InMemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given mode (builder pattern).
    #[must_use]
    pub fn with_mode(self, mode: StatusEffectMode) -> Self {
        self.data.write().mode = mode;
        self
    }

    pub fn set_mode(&self, mode: StatusEffectMode) {
        self.data.write().mode = mode;
    }
}

impl SettingsStore for InMemorySettings {
    fn status_effect_mode(&self) -> StatusEffectMode {
        self.data.read().mode
    }

    fn status_effect_names(&self) -> Vec<String> {
        self.data.read().status_effect_names.clone()
    }

    fn add_status_effect(&self, name: &str) {
        let mut data = self.data.write();
        if !data.status_effect_names.iter().any(|n| n == name) {
            data.status_effect_names.push(name.to_string());
        }
    }

    fn remove_status_effect(&self, name: &str) {
        self.data.write().status_effect_names.retain(|n| n != name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode() {
        let settings = InMemorySettings::new();
        assert_eq!(settings.status_effect_mode(), StatusEffectMode::None);
        assert!(settings.status_effect_names().is_empty());
    }

    #[test]
    fn test_allow_list() {
        let settings = InMemorySettings::new().with_mode(StatusEffectMode::Add);

        settings.add_status_effect("Bless");
        settings.add_status_effect("Bane");
        settings.add_status_effect("Bless");
        assert_eq!(settings.status_effect_names(), vec!["Bless", "Bane"]);

        settings.remove_status_effect("Bless");
        settings.remove_status_effect("Missing");
        assert_eq!(settings.status_effect_names(), vec!["Bane"]);
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&StatusEffectMode::Replace).unwrap();
        assert_eq!(json, "\"replace\"");
    }
}
