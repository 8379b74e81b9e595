//! Process-wide configuration.
//!
//! `EffectsConfig` carries the platform constants the rules core depends
//! on (exhaustion ceiling and naming) and the bounds it enforces
//! (sub-effect depth). Persisted user preferences live behind
//! `SettingsStore` instead.
//!
//! The config deserializes with defaults for missing fields, so a host can
//! ship a partial document:
//!
//! ```
//! use convenient_effects::core::EffectsConfig;
//!
//! let config = EffectsConfig::new().with_max_exhaustion_level(10);
//! assert_eq!(config.max_exhaustion_level, 10);
//! assert_eq!(config.exhaustion_label, "Exhaustion");
//! ```

use serde::{Deserialize, Serialize};

/// Default exhaustion ceiling of the standard ruleset.
pub const DEFAULT_MAX_EXHAUSTION_LEVEL: u32 = 6;

/// Default bound on sub-effect nesting.
pub const DEFAULT_MAX_SUB_EFFECT_DEPTH: usize = 4;

/// Configuration shared by the resolver and the applier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Highest exhaustion level an actor can reach.
    pub max_exhaustion_level: u32,

    /// Status id of the exhaustion condition in the status registry.
    pub exhaustion_status_id: String,

    /// Display label used when naming exhaustion instances (`"<label> <level>"`).
    pub exhaustion_label: String,

    /// Maximum nesting of sub-effects below a top-level effect.
    pub max_sub_effect_depth: usize,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            max_exhaustion_level: DEFAULT_MAX_EXHAUSTION_LEVEL,
            exhaustion_status_id: "exhaustion".to_string(),
            exhaustion_label: "Exhaustion".to_string(),
            max_sub_effect_depth: DEFAULT_MAX_SUB_EFFECT_DEPTH,
        }
    }
}

impl EffectsConfig {
    /// Create a configuration with the standard ruleset defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exhaustion ceiling.
    #[must_use]
    pub fn with_max_exhaustion_level(mut self, max: u32) -> Self {
        self.max_exhaustion_level = max;
        self
    }

    /// Set the exhaustion status id and display label.
    #[must_use]
    pub fn with_exhaustion(mut self, status_id: impl Into<String>, label: impl Into<String>) -> Self {
        self.exhaustion_status_id = status_id.into();
        self.exhaustion_label = label.into();
        self
    }

    /// Set the sub-effect nesting bound.
    #[must_use]
    pub fn with_max_sub_effect_depth(mut self, depth: usize) -> Self {
        self.max_sub_effect_depth = depth;
        self
    }

    /// Name of an exhaustion instance at `level`.
    #[must_use]
    pub fn exhaustion_name(&self, level: u32) -> String {
        format!("{} {}", self.exhaustion_label, level)
    }

    /// Whether `name` names an exhaustion effect (`"Exhaustion"` or `"Exhaustion <n>"`).
    #[must_use]
    pub fn is_exhaustion_name(&self, name: &str) -> bool {
        match name.strip_prefix(self.exhaustion_label.as_str()) {
            Some(rest) => {
                let rest = rest.trim_start();
                rest.is_empty() || rest.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EffectsConfig::new();
        assert_eq!(config.max_exhaustion_level, 6);
        assert_eq!(config.exhaustion_status_id, "exhaustion");
        assert_eq!(config.max_sub_effect_depth, 4);
    }

    #[test]
    fn test_builder() {
        let config = EffectsConfig::new()
            .with_max_exhaustion_level(5)
            .with_exhaustion("fatigue", "Fatigue")
            .with_max_sub_effect_depth(2);

        assert_eq!(config.max_exhaustion_level, 5);
        assert_eq!(config.exhaustion_name(3), "Fatigue 3");
        assert_eq!(config.max_sub_effect_depth, 2);
    }

    #[test]
    fn test_is_exhaustion_name() {
        let config = EffectsConfig::new();
        assert!(config.is_exhaustion_name("Exhaustion"));
        assert!(config.is_exhaustion_name("Exhaustion 3"));
        assert!(!config.is_exhaustion_name("Exhaustion Save"));
        assert!(!config.is_exhaustion_name("Bless"));
    }

    #[test]
    fn test_partial_deserialization() {
        let config: EffectsConfig =
            serde_json::from_str(r#"{ "max_exhaustion_level": 10 }"#).unwrap();
        assert_eq!(config.max_exhaustion_level, 10);
        assert_eq!(config.exhaustion_label, "Exhaustion");
    }
}
