//! Status-effect descriptors.
//!
//! A descriptor is derived from a parsed name and the registry entry it
//! resolves to. It is never stored; it travels inside commands so the
//! applier knows which status to create and how exhaustion should move.

use serde::{Deserialize, Serialize};

use crate::core::EffectId;

use super::parse::StatusSuffix;

/// How a status name asks the exhaustion level to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExhaustionChange {
    /// The status is not exhaustion.
    NotExhaustion,
    /// Bare exhaustion name: one level up.
    Increment,
    /// Signed suffix: move relative to the current level.
    Delta(i32),
    /// Unsigned suffix: go to this level.
    Level(u32),
}

impl ExhaustionChange {
    /// Change requested by an exhaustion name's suffix.
    #[must_use]
    pub fn from_suffix(suffix: Option<StatusSuffix>) -> Self {
        match suffix {
            None => Self::Increment,
            Some(StatusSuffix::Delta(delta)) => Self::Delta(delta),
            Some(StatusSuffix::Level(level)) => Self::Level(level),
        }
    }
}

/// A resolved status effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusDescriptor {
    /// Registry id, e.g. `prone`.
    pub status_id: String,
    /// Display label, e.g. `Prone`.
    pub label: String,
    /// Identity token the status is always created with, if any.
    pub fixed_token: Option<EffectId>,
    pub exhaustion: ExhaustionChange,
}

impl StatusDescriptor {
    /// Whether this descriptor moves an exhaustion level.
    #[must_use]
    pub fn is_exhaustion(&self) -> bool {
        self.exhaustion != ExhaustionChange::NotExhaustion
    }

    /// Identifier the applier matches existing instances against.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match &self.fixed_token {
            Some(token) => token.as_str(),
            None => &self.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_from_suffix() {
        assert_eq!(ExhaustionChange::from_suffix(None), ExhaustionChange::Increment);
        assert_eq!(
            ExhaustionChange::from_suffix(Some(StatusSuffix::Delta(-2))),
            ExhaustionChange::Delta(-2)
        );
        assert_eq!(
            ExhaustionChange::from_suffix(Some(StatusSuffix::Level(4))),
            ExhaustionChange::Level(4)
        );
    }

    #[test]
    fn test_identifier_prefers_token() {
        let mut descriptor = StatusDescriptor {
            status_id: "prone".to_string(),
            label: "Prone".to_string(),
            fixed_token: Some(EffectId::new("dnd5eprone000000")),
            exhaustion: ExhaustionChange::NotExhaustion,
        };
        assert_eq!(descriptor.identifier(), "dnd5eprone000000");
        assert!(!descriptor.is_exhaustion());

        descriptor.fixed_token = None;
        assert_eq!(descriptor.identifier(), "Prone");
    }
}
