//! Declarative attribute changes and durations.
//!
//! A change names an actor attribute key, a mode and a value. The
//! platform applies active changes when it prepares actor data; this crate
//! only carries them from definitions onto applied effects.

use serde::{Deserialize, Serialize};

/// How a change combines with the attribute's base value.
///
/// Discriminants match the platform's numeric codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeMode {
    /// Handled by custom host logic.
    Custom = 0,
    /// Multiply the base value.
    Multiply = 1,
    /// Add to the base value (also appends to lists and concatenates text).
    Add = 2,
    /// Take the lower of base and value.
    Downgrade = 3,
    /// Take the higher of base and value.
    Upgrade = 4,
    /// Replace the base value.
    Override = 5,
}

impl ChangeMode {
    /// Numeric code used by the platform.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parse a platform code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Custom),
            1 => Some(Self::Multiply),
            2 => Some(Self::Add),
            3 => Some(Self::Downgrade),
            4 => Some(Self::Upgrade),
            5 => Some(Self::Override),
            _ => None,
        }
    }
}

/// One attribute mutation applied while an effect is active.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectChange {
    /// Attribute path, e.g. `system.attributes.movement.walk`.
    pub key: String,
    pub mode: ChangeMode,
    /// Raw value; may be a formula the host evaluates.
    pub value: String,
    /// Application order override. `None` uses the mode's default.
    pub priority: Option<i32>,
}

impl EffectChange {
    /// Create a change with default priority.
    pub fn new(key: impl Into<String>, mode: ChangeMode, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            mode,
            value: value.into(),
            priority: None,
        }
    }

    /// Shorthand for an `Add` change.
    pub fn add(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, ChangeMode::Add, value)
    }

    /// Shorthand for an `Override` change.
    pub fn overriding(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, ChangeMode::Override, value)
    }

    /// Shorthand for a `Custom` change.
    pub fn custom(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, ChangeMode::Custom, value)
    }

    /// Set the priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Priority the platform uses when none is given.
    #[must_use]
    pub fn effective_priority(&self) -> i32 {
        self.priority.unwrap_or(self.mode.code() as i32 * 10)
    }
}

/// Optional duration metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectDuration {
    pub seconds: Option<u32>,
    pub rounds: Option<u32>,
    pub turns: Option<u32>,
}

impl EffectDuration {
    /// A duration in seconds.
    #[must_use]
    pub const fn seconds(seconds: u32) -> Self {
        Self {
            seconds: Some(seconds),
            rounds: None,
            turns: None,
        }
    }

    /// A duration in combat rounds.
    #[must_use]
    pub const fn rounds(rounds: u32) -> Self {
        Self {
            seconds: None,
            rounds: Some(rounds),
            turns: None,
        }
    }

    /// A duration in combat turns.
    #[must_use]
    pub const fn turns(turns: u32) -> Self {
        Self {
            seconds: None,
            rounds: None,
            turns: Some(turns),
        }
    }
}
