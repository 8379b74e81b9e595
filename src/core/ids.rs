//! Identifier types for actors and applied effects.
//!
//! ## Layout
//!
//! - `ActorUuid`: the platform's document path for an actor, e.g. `Actor.x8Fk2pQ0aLm3Zt9c`
//! - `EffectId`: the 16-character identity token of an applied effect
//!
//! An applied effect's derived identifier joins the two:
//! `<actor uuid>.ActiveEffect.<effect id>`. This is what sub-effects record
//! as their origin.
//!
//! ```
//! use convenient_effects::core::{ActorUuid, EffectId};
//!
//! let actor = ActorUuid::new("Actor.hero");
//! let effect = EffectId::new("dnd5eblinded0000");
//!
//! assert_eq!(
//!     effect.derived_uuid(&actor),
//!     "Actor.hero.ActiveEffect.dnd5eblinded0000"
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Length of platform identity tokens.
pub const EFFECT_ID_LEN: usize = 16;

/// Identifier of an actor in the external store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorUuid(pub String);

impl ActorUuid {
    /// Create an actor identifier.
    #[must_use]
    pub fn new(uuid: impl Into<String>) -> Self {
        Self(uuid.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActorUuid {
    fn from(uuid: &str) -> Self {
        Self::new(uuid)
    }
}

impl From<String> for ActorUuid {
    fn from(uuid: String) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for ActorUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity token of an applied effect.
///
/// Status effects with a fixed token keep that token across removal and
/// re-creation, so lookups by token stay stable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectId(pub String);

impl EffectId {
    /// Create an effect identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build a fixed status token the way the platform does:
    /// `<prefix><status id>` right-padded with `0` to 16 characters.
    ///
    /// ```
    /// use convenient_effects::core::EffectId;
    ///
    /// assert_eq!(EffectId::padded("dnd5e", "prone").as_str(), "dnd5eprone000000");
    /// ```
    #[must_use]
    pub fn padded(prefix: &str, status_id: &str) -> Self {
        let mut token: String = format!("{prefix}{status_id}")
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .take(EFFECT_ID_LEN)
            .collect();
        while token.len() < EFFECT_ID_LEN {
            token.push('0');
        }
        Self(token)
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier of this effect when owned by `actor`.
    #[must_use]
    pub fn derived_uuid(&self, actor: &ActorUuid) -> String {
        format!("{}.ActiveEffect.{}", actor, self.0)
    }
}

impl From<&str> for EffectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
