//! Applied effects - effect records owned by an actor.
//!
//! `EffectData` is an unsaved effect: the value the applier builds from a
//! definition or a status template and hands to the store. Once created it
//! becomes an `AppliedEffect` with an identity token.
//!
//! ## Convenient Marker
//!
//! Every effect this crate creates sets `flags.convenient`. Searches by name
//! and removals are scoped to marked effects so effects created by other
//! tools on the same actor are never touched.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::change::EffectDuration;
use super::definition::{Changes, EffectDefinition};
use super::flags::{merge_flags, FlagBag};
use crate::core::{ActorUuid, EffectId};

/// Exhaustion level recorded on an exhaustion instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExhaustionStamp {
    pub level: u32,
    /// Level before this instance replaced the previous one.
    pub previous: u32,
}

/// Typed flags of an applied effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectFlags {
    /// Set on every effect managed by this crate.
    pub convenient: bool,
    /// Show the icon as a large token overlay.
    pub overlay: bool,
    pub is_custom: bool,
    pub is_dynamic: bool,
    pub exhaustion: Option<ExhaustionStamp>,
    /// Created as a sub-effect; removed together with its origin.
    #[serde(default)]
    pub sub_effect: bool,
    #[serde(default)]
    pub extra: FlagBag,
}

/// Data of an effect, saved or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectData {
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    /// Suppressed effects stay on the actor but do not apply.
    pub disabled: bool,
    /// What caused this effect (an item, another effect's derived id, ...).
    pub origin: Option<String>,
    pub changes: Changes,
    /// Status ids this effect represents.
    pub statuses: SmallVec<[String; 1]>,
    pub duration: Option<EffectDuration>,
    pub flags: EffectFlags,
}

impl EffectData {
    /// Create blank effect data.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon: None,
            disabled: false,
            origin: None,
            changes: Changes::new(),
            statuses: SmallVec::new(),
            duration: None,
            flags: EffectFlags::default(),
        }
    }

    /// Build effect data from a definition.
    ///
    /// Nested names and sub-effects are not carried over; the applier
    /// handles composition itself.
    #[must_use]
    pub fn from_definition(definition: &EffectDefinition) -> Self {
        let mut flags = EffectFlags {
            is_custom: definition.is_custom,
            is_dynamic: definition.is_dynamic,
            ..EffectFlags::default()
        };
        merge_flags(&mut flags.extra, &definition.flags);

        Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            icon: definition.icon.clone(),
            disabled: false,
            origin: None,
            changes: definition.changes.clone(),
            statuses: SmallVec::new(),
            duration: definition.duration,
            flags,
        }
    }

    /// Stamp the convenient marker, overlay and origin.
    pub fn mark_convenient(&mut self, overlay: bool, origin: Option<&str>) {
        self.flags.convenient = true;
        self.flags.overlay = overlay;
        if let Some(origin) = origin {
            self.origin = Some(origin.to_string());
        }
    }

    /// Whether this effect represents exactly the given status and nothing else.
    #[must_use]
    pub fn is_single_status(&self, status_id: &str) -> bool {
        self.statuses.len() == 1 && self.statuses[0] == status_id
    }

    /// Whether this effect represents the given status among others.
    #[must_use]
    pub fn has_status(&self, status_id: &str) -> bool {
        self.statuses.iter().any(|s| s == status_id)
    }
}

/// An effect record on an actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEffect {
    pub id: EffectId,
    pub data: EffectData,
}

impl AppliedEffect {
    /// Wrap saved data.
    #[must_use]
    pub fn new(id: EffectId, data: EffectData) -> Self {
        Self { id, data }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.data.name
    }

    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.data.origin.as_deref()
    }

    /// Whether this crate manages the effect.
    #[must_use]
    pub fn is_convenient(&self) -> bool {
        self.data.flags.convenient
    }

    /// Whether the effect currently applies.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.data.disabled
    }

    /// Whether `identifier` names this effect by token or display name.
    #[must_use]
    pub fn matches(&self, identifier: &str) -> bool {
        self.id.as_str() == identifier || self.data.name == identifier
    }

    /// Identifier of this effect when owned by `actor`.
    #[must_use]
    pub fn derived_uuid(&self, actor: &ActorUuid) -> String {
        self.id.derived_uuid(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectChange, FlagKey, FlagValue};

    #[test]
    fn test_from_definition() {
        let def = EffectDefinition::new("Bless")
            .with_change(EffectChange::add("system.bonuses.abilities.save", "+1d4"))
            .with_flag("dae.stackable", "none")
            .custom()
            .with_sub_effect(EffectDefinition::new("ignored"));

        let data = EffectData::from_definition(&def);

        assert_eq!(data.name, "Bless");
        assert_eq!(data.changes.len(), 1);
        assert!(data.flags.is_custom);
        assert!(!data.flags.convenient);
        assert_eq!(
            data.flags.extra.get(&FlagKey::new("dae.stackable")),
            Some(&FlagValue::Text("none".to_string()))
        );
    }

    #[test]
    fn test_mark_convenient() {
        let mut data = EffectData::new("Dodge");
        data.mark_convenient(true, Some("Actor.a.Item.b"));

        assert!(data.flags.convenient);
        assert!(data.flags.overlay);
        assert_eq!(data.origin.as_deref(), Some("Actor.a.Item.b"));

        let mut data = EffectData::new("Dodge");
        data.mark_convenient(false, None);
        assert_eq!(data.origin, None);
    }

    #[test]
    fn test_status_membership() {
        let mut data = EffectData::new("Prone");
        data.statuses.push("prone".to_string());
        assert!(data.is_single_status("prone"));
        assert!(data.has_status("prone"));

        data.statuses.push("incapacitated".to_string());
        assert!(!data.is_single_status("prone"));
        assert!(data.has_status("incapacitated"));
    }

    #[test]
    fn test_matches_by_token_or_name() {
        let effect = AppliedEffect::new(EffectId::new("abcdefghijklmnop"), EffectData::new("Bane"));
        assert!(effect.matches("abcdefghijklmnop"));
        assert!(effect.matches("Bane"));
        assert!(!effect.matches("Bless"));
        assert!(effect.is_active());
        assert!(!effect.is_convenient());
    }
}
