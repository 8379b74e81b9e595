//! Effect definitions - immutable effect templates.
//!
//! `EffectDefinition` holds what an effect *is*: its name, its changes,
//! whether it is custom or dynamic, and how it composes. "Bless" grants
//! 1d4 to attack rolls and saves - that is part of the definition.
//!
//! What happens when it lands on an actor (identity token, origin,
//! overlay) is stored separately in `AppliedEffect`.
//!
//! ## Composition
//!
//! - **Nested**: `nested_effects` names alternatives; exactly one is chosen
//!   by the user before anything is applied ("Enlarge/Reduce").
//! - **Composite**: `sub_effects` are applied alongside the parent, each as
//!   its own removable instance whose origin is the parent.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::change::{EffectChange, EffectDuration};
use super::flags::{FlagBag, FlagKey, FlagValue};

/// Inline storage for change lists; most effects carry a handful.
pub type Changes = SmallVec<[EffectChange; 4]>;

/// Static effect definition.
///
/// ## Example
///
/// ```
/// use convenient_effects::effects::{EffectChange, EffectDefinition};
///
/// let bless = EffectDefinition::new("Bless")
///     .with_description("Add 1d4 to attack rolls and saving throws")
///     .with_change(EffectChange::add("system.bonuses.abilities.save", "+1d4"));
///
/// assert_eq!(bless.changes.len(), 1);
/// assert!(!bless.is_nested());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDefinition {
    /// Unique within its catalog.
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub duration: Option<EffectDuration>,

    /// Attribute mutations applied while active.
    #[serde(default)]
    pub changes: Changes,

    /// Authored by the user rather than shipped with the catalog.
    #[serde(default)]
    pub is_custom: bool,

    /// Changes depend on the target actor and are computed at application.
    #[serde(default)]
    pub is_dynamic: bool,

    /// Names of alternatives the user picks one of.
    #[serde(default)]
    pub nested_effects: Vec<String>,

    /// Effects applied together with this one.
    #[serde(default)]
    pub sub_effects: Vec<EffectDefinition>,

    /// Extra flags copied onto the applied effect.
    #[serde(default)]
    pub flags: FlagBag,
}

impl EffectDefinition {
    /// Create an empty definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon: None,
            duration: None,
            changes: Changes::new(),
            is_custom: false,
            is_dynamic: false,
            nested_effects: Vec::new(),
            sub_effects: Vec::new(),
            flags: FlagBag::default(),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the icon path (builder pattern).
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the duration (builder pattern).
    #[must_use]
    pub fn with_duration(mut self, duration: EffectDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Add a change (builder pattern).
    #[must_use]
    pub fn with_change(mut self, change: EffectChange) -> Self {
        self.changes.push(change);
        self
    }

    /// Add several changes (builder pattern).
    #[must_use]
    pub fn with_changes(mut self, changes: impl IntoIterator<Item = EffectChange>) -> Self {
        self.changes.extend(changes);
        self
    }

    /// Add an extra flag (builder pattern).
    #[must_use]
    pub fn with_flag(mut self, key: impl Into<FlagKey>, value: impl Into<FlagValue>) -> Self {
        self.flags.insert(key.into(), value.into());
        self
    }

    /// Mark as dynamic (builder pattern).
    #[must_use]
    pub fn dynamic(mut self) -> Self {
        self.is_dynamic = true;
        self
    }

    /// Mark as custom (builder pattern).
    #[must_use]
    pub fn custom(mut self) -> Self {
        self.is_custom = true;
        self
    }

    /// Set the nested alternatives (builder pattern).
    #[must_use]
    pub fn with_nested<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nested_effects = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add a sub-effect (builder pattern).
    #[must_use]
    pub fn with_sub_effect(mut self, sub_effect: EffectDefinition) -> Self {
        self.sub_effects.push(sub_effect);
        self
    }

    /// Whether the user must pick an alternative before application.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.nested_effects.is_empty()
    }

    /// Whether application also creates sub-effects.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        !self.sub_effects.is_empty()
    }

    /// Depth of the sub-effect tree below this definition.
    #[must_use]
    pub fn sub_effect_depth(&self) -> usize {
        self.sub_effects
            .iter()
            .map(|sub| sub.sub_effect_depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::ChangeMode;

    #[test]
    fn test_definition_builder() {
        let def = EffectDefinition::new("Haste")
            .with_description("Speed doubled")
            .with_icon("icons/haste.svg")
            .with_duration(EffectDuration::seconds(60))
            .with_change(EffectChange::add("system.attributes.ac.bonus", "+2"))
            .with_flag("core.overlay", false);

        assert_eq!(def.name, "Haste");
        assert_eq!(def.icon.as_deref(), Some("icons/haste.svg"));
        assert_eq!(def.changes[0].mode, ChangeMode::Add);
        assert!(!def.is_custom);
        assert!(!def.is_dynamic);
    }

    #[test]
    fn test_nested_and_composite() {
        let nested = EffectDefinition::new("Enlarge/Reduce").with_nested(["Enlarge", "Reduce"]);
        assert!(nested.is_nested());
        assert!(!nested.is_composite());

        let composite = EffectDefinition::new("Heroism")
            .with_sub_effect(EffectDefinition::new("Heroism: Temp HP"));
        assert!(composite.is_composite());
        assert_eq!(composite.sub_effect_depth(), 1);
    }

    #[test]
    fn test_sub_effect_depth() {
        let leaf = EffectDefinition::new("C");
        let mid = EffectDefinition::new("B").with_sub_effect(leaf);
        let root = EffectDefinition::new("A")
            .with_sub_effect(mid)
            .with_sub_effect(EffectDefinition::new("D"));

        assert_eq!(root.sub_effect_depth(), 2);
    }

    #[test]
    fn test_definition_deserializes_with_defaults() {
        let def: EffectDefinition = serde_json::from_str(r#"{ "name": "Dodge" }"#).unwrap();
        assert_eq!(def.name, "Dodge");
        assert!(def.changes.is_empty());
        assert!(def.sub_effects.is_empty());
    }
}
