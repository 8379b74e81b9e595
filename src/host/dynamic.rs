//! Dynamic-effect expansion.
//!
//! Some effects cannot be fully described up front: Rage's damage bonus
//! depends on the barbarian's level, a Divine Word outcome on the target's
//! hit points. Definitions flagged `is_dynamic` are handed to the expander
//! together with the target actor right before creation.
//!
//! Any `Fn(&EffectDefinition, &Actor, &mut EffectData)` closure is an
//! expander.

use crate::actors::Actor;
use crate::effects::{EffectData, EffectDefinition};

/// Computes actor-dependent parts of dynamic effects.
pub trait DynamicEffects: Send + Sync {
    /// Adjust `data` (built from `definition`) for `actor`.
    fn expand(&self, definition: &EffectDefinition, actor: &Actor, data: &mut EffectData);
}

/// Leaves dynamic effects as defined.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDynamicEffects;

impl DynamicEffects for NoDynamicEffects {
    fn expand(&self, _definition: &EffectDefinition, _actor: &Actor, _data: &mut EffectData) {}
}

impl<F> DynamicEffects for F
where
    F: Fn(&EffectDefinition, &Actor, &mut EffectData) + Send + Sync,
{
    fn expand(&self, definition: &EffectDefinition, actor: &Actor, data: &mut EffectData) {
        self(definition, actor, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectChange;

    #[test]
    fn test_noop_expander() {
        let def = EffectDefinition::new("Rage").dynamic();
        let actor = Actor::new("Actor.a", "Conan");
        let mut data = EffectData::from_definition(&def);

        NoDynamicEffects.expand(&def, &actor, &mut data);
        assert!(data.changes.is_empty());
    }

    #[test]
    fn test_closure_expander() {
        let expander = |_: &EffectDefinition, actor: &Actor, data: &mut EffectData| {
            data.changes
                .push(EffectChange::add("system.bonuses.mwak.damage", format!("+{}", actor.name.len())));
        };

        let def = EffectDefinition::new("Rage").dynamic();
        let actor = Actor::new("Actor.a", "Conan");
        let mut data = EffectData::from_definition(&def);

        expander.expand(&def, &actor, &mut data);
        assert_eq!(data.changes[0].value, "+5");
    }
}
