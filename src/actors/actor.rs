//! Actors - owners of applied effects.
//!
//! The crate never creates or destroys actors; it only reads them and asks
//! the store to add or delete their effects. Effects live in an `im`
//! vector so a snapshot handed to the issuer side costs O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{ActorUuid, EffectId};
use crate::effects::AppliedEffect;

/// An actor and its applied effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub uuid: ActorUuid,
    pub name: String,
    effects: Vector<AppliedEffect>,
}

impl Actor {
    /// Create an actor without effects.
    #[must_use]
    pub fn new(uuid: impl Into<ActorUuid>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            effects: Vector::new(),
        }
    }

    /// All effects, enabled or not.
    pub fn effects(&self) -> impl Iterator<Item = &AppliedEffect> {
        self.effects.iter()
    }

    /// Effects that currently apply.
    pub fn applied_effects(&self) -> impl Iterator<Item = &AppliedEffect> {
        self.effects.iter().filter(|e| e.is_active())
    }

    /// Effects managed by this crate.
    pub fn convenient_effects(&self) -> impl Iterator<Item = &AppliedEffect> {
        self.effects.iter().filter(|e| e.is_convenient())
    }

    /// Number of effects.
    #[must_use]
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Get an effect by identity token.
    #[must_use]
    pub fn effect(&self, id: &EffectId) -> Option<&AppliedEffect> {
        self.effects.iter().find(|e| &e.id == id)
    }

    /// First convenient effect matching `identifier` by token or name.
    #[must_use]
    pub fn find_convenient(&self, identifier: &str) -> Option<&AppliedEffect> {
        self.convenient_effects().find(|e| e.matches(identifier))
    }

    /// Effects representing exactly `status_id`.
    pub fn single_status_effects<'a>(
        &'a self,
        status_id: &'a str,
    ) -> impl Iterator<Item = &'a AppliedEffect> + 'a {
        self.effects.iter().filter(move |e| e.data.is_single_status(status_id))
    }

    pub(crate) fn push_effect(&mut self, effect: AppliedEffect) {
        self.effects.push_back(effect);
    }

    pub(crate) fn remove_effect(&mut self, id: &EffectId) -> Option<AppliedEffect> {
        let index = self.effects.iter().position(|e| &e.id == id)?;
        Some(self.effects.remove(index))
    }
}
