//! The actor/effect store.
//!
//! `ActorStore` is the seam to the host platform's document database. The
//! issuer side only reads (`actor`); the privileged side also creates and
//! deletes effects. Implementations use interior mutability so a single
//! store can be shared by `Arc` between both sides.

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ActorUuid, EffectId, IdGenerator};
use crate::effects::{AppliedEffect, EffectData};

use super::actor::Actor;

/// Errors raised by an actor store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum StoreError {
    #[error("Actor not found: {0}")]
    ActorNotFound(ActorUuid),

    #[error("Effect {id} already exists on {actor}")]
    DuplicateEffectId { actor: ActorUuid, id: EffectId },

    #[error("Effect {id} not found on {actor}")]
    EffectNotFound { actor: ActorUuid, id: EffectId },
}

/// Access to actors and their effects.
pub trait ActorStore: Send + Sync {
    /// Snapshot of an actor, or `None` if the uuid does not resolve.
    fn actor(&self, uuid: &ActorUuid) -> Option<Actor>;

    /// Create an effect on an actor.
    ///
    /// With `keep_id` the effect is created under that token; otherwise the
    /// store assigns a fresh one.
    fn create_effect(
        &self,
        uuid: &ActorUuid,
        data: EffectData,
        keep_id: Option<EffectId>,
    ) -> Result<AppliedEffect, StoreError>;

    /// Delete an effect from an actor.
    fn delete_effect(&self, uuid: &ActorUuid, id: &EffectId) -> Result<AppliedEffect, StoreError>;
}

/// In-memory store for tests and single-process hosts.
///
/// ## Example
///
/// ```
/// use convenient_effects::actors::{Actor, ActorStore, InMemoryActorStore};
/// use convenient_effects::core::ActorUuid;
/// use convenient_effects::effects::EffectData;
///
/// let store = InMemoryActorStore::new(1);
/// store.insert_actor(Actor::new("Actor.hero", "Hero"));
///
/// let uuid = ActorUuid::new("Actor.hero");
/// let created = store.create_effect(&uuid, EffectData::new("Bless"), None).unwrap();
///
/// assert_eq!(store.actor(&uuid).unwrap().effect_count(), 1);
/// assert_eq!(created.id.as_str().len(), 16);
/// ```
#[derive(Debug)]
pub struct InMemoryActorStore {
    actors: RwLock<FxHashMap<ActorUuid, Actor>>,
    ids: Mutex<IdGenerator>,
}

impl InMemoryActorStore {
    /// Create an empty store whose identity tokens derive from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            actors: RwLock::new(FxHashMap::default()),
            ids: Mutex::new(IdGenerator::new(seed)),
        }
    }

    /// Add or replace an actor.
    pub fn insert_actor(&self, actor: Actor) {
        self.actors.write().insert(actor.uuid.clone(), actor);
    }
}

impl ActorStore for InMemoryActorStore {
    fn actor(&self, uuid: &ActorUuid) -> Option<Actor> {
        self.actors.read().get(uuid).cloned()
    }

    fn create_effect(
        &self,
        uuid: &ActorUuid,
        data: EffectData,
        keep_id: Option<EffectId>,
    ) -> Result<AppliedEffect, StoreError> {
        let mut actors = self.actors.write();
        let actor = actors
            .get_mut(uuid)
            .ok_or_else(|| StoreError::ActorNotFound(uuid.clone()))?;

        let id = match keep_id {
            Some(id) => {
                if actor.effect(&id).is_some() {
                    return Err(StoreError::DuplicateEffectId {
                        actor: uuid.clone(),
                        id,
                    });
                }
                id
            }
            None => {
                let mut ids = self.ids.lock();
                loop {
                    let id = ids.next_id();
                    if actor.effect(&id).is_none() {
                        break id;
                    }
                }
            }
        };

        let effect = AppliedEffect::new(id, data);
        debug!(actor = %uuid, effect = %effect.name(), id = %effect.id, "effect created");
        actor.push_effect(effect.clone());
        Ok(effect)
    }

    fn delete_effect(&self, uuid: &ActorUuid, id: &EffectId) -> Result<AppliedEffect, StoreError> {
        let mut actors = self.actors.write();
        let actor = actors
            .get_mut(uuid)
            .ok_or_else(|| StoreError::ActorNotFound(uuid.clone()))?;

        let removed = actor.remove_effect(id).ok_or_else(|| StoreError::EffectNotFound {
            actor: uuid.clone(),
            id: id.clone(),
        })?;
        debug!(actor = %uuid, effect = %removed.name(), id = %id, "effect deleted");
        Ok(removed)
    }
}
