//! Relay between the issuing peer and the privileged applier.
//!
//! The resolver never mutates actors itself; it hands a command to a
//! `Relay` and waits for the outcome. `LocalRelay` runs the applier
//! in-process but still passes every request and response through the
//! wire encoding, so anything that would not survive a real transport
//! fails here too.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actors::ActorStore;

use super::applier::Applier;
use super::command::{CommandOutcome, EffectCommand};
use super::error::RelayError;

/// Carries a command to the privileged peer.
pub trait Relay: Send + Sync {
    /// Execute `command` remotely and wait for the outcome.
    fn execute(&self, command: EffectCommand) -> Result<CommandOutcome, RelayError>;
}

/// A relay message with its correlation id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayEnvelope<T> {
    pub request_id: u64,
    pub payload: T,
}

impl<T: Serialize + DeserializeOwned> RelayEnvelope<T> {
    #[must_use]
    pub fn new(request_id: u64, payload: T) -> Self {
        Self {
            request_id,
            payload,
        }
    }

    /// Encode for the wire.
    pub fn encode(&self) -> Result<Vec<u8>, RelayError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from the wire.
    pub fn decode(bytes: &[u8]) -> Result<Self, RelayError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// In-process relay to an applier.
pub struct LocalRelay<S: ActorStore> {
    applier: Option<Arc<Applier<S>>>,
    next_request: AtomicU64,
}

impl<S: ActorStore> LocalRelay<S> {
    /// Relay to `applier`.
    #[must_use]
    pub fn new(applier: Arc<Applier<S>>) -> Self {
        Self {
            applier: Some(applier),
            next_request: AtomicU64::new(0),
        }
    }

    /// A relay with no privileged peer; every request is refused.
    #[must_use]
    pub fn disconnected() -> Self {
        Self {
            applier: None,
            next_request: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.applier.is_some()
    }
}

impl<S: ActorStore> Relay for LocalRelay<S> {
    fn execute(&self, command: EffectCommand) -> Result<CommandOutcome, RelayError> {
        let applier = self.applier.as_ref().ok_or(RelayError::Unauthorized)?;
        let request_id = self.next_request.fetch_add(1, Ordering::Relaxed);

        let request = RelayEnvelope::new(request_id, command).encode()?;
        debug!(request_id, bytes = request.len(), "relaying command");
        let command = RelayEnvelope::<EffectCommand>::decode(&request)?.payload;

        let outcome = applier.execute(command);

        let response = RelayEnvelope::new(request_id, outcome).encode()?;
        let envelope = RelayEnvelope::<CommandOutcome>::decode(&response)?;
        Ok(envelope.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{Actor, InMemoryActorStore};
    use crate::applier::ResolvedEffect;
    use crate::core::{ActorUuid, EffectsConfig};
    use crate::effects::{EffectCatalog, EffectDefinition};
    use crate::status::StatusRegistry;

    fn connected() -> (LocalRelay<InMemoryActorStore>, Arc<InMemoryActorStore>) {
        let store = Arc::new(InMemoryActorStore::new(1));
        store.insert_actor(Actor::new("Actor.a", "Aragorn"));
        let applier = Applier::new(
            store.clone(),
            Arc::new(EffectCatalog::with_defaults()),
            Arc::new(StatusRegistry::with_defaults()),
            EffectsConfig::default(),
        );
        (LocalRelay::new(Arc::new(applier)), store)
    }

    fn add_bless() -> EffectCommand {
        EffectCommand::Add {
            effect: ResolvedEffect::Catalog(EffectCatalog::with_defaults().find("Bless").unwrap().clone()),
            targets: vec![ActorUuid::new("Actor.a")],
            origin: None,
            overlay: false,
        }
    }

    #[test]
    fn test_local_relay_executes() {
        let (relay, store) = connected();
        let outcome = relay.execute(add_bless()).unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.created_count(), 1);
        let actor = store.actor(&ActorUuid::new("Actor.a")).unwrap();
        assert!(actor.find_convenient("Bless").is_some());
    }

    #[test]
    fn test_disconnected_relay_refuses() {
        let relay = LocalRelay::<InMemoryActorStore>::disconnected();
        assert!(!relay.is_connected());
        assert_eq!(relay.execute(add_bless()), Err(RelayError::Unauthorized));
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = RelayEnvelope::new(
            9,
            EffectCommand::Toggle {
                effect: ResolvedEffect::Catalog(EffectDefinition::new("Dodge")),
                targets: vec![ActorUuid::new("Actor.a")],
                overlay: true,
                active: Some(false),
            },
        );
        let bytes = envelope.encode().unwrap();
        assert_eq!(RelayEnvelope::decode(&bytes).unwrap(), envelope);
    }

    #[test]
    fn test_decode_garbage() {
        let err = RelayEnvelope::<EffectCommand>::decode(&[0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, RelayError::Codec(_)));
    }
}
