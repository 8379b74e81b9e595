//! Applier and relay errors.

use serde::{Deserialize, Serialize};

use crate::actors::StoreError;
use crate::core::ActorUuid;

/// Errors for a single target of a command.
///
/// Serializable so they can travel back through the relay.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ApplyError {
    #[error("Actor not found: {0}")]
    ActorNotFound(ActorUuid),

    #[error("Status {0} is not registered")]
    UnknownStatus(String),

    #[error("Effect {0} still has nested effects to choose from")]
    UnresolvedNested(String),

    #[error("Sub-effects of {effect} nest deeper than {max} levels")]
    SubEffectDepthExceeded { effect: String, max: usize },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by a relay.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("No privileged peer is connected")]
    Unauthorized,

    #[error("Relay payload could not be encoded: {0}")]
    Codec(String),
}

impl From<bincode::Error> for RelayError {
    fn from(err: bincode::Error) -> Self {
        RelayError::Codec(err.to_string())
    }
}
