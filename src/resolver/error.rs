//! Resolver errors.

use crate::applier::RelayError;
use crate::core::ActorUuid;

/// Errors that abort a resolver operation before anything is mutated.
///
/// A dismissed prompt is not an error; see `Dispatch::Cancelled`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Effect {name} was not found")]
    NotFound { name: String },

    #[error("Please select or target an actor to apply {effect} to")]
    NoTarget { effect: String },

    #[error("Actor {0} was not found")]
    ActorNotFound(ActorUuid),

    #[error(transparent)]
    Relay(#[from] RelayError),
}
