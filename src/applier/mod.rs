//! The privileged side: commands, the applier, and the relay.
//!
//! - `EffectCommand`: what the resolver asks for
//! - `Applier`: executes commands under per-actor locks
//! - `Relay`: carries commands to the applier and outcomes back

#[allow(clippy::module_inception)]
mod applier;
mod locks;
pub mod command;
pub mod error;
pub mod relay;

pub use applier::Applier;
pub use command::{ActorChange, ActorResult, CommandOutcome, EffectCommand, ResolvedEffect};
pub use error::{ApplyError, RelayError};
pub use locks::ActorLocks;
pub use relay::{LocalRelay, Relay, RelayEnvelope};
