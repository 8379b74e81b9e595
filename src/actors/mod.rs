//! Actors and the store that owns their effects.
//!
//! - `Actor`: an actor snapshot with its applied effects
//! - `ActorStore`: read/create/delete seam to the host platform
//! - `InMemoryActorStore`: a complete in-process store

pub mod actor;
pub mod store;

pub use actor::Actor;
pub use store::{ActorStore, InMemoryActorStore, StoreError};
