//! Host collaborators other than the actor store.
//!
//! - `SettingsStore`: persisted status-effect mode and allow-list
//! - `Interaction`: notifications, prompts, and selected actors
//! - `DynamicEffects`: actor-dependent expansion of dynamic effects

pub mod dynamic;
pub mod interaction;
pub mod settings;

pub use dynamic::{DynamicEffects, NoDynamicEffects};
pub use interaction::{Interaction, ScriptedInteraction};
pub use settings::{InMemorySettings, SettingsStore, StatusEffectMode};
