//! Core types: identifiers, id generation, configuration.
//!
//! These are shared by every other module and carry no behavior of
//! their own beyond formatting and validation.

pub mod ids;
pub mod rng;
pub mod config;

pub use ids::{ActorUuid, EffectId, EFFECT_ID_LEN};
pub use rng::IdGenerator;
pub use config::{EffectsConfig, DEFAULT_MAX_EXHAUSTION_LEVEL, DEFAULT_MAX_SUB_EFFECT_DEPTH};
