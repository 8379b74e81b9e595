//! # convenient-effects
//!
//! Rules core for applying, removing and toggling "convenient effects"
//! (conditions, buffs, debuffs) on tabletop actors.
//!
//! ## Design Principles
//!
//! 1. **Issuer / Applier Split**: Any peer may resolve a request, but only
//!    the privileged peer mutates actors. Requests cross a `Relay` as a
//!    closed `EffectCommand` enum.
//!
//! 2. **Own Only What You Mark**: Every effect created here carries the
//!    convenient marker. Name searches and removals never see other effects.
//!
//! 3. **Explicit Services**: The effect catalog, status registry, settings
//!    and user interaction are passed in, never reached through globals.
//!
//! ## Architecture
//!
//! - **Decide Late**: The resolver validates names and targets; whether a
//!   toggle adds or removes, and what the new exhaustion level is, is
//!   decided by the applier under a per-actor lock.
//!
//! - **Persistent Data Structures**: Actor snapshots clone in O(1) via `im-rs`.
//!
//! ## Modules
//!
//! - `core`: Identifiers, identity-token generation, configuration
//! - `effects`: Effect definitions, applied effects, the catalog
//! - `status`: Platform statuses, status-name parsing, descriptors
//! - `actors`: Actors and the actor store
//! - `host`: Settings, user interaction, dynamic-effect expansion
//! - `applier`: Commands, the privileged applier, the relay
//! - `resolver`: Classification, exhaustion arithmetic, dispatch

pub mod core;
pub mod effects;
pub mod status;
pub mod actors;
pub mod host;
pub mod applier;
pub mod resolver;

// Re-export commonly used types
pub use crate::core::{ActorUuid, EffectId, EffectsConfig, IdGenerator};

pub use crate::effects::{
    AppliedEffect, ChangeMode, EffectCatalog, EffectChange, EffectData,
    EffectDefinition, EffectDuration, EffectFlags, ExhaustionStamp,
    FlagKey, FlagValue,
};

pub use crate::status::{
    ExhaustionChange, StatusDescriptor, StatusEffectConfig, StatusRegistry,
    parse_status_name,
};

pub use crate::actors::{Actor, ActorStore, InMemoryActorStore, StoreError};

pub use crate::host::{
    DynamicEffects, NoDynamicEffects,
    Interaction, ScriptedInteraction,
    InMemorySettings, SettingsStore, StatusEffectMode,
};

pub use crate::applier::{
    ActorChange, ActorResult, Applier, ApplyError, CommandOutcome,
    EffectCommand, LocalRelay, Relay, RelayError, ResolvedEffect,
};

pub use crate::resolver::{
    AddOptions, Classification, Dispatch, ResolveError, Resolver, ToggleOptions,
    resolve_exhaustion_target,
};
