//! Effect data model: definitions, applied effects, and the catalog.
//!
//! - `EffectDefinition`: immutable template (changes, composition, flags)
//! - `EffectData` / `AppliedEffect`: an effect on an actor, before and after saving
//! - `EffectCatalog`: built-in and custom definitions, looked up by name
//!
//! ## Design Philosophy
//!
//! Definitions never change once registered. Everything the applier
//! decides at application time (identity token, overlay, origin,
//! exhaustion level) lives on the applied record, so the same definition
//! can land on many actors independently.

mod builtin;
mod change;
mod flags;
pub mod applied;
pub mod catalog;
pub mod definition;

pub use applied::{AppliedEffect, EffectData, EffectFlags, ExhaustionStamp};
pub use catalog::{CatalogSource, EffectCatalog};
pub use change::{ChangeMode, EffectChange, EffectDuration};
pub use definition::{Changes, EffectDefinition};
pub use flags::{merge_flags, FlagBag, FlagKey, FlagValue};
