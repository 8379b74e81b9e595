//! Exhaustion-level arithmetic.

use crate::status::ExhaustionChange;

/// The level an actor at `current` moves to under `change`.
///
/// The result is always within `0..=max`; 0 means the exhaustion instance
/// is removed rather than created.
#[must_use]
pub fn resolve_exhaustion_target(current: u32, change: ExhaustionChange, max: u32) -> u32 {
    match change {
        ExhaustionChange::NotExhaustion => current.min(max),
        ExhaustionChange::Increment => current.saturating_add(1).min(max),
        ExhaustionChange::Delta(delta) => {
            (i64::from(current) + i64::from(delta)).clamp(0, i64::from(max)) as u32
        }
        ExhaustionChange::Level(level) => level.min(max),
    }
}
