//! Per-actor mutation locks.
//!
//! Reading an actor's effects and then creating or deleting must not
//! interleave with another command for the same actor. Each actor gets its
//! own mutex; commands for different actors never wait on each other.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::core::ActorUuid;

/// Table of per-actor mutexes, created on first use.
#[derive(Debug, Default)]
pub struct ActorLocks {
    locks: Mutex<FxHashMap<ActorUuid, Arc<Mutex<()>>>>,
}

impl ActorLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex serializing mutations of `actor`.
    #[must_use]
    pub fn for_actor(&self, actor: &ActorUuid) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .entry(actor.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_actor_shares_lock() {
        let locks = ActorLocks::new();
        let a = ActorUuid::new("Actor.a");

        let first = locks.for_actor(&a);
        let second = locks.for_actor(&a);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_different_actors_do_not_block() {
        let locks = ActorLocks::new();
        let a = locks.for_actor(&ActorUuid::new("Actor.a"));
        let b = locks.for_actor(&ActorUuid::new("Actor.b"));

        let _held = a.lock();
        assert!(b.try_lock().is_some());
        assert!(a.try_lock().is_none());
    }
}
