//! The privileged applier.
//!
//! Executes `EffectCommand`s against the actor store. Every decision that
//! depends on an actor's current effects (is the status present, what is
//! the exhaustion level) is taken here, under that actor's lock, so two
//! commands for one actor never interleave between read and write.
//!
//! ## Ownership rules
//!
//! - Effects found by name must carry the convenient marker
//! - A status with a fixed token is found by its token alone
//! - Removing an effect also removes the sub-effects created for it

use std::sync::Arc;

use tracing::{debug, info};

use crate::actors::{Actor, ActorStore};
use crate::core::{ActorUuid, EffectId, EffectsConfig};
use crate::effects::{AppliedEffect, EffectCatalog, EffectData, EffectDefinition, ExhaustionStamp};
use crate::host::{DynamicEffects, NoDynamicEffects};
use crate::resolver::resolve_exhaustion_target;
use crate::status::{StatusDescriptor, StatusRegistry};

use super::command::{ActorChange, ActorResult, CommandOutcome, EffectCommand, ResolvedEffect};
use super::error::ApplyError;
use super::locks::ActorLocks;

/// Applies effect commands to actors.
pub struct Applier<S: ActorStore> {
    store: Arc<S>,
    catalog: Arc<EffectCatalog>,
    statuses: Arc<StatusRegistry>,
    dynamic: Arc<dyn DynamicEffects>,
    config: EffectsConfig,
    locks: ActorLocks,
}

impl<S: ActorStore> Applier<S> {
    /// Create an applier over a store.
    pub fn new(
        store: Arc<S>,
        catalog: Arc<EffectCatalog>,
        statuses: Arc<StatusRegistry>,
        config: EffectsConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            statuses,
            dynamic: Arc::new(NoDynamicEffects),
            config,
            locks: ActorLocks::new(),
        }
    }

    /// Use `dynamic` to expand dynamic effects before creation.
    #[must_use]
    pub fn with_dynamic_effects(mut self, dynamic: impl DynamicEffects + 'static) -> Self {
        self.dynamic = Arc::new(dynamic);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Execute a command against each of its targets.
    ///
    /// A failing target does not stop the others.
    pub fn execute(&self, command: EffectCommand) -> CommandOutcome {
        debug!(kind = command.kind(), targets = command.targets().len(), "executing command");

        let results = match &command {
            EffectCommand::Toggle {
                effect,
                targets,
                overlay,
                active,
            } => targets
                .iter()
                .map(|target| ActorResult {
                    actor: target.clone(),
                    result: self.toggle_effect(effect, target, *overlay, *active),
                })
                .collect(),
            EffectCommand::Add {
                effect,
                targets,
                origin,
                overlay,
            } => targets
                .iter()
                .map(|target| ActorResult {
                    actor: target.clone(),
                    result: self.add_effect(effect, target, origin.as_deref(), *overlay),
                })
                .collect(),
            EffectCommand::Remove {
                identifier,
                targets,
                origin,
            } => targets
                .iter()
                .map(|target| ActorResult {
                    actor: target.clone(),
                    result: self.remove_effect(identifier, target, origin.as_deref()),
                })
                .collect(),
        };

        CommandOutcome { results }
    }

    /// Add an effect to one actor.
    ///
    /// Statuses replace any existing instance; catalog effects may stack.
    pub fn add_effect(
        &self,
        effect: &ResolvedEffect,
        target: &ActorUuid,
        origin: Option<&str>,
        overlay: bool,
    ) -> Result<ActorChange, ApplyError> {
        let lock = self.locks.for_actor(target);
        let _guard = lock.lock();
        debug!(actor = %target, effect = effect.name(), origin, "adding effect");

        let actor = self.actor(target)?;
        let mut change = ActorChange::default();

        match effect {
            ResolvedEffect::Status { descriptor, .. } if descriptor.is_exhaustion() => {
                self.apply_exhaustion(&actor, descriptor, origin, overlay, &mut change)?;
            }
            ResolvedEffect::Status {
                descriptor,
                definition,
            } => {
                let existing = self.status_instances(&actor, descriptor);
                self.delete_all(target, existing, &mut change)?;
                self.create_status(&actor, descriptor, definition.as_ref(), origin, overlay, &mut change)?;
            }
            ResolvedEffect::Catalog(definition) => {
                self.create_definition(&actor, definition, origin, overlay, &mut change)?;
            }
        }

        Ok(change)
    }

    /// Remove the first convenient effect matching `identifier` from one actor.
    ///
    /// With `origin`, only an effect with exactly that origin matches.
    /// Nothing matching is not an error.
    pub fn remove_effect(
        &self,
        identifier: &str,
        target: &ActorUuid,
        origin: Option<&str>,
    ) -> Result<ActorChange, ApplyError> {
        let lock = self.locks.for_actor(target);
        let _guard = lock.lock();

        let actor = self.actor(target)?;
        let mut change = ActorChange::default();

        let found = actor
            .convenient_effects()
            .find(|e| e.matches(identifier) && origin.map_or(true, |o| e.origin() == Some(o)))
            .map(|e| e.id.clone());

        match found {
            Some(id) => self.delete_cascade(target, id, &mut change)?,
            None => debug!(actor = %target, identifier, "nothing to remove"),
        }

        Ok(change)
    }

    /// Toggle an effect on one actor.
    ///
    /// Exhaustion toggles like any fixed-token status: present instances are
    /// removed unless `active` is `Some(true)`, and only an absent one is
    /// applied through the level arithmetic.
    pub fn toggle_effect(
        &self,
        effect: &ResolvedEffect,
        target: &ActorUuid,
        overlay: bool,
        active: Option<bool>,
    ) -> Result<ActorChange, ApplyError> {
        let lock = self.locks.for_actor(target);
        let _guard = lock.lock();
        debug!(actor = %target, effect = effect.name(), ?active, "toggling effect");

        let actor = self.actor(target)?;
        let mut change = ActorChange::default();

        match effect {
            ResolvedEffect::Status { descriptor, .. } if descriptor.is_exhaustion() => {
                let existing = self.exhaustion_instances(&actor);
                if existing.is_empty() {
                    if active != Some(false) {
                        self.apply_exhaustion(&actor, descriptor, None, overlay, &mut change)?;
                    }
                } else if active != Some(true) {
                    self.delete_all(target, existing, &mut change)?;
                }
            }
            ResolvedEffect::Status {
                descriptor,
                definition,
            } => {
                let existing = self.status_instances(&actor, descriptor);
                if existing.is_empty() {
                    if active != Some(false) {
                        self.create_status(&actor, descriptor, definition.as_ref(), None, overlay, &mut change)?;
                    }
                } else if active != Some(true) {
                    self.delete_all(target, existing, &mut change)?;
                }
            }
            ResolvedEffect::Catalog(definition) => {
                let existing: Vec<EffectId> = actor
                    .convenient_effects()
                    .filter(|e| e.name() == definition.name)
                    .map(|e| e.id.clone())
                    .collect();
                if existing.is_empty() {
                    if active != Some(false) {
                        self.create_definition(&actor, definition, None, overlay, &mut change)?;
                    }
                } else if active != Some(true) {
                    self.delete_all(target, existing, &mut change)?;
                }
            }
        }

        Ok(change)
    }

    fn actor(&self, target: &ActorUuid) -> Result<Actor, ApplyError> {
        self.store
            .actor(target)
            .ok_or_else(|| ApplyError::ActorNotFound(target.clone()))
    }

    /// Existing instances of a non-exhaustion status.
    fn status_instances(&self, actor: &Actor, descriptor: &StatusDescriptor) -> Vec<EffectId> {
        match &descriptor.fixed_token {
            Some(token) => actor.effect(token).map(|e| e.id.clone()).into_iter().collect(),
            None => actor
                .single_status_effects(&descriptor.status_id)
                .map(|e| e.id.clone())
                .collect(),
        }
    }

    /// Every effect holding an exhaustion level: the status instance (by
    /// token or status id) and convenient effects named after exhaustion.
    fn exhaustion_instances(&self, actor: &Actor) -> Vec<EffectId> {
        actor
            .effects()
            .filter(|e| self.is_exhaustion_instance(e))
            .map(|e| e.id.clone())
            .collect()
    }

    fn is_exhaustion_instance(&self, effect: &AppliedEffect) -> bool {
        let by_status = match self.exhaustion_token() {
            Some(token) => &effect.id == token,
            None => effect.data.is_single_status(&self.config.exhaustion_status_id),
        };
        by_status
            || (effect.is_convenient()
                && (effect.data.flags.exhaustion.is_some()
                    || self.config.is_exhaustion_name(effect.name())))
    }

    fn exhaustion_token(&self) -> Option<&EffectId> {
        self.statuses
            .get(&self.config.exhaustion_status_id)
            .and_then(|s| s.fixed_token.as_ref())
    }

    /// Level held by an exhaustion instance. Unstamped instances count by
    /// their name's number, or as level 1.
    fn exhaustion_level(&self, effect: &AppliedEffect) -> u32 {
        if let Some(stamp) = effect.data.flags.exhaustion {
            return stamp.level;
        }
        effect
            .name()
            .strip_prefix(self.config.exhaustion_label.as_str())
            .and_then(|rest| rest.trim().parse().ok())
            .unwrap_or(1)
    }

    fn current_exhaustion(&self, actor: &Actor) -> u32 {
        actor
            .effects()
            .filter(|e| self.is_exhaustion_instance(e))
            .map(|e| self.exhaustion_level(e))
            .max()
            .unwrap_or(0)
    }

    /// Move the actor's exhaustion level as the descriptor asks.
    ///
    /// The old instance is always deleted; level 0 means no new instance.
    fn apply_exhaustion(
        &self,
        actor: &Actor,
        descriptor: &StatusDescriptor,
        origin: Option<&str>,
        overlay: bool,
        change: &mut ActorChange,
    ) -> Result<(), ApplyError> {
        let current = self.current_exhaustion(actor);
        let level = resolve_exhaustion_target(
            current,
            descriptor.exhaustion,
            self.config.max_exhaustion_level,
        );
        debug!(actor = %actor.uuid, current, level, "exhaustion level resolved");

        let existing = self.exhaustion_instances(actor);
        self.delete_all(&actor.uuid, existing, change)?;

        if level == 0 {
            info!(actor = %actor.uuid, previous = current, "exhaustion cleared");
            return Ok(());
        }

        let (mut data, token) = self
            .statuses
            .from_status_id(&descriptor.status_id)
            .ok_or_else(|| ApplyError::UnknownStatus(descriptor.status_id.clone()))?;
        data.name = self.config.exhaustion_name(level);
        data.mark_convenient(overlay, origin);
        data.flags.exhaustion = Some(ExhaustionStamp {
            level,
            previous: current,
        });
        if let Some(definition) = self.catalog.find(&data.name) {
            data.description = definition.description.clone();
            data.changes.extend(definition.changes.iter().cloned());
        }

        let created = self.store.create_effect(&actor.uuid, data, token)?;
        info!(actor = %actor.uuid, effect = %created.name(), previous = current, "exhaustion set");
        change.created.push(created.id);
        Ok(())
    }

    fn create_status(
        &self,
        actor: &Actor,
        descriptor: &StatusDescriptor,
        definition: Option<&EffectDefinition>,
        origin: Option<&str>,
        overlay: bool,
        change: &mut ActorChange,
    ) -> Result<(), ApplyError> {
        let (mut data, token) = self
            .statuses
            .from_status_id(&descriptor.status_id)
            .ok_or_else(|| ApplyError::UnknownStatus(descriptor.status_id.clone()))?;
        data.mark_convenient(overlay, origin);
        if let Some(definition) = definition {
            data.description = definition.description.clone();
            data.changes.extend(definition.changes.iter().cloned());
            data.duration = definition.duration;
        }

        let created = self.store.create_effect(&actor.uuid, data, token)?;
        info!(actor = %actor.uuid, effect = %created.name(), id = %created.id, "status added");
        change.created.push(created.id);
        Ok(())
    }

    /// Create a catalog effect and its sub-effects.
    ///
    /// The whole composite is validated first so a rejected definition
    /// leaves the actor untouched.
    fn create_definition(
        &self,
        actor: &Actor,
        definition: &EffectDefinition,
        origin: Option<&str>,
        overlay: bool,
        change: &mut ActorChange,
    ) -> Result<(), ApplyError> {
        self.validate_composite(definition)?;

        if self.config.is_exhaustion_name(&definition.name) {
            let existing = self.exhaustion_instances(actor);
            self.delete_all(&actor.uuid, existing, change)?;
        }

        self.create_tree(actor, definition, origin, overlay, 0, change)
    }

    fn validate_composite(&self, definition: &EffectDefinition) -> Result<(), ApplyError> {
        fn has_nested(definition: &EffectDefinition) -> Option<&str> {
            if definition.is_nested() {
                return Some(&definition.name);
            }
            definition.sub_effects.iter().find_map(has_nested)
        }

        if let Some(name) = has_nested(definition) {
            return Err(ApplyError::UnresolvedNested(name.to_string()));
        }
        let max = self.config.max_sub_effect_depth;
        if definition.sub_effect_depth() > max {
            return Err(ApplyError::SubEffectDepthExceeded {
                effect: definition.name.clone(),
                max,
            });
        }
        Ok(())
    }

    fn create_tree(
        &self,
        actor: &Actor,
        definition: &EffectDefinition,
        origin: Option<&str>,
        overlay: bool,
        depth: usize,
        change: &mut ActorChange,
    ) -> Result<(), ApplyError> {
        let mut data = EffectData::from_definition(definition);
        data.mark_convenient(overlay, origin);
        data.flags.sub_effect = depth > 0;
        if let Some(level) = self.exhaustion_level_of_name(&definition.name) {
            data.flags.exhaustion = Some(ExhaustionStamp {
                level,
                previous: self.current_exhaustion(actor),
            });
        }
        if definition.is_dynamic {
            self.dynamic.expand(definition, actor, &mut data);
        }

        let created = self.store.create_effect(&actor.uuid, data, None)?;
        info!(actor = %actor.uuid, effect = %created.name(), id = %created.id, depth, "effect added");
        let parent = created.derived_uuid(&actor.uuid);
        change.created.push(created.id);

        for sub in &definition.sub_effects {
            self.create_tree(actor, sub, Some(&parent), false, depth + 1, change)?;
        }
        Ok(())
    }

    fn exhaustion_level_of_name(&self, name: &str) -> Option<u32> {
        if !self.config.is_exhaustion_name(name) {
            return None;
        }
        name.strip_prefix(self.config.exhaustion_label.as_str())
            .and_then(|rest| rest.trim().parse().ok())
    }

    fn delete_all(
        &self,
        target: &ActorUuid,
        ids: Vec<EffectId>,
        change: &mut ActorChange,
    ) -> Result<(), ApplyError> {
        for id in ids {
            self.delete_cascade(target, id, change)?;
        }
        Ok(())
    }

    /// Delete an effect and, transitively, the sub-effects created for it.
    fn delete_cascade(
        &self,
        target: &ActorUuid,
        id: EffectId,
        change: &mut ActorChange,
    ) -> Result<(), ApplyError> {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            if change.deleted.contains(&id) {
                continue;
            }
            let removed = self.store.delete_effect(target, &id)?;
            info!(actor = %target, effect = %removed.name(), id = %id, "effect removed");

            let parent = id.derived_uuid(target);
            change.deleted.push(id);
            if let Some(actor) = self.store.actor(target) {
                pending.extend(
                    actor
                        .convenient_effects()
                        .filter(|e| e.data.flags.sub_effect && e.origin() == Some(parent.as_str()))
                        .map(|e| e.id.clone()),
                );
            }
        }
        Ok(())
    }
}
