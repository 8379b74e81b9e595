//! The issuing side.
//!
//! The resolver turns a free-text effect name and a target list into an
//! `EffectCommand` and hands it to the relay. Everything that can be
//! checked without the privileged peer is checked here, before the relay
//! is called:
//!
//! 1. Classify the name (`NotFound` otherwise)
//! 2. Resolve targets, falling back to the user's selection (`NoTarget`,
//!    `ActorNotFound`)
//! 3. Let the user pick a nested alternative (dismissing cancels)
//!
//! What to do on each actor is decided by the applier, so a single toggle
//! can add to some targets and remove from others.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::actors::ActorStore;
use crate::applier::{CommandOutcome, EffectCommand, Relay, ResolvedEffect};
use crate::core::{ActorUuid, EffectsConfig};
use crate::effects::{EffectCatalog, EffectDefinition};
use crate::host::{InMemorySettings, Interaction, SettingsStore, StatusEffectMode};
use crate::status::StatusRegistry;

use super::classify::{classify, Classification};
use super::error::ResolveError;

/// Options for `Resolver::toggle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleOptions {
    /// Show the icon as a large token overlay.
    pub overlay: bool,
    /// Pin the outcome: `Some(true)` only adds, `Some(false)` only removes.
    pub active: Option<bool>,
}

impl ToggleOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Options for `Resolver::add_effect`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Origin recorded on the created effect.
    pub origin: Option<String>,
    pub overlay: bool,
}

impl AddOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }
}

/// How a resolver operation ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The command reached the applier.
    Executed(CommandOutcome),
    /// The user dismissed the nested-effect prompt.
    Cancelled,
}

impl Dispatch {
    /// The applier's outcome, if the command was sent.
    #[must_use]
    pub fn outcome(&self) -> Option<&CommandOutcome> {
        match self {
            Dispatch::Executed(outcome) => Some(outcome),
            Dispatch::Cancelled => None,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Dispatch::Cancelled)
    }
}

/// Resolves effect names and dispatches commands through a relay.
pub struct Resolver<S: ActorStore> {
    store: Arc<S>,
    catalog: Arc<EffectCatalog>,
    statuses: Arc<StatusRegistry>,
    settings: Arc<dyn SettingsStore>,
    relay: Arc<dyn Relay>,
    interaction: Arc<dyn Interaction>,
    config: EffectsConfig,
}

impl<S: ActorStore> Resolver<S> {
    /// Create a resolver with default settings and configuration.
    pub fn new(
        store: Arc<S>,
        catalog: Arc<EffectCatalog>,
        statuses: Arc<StatusRegistry>,
        relay: Arc<dyn Relay>,
        interaction: Arc<dyn Interaction>,
    ) -> Self {
        Self {
            store,
            catalog,
            statuses,
            settings: Arc::new(InMemorySettings::new()),
            relay,
            interaction,
            config: EffectsConfig::default(),
        }
    }

    /// Use `settings` for the status-effect mode and allow-list.
    #[must_use]
    pub fn with_settings(mut self, settings: Arc<dyn SettingsStore>) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: EffectsConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// Classify `name` under the current settings.
    #[must_use]
    pub fn classify(&self, name: &str) -> Classification {
        classify(
            name,
            &self.catalog,
            &self.statuses,
            self.settings.status_effect_mode(),
            &self.config.exhaustion_status_id,
        )
    }

    /// Find a catalog definition by exact name, custom first.
    #[must_use]
    pub fn find_effect(&self, name: &str) -> Option<&EffectDefinition> {
        self.catalog.find(name)
    }

    /// Let the user pick one nested alternative of `definition`.
    ///
    /// Only alternatives present in the catalog are offered. A definition
    /// without nested effects is returned as is; `None` means the prompt
    /// was dismissed or offered nothing.
    pub fn expand_nested(&self, definition: &EffectDefinition) -> Option<EffectDefinition> {
        if !definition.is_nested() {
            return Some(definition.clone());
        }

        let options: Vec<String> = definition
            .nested_effects
            .iter()
            .filter(|name| self.catalog.contains(name))
            .cloned()
            .collect();
        if options.is_empty() {
            warn!(effect = %definition.name, "no nested effect resolves in the catalog");
            return None;
        }

        let index = self.interaction.choose(&definition.name, &options)?;
        let chosen = self.catalog.find(options.get(index)?)?;
        debug!(effect = %definition.name, chosen = %chosen.name, "nested effect chosen");
        self.expand_nested(chosen)
    }

    /// Classify `name` and resolve it into a command payload.
    ///
    /// `Ok(None)` means the user dismissed a nested-effect prompt.
    pub fn resolve(&self, name: &str) -> Result<Option<ResolvedEffect>, ResolveError> {
        let classification = self.classify(name);
        self.report(self.resolve_classification(name, classification))
    }

    /// Toggle `name` on each target.
    ///
    /// Empty `targets` falls back to the user's selected actors.
    pub fn toggle(
        &self,
        name: &str,
        targets: &[ActorUuid],
        options: ToggleOptions,
    ) -> Result<Dispatch, ResolveError> {
        let classification = self.report(self.found(name))?;
        let targets = self.report(self.resolve_targets(name, targets))?;
        let Some(effect) = self.resolve_classification(name, classification)? else {
            return Ok(Dispatch::Cancelled);
        };

        self.dispatch(EffectCommand::Toggle {
            effect,
            targets,
            overlay: options.overlay,
            active: options.active,
        })
    }

    /// Add `name` to each target.
    pub fn add_effect(
        &self,
        name: &str,
        targets: &[ActorUuid],
        options: AddOptions,
    ) -> Result<Dispatch, ResolveError> {
        let classification = self.report(self.found(name))?;
        let targets = self.report(self.resolve_targets(name, targets))?;
        let Some(effect) = self.resolve_classification(name, classification)? else {
            return Ok(Dispatch::Cancelled);
        };

        self.dispatch(EffectCommand::Add {
            effect,
            targets,
            origin: options.origin,
            overlay: options.overlay,
        })
    }

    /// Add an ad-hoc definition, which need not be in the catalog.
    pub fn add_effect_with(
        &self,
        definition: &EffectDefinition,
        targets: &[ActorUuid],
        options: AddOptions,
    ) -> Result<Dispatch, ResolveError> {
        let targets = self.report(self.resolve_targets(&definition.name, targets))?;
        let Some(definition) = self.expand_nested(definition) else {
            return Ok(Dispatch::Cancelled);
        };

        self.dispatch(EffectCommand::Add {
            effect: ResolvedEffect::Catalog(definition),
            targets,
            origin: options.origin,
            overlay: options.overlay,
        })
    }

    /// Remove the convenient effect `name` from each target.
    ///
    /// Status names are matched by their identity token when they have one.
    /// Names outside the catalog are still removable, so this never fails
    /// with `NotFound`.
    pub fn remove_effect(
        &self,
        name: &str,
        targets: &[ActorUuid],
        origin: Option<&str>,
    ) -> Result<Dispatch, ResolveError> {
        let targets = self.report(self.resolve_targets(name, targets))?;
        let identifier = match self.classify(name) {
            Classification::Status(descriptor) => descriptor.identifier().to_string(),
            _ => name.to_string(),
        };

        self.dispatch(EffectCommand::Remove {
            identifier,
            targets,
            origin: origin.map(str::to_string),
        })
    }

    /// Whether `name` is applied and enabled on the actor as a convenient
    /// effect, by name or by status token. Unknown actors have nothing applied.
    #[must_use]
    pub fn has_effect_applied(&self, name: &str, actor: &ActorUuid) -> bool {
        let Some(actor) = self.store.actor(actor) else {
            return false;
        };
        let token = match self.classify(name) {
            Classification::Status(descriptor) => descriptor.fixed_token,
            _ => None,
        };

        let applied = actor
            .applied_effects()
            .any(|e| (e.is_convenient() && e.name() == name) || token.as_ref() == Some(&e.id));
        applied
    }

    /// Names offered as status effects under the current settings.
    ///
    /// Allow-listed names that no longer resolve in the catalog are skipped.
    #[must_use]
    pub fn status_effect_choices(&self) -> Vec<String> {
        let platform = || self.statuses.iter().map(|s| s.label.clone());
        let allowed = || {
            self.settings
                .status_effect_names()
                .into_iter()
                .filter(|name| self.catalog.contains(name))
        };

        match self.settings.status_effect_mode() {
            StatusEffectMode::None => platform().collect(),
            StatusEffectMode::Add => platform().chain(allowed()).collect(),
            StatusEffectMode::Replace => allowed().collect(),
        }
    }

    fn found(&self, name: &str) -> Result<Classification, ResolveError> {
        match self.classify(name) {
            Classification::NotFound => Err(ResolveError::NotFound {
                name: name.to_string(),
            }),
            classification => Ok(classification),
        }
    }

    fn resolve_classification(
        &self,
        name: &str,
        classification: Classification,
    ) -> Result<Option<ResolvedEffect>, ResolveError> {
        match classification {
            Classification::Status(descriptor) => {
                let definition = self.catalog.find(&descriptor.label).cloned();
                Ok(Some(ResolvedEffect::Status {
                    descriptor,
                    definition,
                }))
            }
            Classification::Catalog(definition) => {
                Ok(self.expand_nested(&definition).map(ResolvedEffect::Catalog))
            }
            Classification::NotFound => Err(ResolveError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Explicit targets, or the selected actors; each must exist.
    fn resolve_targets(
        &self,
        effect: &str,
        targets: &[ActorUuid],
    ) -> Result<Vec<ActorUuid>, ResolveError> {
        let requested = if targets.is_empty() {
            self.interaction.selected_actors()
        } else {
            targets.to_vec()
        };

        let mut seen = FxHashSet::default();
        let targets: Vec<ActorUuid> = requested
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();

        if targets.is_empty() {
            return Err(ResolveError::NoTarget {
                effect: effect.to_string(),
            });
        }
        if let Some(missing) = targets.iter().find(|t| self.store.actor(t).is_none()) {
            return Err(ResolveError::ActorNotFound(missing.clone()));
        }
        Ok(targets)
    }

    fn dispatch(&self, command: EffectCommand) -> Result<Dispatch, ResolveError> {
        debug!(kind = command.kind(), targets = command.targets().len(), "dispatching");
        let outcome = self.relay.execute(command).map_err(|err| {
            warn!(error = %err, "relay failed");
            ResolveError::from(err)
        })?;

        for (actor, err) in outcome.errors() {
            warn!(actor = %actor, error = %err, "effect not applied");
            self.interaction.error(&err.to_string());
        }
        Ok(Dispatch::Executed(outcome))
    }

    /// Show user-facing failures before returning them.
    fn report<T>(&self, result: Result<T, ResolveError>) -> Result<T, ResolveError> {
        if let Err(err) = &result {
            warn!(error = %err, "effect request rejected");
            self.interaction.error(&err.to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{Actor, InMemoryActorStore};
    use crate::applier::{Applier, LocalRelay};
    use crate::host::ScriptedInteraction;

    struct Fixture {
        resolver: Resolver<InMemoryActorStore>,
        store: Arc<InMemoryActorStore>,
        ui: Arc<ScriptedInteraction>,
        settings: Arc<InMemorySettings>,
    }

    fn fixture(ui: ScriptedInteraction) -> Fixture {
        let store = Arc::new(InMemoryActorStore::new(3));
        store.insert_actor(Actor::new("Actor.a", "Aragorn"));
        store.insert_actor(Actor::new("Actor.b", "Boromir"));

        let catalog = Arc::new(EffectCatalog::with_defaults());
        let statuses = Arc::new(StatusRegistry::with_defaults());
        let applier = Applier::new(
            store.clone(),
            catalog.clone(),
            statuses.clone(),
            EffectsConfig::default(),
        );
        let ui = Arc::new(ui);
        let settings = Arc::new(InMemorySettings::new());
        let resolver = Resolver::new(
            store.clone(),
            catalog,
            statuses,
            Arc::new(LocalRelay::new(Arc::new(applier))),
            ui.clone(),
        )
        .with_settings(settings.clone());

        Fixture {
            resolver,
            store,
            ui,
            settings,
        }
    }

    fn a() -> ActorUuid {
        ActorUuid::new("Actor.a")
    }

    #[test]
    fn test_toggle_round_trip() {
        let f = fixture(ScriptedInteraction::new());

        f.resolver.toggle("Bless", &[a()], ToggleOptions::new()).unwrap();
        assert!(f.resolver.has_effect_applied("Bless", &a()));

        f.resolver.toggle("Bless", &[a()], ToggleOptions::new()).unwrap();
        assert!(!f.resolver.has_effect_applied("Bless", &a()));
        assert_eq!(f.store.actor(&a()).unwrap().effect_count(), 0);
    }

    #[test]
    fn test_not_found_is_reported() {
        let f = fixture(ScriptedInteraction::new());
        let err = f.resolver.toggle("Wish", &[a()], ToggleOptions::new()).unwrap_err();

        assert_eq!(err, ResolveError::NotFound { name: "Wish".to_string() });
        assert_eq!(f.ui.errors(), vec!["Effect Wish was not found"]);
        assert_eq!(f.store.actor(&a()).unwrap().effect_count(), 0);
    }

    #[test]
    fn test_no_target() {
        let f = fixture(ScriptedInteraction::new());
        let err = f.resolver.add_effect("Bless", &[], AddOptions::new()).unwrap_err();
        assert_eq!(err, ResolveError::NoTarget { effect: "Bless".to_string() });
        assert_eq!(f.ui.errors().len(), 1);
    }

    #[test]
    fn test_selected_actors_fallback() {
        let f = fixture(ScriptedInteraction::new().with_selected([a()]));
        let dispatch = f.resolver.add_effect("Bless", &[], AddOptions::new()).unwrap();
        assert_eq!(dispatch.outcome().unwrap().created_count(), 1);
    }

    #[test]
    fn test_unknown_actor_precedes_relay() {
        let f = fixture(ScriptedInteraction::new());
        let missing = ActorUuid::new("Actor.z");
        let err = f
            .resolver
            .add_effect("Bless", &[a(), missing.clone()], AddOptions::new())
            .unwrap_err();

        assert_eq!(err, ResolveError::ActorNotFound(missing));
        assert_eq!(f.store.actor(&a()).unwrap().effect_count(), 0);
    }

    #[test]
    fn test_duplicate_targets_collapse() {
        let f = fixture(ScriptedInteraction::new());
        let dispatch = f
            .resolver
            .toggle("Bless", &[a(), a()], ToggleOptions::new())
            .unwrap();
        assert_eq!(dispatch.outcome().unwrap().results.len(), 1);
        assert!(f.resolver.has_effect_applied("Bless", &a()));
    }

    #[test]
    fn test_nested_prompt() {
        let f = fixture(ScriptedInteraction::new().answering([Some("Reduce"), None]));

        let dispatch = f
            .resolver
            .add_effect("Enlarge/Reduce", &[a()], AddOptions::new())
            .unwrap();
        assert!(!dispatch.is_cancelled());
        assert!(f.resolver.has_effect_applied("Reduce", &a()));

        let dispatch = f
            .resolver
            .add_effect("Enlarge/Reduce", &[a()], AddOptions::new())
            .unwrap();
        assert!(dispatch.is_cancelled());
        assert_eq!(f.ui.prompts(), vec!["Enlarge/Reduce", "Enlarge/Reduce"]);
        assert!(f.ui.errors().is_empty());
    }

    #[test]
    fn test_status_toggle_by_token() {
        let f = fixture(ScriptedInteraction::new());
        f.resolver.toggle("prone", &[a()], ToggleOptions::new()).unwrap();
        assert!(f.resolver.has_effect_applied("Prone", &a()));

        let actor = f.store.actor(&a()).unwrap();
        assert_eq!(actor.effect_count(), 1);
        // The catalog entry's changes ride along on the status.
        assert!(!actor.effects().next().unwrap().data.changes.is_empty());
    }

    #[test]
    fn test_remove_status_by_token() {
        let f = fixture(ScriptedInteraction::new());
        f.resolver.add_effect("Blinded", &[a()], AddOptions::new()).unwrap();
        let dispatch = f.resolver.remove_effect("Blinded", &[a()], None).unwrap();
        assert_eq!(dispatch.outcome().unwrap().deleted_count(), 1);
    }

    #[test]
    fn test_status_effect_choices() {
        let f = fixture(ScriptedInteraction::new());
        let platform = f.resolver.status_effect_choices();
        assert!(platform.contains(&"Prone".to_string()));

        f.settings.add_status_effect("Bless");
        f.settings.add_status_effect("Not An Effect");

        f.settings.set_mode(StatusEffectMode::Add);
        let added = f.resolver.status_effect_choices();
        assert_eq!(added.len(), platform.len() + 1);

        f.settings.set_mode(StatusEffectMode::Replace);
        assert_eq!(f.resolver.status_effect_choices(), vec!["Bless".to_string()]);
    }

    #[test]
    fn test_applier_errors_are_reported() {
        let f = fixture(ScriptedInteraction::new());
        let mut deep = EffectDefinition::new("Leaf");
        for level in 0..6 {
            deep = EffectDefinition::new(format!("Level {level}")).with_sub_effect(deep);
        }

        let dispatch = f.resolver.add_effect_with(&deep, &[a()], AddOptions::new()).unwrap();
        assert!(!dispatch.outcome().unwrap().is_success());
        assert_eq!(f.ui.errors().len(), 1);
    }
}
