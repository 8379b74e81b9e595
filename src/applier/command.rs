//! Commands sent to the privileged peer and the outcomes it reports.
//!
//! The relay carries exactly these types. A command names a fully resolved
//! effect (or, for removal, a plain identifier) and the target actors; the
//! outcome carries one result per target in target order.

use serde::{Deserialize, Serialize};

use crate::core::{ActorUuid, EffectId};
use crate::effects::EffectDefinition;
use crate::status::StatusDescriptor;

use super::error::ApplyError;

/// A fully resolved effect payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedEffect {
    /// A platform status; `definition` is the catalog entry of the same
    /// name, whose changes are attached to the created instance.
    Status {
        descriptor: StatusDescriptor,
        definition: Option<EffectDefinition>,
    },
    /// A catalog (or ad-hoc) definition with nested choices already made.
    Catalog(EffectDefinition),
}

impl ResolvedEffect {
    /// Display name of the effect.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ResolvedEffect::Status { descriptor, .. } => &descriptor.label,
            ResolvedEffect::Catalog(definition) => &definition.name,
        }
    }
}

/// An operation for the privileged peer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectCommand {
    /// Add where absent, remove where present. `active` pins the outcome:
    /// `Some(true)` only adds, `Some(false)` only removes.
    Toggle {
        effect: ResolvedEffect,
        targets: Vec<ActorUuid>,
        overlay: bool,
        active: Option<bool>,
    },
    /// Add to every target.
    Add {
        effect: ResolvedEffect,
        targets: Vec<ActorUuid>,
        origin: Option<String>,
        overlay: bool,
    },
    /// Remove the first convenient effect matching `identifier` by token or
    /// name (and `origin`, when given) from every target.
    Remove {
        identifier: String,
        targets: Vec<ActorUuid>,
        origin: Option<String>,
    },
}

impl EffectCommand {
    /// Short operation name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            EffectCommand::Toggle { .. } => "toggle",
            EffectCommand::Add { .. } => "add",
            EffectCommand::Remove { .. } => "remove",
        }
    }

    /// Target actors.
    #[must_use]
    pub fn targets(&self) -> &[ActorUuid] {
        match self {
            EffectCommand::Toggle { targets, .. }
            | EffectCommand::Add { targets, .. }
            | EffectCommand::Remove { targets, .. } => targets,
        }
    }
}

/// Effects created and deleted on one actor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorChange {
    pub created: Vec<EffectId>,
    pub deleted: Vec<EffectId>,
}

impl ActorChange {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.deleted.is_empty()
    }
}

/// Result for a single target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorResult {
    pub actor: ActorUuid,
    pub result: Result<ActorChange, ApplyError>,
}

/// Per-target results of a command.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub results: Vec<ActorResult>,
}

impl CommandOutcome {
    /// Whether every target succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.result.is_ok())
    }

    /// Result for one actor.
    #[must_use]
    pub fn for_actor(&self, actor: &ActorUuid) -> Option<&Result<ActorChange, ApplyError>> {
        self.results.iter().find(|r| &r.actor == actor).map(|r| &r.result)
    }

    /// Failed targets with their errors.
    pub fn errors(&self) -> impl Iterator<Item = (&ActorUuid, &ApplyError)> {
        self.results
            .iter()
            .filter_map(|r| r.result.as_ref().err().map(|e| (&r.actor, e)))
    }

    /// Total effects created across targets.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| r.result.as_ref().ok())
            .map(|c| c.created.len())
            .sum()
    }

    /// Total effects deleted across targets.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| r.result.as_ref().ok())
            .map(|c| c.deleted.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ExhaustionChange;

    #[test]
    fn test_resolved_name() {
        let status = ResolvedEffect::Status {
            descriptor: StatusDescriptor {
                status_id: "prone".to_string(),
                label: "Prone".to_string(),
                fixed_token: None,
                exhaustion: ExhaustionChange::NotExhaustion,
            },
            definition: None,
        };
        assert_eq!(status.name(), "Prone");

        let catalog = ResolvedEffect::Catalog(EffectDefinition::new("Bless"));
        assert_eq!(catalog.name(), "Bless");
    }

    #[test]
    fn test_outcome_summary() {
        let a = ActorUuid::new("Actor.a");
        let b = ActorUuid::new("Actor.b");
        let outcome = CommandOutcome {
            results: vec![
                ActorResult {
                    actor: a.clone(),
                    result: Ok(ActorChange {
                        created: vec![EffectId::new("x")],
                        deleted: vec![],
                    }),
                },
                ActorResult {
                    actor: b.clone(),
                    result: Err(ApplyError::ActorNotFound(b.clone())),
                },
            ],
        };

        assert!(!outcome.is_success());
        assert_eq!(outcome.created_count(), 1);
        assert_eq!(outcome.deleted_count(), 0);
        assert_eq!(outcome.errors().count(), 1);
        assert!(outcome.for_actor(&a).unwrap().is_ok());
    }

    #[test]
    fn test_command_accessors() {
        let command = EffectCommand::Remove {
            identifier: "Bless".to_string(),
            targets: vec![ActorUuid::new("Actor.a")],
            origin: None,
        };
        assert_eq!(command.kind(), "remove");
        assert_eq!(command.targets().len(), 1);
    }

    #[test]
    fn test_command_serialization() {
        let command = EffectCommand::Add {
            effect: ResolvedEffect::Catalog(EffectDefinition::new("Bless")),
            targets: vec![ActorUuid::new("Actor.a")],
            origin: Some("Actor.b.Item.c".to_string()),
            overlay: true,
        };
        let json = serde_json::to_string(&command).unwrap();
        let deserialized: EffectCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(command, deserialized);
    }
}
