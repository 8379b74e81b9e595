//! User notification and prompt facility.
//!
//! The resolver reports user-facing failures through `error`, asks the user
//! to pick a nested alternative through `choose`, and falls back to
//! `selected_actors` when a call names no targets.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::core::ActorUuid;

/// The user-facing side of the host.
pub trait Interaction: Send + Sync {
    /// Show an error notification.
    fn error(&self, message: &str);

    /// Ask the user to pick one of `options`.
    ///
    /// Returns the chosen index, or `None` if the prompt was dismissed.
    fn choose(&self, title: &str, options: &[String]) -> Option<usize>;

    /// Actors the user currently has selected or targeted.
    fn selected_actors(&self) -> Vec<ActorUuid> {
        Vec::new()
    }
}

/// A scripted interaction for headless hosts.
///
/// Answers prompts from a queue of pre-set choices (an exhausted queue
/// dismisses the prompt) and records every notification.
///
/// ```
/// use convenient_effects::host::{Interaction, ScriptedInteraction};
///
/// let ui = ScriptedInteraction::new().answering([Some("Reduce")]);
/// let options = vec!["Enlarge".to_string(), "Reduce".to_string()];
///
/// assert_eq!(ui.choose("Enlarge/Reduce", &options), Some(1));
/// assert_eq!(ui.choose("Enlarge/Reduce", &options), None);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answers: Mutex<VecDeque<Option<String>>>,
    errors: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
    selected: Vec<ActorUuid>,
}

impl ScriptedInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue prompt answers by option label; `None` dismisses (builder pattern).
    #[must_use]
    pub fn answering<I, S>(self, answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.answers
            .lock()
            .extend(answers.into_iter().map(|a| a.map(Into::into)));
        self
    }

    /// Set the selected actors (builder pattern).
    #[must_use]
    pub fn with_selected<I>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = ActorUuid>,
    {
        self.selected = actors.into_iter().collect();
        self
    }

    /// Errors shown so far.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    /// Titles of prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl Interaction for ScriptedInteraction {
    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }

    fn choose(&self, title: &str, options: &[String]) -> Option<usize> {
        self.prompts.lock().push(title.to_string());
        let answer = self.answers.lock().pop_front().flatten()?;
        options.iter().position(|o| *o == answer)
    }

    fn selected_actors(&self) -> Vec<ActorUuid> {
        self.selected.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_errors() {
        let ui = ScriptedInteraction::new();
        ui.error("first");
        ui.error("second");
        assert_eq!(ui.errors(), vec!["first", "second"]);
    }

    #[test]
    fn test_unknown_answer_dismisses() {
        let ui = ScriptedInteraction::new().answering([Some("Shrink")]);
        let options = vec!["Enlarge".to_string()];
        assert_eq!(ui.choose("Pick", &options), None);
        assert_eq!(ui.prompts(), vec!["Pick"]);
    }

    #[test]
    fn test_explicit_dismiss() {
        let ui = ScriptedInteraction::new().answering([None::<&str>, Some("Enlarge")]);
        let options = vec!["Enlarge".to_string()];
        assert_eq!(ui.choose("Pick", &options), None);
        assert_eq!(ui.choose("Pick", &options), Some(0));
    }

    #[test]
    fn test_selected_actors() {
        let ui = ScriptedInteraction::new().with_selected([ActorUuid::new("Actor.a")]);
        assert_eq!(ui.selected_actors(), vec![ActorUuid::new("Actor.a")]);
        assert!(ScriptedInteraction::new().selected_actors().is_empty());
    }
}
