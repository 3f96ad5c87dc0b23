//! Onboarding wizard: a linear sequence of typed steps, each with a pure
//! completeness predicate over [`WizardState`]. A step is reachable once all
//! earlier required steps are complete.

pub mod catalog;
pub mod state;

pub use catalog::{Metric, ModelSelection, Provider, UseCase};
pub use state::{ProjectConfig, WizardState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Prompt,
    UseCase,
    Dataset,
    FieldMapping,
    Metrics,
    Model,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        WizardStep::Prompt,
        WizardStep::UseCase,
        WizardStep::Dataset,
        WizardStep::FieldMapping,
        WizardStep::Metrics,
        WizardStep::Model,
        WizardStep::Review,
    ];

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Prompt => "Prompt",
            WizardStep::UseCase => "Use case",
            WizardStep::Dataset => "Dataset",
            WizardStep::FieldMapping => "Field mapping",
            WizardStep::Metrics => "Metrics",
            WizardStep::Model => "Models",
            WizardStep::Review => "Review",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            WizardStep::Prompt => "The prompt you want to optimize",
            WizardStep::UseCase => "What the prompt is for",
            WizardStep::Dataset => "Examples to optimize against",
            WizardStep::FieldMapping => "Match dataset columns to the fields the use case needs",
            WizardStep::Metrics => "How candidate prompts are scored",
            WizardStep::Model => "Models to run the optimization with",
            WizardStep::Review => "Check everything before creating the project",
        }
    }

    /// Review is a look-back step and never gates submission.
    pub fn required(self) -> bool {
        !matches!(self, WizardStep::Review)
    }

    /// Pure completeness predicate over the accumulated form state.
    pub fn is_complete(self, state: &WizardState) -> bool {
        match self {
            WizardStep::Prompt => !state.prompt_text.trim().is_empty(),
            WizardStep::UseCase => state.use_case.is_some(),
            WizardStep::Dataset => state.dataset_path.is_some(),
            WizardStep::FieldMapping => match state.use_case {
                Some(use_case) => use_case
                    .required_fields()
                    .iter()
                    .all(|field| state.mapping_for(field).is_some()),
                None => false,
            },
            WizardStep::Metrics => !state.metrics.is_empty(),
            WizardStep::Model => state.models.iter().any(ModelSelection::is_complete),
            WizardStep::Review => true,
        }
    }

    /// A step is reachable once every earlier required step holds.
    pub fn can_enter(self, state: &WizardState) -> bool {
        Self::ALL
            .iter()
            .take_while(|step| **step != self)
            .filter(|step| step.required())
            .all(|step| step.is_complete(state))
    }

    /// Where to drop the user on entry: the first required step whose
    /// predicate does not hold yet, or Review once everything does.
    pub fn first_incomplete(state: &WizardState) -> WizardStep {
        Self::ALL
            .into_iter()
            .find(|step| step.required() && !step.is_complete(state))
            .unwrap_or(WizardStep::Review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::catalog::Provider;
    use std::path::PathBuf;

    fn complete_state() -> WizardState {
        let mut state = WizardState {
            prompt_text: "Summarize the document.".to_string(),
            use_case: Some(UseCase::Summarization),
            dataset_path: Some(PathBuf::from("data/train.jsonl")),
            ..WizardState::default()
        };
        state
            .field_mappings
            .insert("document".to_string(), "article".to_string());
        state
            .field_mappings
            .insert("summary".to_string(), "highlights".to_string());
        state.metrics.push(Metric::F1);
        let mut model = ModelSelection::new(Provider::Ollama);
        model.model = "llama3".to_string();
        state.models.push(model);
        state
    }

    #[test]
    fn empty_state_starts_at_prompt() {
        let state = WizardState::default();
        assert_eq!(WizardStep::first_incomplete(&state), WizardStep::Prompt);
        assert!(WizardStep::Prompt.can_enter(&state));
        assert!(!WizardStep::UseCase.can_enter(&state));
    }

    #[test]
    fn whitespace_prompt_does_not_count() {
        let state = WizardState {
            prompt_text: "   \n\t".to_string(),
            ..WizardState::default()
        };
        assert!(!WizardStep::Prompt.is_complete(&state));
    }

    #[test]
    fn steps_unlock_in_order() {
        let mut state = WizardState::default();
        state.prompt_text = "Classify the ticket.".to_string();
        assert!(WizardStep::UseCase.can_enter(&state));
        assert!(!WizardStep::Dataset.can_enter(&state));

        state.use_case = Some(UseCase::Classification);
        assert!(WizardStep::Dataset.can_enter(&state));
    }

    #[test]
    fn field_mapping_requires_every_field() {
        let mut state = complete_state();
        assert!(WizardStep::FieldMapping.is_complete(&state));

        state.field_mappings.insert("summary".to_string(), "  ".to_string());
        assert!(
            !WizardStep::FieldMapping.is_complete(&state),
            "blank mapping must not count"
        );

        state.field_mappings.remove("summary");
        assert!(!WizardStep::FieldMapping.is_complete(&state));
    }

    #[test]
    fn model_step_needs_one_complete_selection() {
        let mut state = complete_state();
        assert!(WizardStep::Model.is_complete(&state));

        state.models.clear();
        assert!(!WizardStep::Model.is_complete(&state));

        // An incomplete hosted selection is not enough.
        let mut hosted = ModelSelection::new(Provider::OpenAi);
        hosted.model = "gpt-4o-mini".to_string();
        state.models.push(hosted);
        assert!(!WizardStep::Model.is_complete(&state));

        state.models[0].api_key = "sk-test".to_string();
        assert!(WizardStep::Model.is_complete(&state));
    }

    #[test]
    fn review_is_optional_and_terminal() {
        let state = complete_state();
        assert!(!WizardStep::Review.required());
        assert_eq!(WizardStep::first_incomplete(&state), WizardStep::Review);
        assert!(WizardStep::Review.can_enter(&state));
    }

    #[test]
    fn project_config_only_when_complete() {
        let state = WizardState::default();
        assert!(state.to_project_config().is_none());

        let state = complete_state();
        let config = state.to_project_config().expect("complete state");
        assert_eq!(config.use_case, UseCase::Summarization);
        assert_eq!(config.name, "Untitled project");
        assert_eq!(config.metrics, vec![Metric::F1]);
    }
}
