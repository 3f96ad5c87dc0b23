//! Typed registries for the wizard: use cases, model providers and metrics.

use serde::{Deserialize, Serialize};

/// The task the prompt is optimized for. Each use case fixes the dataset
/// fields the field-mapping step has to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseCase {
    Summarization,
    Classification,
    QuestionAnswering,
    Extraction,
}

impl UseCase {
    pub const ALL: [UseCase; 4] = [
        UseCase::Summarization,
        UseCase::Classification,
        UseCase::QuestionAnswering,
        UseCase::Extraction,
    ];

    pub fn title(self) -> &'static str {
        match self {
            UseCase::Summarization => "Summarization",
            UseCase::Classification => "Classification",
            UseCase::QuestionAnswering => "Question answering",
            UseCase::Extraction => "Extraction",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            UseCase::Summarization => "Condense long documents into short summaries",
            UseCase::Classification => "Assign one label out of a fixed set to each input",
            UseCase::QuestionAnswering => "Answer questions grounded in a reference text",
            UseCase::Extraction => "Pull structured values out of free-form text",
        }
    }

    /// Dataset fields that must be mapped to a column before the
    /// field-mapping step counts as complete.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            UseCase::Summarization => &["document", "summary"],
            UseCase::Classification => &["input", "label"],
            UseCase::QuestionAnswering => &["question", "context", "answer"],
            UseCase::Extraction => &["text", "entities"],
        }
    }
}

/// Model provider. Hosted providers need an API key, local ones do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
    Ollama,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::OpenAi,
        Provider::Anthropic,
        Provider::Google,
        Provider::Ollama,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Google => "Google",
            Provider::Ollama => "Ollama (local)",
        }
    }

    pub fn requires_api_key(self) -> bool {
        !matches!(self, Provider::Ollama)
    }
}

/// One candidate model for the optimization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelection {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
}

impl ModelSelection {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            model: String::new(),
            api_key: String::new(),
        }
    }

    /// A selection counts once it names a model and carries a key when the
    /// provider needs one.
    pub fn is_complete(&self) -> bool {
        !self.model.trim().is_empty()
            && (!self.provider.requires_api_key() || !self.api_key.trim().is_empty())
    }
}

/// Scoring metric for candidate prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ExactMatch,
    F1,
    SemanticSimilarity,
    LlmAsJudge,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::ExactMatch,
        Metric::F1,
        Metric::SemanticSimilarity,
        Metric::LlmAsJudge,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Metric::ExactMatch => "Exact match",
            Metric::F1 => "Token F1",
            Metric::SemanticSimilarity => "Semantic similarity",
            Metric::LlmAsJudge => "LLM as judge",
        }
    }
}
