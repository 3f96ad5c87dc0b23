//! Accumulated form state for the onboarding wizard.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::backend::api_client::DatasetPreview;
use crate::wizard::catalog::{Metric, ModelSelection, UseCase};

/// Everything the wizard has collected so far. Owned by the app; views get
/// read-only or step-scoped mutable access and never keep their own copy.
#[derive(Debug, Default, Clone)]
pub struct WizardState {
    pub prompt_text: String,
    pub use_case: Option<UseCase>,
    pub dataset_path: Option<PathBuf>,
    pub dataset_preview: Option<DatasetPreview>,
    /// Required field name -> dataset column.
    pub field_mappings: HashMap<String, String>,
    pub metrics: Vec<Metric>,
    pub models: Vec<ModelSelection>,
    pub project_name: String,
}

/// The payload posted to the backend when the wizard is submitted.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectConfig {
    pub name: String,
    pub prompt: String,
    pub use_case: UseCase,
    pub dataset_path: PathBuf,
    pub field_mappings: HashMap<String, String>,
    pub metrics: Vec<Metric>,
    pub models: Vec<ModelSelection>,
}

impl WizardState {
    /// Mapped column for a required field, if any non-empty mapping exists.
    pub fn mapping_for(&self, field: &str) -> Option<&str> {
        self.field_mappings
            .get(field)
            .map(String::as_str)
            .filter(|column| !column.trim().is_empty())
    }

    pub fn toggle_metric(&mut self, metric: Metric) {
        if let Some(pos) = self.metrics.iter().position(|m| *m == metric) {
            self.metrics.remove(pos);
        } else {
            self.metrics.push(metric);
        }
    }

    /// Build the project-creation payload. `None` until every required step
    /// is complete.
    pub fn to_project_config(&self) -> Option<ProjectConfig> {
        use crate::wizard::WizardStep;

        if !WizardStep::ALL
            .iter()
            .filter(|step| step.required())
            .all(|step| step.is_complete(self))
        {
            return None;
        }

        let name = if self.project_name.trim().is_empty() {
            "Untitled project".to_string()
        } else {
            self.project_name.trim().to_string()
        };

        Some(ProjectConfig {
            name,
            prompt: self.prompt_text.clone(),
            use_case: self.use_case?,
            dataset_path: self.dataset_path.clone()?,
            field_mappings: self.field_mappings.clone(),
            metrics: self.metrics.clone(),
            models: self.models.clone(),
        })
    }
}
