//! Onboarding wizard view: step list on the left, the active step's form on
//! the right. The panel renders from [`WizardState`] and reports intents
//! (dataset upload, project creation) upward instead of talking to the
//! network itself.

use std::path::PathBuf;

use egui::{Color32, RichText, ScrollArea, Ui};

use crate::wizard::{Metric, ModelSelection, Provider, UseCase, WizardState, WizardStep};

pub enum WizardAction {
    UploadDataset(PathBuf),
    CreateProject,
}

pub struct WizardPanel {
    pub current: WizardStep,
    dataset_path_input: String,
    pub uploading: bool,
    pub creating: bool,
}

impl Default for WizardPanel {
    fn default() -> Self {
        Self {
            current: WizardStep::Prompt,
            dataset_path_input: String::new(),
            uploading: false,
            creating: false,
        }
    }
}

impl WizardPanel {
    pub fn show(&mut self, ui: &mut Ui, state: &mut WizardState) -> Option<WizardAction> {
        let mut action = None;

        egui::SidePanel::left("wizard_step_panel")
            .resizable(false)
            .default_width(200.0)
            .show_inside(ui, |ui| {
                self.show_step_list(ui, state);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading(self.current.title());
                    ui.label(RichText::new(self.current.blurb()).weak());
                    ui.add_space(8.0);

                    action = self.show_step_form(ui, state);

                    ui.add_space(12.0);
                    self.show_navigation(ui, state);
                });
        });

        action
    }

    fn show_step_list(&mut self, ui: &mut Ui, state: &WizardState) {
        for step in WizardStep::ALL {
            let reachable = step.can_enter(state);
            let complete = step.required() && step.is_complete(state);
            let marker = if complete { "✔ " } else { "" };
            let label = format!("{}{}", marker, step.title());

            let response = ui.add_enabled(
                reachable,
                egui::SelectableLabel::new(self.current == step, label),
            );
            if response.clicked() {
                self.current = step;
            }
        }
    }

    fn show_navigation(&mut self, ui: &mut Ui, state: &WizardState) {
        let steps = WizardStep::ALL;
        let index = steps
            .iter()
            .position(|step| *step == self.current)
            .unwrap_or(0);

        ui.horizontal(|ui| {
            if index > 0 && ui.button("◀ Back").clicked() {
                self.current = steps[index - 1];
            }

            if let Some(next) = steps.get(index + 1) {
                let unlocked = next.can_enter(state);
                if ui
                    .add_enabled(unlocked, egui::Button::new("Next ▶"))
                    .clicked()
                {
                    self.current = *next;
                }
            }
        });
    }

    fn show_step_form(&mut self, ui: &mut Ui, state: &mut WizardState) -> Option<WizardAction> {
        match self.current {
            WizardStep::Prompt => {
                ui.add(
                    egui::TextEdit::multiline(&mut state.prompt_text)
                        .desired_rows(10)
                        .desired_width(f32::INFINITY)
                        .hint_text("Paste the prompt you want to optimize"),
                );
                None
            }
            WizardStep::UseCase => {
                for use_case in UseCase::ALL {
                    ui.horizontal(|ui| {
                        let selected = state.use_case == Some(use_case);
                        if ui.radio(selected, use_case.title()).clicked() {
                            state.use_case = Some(use_case);
                        }
                    });
                    ui.label(RichText::new(use_case.blurb()).weak().small());
                    ui.add_space(4.0);
                }
                None
            }
            WizardStep::Dataset => self.show_dataset_form(ui, state),
            WizardStep::FieldMapping => {
                show_field_mapping_form(ui, state);
                None
            }
            WizardStep::Metrics => {
                for metric in Metric::ALL {
                    let mut selected = state.metrics.contains(&metric);
                    if ui.checkbox(&mut selected, metric.title()).changed() {
                        state.toggle_metric(metric);
                    }
                }
                None
            }
            WizardStep::Model => {
                show_model_form(ui, state);
                None
            }
            WizardStep::Review => self.show_review_form(ui, state),
        }
    }

    fn show_dataset_form(&mut self, ui: &mut Ui, state: &mut WizardState) -> Option<WizardAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label("File path:");
            ui.add(
                egui::TextEdit::singleline(&mut self.dataset_path_input)
                    .hint_text("data/train.jsonl")
                    .desired_width(320.0),
            );

            let can_upload = !self.dataset_path_input.trim().is_empty() && !self.uploading;
            if ui
                .add_enabled(can_upload, egui::Button::new("Upload"))
                .clicked()
            {
                self.uploading = true;
                action = Some(WizardAction::UploadDataset(PathBuf::from(
                    self.dataset_path_input.trim(),
                )));
            }
        });

        if self.uploading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Uploading and parsing...");
            });
        }

        if let Some(path) = &state.dataset_path {
            ui.add_space(6.0);
            ui.label(format!("Stored dataset: {}", path.display()));
        }

        if let Some(preview) = &state.dataset_preview {
            ui.label(format!(
                "{} records, {} fields: {}",
                preview.record_count,
                preview.field_names.len(),
                preview.field_names.join(", ")
            ));
        }

        action
    }

    fn show_review_form(&mut self, ui: &mut Ui, state: &mut WizardState) -> Option<WizardAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label("Project name:");
            ui.add(
                egui::TextEdit::singleline(&mut state.project_name)
                    .hint_text("Untitled project")
                    .desired_width(320.0),
            );
        });
        ui.add_space(8.0);

        for step in WizardStep::ALL.iter().filter(|step| step.required()) {
            let complete = step.is_complete(state);
            let (symbol, color) = if complete {
                ("✔", Color32::from_rgb(0, 100, 0))
            } else {
                ("✘", Color32::from_rgb(150, 0, 0))
            };
            ui.horizontal(|ui| {
                ui.label(RichText::new(symbol).color(color));
                ui.label(step.title());
            });
        }

        ui.add_space(12.0);

        let ready = state.to_project_config().is_some() && !self.creating;
        if ui
            .add_enabled(ready, egui::Button::new("Create project"))
            .clicked()
        {
            self.creating = true;
            action = Some(WizardAction::CreateProject);
        }

        if self.creating {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Creating project...");
            });
        }

        action
    }
}

fn show_field_mapping_form(ui: &mut Ui, state: &mut WizardState) {
    let Some(use_case) = state.use_case else {
        ui.label("Pick a use case first.");
        return;
    };

    let columns: Vec<String> = state
        .dataset_preview
        .as_ref()
        .map(|preview| preview.field_names.clone())
        .unwrap_or_default();

    for field in use_case.required_fields() {
        let mapping = state
            .field_mappings
            .entry(field.to_string())
            .or_default();

        ui.horizontal(|ui| {
            ui.label(format!("{}:", field));
            if columns.is_empty() {
                // No preview available: fall back to a free-form column name.
                ui.add(
                    egui::TextEdit::singleline(mapping)
                        .hint_text("column name")
                        .desired_width(200.0),
                );
            } else {
                egui::ComboBox::from_id_salt(("field_mapping", field))
                    .selected_text(if mapping.is_empty() {
                        "select column".to_string()
                    } else {
                        mapping.clone()
                    })
                    .show_ui(ui, |ui| {
                        for column in &columns {
                            ui.selectable_value(mapping, column.clone(), column);
                        }
                    });
            }
        });
    }
}

fn show_model_form(ui: &mut Ui, state: &mut WizardState) {
    let mut remove_index = None;

    for (index, selection) in state.models.iter_mut().enumerate() {
        ui.push_id(index, |ui| {
            ui.horizontal(|ui| {
                egui::ComboBox::from_id_salt("provider")
                    .selected_text(selection.provider.title())
                    .show_ui(ui, |ui| {
                        for provider in Provider::ALL {
                            ui.selectable_value(
                                &mut selection.provider,
                                provider,
                                provider.title(),
                            );
                        }
                    });

                ui.add(
                    egui::TextEdit::singleline(&mut selection.model)
                        .hint_text("model name")
                        .desired_width(180.0),
                );

                if selection.provider.requires_api_key() {
                    ui.add(
                        egui::TextEdit::singleline(&mut selection.api_key)
                            .hint_text("API key")
                            .password(true)
                            .desired_width(180.0),
                    );
                }

                if ui.button("🗑").on_hover_text("Remove").clicked() {
                    remove_index = Some(index);
                }

                if !selection.is_complete() {
                    ui.label(RichText::new("incomplete").weak().small());
                }
            });
        });
    }

    if let Some(index) = remove_index {
        state.models.remove(index);
    }

    if ui.button("＋ Add model").clicked() {
        state.models.push(ModelSelection::new(Provider::OpenAi));
    }
}
