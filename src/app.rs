use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use egui::{Color32, RichText};
use tracing::error;

use crate::backend::api_client::{ApiClient, ProjectDescriptor};
use crate::backend::docs;
use crate::backend::stream::{spawn_stream, OptimizationEvent, OptimizationRun};
use crate::config::Config;
use crate::constant::MAX_RUN_LOG_LINES;
use crate::messages::ResponseMessage;
use crate::style::configure_style;
use crate::ui::diff_view::DiffView;
use crate::ui::docs_viewer::{DocsAction, DocsViewer};
use crate::ui::playground::Playground;
use crate::ui::run_panel;
use crate::ui::wizard_panel::{WizardAction, WizardPanel};
use crate::wizard::WizardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppView {
    Wizard,
    Playground,
    Docs,
}

pub struct PromptForgeApp {
    config: Config,
    api: ApiClient,
    view: AppView,

    wizard_state: WizardState,
    wizard_panel: WizardPanel,
    playground: Playground,
    diff_view: DiffView,
    docs: DocsViewer,

    project: Option<ProjectDescriptor>,
    run: Option<OptimizationRun>,
    error_banner: Option<String>,

    response_sender: Sender<ResponseMessage>,
    response_receiver: Receiver<ResponseMessage>,
}

impl PromptForgeApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);

        let config = Config::default();
        let api = ApiClient::new(config.settings.api.base_url.clone());
        let (response_sender, response_receiver) = channel();

        Self {
            config,
            api,
            view: AppView::Wizard,
            wizard_state: WizardState::default(),
            wizard_panel: WizardPanel::default(),
            playground: Playground::default(),
            diff_view: DiffView::default(),
            docs: DocsViewer::default(),
            project: None,
            run: None,
            error_banner: None,
            response_sender,
            response_receiver,
        }
    }

    fn drain_responses(&mut self) {
        while let Ok(message) = self.response_receiver.try_recv() {
            match message {
                ResponseMessage::DatasetUploaded(result) => {
                    self.wizard_panel.uploading = false;
                    match result {
                        Ok(preview) => {
                            self.wizard_state.dataset_preview = Some(preview);
                        }
                        Err(e) => {
                            error!("dataset upload failed: {}", e);
                            self.wizard_state.dataset_path = None;
                            self.wizard_state.dataset_preview = None;
                            self.error_banner = Some(format!("Dataset upload failed: {}", e));
                        }
                    }
                }
                ResponseMessage::ProjectCreated(result) => {
                    self.wizard_panel.creating = false;
                    match result {
                        Ok(descriptor) => {
                            let stream_url = descriptor
                                .stream_url(&self.config.settings.api.ws_base_url);
                            spawn_stream(stream_url, self.response_sender.clone());
                            self.project = Some(descriptor);
                            self.run = Some(OptimizationRun::new());
                            self.view = AppView::Playground;
                        }
                        Err(e) => {
                            error!("project creation failed: {}", e);
                            self.error_banner = Some(format!("Project creation failed: {}", e));
                        }
                    }
                }
                ResponseMessage::OptimizationEvent(event) => {
                    if let Some(run) = &mut self.run {
                        if !run.is_finished() {
                            if let OptimizationEvent::Complete {
                                optimized_prompt, ..
                            } = &event
                            {
                                self.playground.optimized = optimized_prompt.clone();
                            }
                            run.apply(event);
                            if run.logs.len() > MAX_RUN_LOG_LINES {
                                let excess = run.logs.len() - MAX_RUN_LOG_LINES;
                                run.logs.drain(..excess);
                            }
                        }
                    }
                }
                ResponseMessage::StreamClosed(error) => {
                    if let Some(e) = &error {
                        self.error_banner = Some(format!("Optimization stream failed: {}", e));
                    }
                    if let Some(run) = &mut self.run {
                        run.stream_ended(error);
                    }
                }
                ResponseMessage::DocLoaded(topic, result) => {
                    self.docs.apply_loaded(topic, result);
                }
            }
        }
    }

    fn handle_wizard_action(&mut self, action: WizardAction) {
        match action {
            WizardAction::UploadDataset(path) => {
                self.wizard_state.dataset_path = Some(path.clone());
                self.wizard_state.dataset_preview = None;
                self.api.upload_dataset(path, self.response_sender.clone());
            }
            WizardAction::CreateProject => {
                if let Some(config) = self.wizard_state.to_project_config() {
                    self.playground.original = config.prompt.clone();
                    self.api.create_project(config, self.response_sender.clone());
                } else {
                    self.wizard_panel.creating = false;
                }
            }
        }
    }

    fn handle_docs_action(&mut self, action: DocsAction) {
        match action {
            DocsAction::Fetch(topic) => {
                docs::fetch_doc(
                    self.api.base_url(),
                    topic,
                    self.response_sender.clone(),
                );
            }
        }
    }

    fn show_error_banner(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_banner.clone() else {
            return;
        };
        egui::TopBottomPanel::top("error_banner_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(message).color(Color32::from_rgb(150, 0, 0)));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✖").on_hover_text("Dismiss").clicked() {
                        self.error_banner = None;
                    }
                });
            });
        });
    }
}

impl eframe::App for PromptForgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_responses();

        // Top bar with view switcher
        egui::TopBottomPanel::top("top_bar_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(crate::constant::DEFAULT_WINDOW_TITLE).strong());
                ui.separator();
                ui.selectable_value(&mut self.view, AppView::Wizard, "Setup");
                ui.selectable_value(&mut self.view, AppView::Playground, "Playground");
                ui.selectable_value(&mut self.view, AppView::Docs, "Docs");
            });
        });

        self.show_error_banner(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            AppView::Wizard => {
                if let Some(action) = self.wizard_panel.show(ui, &mut self.wizard_state) {
                    self.handle_wizard_action(action);
                }
            }
            AppView::Playground => {
                if let (Some(project), Some(run)) = (&self.project, &self.run) {
                    egui::SidePanel::right("run_side_panel")
                        .resizable(true)
                        .default_width(340.0)
                        .show_inside(ui, |ui| {
                            run_panel::show(ui, project, run);
                        });
                }
                egui::CentralPanel::default().show_inside(ui, |ui| {
                    self.playground.show(ui, &mut self.diff_view);
                });
            }
            AppView::Docs => {
                let mut action = self.docs.initial_fetch();
                if let Some(shown) = self.docs.show(ui) {
                    action = Some(shown);
                }
                if let Some(action) = action {
                    self.handle_docs_action(action);
                }
            }
        });

        // Keep polling the channel while a run is streaming
        if self.run.as_ref().is_some_and(|run| !run.is_finished()) {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }
}
