//! Documentation viewer: topic sidebar plus fetched markdown content.
//! Topics that cannot be fetched render their built-in placeholder instead
//! of a broken page.

use std::collections::{HashMap, HashSet};

use egui::{ScrollArea, Ui};
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use crate::backend::docs::DocTopic;

pub enum DocsAction {
    Fetch(DocTopic),
}

pub struct DocsViewer {
    selected: DocTopic,
    content: HashMap<DocTopic, String>,
    pending: HashSet<DocTopic>,
    markdown_cache: CommonMarkCache,
}

impl Default for DocsViewer {
    fn default() -> Self {
        Self {
            selected: DocTopic::GettingStarted,
            content: HashMap::new(),
            pending: HashSet::new(),
            markdown_cache: CommonMarkCache::default(),
        }
    }
}

impl DocsViewer {
    /// Record the outcome of a background fetch. Failures fall back to the
    /// topic's placeholder so the page always renders.
    pub fn apply_loaded(&mut self, topic: DocTopic, result: Result<String, String>) {
        self.pending.remove(&topic);
        let markdown = result.unwrap_or_else(|_| topic.placeholder().to_string());
        self.content.insert(topic, markdown);
    }

    pub fn show(&mut self, ui: &mut Ui) -> Option<DocsAction> {
        let mut action = None;

        egui::SidePanel::left("docs_topic_panel")
            .resizable(true)
            .default_width(180.0)
            .show_inside(ui, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    for topic in DocTopic::ALL {
                        let is_selected = self.selected == topic;
                        if ui.selectable_label(is_selected, topic.title()).clicked() {
                            self.selected = topic;
                            if !self.content.contains_key(&topic)
                                && !self.pending.contains(&topic)
                            {
                                self.pending.insert(topic);
                                action = Some(DocsAction::Fetch(topic));
                            }
                        }
                    }
                });
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            if self.pending.contains(&self.selected) {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
                return;
            }

            let markdown = self
                .content
                .get(&self.selected)
                .map(String::as_str)
                .unwrap_or_else(|| self.selected.placeholder());

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    CommonMarkViewer::new().show(ui, &mut self.markdown_cache, markdown);
                });
        });

        action
    }

    /// First paint of the docs view kicks off the initial topic fetch.
    pub fn initial_fetch(&mut self) -> Option<DocsAction> {
        let topic = self.selected;
        if self.content.contains_key(&topic) || self.pending.contains(&topic) {
            return None;
        }
        self.pending.insert(topic);
        Some(DocsAction::Fetch(topic))
    }
}
