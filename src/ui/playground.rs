//! Prompt playground: edit an original/optimized pair side by side and see
//! the word-level diff between them. The optimized side is filled in
//! automatically when an optimization run completes, but both sides stay
//! editable for ad-hoc comparison.

use egui::{RichText, ScrollArea, Ui};

use crate::ui::diff_view::DiffView;

#[derive(Default)]
pub struct Playground {
    pub original: String,
    pub optimized: String,
}

impl Playground {
    pub fn show(&mut self, ui: &mut Ui, diff_view: &mut DiffView) {
        ui.columns(2, |columns| {
            columns[0].label(RichText::new("Original prompt").strong());
            columns[0].add(
                egui::TextEdit::multiline(&mut self.original)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );

            columns[1].label(RichText::new("Optimized prompt").strong());
            columns[1].add(
                egui::TextEdit::multiline(&mut self.optimized)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );
        });

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                diff_view.show(ui, &self.original, &self.optimized);
            });
    }
}
