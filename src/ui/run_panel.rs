//! Live view of an optimization run: status line, progress bar and the log
//! stream as it arrives.

use egui::{Color32, RichText, ScrollArea, Ui};

use crate::backend::api_client::ProjectDescriptor;
use crate::backend::stream::{OptimizationRun, RunOutcome};

pub fn show(ui: &mut Ui, project: &ProjectDescriptor, run: &OptimizationRun) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(project.name.as_str()).strong());
        ui.label(
            RichText::new(format!("({})", project.id))
                .monospace()
                .weak(),
        );
    });

    ui.add_space(4.0);
    ui.label(run.status.as_str());
    ui.add(
        egui::ProgressBar::new(run.progress / 100.0).text(format!("{:.0}%", run.progress)),
    );

    match &run.outcome {
        RunOutcome::Running => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Optimizing...");
            });
        }
        RunOutcome::Complete { score, .. } => {
            let text = match score {
                Some(score) => format!("Done, best score {:.3}", score),
                None => "Done".to_string(),
            };
            ui.label(RichText::new(text).color(Color32::from_rgb(0, 100, 0)));
        }
        RunOutcome::Failed { message } => {
            ui.label(RichText::new(message).color(Color32::from_rgb(150, 0, 0)));
        }
    }

    ui.add_space(6.0);
    ui.separator();

    ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.style_mut().spacing.item_spacing.y = 2.0;
            for entry in &run.logs {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        RichText::new(entry.received_at.format("%H:%M:%S").to_string())
                            .monospace()
                            .weak(),
                    );
                    if let Some(level) = &entry.level {
                        ui.label(RichText::new(level.to_uppercase()).monospace().small());
                    }
                    ui.label(RichText::new(entry.message.as_str()).monospace());
                });
            }
        });
}
