//! Before/after rendering of a prompt diff: split or unified view plus a
//! word-count stats bar. The segments are pure derived data; this module
//! only decides how to paint them.

use egui::{text::LayoutJob, Color32, FontId, RichText, Stroke, TextFormat, Ui};

use crate::diff::{diff, DiffSegment, DiffStats, DiffViewMode, SegmentKind};

// Color constants for better maintainability
const REMOVED_WORD_BG: Color32 = Color32::from_rgb(255, 205, 205);
const ADDED_WORD_BG: Color32 = Color32::from_rgb(200, 245, 200);
const REMOVED_TEXT_COLOR: Color32 = Color32::from_rgb(150, 0, 0);
const ADDED_TEXT_COLOR: Color32 = Color32::from_rgb(0, 100, 0);

const DIFF_FONT_SIZE: f32 = 14.0;
const DIFF_LINE_HEIGHT: f32 = 22.0;

/// Which side of the split view a pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiffPane {
    Original,
    Optimized,
}

pub struct DiffView {
    pub mode: DiffViewMode,
}

impl Default for DiffView {
    fn default() -> Self {
        Self {
            mode: DiffViewMode::Split,
        }
    }
}

impl DiffView {
    /// Recompute the diff for the current pair and render it together with
    /// the mode toggle and the stats bar.
    pub fn show(&mut self, ui: &mut Ui, original: &str, optimized: &str) {
        let segments = diff(original, optimized);
        let stats = DiffStats::from_segments(&segments);

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.mode, DiffViewMode::Split, "Split");
            ui.selectable_value(&mut self.mode, DiffViewMode::Unified, "Unified");

            ui.separator();
            self.show_stats(ui, stats);
        });

        ui.add_space(6.0);

        match self.mode {
            DiffViewMode::Split => self.show_split(ui, &segments),
            DiffViewMode::Unified => self.show_unified(ui, &segments),
        }
    }

    fn show_stats(&self, ui: &mut Ui, stats: DiffStats) {
        ui.label(
            RichText::new(format!("+{} words", stats.added_words)).color(ADDED_TEXT_COLOR),
        );
        ui.label(
            RichText::new(format!("-{} words", stats.removed_words)).color(REMOVED_TEXT_COLOR),
        );
    }

    fn show_split(&self, ui: &mut Ui, segments: &[DiffSegment]) {
        ui.columns(2, |columns| {
            columns[0].label(RichText::new("Original").small().strong());
            let original = pane_layout_job(segments, DiffPane::Original, &columns[0]);
            columns[0].add(egui::Label::new(original).wrap());

            columns[1].label(RichText::new("Optimized").small().strong());
            let optimized = pane_layout_job(segments, DiffPane::Optimized, &columns[1]);
            columns[1].add(egui::Label::new(optimized).wrap());
        });
    }

    fn show_unified(&self, ui: &mut Ui, segments: &[DiffSegment]) {
        let font_id = FontId::monospace(DIFF_FONT_SIZE);
        let base_color = ui.visuals().text_color();
        let mut job = LayoutJob::default();

        for segment in segments {
            let format = match segment.kind {
                SegmentKind::Unchanged => plain_format(&font_id, base_color),
                SegmentKind::Added => added_format(&font_id),
                SegmentKind::Removed => TextFormat {
                    strikethrough: Stroke::new(1.0, REMOVED_TEXT_COLOR),
                    ..removed_format(&font_id)
                },
            };
            job.append(&segment.text, 0.0, format);
        }

        job.wrap.max_width = ui.available_width();
        ui.add(egui::Label::new(job).wrap());
    }
}

/// Build one pane of the split view: Added segments are suppressed in the
/// original pane, Removed segments in the optimized pane.
fn pane_layout_job(segments: &[DiffSegment], pane: DiffPane, ui: &Ui) -> LayoutJob {
    let font_id = FontId::monospace(DIFF_FONT_SIZE);
    let base_color = ui.visuals().text_color();
    let mut job = LayoutJob::default();

    for segment in segments {
        let format = match (segment.kind, pane) {
            (SegmentKind::Unchanged, _) => plain_format(&font_id, base_color),
            (SegmentKind::Removed, DiffPane::Original) => removed_format(&font_id),
            (SegmentKind::Added, DiffPane::Optimized) => added_format(&font_id),
            _ => continue,
        };
        job.append(&segment.text, 0.0, format);
    }

    job.wrap.max_width = ui.available_width();
    job
}

fn plain_format(font_id: &FontId, color: Color32) -> TextFormat {
    TextFormat {
        font_id: font_id.clone(),
        color,
        line_height: Some(DIFF_LINE_HEIGHT),
        ..Default::default()
    }
}

fn removed_format(font_id: &FontId) -> TextFormat {
    TextFormat {
        font_id: font_id.clone(),
        color: REMOVED_TEXT_COLOR,
        background: REMOVED_WORD_BG,
        line_height: Some(DIFF_LINE_HEIGHT),
        ..Default::default()
    }
}

fn added_format(font_id: &FontId) -> TextFormat {
    TextFormat {
        font_id: font_id.clone(),
        color: ADDED_TEXT_COLOR,
        background: ADDED_WORD_BG,
        line_height: Some(DIFF_LINE_HEIGHT),
        ..Default::default()
    }
}
