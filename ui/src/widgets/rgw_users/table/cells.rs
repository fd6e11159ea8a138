//! Cell renderers, one per cell template.

use egui::{Color32, Direction, Layout, ProgressBar, RichText, Ui};
use rgw_business::{CellValue, UserColumn};

const CHECK_COLOR: Color32 = Color32::from_rgb(34, 139, 34);
const WARN_COLOR: Color32 = Color32::from_rgb(255, 165, 0);

/// Bars turn orange from this usage on.
const USAGE_WARN_RATIO: f64 = 0.9;

pub fn render_cell(ui: &mut Ui, column: &UserColumn, value: &CellValue) {
    if column.centered {
        ui.with_layout(Layout::centered_and_justified(Direction::LeftToRight), |ui| {
            render_value(ui, value);
        });
    } else {
        render_value(ui, value);
    }
}

fn render_value(ui: &mut Ui, value: &CellValue) {
    match value {
        CellValue::Text(text) => {
            ui.label(text);
        }
        CellValue::Check(true) => {
            ui.label(RichText::new("✔").color(CHECK_COLOR))
                .on_hover_text("Yes");
        }
        CellValue::Check(false) => {}
        CellValue::Usage { ratio, .. } => render_usage_bar(ui, *ratio, value),
        CellValue::NoLimit => {
            ui.weak("No Limit");
        }
    }
}

fn render_usage_bar(ui: &mut Ui, ratio: f64, value: &CellValue) {
    let mut bar = ProgressBar::new(ratio.clamp(0.0, 1.0) as f32).text(CellValue::percent(ratio));
    if ratio >= USAGE_WARN_RATIO {
        bar = bar.fill(WARN_COLOR);
    }
    ui.add(bar).on_hover_text(value.to_string());
}
