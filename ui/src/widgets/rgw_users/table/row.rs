//! Row rendering for the users table.

use egui::{Color32, Stroke, Ui};
use egui_extras::TableRow;
use rgw_business::{RgwUserRow, USER_COLUMNS};
use ustr::Ustr;

use super::cells::render_cell;

/// Result of rendering a user row.
pub struct UserRowResult {
    /// The selection checkbox was toggled.
    pub toggle_selection: Option<Ustr>,
}

#[inline]
pub fn render_user_row(
    row: &mut TableRow<'_, '_>,
    data: &RgwUserRow,
    is_selected: bool,
) -> UserRowResult {
    let mut result = UserRowResult {
        toggle_selection: None,
    };
    let uid = Ustr::from(data.user.uid.as_str());

    row.col(|ui| {
        let mut checked = is_selected;
        if ui
            .checkbox(&mut checked, "")
            .on_hover_text(format!("Select {uid}"))
            .changed()
        {
            result.toggle_selection = Some(uid);
        }
        draw_cell_bottom_border(ui);
    });

    for column in &USER_COLUMNS {
        row.col(|ui| {
            render_cell(ui, column, &column.value(data));
            draw_cell_bottom_border(ui);
        });
    }

    result
}

fn draw_cell_bottom_border(ui: &Ui) {
    let rect = ui.max_rect();
    ui.painter().hline(
        rect.x_range(),
        rect.bottom(),
        Stroke::new(1.0, Color32::from_gray(220)),
    );
}
