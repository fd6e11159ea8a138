use egui::Ui;
use egui_extras::TableRow;
use rgw_business::USER_COLUMNS;

/// Renders the header: an empty cell over the checkboxes, then the column names.
#[inline]
pub fn render_table_header(header: &mut TableRow<'_, '_>) {
    header.col(|_ui| {});
    for column in &USER_COLUMNS {
        header.col(|ui| {
            render_header_cell(ui, column.name);
        });
    }
}

#[inline]
fn render_header_cell(ui: &mut Ui, label: &str) {
    ui.strong(label);
}
