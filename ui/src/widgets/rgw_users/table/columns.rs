//! Column widths for the users table.

use egui_extras::Column;
use rgw_business::USER_COLUMNS;

pub const SELECT_WIDTH: f32 = 28.0;
/// Width of a column with flex weight 1.
pub const BASE_WIDTH: f32 = 150.0;
pub const ROW_HEIGHT: f32 = 28.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// Selection checkbox, then one column per entry of [`USER_COLUMNS`] scaled by its flex weight.
/// The last column takes the remaining space.
pub fn table_columns() -> Vec<Column> {
    let mut columns = Vec::with_capacity(USER_COLUMNS.len() + 1);
    columns.push(Column::exact(SELECT_WIDTH));

    let last = USER_COLUMNS.len() - 1;
    for (index, column) in USER_COLUMNS.iter().enumerate() {
        let width = BASE_WIDTH * column.flex_grow;
        columns.push(if index == last {
            Column::remainder().at_least(width)
        } else {
            Column::initial(width).at_least(width / 2.0).resizable(true)
        });
    }
    columns
}
