//! Object-gateway users screen.
//!
//! - `panel`: toolbar, banners and the table, wired to the business states
//! - `table`: column layout, header and row rendering
//! - `modals`: critical confirmation for bulk delete

mod modals;
mod panel;
mod table;

pub use modals::DELETE_CONFIRM_LABEL;
pub use panel::rgw_users_panel;
