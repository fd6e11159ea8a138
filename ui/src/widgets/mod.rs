mod rgw_users;

pub use rgw_users::{DELETE_CONFIRM_LABEL, rgw_users_panel};
