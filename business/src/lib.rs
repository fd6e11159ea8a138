//! Business layer of the RGW console.
//!
//! Everything a front end needs to administer object-gateway users lives here:
//! configuration, the HTTP client, the user model with its derived usage, and the
//! states / computes / commands that drive the users screen. Front ends (`rgw-ui`,
//! `rgw-cli`) only render and dispatch.

mod config;
pub mod http;
pub mod rgw_users;

#[cfg(test)]
mod test_utils;

pub use config::{BusinessConfig, ConfigError, ENV_PREFIX, PermissionParseError, RgwPermission};
pub use rgw_users::{
    BucketUsage, CellTemplate, CellValue, DeleteConfirmation, DeleteFailure,
    DeleteRgwUsersCommand, RefreshRgwUsersCommand, RgwApiError, RgwUser, RgwUserRow,
    RgwUsersDeleteCompute, RgwUsersDeleteInput, RgwUsersDeleteState, RgwUsersListCompute,
    RgwUsersListStatus, RgwUsersStaleCompute, RgwUsersState, Selection, TableAction,
    TableActionKind, USER_COLUMNS, UrlBuilder, UsageUnit, UserColumn, UserProp, UserQuota,
    UserUsage, format_bytes, prune_deleted_selection, register_rgw_users, transform_users,
};
