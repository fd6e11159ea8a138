//! Object-gateway users screen: listing with derived usage, staleness and bulk delete.

pub mod api;
mod actions;
mod columns;
mod delete_compute;
mod list_users_compute;
mod model;
mod selection;
mod stale_compute;
mod state;
mod usage;


use rgw_states::{StateCtx, Time};

pub use actions::{TableAction, TableActionKind, UrlBuilder};
pub use api::RgwApiError;
pub use columns::{CellTemplate, CellValue, USER_COLUMNS, UsageUnit, UserColumn, UserProp};
pub use delete_compute::{
    DeleteFailure, DeleteRgwUsersCommand, RgwUsersDeleteCompute, RgwUsersDeleteInput,
    RgwUsersDeleteState,
};
pub use list_users_compute::{RefreshRgwUsersCommand, RgwUsersListCompute, RgwUsersListStatus};

use list_users_compute::RefreshGeneration;
pub use model::{BucketUsage, RgwUser, UserQuota};
pub use selection::Selection;
pub use stale_compute::RgwUsersStaleCompute;
pub use state::{DeleteConfirmation, RgwUsersState};
pub use usage::{RgwUserRow, UserUsage, format_bytes, transform_users};

use crate::BusinessConfig;

/// Registers every state, compute and command of the users screen.
///
/// Adds a [`Time`] state when the context does not have one yet.
pub fn register_rgw_users(ctx: &mut StateCtx, config: BusinessConfig) {
    if ctx.try_state::<Time>().is_none() {
        ctx.add_state(Time::default());
    }
    ctx.add_state(config);
    ctx.add_state(RgwUsersState::default());
    ctx.add_state(RgwUsersDeleteInput::default());
    ctx.add_state(RefreshGeneration::default());

    ctx.record_compute(RgwUsersListCompute::default());
    ctx.record_compute(RgwUsersDeleteCompute::default());
    ctx.record_compute(RgwUsersStaleCompute::default());

    ctx.record_command(RefreshRgwUsersCommand);
    ctx.record_command(DeleteRgwUsersCommand);
}

/// Drops uids removed by the last finished bulk delete from the table selection.
///
/// Each delete outcome is applied once, so a uid selected again later (for
/// example after the user was re-created) stays selected.
pub fn prune_deleted_selection(ctx: &mut StateCtx) {
    let outcome = ctx.compute::<RgwUsersDeleteCompute>();
    let applied = ctx.state::<RgwUsersState>().pruned_delete_batch;
    if !outcome.is_finished() || outcome.batch == applied {
        return;
    }
    let batch = outcome.batch;
    let deleted = outcome.deleted().to_vec();
    ctx.update::<RgwUsersState>(|s| {
        s.selection.remove_all(&deleted);
        s.pruned_delete_batch = batch;
    });
}
