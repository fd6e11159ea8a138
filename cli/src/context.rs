//! State context initialization and task management utilities.

use rgw_business::{BusinessConfig, register_rgw_users};
use rgw_states::StateCtx;
use tracing::instrument;

/// Initialize `StateCtx` with the users screen's states, computes, and commands.
pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();
    register_rgw_users(&mut ctx, config);
    ctx
}

/// Await all pending tasks in the `JoinSet` and sync computes.
#[instrument(skip_all, name = "await_tasks")]
pub async fn await_pending_tasks(ctx: &mut StateCtx) {
    while ctx.task_count() > 0 {
        if ctx.task_set_mut().join_next().await.is_some() {
            ctx.sync_computes();
        }
    }
}

/// Flush commands and await all spawned tasks.
#[instrument(skip_all, name = "flush")]
pub async fn flush_and_await(ctx: &mut StateCtx) {
    ctx.sync_computes();
    ctx.flush_commands();
    await_pending_tasks(ctx).await;
    ctx.sync_computes();
    ctx.run_computed();
    ctx.sync_computes();
}
