//! `rgwadmin users delete`.

use anyhow::{Context as _, Result, bail};
use inquire::Confirm;
use rgw_business::{
    BusinessConfig, DeleteConfirmation, DeleteRgwUsersCommand, RgwUsersDeleteCompute,
    RgwUsersDeleteInput, RgwUsersDeleteState, Selection, TableActionKind,
};
use rgw_states::StateCtx;
use tracing::instrument;
use ustr::Ustr;

use crate::context::flush_and_await;
use crate::output::Output;

#[instrument(skip_all, name = "delete", fields(count = uids.len()))]
pub async fn run_delete(mut ctx: StateCtx, uids: &[String], yes: bool) -> Result<()> {
    let out = Output::new();

    let permissions = ctx.state::<BusinessConfig>().permissions;
    if !TableActionKind::Delete.is_permitted(permissions) {
        bail!("Deleting users is not permitted by the configured permissions");
    }

    let mut selection = Selection::default();
    for uid in uids {
        selection.select(Ustr::from(uid.as_str()));
    }
    let Some(confirmation) = DeleteConfirmation::for_selection(&selection) else {
        bail!("No users given");
    };

    if !yes && !confirm(&confirmation)? {
        out.dim("Cancelled.");
        ctx.shutdown().await;
        return Ok(());
    }

    ctx.update::<RgwUsersDeleteInput>(|input| input.uids = confirmation.item_names);
    ctx.enqueue_command::<DeleteRgwUsersCommand>();
    flush_and_await(&mut ctx).await;

    let outcome = ctx.compute::<RgwUsersDeleteCompute>().state.clone();
    ctx.shutdown().await;

    match outcome {
        RgwUsersDeleteState::Done { deleted } => {
            out.success(format!("Deleted {} user(s)", deleted.len()));
            Ok(())
        }
        RgwUsersDeleteState::Failed { deleted, failures } => {
            if !deleted.is_empty() {
                out.success(format!("Deleted {} user(s)", deleted.len()));
            }
            for failure in &failures {
                out.error(format!("Failed to delete {}: {}", failure.uid, failure.message));
            }
            bail!("{} of {} delete(s) failed", failures.len(), uids.len());
        }
        RgwUsersDeleteState::Idle | RgwUsersDeleteState::InFlight { .. } => {
            bail!("Delete operation did not complete")
        }
    }
}

fn confirm(confirmation: &DeleteConfirmation) -> Result<bool> {
    let out = Output::new();
    out.warning(format!(
        "You are about to delete the following {}:",
        confirmation.item_description
    ));
    for name in &confirmation.item_names {
        out.print(format!("  {name}"));
    }

    Confirm::new(&format!("{}? This action cannot be undone.", confirmation.title()))
        .with_default(false)
        .prompt()
        .context("Failed to read confirmation")
}
