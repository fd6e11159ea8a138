//! `rgwadmin users list`.

use anyhow::{Result, bail};
use rgw_business::{
    RefreshRgwUsersCommand, RgwUserRow, RgwUsersListCompute, RgwUsersListStatus, USER_COLUMNS,
};
use rgw_states::StateCtx;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::instrument;

use crate::context::flush_and_await;
use crate::output::Output;

#[instrument(skip_all, name = "list")]
pub async fn run_list(mut ctx: StateCtx) -> Result<()> {
    let out = Output::new();

    ctx.enqueue_command::<RefreshRgwUsersCommand>();
    flush_and_await(&mut ctx).await;

    let list = ctx.compute::<RgwUsersListCompute>();
    if let RgwUsersListStatus::Error(message) = &list.status {
        let message = message.clone();
        ctx.shutdown().await;
        bail!("Error listing users: {message}");
    }

    if list.rows().is_empty() {
        out.dim("No users found.");
    } else {
        out.newline();
        out.print(users_table(list.rows()));
        out.total("Total", list.rows().len());
    }

    ctx.shutdown().await;
    Ok(())
}

/// Renders `rows` with the same columns and cell texts as the console's table.
pub fn users_table(rows: &[RgwUserRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(USER_COLUMNS.iter().map(|column| column.name.to_owned()));
    for row in rows {
        builder.push_record(USER_COLUMNS.iter().map(|column| column.value(row).to_string()));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
