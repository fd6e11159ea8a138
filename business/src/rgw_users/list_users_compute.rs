//! RGW users "list" compute + refresh command.
//!
//! - `RgwUsersListCompute` is a compute-shaped cache holding the latest status and rows.
//! - `RefreshRgwUsersCommand` performs the network IO and publishes into the cache
//!   through `Updater::set()`.
//!
//! Front ends read via `ctx.cached::<RgwUsersListCompute>()` and refresh via
//! `ctx.dispatch::<RefreshRgwUsersCommand>()`.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use log::{info, warn};
use rgw_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, State, Time, Updater,
    state_assign_impl,
};
use tokio_util::sync::CancellationToken;

use super::api;
use super::usage::{RgwUserRow, transform_users};
use crate::BusinessConfig;
use crate::http::Client;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RgwUsersListStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The last refresh failed with this message.
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct RgwUsersListCompute {
    pub status: RgwUsersListStatus,
    /// Rows of the last successful refresh. Kept while a newer refresh is in flight or failed.
    pub rows: Vec<RgwUserRow>,
    /// Start of the latest refresh that has not been answered successfully yet.
    pub pending_since: Option<DateTime<Utc>>,
}

impl RgwUsersListCompute {
    pub fn is_loading(&self) -> bool {
        self.status == RgwUsersListStatus::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            RgwUsersListStatus::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[RgwUserRow] {
        &self.rows
    }

    pub fn row(&self, uid: &str) -> Option<&RgwUserRow> {
        self.rows.iter().find(|row| row.user.uid == uid)
    }
}

impl State for RgwUsersListCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

impl Compute for RgwUsersListCompute {
    fn deps(&self) -> ComputeDeps {
        Vec::new()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Filled by `RefreshRgwUsersCommand` only.
    }
}

/// Orders list refreshes: only the most recently started one may publish.
///
/// Shared by every refresh, including the one a bulk delete runs, so a slow
/// older response never overwrites a newer list.
#[derive(Debug, Clone, Default)]
pub(crate) struct RefreshGeneration(Arc<AtomicU64>);

impl RefreshGeneration {
    /// Starts a refresh and returns its ticket. Older tickets stop being current.
    pub(crate) fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

impl State for RefreshGeneration {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// A refresh that has been given its ticket.
pub(crate) struct RefreshTicket {
    generation: RefreshGeneration,
    ticket: u64,
}

impl RefreshTicket {
    pub(crate) fn take(generation: &RefreshGeneration) -> Self {
        Self {
            ticket: generation.begin(),
            generation: generation.clone(),
        }
    }

    fn is_current(&self) -> bool {
        self.generation.is_current(self.ticket)
    }
}

/// Manual-only command that reloads the users table.
///
/// Dispatching again while a refresh is in flight cancels the older one, and a
/// newer refresh of any origin makes an older result be dropped.
#[derive(Default, Debug)]
pub struct RefreshRgwUsersCommand;

impl Command for RefreshRgwUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let rows = snap.compute::<RgwUsersListCompute>().rows.clone();
        let started_at = snap.state::<Time>().now();
        // Taken at dispatch, not when the task is first polled.
        let ticket = RefreshTicket::take(snap.state::<RefreshGeneration>());

        Box::pin(async move {
            refresh_users(&config, rows, started_at, &ticket, &updater, &cancel).await;
        })
    }
}

/// Loads the user list and publishes `Loading`, then `Loaded` or `Error`.
///
/// `rows` are the currently shown rows; they stay visible until the new list arrives.
pub(crate) async fn refresh_users(
    config: &BusinessConfig,
    rows: Vec<RgwUserRow>,
    started_at: DateTime<Utc>,
    ticket: &RefreshTicket,
    updater: &Updater,
    cancel: &CancellationToken,
) {
    if cancel.is_cancelled() || !ticket.is_current() {
        info!("RGW user refresh superseded before it started");
        return;
    }
    updater.set(RgwUsersListCompute {
        status: RgwUsersListStatus::Loading,
        rows: rows.clone(),
        pending_since: Some(started_at),
    });

    let result = match Client::from_config(config) {
        Ok(client) => {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("RGW user refresh superseded by a newer one");
                    return;
                }
                result = api::list_users(&client) => result,
            }
        }
        Err(err) => Err(err.into()),
    };

    if !ticket.is_current() {
        info!("Dropped the result of a superseded RGW user refresh");
        return;
    }

    match result {
        Ok(users) => {
            info!("Loaded {} RGW users", users.len());
            updater.set(RgwUsersListCompute {
                status: RgwUsersListStatus::Loaded,
                rows: transform_users(users),
                pending_since: None,
            });
        }
        Err(err) => {
            warn!("Failed to list RGW users: {err}");
            updater.set(RgwUsersListCompute {
                status: RgwUsersListStatus::Error(err.to_string()),
                rows,
                pending_since: Some(started_at),
            });
        }
    }
}
