//! Bulk delete of RGW users.
//!
//! `DeleteRgwUsersCommand` fans out one DELETE per uid in `RgwUsersDeleteInput`,
//! waits for every call to settle, publishes the outcome into
//! `RgwUsersDeleteCompute` and then reloads the users list exactly once,
//! whether or not some deletes failed.

use std::any::Any;
use std::collections::HashMap;
use std::time::Instant;

use chrono::TimeDelta;
use log::{error, info, warn};
use rgw_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, State, Time, Updater,
    state_assign_impl,
};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use ustr::Ustr;

use super::api;
use super::list_users_compute::{
    RefreshGeneration, RefreshTicket, RgwUsersListCompute, refresh_users,
};
use crate::BusinessConfig;
use crate::http::Client;

/// Uids the next `DeleteRgwUsersCommand` will remove.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RgwUsersDeleteInput {
    pub uids: Vec<Ustr>,
}

impl State for RgwUsersDeleteInput {
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub uid: Ustr,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RgwUsersDeleteState {
    #[default]
    Idle,
    InFlight {
        uids: Vec<Ustr>,
    },
    /// Every selected user was removed.
    Done {
        deleted: Vec<Ustr>,
    },
    /// At least one delete failed; the others may have succeeded.
    Failed {
        deleted: Vec<Ustr>,
        failures: Vec<DeleteFailure>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RgwUsersDeleteCompute {
    /// Counts dispatched bulk deletes; `0` before the first one.
    pub batch: u64,
    pub state: RgwUsersDeleteState,
}

impl RgwUsersDeleteCompute {
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            RgwUsersDeleteState::Done { .. } | RgwUsersDeleteState::Failed { .. }
        )
    }

    /// Uids confirmed deleted by the last finished run.
    pub fn deleted(&self) -> &[Ustr] {
        match &self.state {
            RgwUsersDeleteState::Done { deleted }
            | RgwUsersDeleteState::Failed { deleted, .. } => deleted,
            RgwUsersDeleteState::Idle | RgwUsersDeleteState::InFlight { .. } => &[],
        }
    }

    pub fn failures(&self) -> &[DeleteFailure] {
        match &self.state {
            RgwUsersDeleteState::Failed { failures, .. } => failures,
            _ => &[],
        }
    }
}

impl State for RgwUsersDeleteCompute {
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

impl Compute for RgwUsersDeleteCompute {
    fn deps(&self) -> ComputeDeps {
        Vec::new()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Filled by `DeleteRgwUsersCommand` only.
    }
}

/// Deletes every uid in [`RgwUsersDeleteInput`] concurrently, then refreshes the list once.
///
/// Started deletes are not cancelled by a redispatch: the gateway may already have applied them.
#[derive(Default, Debug)]
pub struct DeleteRgwUsersCommand;

impl Command for DeleteRgwUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let uids = snap.state::<RgwUsersDeleteInput>().uids.clone();
        let config = snap.state::<BusinessConfig>().clone();
        let rows = snap.compute::<RgwUsersListCompute>().rows.clone();
        let now = snap.state::<Time>().now();
        let generation = snap.state::<RefreshGeneration>().clone();
        let batch = snap.compute::<RgwUsersDeleteCompute>().batch + 1;

        Box::pin(async move {
            if uids.is_empty() {
                warn!("DeleteRgwUsersCommand dispatched without uids");
                return;
            }

            let started = Instant::now();
            updater.set(RgwUsersDeleteCompute {
                batch,
                state: RgwUsersDeleteState::InFlight { uids: uids.clone() },
            });

            let results = delete_all(&config, &uids).await;

            let mut deleted = Vec::new();
            let mut failures = Vec::new();
            for (uid, result) in uids.iter().zip(results) {
                match result {
                    Ok(()) => deleted.push(*uid),
                    Err(message) => failures.push(DeleteFailure { uid: *uid, message }),
                }
            }

            let state = if failures.is_empty() {
                info!("Deleted {} RGW users", deleted.len());
                RgwUsersDeleteState::Done { deleted }
            } else {
                warn!(
                    "Deleted {} of {} RGW users, {} failed",
                    deleted.len(),
                    uids.len(),
                    failures.len()
                );
                RgwUsersDeleteState::Failed { deleted, failures }
            };
            updater.set(RgwUsersDeleteCompute { batch, state });

            // Reload on success and on failure alike. The new ticket drops any
            // refresh that was still in flight from before the delete.
            let ticket = RefreshTicket::take(&generation);
            let elapsed = TimeDelta::from_std(started.elapsed()).unwrap_or(TimeDelta::zero());
            refresh_users(
                &config,
                rows,
                now + elapsed,
                &ticket,
                &updater,
                &CancellationToken::new(),
            )
            .await;
        })
    }
}

/// Issues the deletes concurrently. Results are in `uids` order.
async fn delete_all(config: &BusinessConfig, uids: &[Ustr]) -> Vec<Result<(), String>> {
    let client = match Client::from_config(config) {
        Ok(client) => client,
        Err(err) => {
            let message = err.to_string();
            return uids.iter().map(|_| Err(message.clone())).collect();
        }
    };

    let mut tasks = JoinSet::new();
    let mut index_of = HashMap::with_capacity(uids.len());
    for (index, uid) in uids.iter().copied().enumerate() {
        let client = client.clone();
        let handle = tasks.spawn(async move {
            api::delete_user(&client, uid.as_str())
                .await
                .map_err(|e| e.to_string())
        });
        index_of.insert(handle.id(), index);
    }

    let mut results: Vec<Result<(), String>> =
        vec![Err("delete did not complete".to_owned()); uids.len()];
    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, result) = match joined {
            Ok((id, result)) => (id, result),
            Err(err) => {
                error!("Delete task failed: {err}");
                (err.id(), Err(err.to_string()))
            }
        };
        if let Some(&index) = index_of.get(&id) {
            results[index] = result;
        }
    }
    results
}
