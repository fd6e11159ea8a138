use std::any::{Any, TypeId};

use chrono::{DateTime, TimeDelta, Utc};
use rgw_states::{Compute, ComputeDeps, Dep, State, Time, Updater, state_assign_impl};

use super::list_users_compute::RgwUsersListCompute;
use crate::BusinessConfig;

/// Whether the users table may show outdated data.
///
/// Becomes true once a refresh has gone unanswered for `BusinessConfig::stale_timeout`,
/// and false again when a refresh succeeds or a new one starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgwUsersStaleCompute {
    pub is_stale: bool,
}

impl RgwUsersStaleCompute {
    pub fn evaluate(
        pending_since: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        timeout: std::time::Duration,
    ) -> bool {
        let Some(started) = pending_since else {
            return false;
        };
        let timeout = TimeDelta::from_std(timeout).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(started) >= timeout
    }
}

impl State for RgwUsersStaleCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

impl Compute for RgwUsersStaleCompute {
    fn deps(&self) -> ComputeDeps {
        vec![
            TypeId::of::<Time>(),
            TypeId::of::<BusinessConfig>(),
            TypeId::of::<RgwUsersListCompute>(),
        ]
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let now = deps.get_state_ref::<Time>().now();
        let config = deps.get_state_ref::<BusinessConfig>();
        let list = deps.get_compute_ref::<RgwUsersListCompute>();

        let is_stale = Self::evaluate(list.pending_since, now, config.stale_timeout);
        if is_stale != self.is_stale {
            updater.set(Self { is_stale });
        }
    }
}
