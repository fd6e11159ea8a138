use std::any::{Any, TypeId, type_name};
use std::fmt;

use flume::Sender;
use log::warn;

use crate::State;

pub(crate) type Update = (TypeId, Box<dyn Any + Send>);

/// Publishes new values for states and computes from commands and computes.
///
/// Values are queued and applied by [`StateCtx::sync_computes`](crate::StateCtx::sync_computes).
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    pub fn set<T: State>(&self, value: T) {
        if self
            .send
            .send((TypeId::of::<T>(), Box::new(value)))
            .is_err()
        {
            warn!(
                "Dropped update for {}: state context is gone",
                type_name::<T>()
            );
        }
    }
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("pending", &self.send.len())
            .finish()
    }
}
