use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use flume::Receiver;
use log::{debug, error, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::updater::Update;
use crate::{Command, CommandSnapshot, Compute, Dep, State, Updater};

/// Owner of all states, computes and commands of a front end.
///
/// Typical frame / request loop:
/// 1. `sync_computes()` applies published results
/// 2. the front end reads via `state()` / `cached()` and mutates via `update()`
/// 3. `enqueue_command()` + `flush_commands()` (or `dispatch()`) start side effects
/// 4. `run_computed()` refreshes derived values whose dependencies changed
///
/// Flushing commands spawns tasks, so it must happen inside a Tokio runtime.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    compute_order: Vec<TypeId>,
    commands: BTreeMap<TypeId, Arc<dyn Command>>,
    command_queue: Vec<TypeId>,
    cancel_tokens: BTreeMap<TypeId, CancellationToken>,
    dirty: BTreeSet<TypeId>,
    updater: Updater,
    recv: Receiver<Update>,
    tasks: JoinSet<()>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.command_queue.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            compute_order: Vec::new(),
            commands: BTreeMap::new(),
            command_queue: Vec::new(),
            cancel_tokens: BTreeMap::new(),
            dirty: BTreeSet::new(),
            updater: Updater::new(send),
            recv,
            tasks: JoinSet::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.states.insert(id, Box::new(state));
        self.dirty.insert(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        if self.computes.insert(id, Box::new(compute)).is_none() {
            self.compute_order.push(id);
        }
        self.dirty.insert(id);
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Arc::new(command));
    }

    pub fn updater(&self) -> Updater {
        self.updater.clone()
    }

    pub fn try_state<T: State>(&self) -> Option<&T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never added.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|| panic!("State {} is not registered", type_name::<T>()))
    }

    /// Mutable access; marks `T` as changed.
    ///
    /// # Panics
    /// Panics if `T` was never added.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.dirty.insert(id);
        self.states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("State {} is not registered", type_name::<T>()))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never recorded.
    pub fn compute<T: Compute>(&self) -> &T {
        self.cached::<T>()
            .unwrap_or_else(|| panic!("Compute {} is not registered", type_name::<T>()))
    }

    /// Applies every value published through an [`Updater`] and reaps finished tasks.
    pub fn sync_computes(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(err) = joined
                && err.is_panic()
            {
                error!("Command task panicked: {err}");
            }
        }

        for (id, value) in self.recv.try_iter() {
            if let Some(state) = self.states.get_mut(&id) {
                state.assign_box(value);
            } else if let Some(compute) = self.computes.get_mut(&id) {
                compute.assign_box(value);
            } else {
                warn!("Dropped update for unregistered id {id:?}");
                continue;
            }
            self.dirty.insert(id);
        }
    }

    /// Runs every compute whose dependencies changed since the previous run.
    pub fn run_computed(&mut self) {
        if self.dirty.is_empty() {
            return;
        }
        let dirty = std::mem::take(&mut self.dirty);

        for id in &self.compute_order {
            let Some(compute) = self.computes.get(id) else {
                continue;
            };
            if compute.deps().iter().any(|dep| dirty.contains(dep)) {
                compute.compute(Dep::new(&self.states, &self.computes), self.updater.clone());
            }
        }
    }

    pub fn enqueue_command<T: Command>(&mut self) {
        self.command_queue.push(TypeId::of::<T>());
    }

    /// Spawns every queued command on the current Tokio runtime.
    pub fn flush_commands(&mut self) {
        for id in std::mem::take(&mut self.command_queue) {
            let Some(command) = self.commands.get(&id).cloned() else {
                warn!("Command {id:?} was enqueued but never recorded");
                continue;
            };

            let cancel = CancellationToken::new();
            if let Some(previous) = self.cancel_tokens.insert(id, cancel.clone()) {
                debug!("Cancelling previous run of command {id:?}");
                previous.cancel();
            }

            let future = command.run(self.snapshot(), self.updater.clone(), cancel);
            self.tasks.spawn(future);
        }
    }

    pub fn dispatch<T: Command>(&mut self) {
        self.enqueue_command::<T>();
        self.flush_commands();
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.tasks
    }

    /// Cancels and aborts every running command.
    pub async fn shutdown(&mut self) {
        for token in self.cancel_tokens.values() {
            token.cancel();
        }
        self.tasks.shutdown().await;
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(cloned) = state.snapshot() {
                snap.insert_cloned(*id, cloned);
            }
        }
        for (id, compute) in &self.computes {
            if let Some(cloned) = compute.snapshot() {
                snap.insert_cloned(*id, cloned);
            }
        }
        snap
    }
}
