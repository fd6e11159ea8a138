//! Reactive state runtime used by the RGW console front ends.
//!
//! The runtime stores three kinds of things:
//! - [`State`]: plain values owned by the context (inputs, config, time)
//! - [`Compute`]: derived values, recomputed when one of their dependencies changes
//! - [`Command`]: manual-only side effects (network IO) that publish results through an [`Updater`]
//!
//! Results published by commands and computes are applied on the next
//! [`StateCtx::sync_computes`] call, so front ends read a consistent view per frame.

mod command;
mod compute;
mod ctx;
mod dep;
mod snapshot;
mod state;
mod time;
mod updater;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use snapshot::CommandSnapshot;
pub use state::{State, state_assign_impl};
pub use time::Time;
pub use updater::Updater;
