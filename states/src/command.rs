use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A manual-only side effect.
///
/// Commands never run implicitly: they are queued with
/// [`StateCtx::enqueue_command`](crate::StateCtx::enqueue_command) and spawned on
/// [`StateCtx::flush_commands`](crate::StateCtx::flush_commands). Dispatching a
/// command again cancels the token of its previous run; long-running commands
/// should check it before publishing.
pub trait Command: Send + Sync + 'static {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}
