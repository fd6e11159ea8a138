use std::any::{Any, type_name};

use log::warn;

/// A value owned by [`StateCtx`](crate::StateCtx).
///
/// Implementors are usually plain structs with a `Default`. The `as_any` pair
/// exists so the context can hand out typed references from its type-erased
/// storage.
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone handed to commands when they are flushed.
    ///
    /// States returning `None` are not visible to commands.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    /// Replace `self` with a value published through an [`Updater`](crate::Updater).
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body: downcast and overwrite, ignoring mismatched types.
pub fn state_assign_impl<T: State>(this: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *this = *value,
        Err(_) => warn!("Ignored update with mismatched type for {}", type_name::<T>()),
    }
}
