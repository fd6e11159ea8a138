use std::any::TypeId;

use crate::{Dep, State, Updater};

/// Type ids of the states and computes a [`Compute`] reads.
pub type ComputeDeps = Vec<TypeId>;

/// A derived value.
///
/// `compute` runs whenever one of `deps` changed since the last run. It must not
/// perform IO; results are published through the [`Updater`] and applied on the
/// next sync.
pub trait Compute: State {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);
}
