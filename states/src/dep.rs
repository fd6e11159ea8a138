use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Compute, State};

/// Read-only view of the context handed to [`Compute::compute`].
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
    computes: &'a BTreeMap<TypeId, Box<dyn Compute>>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a BTreeMap<TypeId, Box<dyn State>>,
        computes: &'a BTreeMap<TypeId, Box<dyn Compute>>,
    ) -> Self {
        Self { states, computes }
    }

    pub fn try_state_ref<T: State>(&self) -> Option<&'a T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never added to the context.
    pub fn get_state_ref<T: State>(&self) -> &'a T {
        self.try_state_ref::<T>()
            .unwrap_or_else(|| panic!("State {} is not registered", type_name::<T>()))
    }

    pub fn try_compute_ref<T: Compute>(&self) -> Option<&'a T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never recorded in the context.
    pub fn get_compute_ref<T: Compute>(&self) -> &'a T {
        self.try_compute_ref::<T>()
            .unwrap_or_else(|| panic!("Compute {} is not registered", type_name::<T>()))
    }
}
