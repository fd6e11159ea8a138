use std::any::Any;

use rgw_states::{State, state_assign_impl};
use ustr::Ustr;

use super::delete_compute::RgwUsersDeleteInput;
use super::selection::Selection;

/// Pending critical confirmation for a bulk delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    /// `user` or `users`.
    pub item_description: &'static str,
    pub item_names: Vec<Ustr>,
    /// The administrator ticked "Yes, I am sure."
    pub confirmed: bool,
}

impl DeleteConfirmation {
    pub fn for_selection(selection: &Selection) -> Option<Self> {
        if !selection.has_selection() {
            return None;
        }
        Some(Self {
            item_description: if selection.has_single_selection() {
                "user"
            } else {
                "users"
            },
            item_names: selection.selected().to_vec(),
            confirmed: false,
        })
    }

    pub fn title(&self) -> String {
        format!("Delete {}", self.item_description)
    }
}

/// UI state of the users screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RgwUsersState {
    pub selection: Selection,
    pub delete_confirmation: Option<DeleteConfirmation>,
    /// Batch of the last bulk delete whose outcome was applied to `selection`.
    pub pruned_delete_batch: u64,
}

impl RgwUsersState {
    /// Opens the confirmation for the current selection. No-op without a selection.
    pub fn open_delete_confirmation(&mut self) {
        self.delete_confirmation = DeleteConfirmation::for_selection(&self.selection);
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirmation = None;
    }

    /// Closes a confirmed dialog and returns what to delete.
    ///
    /// Returns `None` and keeps the dialog open while it is not confirmed.
    pub fn submit_delete(&mut self) -> Option<RgwUsersDeleteInput> {
        if !self.delete_confirmation.as_ref()?.confirmed {
            return None;
        }
        self.delete_confirmation.take().map(|c| RgwUsersDeleteInput {
            uids: c.item_names,
        })
    }
}

impl State for RgwUsersState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
