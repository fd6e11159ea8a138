//! Critical confirmation dialog for deleting users.

use egui::{Color32, RichText, ScrollArea, Ui, Window};
use rgw_business::DeleteConfirmation;

/// Checkbox the administrator must tick before the delete button unlocks.
pub const DELETE_CONFIRM_LABEL: &str = "Yes, I am sure.";

const DANGER_COLOR: Color32 = Color32::from_rgb(200, 35, 51);

/// Label of the submit button, e.g. `Delete 2 users`.
pub fn submit_label(confirmation: &DeleteConfirmation) -> String {
    format!(
        "Delete {} {}",
        confirmation.item_names.len(),
        confirmation.item_description
    )
}

/// What the administrator did with the dialog this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    Open,
    Submit,
    Cancel,
}

/// Shows the dialog for `confirmation`, updating its `confirmed` flag in place.
pub fn show_delete_users_modal(confirmation: &mut DeleteConfirmation, ui: &Ui) -> ModalOutcome {
    let mut open = true;
    let mut outcome = ModalOutcome::Open;

    Window::new(confirmation.title())
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ui.ctx(), |ui| {
            ui.label(format!(
                "You are about to delete the following {}:",
                confirmation.item_description
            ));
            ui.add_space(4.0);

            ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                for name in &confirmation.item_names {
                    ui.monospace(name.as_str());
                }
            });

            ui.add_space(8.0);
            ui.colored_label(DANGER_COLOR, "This action cannot be undone.");
            ui.checkbox(&mut confirmation.confirmed, DELETE_CONFIRM_LABEL);

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                let delete = ui.add_enabled(
                    confirmation.confirmed,
                    egui::Button::new(
                        RichText::new(submit_label(confirmation)).color(Color32::WHITE),
                    )
                    .fill(DANGER_COLOR),
                );
                if delete.clicked() {
                    outcome = ModalOutcome::Submit;
                }
                if ui.button("Cancel").clicked() {
                    outcome = ModalOutcome::Cancel;
                }
            });
        });

    if !open {
        outcome = ModalOutcome::Cancel;
    }
    outcome
}
