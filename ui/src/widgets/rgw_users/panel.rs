//! Main panel for object-gateway users.

use egui::{Button, Color32, Frame, Margin, Response, RichText, Stroke, Ui};
use egui_extras::TableBuilder;
use rgw_business::{
    BusinessConfig, DeleteRgwUsersCommand, RefreshRgwUsersCommand, RgwUsersDeleteCompute,
    RgwUsersDeleteInput, RgwUsersDeleteState, RgwUsersListCompute, RgwUsersStaleCompute,
    RgwUsersState, TableAction, TableActionKind,
};
use rgw_states::StateCtx;
use ustr::Ustr;

use super::modals::{ModalOutcome, show_delete_users_modal};
use super::table::columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use super::table::header::render_table_header;
use super::table::row::render_user_row;

const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
const STALE_COLOR: Color32 = Color32::from_rgb(255, 165, 0);

/// Something the administrator asked for while the frame was drawn.
enum PanelIntent {
    Refresh,
    Navigate(String),
    OpenDeleteConfirmation,
    ToggleSelection(Ustr),
}

/// Toolbar, banners, users table and the delete confirmation.
pub fn rgw_users_panel(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let mut intents = Vec::new();

    let response = ui
        .vertical(|ui| {
            render_toolbar(state_ctx, ui, &mut intents);
            render_banners(state_ctx, ui);
            ui.add_space(8.0);
            render_table(state_ctx, ui, &mut intents);
        })
        .response;

    for intent in intents {
        match intent {
            PanelIntent::Refresh => state_ctx.dispatch::<RefreshRgwUsersCommand>(),
            PanelIntent::Navigate(route) => {
                let url = state_ctx.state::<BusinessConfig>().dashboard_route_url(&route);
                log::info!("Opening {url}");
                ui.ctx().open_url(egui::OpenUrl::new_tab(url));
            }
            PanelIntent::OpenDeleteConfirmation => {
                state_ctx.update::<RgwUsersState>(RgwUsersState::open_delete_confirmation);
            }
            PanelIntent::ToggleSelection(uid) => {
                state_ctx.update::<RgwUsersState>(|s| s.selection.toggle(uid));
            }
        }
    }

    show_delete_confirmation(state_ctx, ui);
    response
}

fn render_toolbar(state_ctx: &StateCtx, ui: &mut Ui, intents: &mut Vec<PanelIntent>) {
    let permissions = state_ctx.state::<BusinessConfig>().permissions;
    let selection = &state_ctx.state::<RgwUsersState>().selection;
    let is_loading = state_ctx
        .cached::<RgwUsersListCompute>()
        .is_some_and(RgwUsersListCompute::is_loading);

    ui.horizontal(|ui| {
        for action in TableAction::for_selection(selection, permissions) {
            let mut text = RichText::new(action.label());
            if action.primary {
                text = text.strong();
            }
            let mut button = Button::new(text);
            if action.primary {
                button = button.fill(ui.visuals().selection.bg_fill);
            }
            if ui.add_enabled(!action.disabled, button).clicked() {
                match (action.kind, action.route) {
                    (TableActionKind::Delete, _) => {
                        intents.push(PanelIntent::OpenDeleteConfirmation);
                    }
                    (_, Some(route)) => intents.push(PanelIntent::Navigate(route)),
                    (_, None) => {}
                }
            }
        }

        ui.separator();
        if ui.add_enabled(!is_loading, Button::new("Refresh")).clicked() {
            intents.push(PanelIntent::Refresh);
        }
        if is_loading {
            ui.spinner();
            ui.label("Loading...");
        }
        if selection.has_selection() {
            ui.weak(format!("{} selected", selection.selected().len()));
        }
    });
}

fn render_banners(state_ctx: &StateCtx, ui: &mut Ui) {
    if state_ctx
        .cached::<RgwUsersStaleCompute>()
        .is_some_and(|stale| stale.is_stale)
    {
        ui.colored_label(
            STALE_COLOR,
            "The user list may be outdated: the last refresh has not completed.",
        );
    }

    if let Some(error) = state_ctx
        .cached::<RgwUsersListCompute>()
        .and_then(RgwUsersListCompute::error_message)
    {
        ui.colored_label(Color32::RED, format!("Error: {error}"));
    }

    if let Some(outcome) = state_ctx.cached::<RgwUsersDeleteCompute>() {
        match &outcome.state {
            RgwUsersDeleteState::InFlight { uids } => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Deleting {} user(s)...", uids.len()));
                });
            }
            RgwUsersDeleteState::Failed { failures, .. } => {
                for failure in failures {
                    ui.colored_label(
                        Color32::RED,
                        format!("Failed to delete {}: {}", failure.uid, failure.message),
                    );
                }
            }
            RgwUsersDeleteState::Idle | RgwUsersDeleteState::Done { .. } => {}
        }
    }
}

fn render_table(state_ctx: &StateCtx, ui: &mut Ui, intents: &mut Vec<PanelIntent>) {
    let Some(list) = state_ctx.cached::<RgwUsersListCompute>() else {
        return;
    };
    let selection = &state_ctx.state::<RgwUsersState>().selection;

    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            let mut builder = TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
            for column in table_columns() {
                builder = builder.column(column);
            }

            builder
                .header(HEADER_HEIGHT, |mut header| render_table_header(&mut header))
                .body(|mut body| {
                    for data in list.rows() {
                        body.row(ROW_HEIGHT, |mut row| {
                            let uid = Ustr::from(data.user.uid.as_str());
                            let is_selected = selection.contains(uid);
                            let result = render_user_row(&mut row, data, is_selected);
                            if let Some(uid) = result.toggle_selection {
                                intents.push(PanelIntent::ToggleSelection(uid));
                            }
                        });
                    }
                });
        });

    if list.rows().is_empty() && !list.is_loading() {
        ui.weak("No users.");
    }
}

fn show_delete_confirmation(state_ctx: &mut StateCtx, ui: &Ui) {
    let Some(mut confirmation) = state_ctx.state::<RgwUsersState>().delete_confirmation.clone()
    else {
        return;
    };

    let outcome = show_delete_users_modal(&mut confirmation, ui);
    match outcome {
        ModalOutcome::Open => {
            let shown = state_ctx.state::<RgwUsersState>().delete_confirmation.as_ref();
            if shown != Some(&confirmation) {
                state_ctx.update::<RgwUsersState>(|s| s.delete_confirmation = Some(confirmation));
            }
        }
        ModalOutcome::Cancel => state_ctx.update::<RgwUsersState>(RgwUsersState::cancel_delete),
        ModalOutcome::Submit => {
            let mut submission = None;
            state_ctx.update::<RgwUsersState>(|s| {
                s.delete_confirmation = Some(confirmation);
                submission = s.submit_delete();
            });
            if let Some(input) = submission {
                log::info!("Deleting {} RGW user(s)", input.uids.len());
                state_ctx.update::<RgwUsersDeleteInput>(|i| *i = input);
                state_ctx.dispatch::<DeleteRgwUsersCommand>();
            }
        }
    }
}
