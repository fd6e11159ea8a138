use std::time::Duration;

use chrono::Utc;
use rgw_business::{BusinessConfig, RefreshRgwUsersCommand};

use crate::{state::State, widgets};

/// Idle repaint interval, so the stale banner shows up without user input.
const CLOCK_TICK: Duration = Duration::from_secs(1);

pub struct RgwConsoleApp {
    state: State,
    initial_fetch_dispatched: bool,
}

impl RgwConsoleApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            initial_fetch_dispatched: false,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for RgwConsoleApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.begin_frame(Utc::now());

        if !self.initial_fetch_dispatched {
            self.initial_fetch_dispatched = true;
            self.state.ctx.dispatch::<RefreshRgwUsersCommand>();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.strong("RGW Console");
                ui.separator();
                let base_url = self.state.ctx.state::<BusinessConfig>().api_url();
                ui.weak(base_url);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Users");
            ui.separator();
            widgets::rgw_users_panel(&mut self.state.ctx, ui);
        });

        self.state.end_frame();
        ctx.request_repaint_after(CLOCK_TICK);
    }
}
