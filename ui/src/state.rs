use chrono::{DateTime, Utc};
use rgw_business::{BusinessConfig, prune_deleted_selection, register_rgw_users};
use rgw_states::{StateCtx, Time};

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    /// Loads `RGW_CONSOLE_*` settings from the environment, falling back to defaults.
    fn default() -> Self {
        let config = BusinessConfig::from_env().unwrap_or_else(|err| {
            log::error!("Invalid console configuration, using defaults: {err}");
            BusinessConfig::default()
        });
        Self::new(config)
    }
}

impl State {
    pub fn new(config: BusinessConfig) -> Self {
        let mut ctx = StateCtx::new();
        ctx.add_state(Time::default());
        register_rgw_users(&mut ctx, config);
        Self { ctx }
    }

    pub fn test(base_url: String) -> Self {
        Self::new(BusinessConfig::new(base_url))
    }

    /// Start of a frame: advance the clock and apply results published since the last frame.
    pub fn begin_frame(&mut self, now: DateTime<Utc>) {
        self.ctx.update::<Time>(|t| *t.as_mut() = now);
        self.ctx.sync_computes();
        prune_deleted_selection(&mut self.ctx);
    }

    /// End of a frame: recompute what the frame changed.
    pub fn end_frame(&mut self) {
        self.ctx.run_computed();
    }
}
