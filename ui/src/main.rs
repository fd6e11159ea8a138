#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use rgw_ui::RgwConsoleApp;
use rgw_ui::state::State;

#[global_allocator]
static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> eframe::Result {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    if let Err(err) = dotenvy::dotenv() {
        log::debug!("No .env loaded: {err}");
    }

    // Commands spawn onto this runtime; eframe keeps the main thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;
    let _guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 600.0])
            .with_min_inner_size([640.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "RGW Console",
        native_options,
        Box::new(|_cc| {
            let app = RgwConsoleApp::new(State::default());
            Ok(Box::new(app))
        }),
    )
}
