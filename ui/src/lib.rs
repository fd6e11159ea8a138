//! egui desktop console for object-gateway users.

pub mod app;
pub mod state;
pub mod widgets;

pub use app::RgwConsoleApp;
