mod app;
pub mod app_core;
mod background;
pub mod commands;
pub mod events;
pub mod input;
pub mod log_buffer;
pub mod logging;
pub mod state;
pub mod ui;
mod utils;

pub use app::App;

// Exposed unconditionally; the integration tests drive the app through it
pub mod testing;
