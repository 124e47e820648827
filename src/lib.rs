//! Pomodoro Timer - A Work/Break countdown served to the browser
//!
//! This library provides the countdown state machine, the controller that
//! ticks it once per second, and the HTTP surface the timer page talks to.

pub mod config;
pub mod display;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use display::{DisplaySurface, DisplayUpdate, Font, WebDisplay};
pub use state::{AppState, Command, Minutes, Mode, TimerController};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
