//! State management module
//!
//! This module contains the timer state, its controller and the application
//! state that wires both to the display.

pub mod app_state;
pub mod controller;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, Command};
pub use controller::TimerController;
pub use timer_state::{format_time, Minutes, Mode, TimerSnapshot, TimerState};
