//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown;

// Re-export main functions
pub(crate) use countdown::countdown_task;
pub use countdown::TICK_PERIOD;
