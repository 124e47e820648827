//! Process helpers
//!
//! Holds the signal wait used to shut the HTTP server down cleanly.

pub mod signals;

pub use signals::shutdown_signal;
