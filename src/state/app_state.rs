//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{Minutes, Mode, TimerController};
use crate::display::{DisplaySurface, WebDisplay};

/// A user intent delivered by the input surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    SelectMode(Mode),
    SetWorkDuration(Minutes),
    SetBreakDuration(Minutes),
    ChangeDisplayFont(String),
}

impl Command {
    /// Short name recorded as the last action
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Reset => "reset",
            Command::SelectMode(Mode::Work) => "work-mode",
            Command::SelectMode(Mode::Break) => "break-mode",
            Command::SetWorkDuration(_) => "work-duration",
            Command::SetBreakDuration(_) => "break-duration",
            Command::ChangeDisplayFont(_) => "font",
        }
    }
}

/// Main application state: the timer, its display and server metadata
#[derive(Debug)]
pub struct AppState {
    pub controller: TimerController,
    pub display: Arc<WebDisplay>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    /// Create the one timer for this process, idle in Work mode
    pub fn new(port: u16, host: String, work: Minutes, break_: Minutes) -> Self {
        let display = Arc::new(WebDisplay::new(
            super::TimerState::new(work, break_).snapshot(),
        ));
        let surface: Arc<dyn DisplaySurface> = display.clone();

        Self {
            controller: TimerController::new(work, break_, surface),
            display,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Dispatch a command to the controller, or to the display for fonts.
    ///
    /// Returns false only when the command was ignored (unknown font id).
    pub fn apply(&self, command: Command) -> bool {
        let applied = match &command {
            Command::Start => {
                self.controller.start();
                true
            }
            Command::Stop => {
                self.controller.stop();
                true
            }
            Command::Reset => {
                self.controller.reset();
                true
            }
            Command::SelectMode(mode) => {
                self.controller.select_mode(*mode);
                true
            }
            Command::SetWorkDuration(minutes) => {
                self.controller.set_work_duration(*minutes);
                true
            }
            Command::SetBreakDuration(minutes) => {
                self.controller.set_break_duration(*minutes);
                true
            }
            Command::ChangeDisplayFont(id) => {
                let changed = self.display.change_font(id).is_some();
                if !changed {
                    warn!("Unknown font '{}', keeping current typeface", id);
                }
                changed
            }
        };

        if applied {
            self.record_action(command.name());
        }
        applied
    }

    fn record_action(&self, action: &str) {
        info!("Applied command: {}", action);
        let mut last_action = self.last_action.lock().unwrap_or_else(|e| e.into_inner());
        *last_action = Some((action.to_string(), Utc::now()));
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            Some((action, time)) => (Some(action), Some(time)),
            None => (None, None),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
