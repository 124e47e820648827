//! Timer controller: owns the countdown and its periodic tick

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{Minutes, Mode, TimerSnapshot, TimerState};
use crate::{display::DisplaySurface, tasks::countdown_task};

#[derive(Debug)]
struct Inner {
    timer: TimerState,
    /// Bumped on every start/stop so a late tick from an old task is ignored
    epoch: u64,
    ticker: Option<JoinHandle<()>>,
}

/// State shared between the controller and its countdown task
pub(crate) struct Shared {
    inner: Mutex<Inner>,
    display: Arc<dyn DisplaySurface>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Plain data behind the lock; a panicked holder cannot leave it half-written
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn render(&self, inner: &Inner) {
        self.display.render(inner.timer.snapshot());
    }

    /// Run one tick for the task armed at `epoch`.
    ///
    /// Returns false when that task has been cancelled and must exit.
    pub(crate) fn tick(&self, epoch: u64) -> bool {
        let mut inner = self.lock();
        if !inner.timer.running || inner.epoch != epoch {
            debug!("Discarding tick from cancelled countdown (epoch {})", epoch);
            return false;
        }

        if inner.timer.tick() {
            info!(
                "Interval complete, switched to {} mode ({})",
                inner.timer.mode.as_str(),
                super::format_time(inner.timer.duration_of(inner.timer.mode))
            );
        }
        debug!("Tick: {} {}", inner.timer.mode.as_str(), super::format_time(inner.timer.remaining));
        self.render(&inner);
        true
    }

    /// Cancel the countdown if one is armed; keeps mode and remaining
    fn halt(inner: &mut Inner) -> bool {
        if !inner.timer.running {
            return false;
        }
        inner.timer.running = false;
        inner.epoch += 1;
        if let Some(ticker) = inner.ticker.take() {
            ticker.abort();
        }
        true
    }
}

/// Owns the single [`TimerState`] and runs the Work/Break countdown.
///
/// Every operation completes synchronously under one lock, so operations and
/// ticks never interleave. `start` must be called from within a tokio runtime.
pub struct TimerController {
    shared: Arc<Shared>,
}

impl TimerController {
    /// Create an idle controller in Work mode
    pub fn new(work: Minutes, break_: Minutes, display: Arc<dyn DisplaySurface>) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    timer: TimerState::new(work, break_),
                    epoch: 0,
                    ticker: None,
                }),
                display,
            }),
        }
    }

    /// Start ticking once per second. No-op if already running.
    pub fn start(&self) {
        let mut inner = self.shared.lock();
        if inner.timer.running {
            debug!("Start requested while already running");
            return;
        }

        inner.timer.running = true;
        inner.epoch += 1;
        let epoch = inner.epoch;
        inner.ticker = Some(tokio::spawn(countdown_task(Arc::downgrade(&self.shared), epoch)));

        info!(
            "Timer started in {} mode at {}",
            inner.timer.mode.as_str(),
            super::format_time(inner.timer.remaining)
        );
        self.shared.render(&inner);
    }

    /// Pause the countdown. No-op if already idle.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        if Shared::halt(&mut inner) {
            info!("Timer stopped at {}", super::format_time(inner.timer.remaining));
            self.shared.render(&inner);
        }
    }

    /// Stop and return to the start of a Work interval
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        self.reset_locked(&mut inner);
    }

    fn reset_locked(&self, inner: &mut Inner) {
        Shared::halt(inner);
        inner.timer.rewind();
        info!("Timer reset to work mode at {}", super::format_time(inner.timer.remaining));
        self.shared.render(inner);
    }

    /// Switch to `target` with its full duration; running state is kept
    pub fn select_mode(&self, target: Mode) {
        let mut inner = self.shared.lock();
        inner.timer.select_mode(target);
        info!("Selected {} mode", target.as_str());
        self.shared.render(&inner);
    }

    /// Store a new Work length and reset
    pub fn set_work_duration(&self, minutes: Minutes) {
        let mut inner = self.shared.lock();
        inner.timer.work_duration = minutes.as_seconds();
        info!("Work duration set to {} minutes", minutes.get());
        self.reset_locked(&mut inner);
    }

    /// Store a new Break length and reset
    pub fn set_break_duration(&self, minutes: Minutes) {
        let mut inner = self.shared.lock();
        inner.timer.break_duration = minutes.as_seconds();
        info!("Break duration set to {} minutes", minutes.get());
        self.reset_locked(&mut inner);
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.shared.lock().timer.snapshot()
    }

    /// Copy of the full timer state, durations included
    pub fn state(&self) -> TimerState {
        self.shared.lock().timer.clone()
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().timer.running
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        Shared::halt(&mut self.shared.lock());
    }
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("state", &self.state())
            .finish()
    }
}
