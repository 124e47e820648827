//! Timer state structure and countdown rules

use serde::{Deserialize, Serialize};

/// Default Work interval length
pub const DEFAULT_WORK_MINUTES: u64 = 25;
/// Default Break interval length
pub const DEFAULT_BREAK_MINUTES: u64 = 5;
/// Largest accepted interval length (one day)
pub const MAX_MINUTES: u64 = 24 * 60;

/// Which interval is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    /// The other interval
    pub fn flipped(self) -> Self {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::Break => "break",
        }
    }

    /// Parse a mode id as used in URLs (`work` / `break`)
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "work" => Some(Mode::Work),
            "break" => Some(Mode::Break),
            _ => None,
        }
    }
}

/// A validated interval length in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minutes(u64);

impl Minutes {
    /// Accept 1..=MAX_MINUTES, reject everything else
    pub fn new(minutes: u64) -> Result<Self, String> {
        if minutes == 0 {
            return Err("Duration must be at least 1 minute".to_string());
        }
        if minutes > MAX_MINUTES {
            return Err(format!("Duration must be at most {} minutes", MAX_MINUTES));
        }
        Ok(Self(minutes))
    }

    /// Parse raw input field text such as `" 25 "`
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        let minutes = trimmed
            .parse::<u64>()
            .map_err(|_| format!("Invalid duration '{}': expected a whole number of minutes", trimmed))?;
        Self::new(minutes)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn as_seconds(&self) -> u64 {
        self.0 * 60
    }
}

/// Point-in-time view of the timer handed to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: Mode,
    pub remaining_seconds: u64,
    pub running: bool,
}

impl TimerSnapshot {
    /// Countdown text for this snapshot
    pub fn formatted(&self) -> String {
        format_time(self.remaining_seconds)
    }
}

/// Countdown state for the Work/Break cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub mode: Mode,
    pub work_duration: u64,
    pub break_duration: u64,
    pub remaining: u64,
    pub running: bool,
}

impl TimerState {
    /// Create an idle timer in Work mode with the full work duration loaded
    pub fn new(work: Minutes, break_: Minutes) -> Self {
        Self {
            mode: Mode::Work,
            work_duration: work.as_seconds(),
            break_duration: break_.as_seconds(),
            remaining: work.as_seconds(),
            running: false,
        }
    }

    /// Configured length of the given mode in seconds
    pub fn duration_of(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.work_duration,
            Mode::Break => self.break_duration,
        }
    }

    /// Switch mode and load its full duration in one step
    pub fn select_mode(&mut self, target: Mode) {
        self.mode = target;
        self.remaining = self.duration_of(target);
    }

    /// Back to the beginning: Work mode, full work duration
    pub fn rewind(&mut self) {
        self.select_mode(Mode::Work);
    }

    /// Advance one second.
    ///
    /// At zero the mode flips and the new mode's duration is loaded before the
    /// decrement, so the crossover tick shows `duration - 1` and never `-1`.
    /// Returns true when this tick crossed over.
    pub fn tick(&mut self) -> bool {
        let crossed = self.remaining == 0;
        if crossed {
            self.select_mode(self.mode.flipped());
        }
        self.remaining = self.remaining.saturating_sub(1);
        crossed
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            remaining_seconds: self.remaining,
            running: self.running,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            mode: Mode::Work,
            work_duration: DEFAULT_WORK_MINUTES * 60,
            break_duration: DEFAULT_BREAK_MINUTES * 60,
            remaining: DEFAULT_WORK_MINUTES * 60,
            running: false,
        }
    }
}

/// Format seconds as `MM:SS`; the minute field widens past two digits
pub fn format_time(remaining_seconds: u64) -> String {
    format!("{:02}:{:02}", remaining_seconds / 60, remaining_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(work_secs: u64, break_secs: u64) -> TimerState {
        TimerState {
            mode: Mode::Work,
            work_duration: work_secs,
            break_duration: break_secs,
            remaining: work_secs,
            running: false,
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(599), "09:59");
        assert_eq!(format_time(3661), "61:01");
        assert_eq!(format_time(125 * 60), "125:00");
    }

    #[test]
    fn test_initial_state() {
        let state = TimerState::new(Minutes::new(25).unwrap(), Minutes::new(5).unwrap());
        assert_eq!(state.mode, Mode::Work);
        assert_eq!(state.remaining, 1500);
        assert_eq!(state.break_duration, 300);
        assert!(!state.running);
        assert_eq!(state, TimerState::default());
    }

    #[test]
    fn test_tick_decrements() {
        let mut state = timer(120, 60);
        assert!(!state.tick());
        assert_eq!(state.remaining, 119);
        assert_eq!(state.mode, Mode::Work);
    }

    #[test]
    fn test_crossover_flips_then_decrements() {
        let mut state = timer(2, 3);
        state.remaining = 1;

        assert!(!state.tick());
        assert_eq!(state.remaining, 0);
        assert_eq!(state.snapshot().formatted(), "00:00");

        assert!(state.tick());
        assert_eq!(state.mode, Mode::Break);
        assert_eq!(state.remaining, 2);
        assert_eq!(state.snapshot().formatted(), "00:02");
    }

    #[test]
    fn test_crossover_back_to_work() {
        let mut state = timer(2, 3);
        state.select_mode(Mode::Break);
        state.remaining = 0;

        assert!(state.tick());
        assert_eq!(state.mode, Mode::Work);
        assert_eq!(state.remaining, 1);
    }

    #[test]
    fn test_full_cycle_never_goes_below_zero() {
        let mut state = timer(2, 3);
        let mut seen = Vec::new();
        for _ in 0..8 {
            state.tick();
            seen.push((state.mode, state.remaining));
        }
        assert_eq!(
            seen,
            vec![
                (Mode::Work, 1),
                (Mode::Work, 0),
                (Mode::Break, 2),
                (Mode::Break, 1),
                (Mode::Break, 0),
                (Mode::Work, 1),
                (Mode::Work, 0),
                (Mode::Break, 2),
            ]
        );
    }

    #[test]
    fn test_select_mode_loads_full_duration() {
        let mut state = timer(1500, 300);
        state.remaining = 42;
        state.select_mode(Mode::Break);
        assert_eq!(state.mode, Mode::Break);
        assert_eq!(state.remaining, 300);
        state.select_mode(Mode::Work);
        assert_eq!(state.remaining, 1500);
    }

    #[test]
    fn test_rewind_always_returns_to_work() {
        let mut state = timer(1500, 300);
        state.select_mode(Mode::Break);
        state.remaining = 17;
        state.rewind();
        assert_eq!(state.mode, Mode::Work);
        assert_eq!(state.remaining, 1500);
    }

    #[test]
    fn test_minutes_parse() {
        assert_eq!(Minutes::parse("25").unwrap().as_seconds(), 1500);
        assert_eq!(Minutes::parse(" 7 ").unwrap().get(), 7);
        assert!(Minutes::parse("0").is_err());
        assert!(Minutes::parse("-3").is_err());
        assert!(Minutes::parse("2.5").is_err());
        assert!(Minutes::parse("abc").is_err());
        assert!(Minutes::parse("").is_err());
        assert!(Minutes::parse("1441").is_err());
        assert!(Minutes::parse("1440").is_ok());
    }

    #[test]
    fn test_mode_ids() {
        assert_eq!(Mode::from_id("work"), Some(Mode::Work));
        assert_eq!(Mode::from_id("break"), Some(Mode::Break));
        assert_eq!(Mode::from_id("Work"), None);
        assert_eq!(Mode::Work.flipped(), Mode::Break);
        assert_eq!(
            serde_json::to_string(&Mode::Break).unwrap(),
            "\"break\""
        );
    }
}
