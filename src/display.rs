//! Display surface: turns timer snapshots into frames for the browser

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::{Mode, TimerSnapshot};

/// Receives every timer state change
pub trait DisplaySurface: Send + Sync + 'static {
    fn render(&self, snapshot: TimerSnapshot);
}

/// Selectable display typefaces
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    #[default]
    Meiryo,
    Mincho,
    Gothic,
}

impl Font {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "meiryo" => Some(Font::Meiryo),
            "mincho" => Some(Font::Mincho),
            "gothic" => Some(Font::Gothic),
            _ => None,
        }
    }

    /// CSS font-family for this typeface
    pub fn family(&self) -> &'static str {
        match self {
            Font::Meiryo => "Meiryo, sans-serif",
            Font::Mincho => "MS Mincho, serif",
            Font::Gothic => "MS Gothic, sans-serif",
        }
    }
}

/// One rendered frame as sent to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUpdate {
    pub time: String,
    pub mode: Mode,
    pub running: bool,
    pub remaining_seconds: u64,
    pub font_family: String,
}

impl DisplayUpdate {
    pub fn new(snapshot: TimerSnapshot, font: Font) -> Self {
        Self {
            time: snapshot.formatted(),
            mode: snapshot.mode,
            running: snapshot.running,
            remaining_seconds: snapshot.remaining_seconds,
            font_family: font.family().to_string(),
        }
    }
}

#[derive(Debug)]
struct Frame {
    snapshot: TimerSnapshot,
    font: Font,
}

/// Display surface backed by a watch channel that the SSE endpoint streams
#[derive(Debug)]
pub struct WebDisplay {
    frame: Mutex<Frame>,
    update_tx: watch::Sender<DisplayUpdate>,
    /// Keep the receiver alive to prevent channel closure
    _update_rx: watch::Receiver<DisplayUpdate>,
}

impl WebDisplay {
    pub fn new(initial: TimerSnapshot) -> Self {
        let font = Font::default();
        let (update_tx, update_rx) = watch::channel(DisplayUpdate::new(initial, font));
        Self {
            frame: Mutex::new(Frame { snapshot: initial, font }),
            update_tx,
            _update_rx: update_rx,
        }
    }

    /// Subscribe to rendered frames
    pub fn subscribe(&self) -> watch::Receiver<DisplayUpdate> {
        self.update_tx.subscribe()
    }

    /// The most recently rendered frame
    pub fn current(&self) -> DisplayUpdate {
        self.update_tx.borrow().clone()
    }

    pub fn font(&self) -> Font {
        self.frame.lock().unwrap_or_else(|e| e.into_inner()).font
    }

    /// Switch typeface by id and re-render the last frame.
    ///
    /// Unknown ids leave the typeface as it was and return `None`.
    pub fn change_font(&self, id: &str) -> Option<Font> {
        let Some(font) = Font::from_id(id) else {
            debug!("Ignoring unknown font id: {}", id);
            return None;
        };

        let mut frame = self.frame.lock().unwrap_or_else(|e| e.into_inner());
        frame.font = font;
        info!("Display font set to: {}", font.family());
        self.update_tx.send_replace(DisplayUpdate::new(frame.snapshot, frame.font));
        Some(font)
    }
}

impl DisplaySurface for WebDisplay {
    fn render(&self, snapshot: TimerSnapshot) {
        let mut frame = self.frame.lock().unwrap_or_else(|e| e.into_inner());
        frame.snapshot = snapshot;
        self.update_tx.send_replace(DisplayUpdate::new(snapshot, frame.font));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(mode: Mode, remaining_seconds: u64) -> TimerSnapshot {
        TimerSnapshot {
            mode,
            remaining_seconds,
            running: false,
        }
    }

    #[test]
    fn test_font_ids() {
        assert_eq!(Font::from_id("meiryo"), Some(Font::Meiryo));
        assert_eq!(Font::from_id("mincho").map(|f| f.family()), Some("MS Mincho, serif"));
        assert_eq!(Font::from_id("gothic").map(|f| f.family()), Some("MS Gothic, sans-serif"));
        assert_eq!(Font::from_id("comic-sans"), None);
    }

    #[test]
    fn test_render_publishes_frame() {
        let display = WebDisplay::new(snapshot(Mode::Work, 1500));
        let rx = display.subscribe();
        assert_eq!(rx.borrow().time, "25:00");

        display.render(snapshot(Mode::Break, 65));
        let frame = rx.borrow().clone();
        assert_eq!(frame.time, "01:05");
        assert_eq!(frame.mode, Mode::Break);
        assert_eq!(frame.font_family, "Meiryo, sans-serif");
    }

    #[test]
    fn test_change_font_rerenders_last_frame() {
        let display = WebDisplay::new(snapshot(Mode::Work, 1500));
        display.render(snapshot(Mode::Work, 599));

        assert_eq!(display.change_font("gothic"), Some(Font::Gothic));
        let frame = display.current();
        assert_eq!(frame.time, "09:59");
        assert_eq!(frame.font_family, "MS Gothic, sans-serif");
    }

    #[test]
    fn test_unknown_font_keeps_typeface() {
        let display = WebDisplay::new(snapshot(Mode::Work, 1500));
        display.change_font("mincho");
        assert_eq!(display.change_font("papyrus"), None);
        assert_eq!(display.font(), Font::Mincho);
        assert_eq!(display.current().font_family, "MS Mincho, serif");
    }
}
