//! Tunable settings, loaded from the CLI config file

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::geometry::{Geometry, Point};
use crate::layout::Layout;

/// Everything needed to find, read and drive one game build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Executable name of the game process
    pub process_name: String,
    /// Exact caption of the game window
    pub window_title: String,
    pub layout: Layout,
    pub geometry: Geometry,
    pub overlay: OverlaySettings,
    pub autoplay: AutoPlaySettings,
    pub session: SessionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            process_name: "winmine.exe".to_string(),
            window_title: "扫雷".to_string(),
            layout: Layout::default(),
            geometry: Geometry::default(),
            overlay: OverlaySettings::default(),
            autoplay: AutoPlaySettings::default(),
            session: SessionSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Gap between a marker and its cell border, in pixels
    pub marker_inset: i32,
    /// Pause after asking the window to repaint, before drawing
    pub repaint_settle_ms: u64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            marker_inset: 3,
            repaint_settle_ms: 10,
        }
    }
}

impl OverlaySettings {
    pub fn repaint_settle(&self) -> Duration {
        Duration::from_millis(self.repaint_settle_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoPlaySettings {
    /// Pause before the board is decoded
    pub start_delay_ms: u64,
    /// Pause after every visited cell
    pub action_delay_ms: u64,
    /// Click this many pixels right of and below a cell's corner
    pub click_inset: i32,
    /// Offset from the window rectangle to the client area (title bar, menu)
    pub client_offset: Point,
    /// Decode again after this many visited cells. Unset keeps one snapshot
    /// for the whole run.
    pub redecode_every: Option<NonZeroUsize>,
}

impl Default for AutoPlaySettings {
    fn default() -> Self {
        Self {
            start_delay_ms: 100,
            action_delay_ms: 10,
            click_inset: 5,
            client_offset: Point::new(0, 40),
            redecode_every: None,
        }
    }
}

impl AutoPlaySettings {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Pause after a mouse release before the board is decoded
    pub click_settle_ms: u64,
    /// Pause between window lookups while the game is closed
    pub window_retry_ms: u64,
    /// Pause before restarting a failed session
    pub error_backoff_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            click_settle_ms: 100,
            window_retry_ms: 5000,
            error_backoff_ms: 1000,
        }
    }
}

impl SessionSettings {
    pub fn click_settle(&self) -> Duration {
        Duration::from_millis(self.click_settle_ms)
    }

    pub fn window_retry(&self) -> Duration {
        Duration::from_millis(self.window_retry_ms)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_millis(self.error_backoff_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.process_name, "winmine.exe");
        assert_eq!(settings.overlay.repaint_settle(), Duration::from_millis(10));
        assert_eq!(settings.autoplay.start_delay(), Duration::from_millis(100));
        assert_eq!(settings.session.window_retry(), Duration::from_secs(5));
        assert_eq!(settings.session.error_backoff(), Duration::from_secs(1));
        assert!(settings.autoplay.redecode_every.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "window_title": "Minesweeper", "autoplay": { "redecode_every": 9 } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.window_title, "Minesweeper");
        assert_eq!(settings.autoplay.redecode_every, NonZeroUsize::new(9));
        assert_eq!(settings.autoplay.click_inset, 5);
        assert_eq!(settings.layout, Layout::default());
    }
}
