//! Configuration for autoplayd
//!
//! There is no configuration file. Everything is a compile-time constant
//! with command-line/environment overrides applied in `main.rs`.

use std::path::PathBuf;
use std::time::Duration;

/// Default parent directory scanned for mounted removable volumes
pub const DEFAULT_STORAGE_ROOT: &str = "/storage";

/// Default delay between polling ticks
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Exact name of the resume marker file at the volume root
pub const MARKER_FILE_NAME: &str = "lastepisode";

/// Filename extensions accepted as playable video (matched case-insensitively)
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "m4v", "webm",
];

/// Lowercase substrings that mark a mount directory as removable-media-like
pub const USB_NAME_HINTS: &[&str] = &["usb", "udisk", "usbotg"];

/// Default external renderer command
pub const DEFAULT_PLAYER_COMMAND: &str = "ffplay";

/// Default arguments for the external renderer
pub const DEFAULT_PLAYER_ARGS: &[&str] = &["-autoexit", "-fs", "-loglevel", "error"];

/// Runtime configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct Config {
    /// Parent directory whose immediate subdirectories are volume candidates
    pub storage_root: PathBuf,

    /// Delay between polling ticks
    pub poll_interval: Duration,
}

impl Config {
    pub fn new(storage_root: impl Into<PathBuf>, poll_interval_ms: u64) -> Self {
        Self {
            storage_root: storage_root.into(),
            poll_interval: Duration::from_millis(poll_interval_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_ROOT, DEFAULT_POLL_INTERVAL_MS)
    }
}
