//! # autoplayd
//!
//! Unattended looping video playback from removable media.
//!
//! **Purpose:** Watch a storage root for a removable volume holding
//! numbered video files (`1.mp4`, `2.mkv`, ...) and a `lastepisode`
//! resume marker, and play the files one at a time in a loop, committing
//! progress only when an entry plays to natural completion.
//!
//! **Architecture:** A single timer-driven orchestrator task owns all
//! playback state; each play runs as a session task reporting back over
//! an mpsc channel. Rendering is delegated to an opaque [`player::Player`]
//! backend.

pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod player;
pub mod progress;
pub mod session;

pub use error::{Error, Result};
pub use orchestrator::{Orchestrator, OrchestratorHandle, PlaybackState};
