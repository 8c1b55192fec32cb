//! Session → orchestrator event channel
//!
//! A playback session is the sole producer and the orchestrator loop the
//! sole consumer, so events travel over a plain mpsc channel rather than
//! a broadcast bus.

use tokio::sync::mpsc;

/// Events a playback session reports back to the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The player confirmed it is producing output
    Started {
        /// 1-based playlist position being played
        position: u32,
    },

    /// The session ended; emitted exactly once per session
    Finished {
        /// 1-based playlist position that was playing
        position: u32,

        /// True only when playback reached natural end-of-stream
        completed: bool,
    },
}

pub type SessionEventSender = mpsc::UnboundedSender<SessionEvent>;
pub type SessionEventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

/// Create the session event channel
pub fn channel() -> (SessionEventSender, SessionEventReceiver) {
    mpsc::unbounded_channel()
}
