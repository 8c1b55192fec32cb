//! Playback session
//!
//! One session wraps one playback attempt, from launch to its single
//! finished event. Progress is committed only on natural completion, and
//! only for the position just played.

use std::path::PathBuf;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::discovery::playlist::PlaylistEntry;
use crate::events::{SessionEvent, SessionEventSender};
use crate::player::{Player, PlayerSignal};
use crate::progress;

/// Owns the single `Finished` emission for a session.
///
/// Emitting on drop covers every exit path, including load failure,
/// signal-channel closure and task teardown, so the orchestrator is never
/// left stuck in `Playing`.
struct FinishGuard {
    events: SessionEventSender,
    position: u32,
    completed: bool,
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        let _ = self.events.send(SessionEvent::Finished {
            position: self.position,
            completed: self.completed,
        });
    }
}

/// Launch one playback attempt on its own task.
///
/// Emits `Started` once, when the player confirms it is producing output,
/// and `Finished` exactly once on any exit path. On natural completion the
/// marker is rewritten with `position`; a failed marker write is logged
/// and swallowed (that play's progress is lost, playback still counts as
/// finished).
pub fn spawn<P: Player>(
    mut player: P,
    entry: PlaylistEntry,
    marker_path: PathBuf,
    position: u32,
    events: SessionEventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut guard = FinishGuard {
            events: events.clone(),
            position,
            completed: false,
        };
        let mut signals = player.take_signals();

        if let Err(e) = player.load(&entry.path) {
            warn!("failed to load {}: {}", entry.path.display(), e);
            return;
        }
        if let Err(e) = player.play() {
            warn!("failed to start playback of {}: {}", entry.path.display(), e);
            return;
        }

        let mut started = false;
        while let Some(signal) = signals.recv().await {
            match signal {
                PlayerSignal::ReadyToPlay => {
                    if !started {
                        started = true;
                        info!("playing entry {} ({})", position, entry.path.display());
                        let _ = events.send(SessionEvent::Started { position });
                    }
                }
                PlayerSignal::NaturalCompletion => {
                    if let Err(e) = progress::write(&marker_path, position) {
                        warn!(
                            "entry {} completed but marker write failed: {}",
                            position, e
                        );
                    }
                    guard.completed = true;
                    break;
                }
                PlayerSignal::Error(message) => {
                    warn!("playback of {} failed: {}", entry.path.display(), message);
                    break;
                }
            }
        }

        player.stop();
    })
}
