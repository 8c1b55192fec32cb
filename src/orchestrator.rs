//! Playback orchestrator
//!
//! The long-lived polling loop: periodically re-locates the volume,
//! re-indexes its playlist, and launches the next entry when idle. The
//! loop terminates only when the hosting environment shuts it down; every
//! per-tick fault is soft.
//!
//! The `Idle`/`Playing` flag is the only state shared across cycles. The
//! orchestrator task is its sole owner, with session events arriving over
//! a channel, so there is no memory-ordering race to manage.

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::Config;
use crate::discovery::{playlist, volume};
use crate::events::{self, SessionEvent, SessionEventReceiver, SessionEventSender};
use crate::player::PlayerFactory;
use crate::progress;
use crate::session;

/// Orchestrator playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
}

/// Handle to control a spawned orchestrator task
pub struct OrchestratorHandle {
    join: JoinHandle<()>,
    shutdown_tx: oneshot::Sender<()>,
}

impl OrchestratorHandle {
    /// Request shutdown and wait for the loop to exit
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        let _ = self.shutdown_tx.send(());
        self.join.await
    }

    pub fn abort(self) {
        self.join.abort();
    }
}

/// The polling/playback-coordination loop
pub struct Orchestrator<F: PlayerFactory> {
    config: Config,
    factory: F,
    state: PlaybackState,
    session_tx: SessionEventSender,
    session_rx: SessionEventReceiver,
}

impl<F: PlayerFactory> Orchestrator<F> {
    pub fn new(config: Config, factory: F) -> Self {
        let (session_tx, session_rx) = events::channel();
        Self {
            config,
            factory,
            state: PlaybackState::Idle,
            session_tx,
            session_rx,
        }
    }

    /// Spawn the loop on its own task and return a shutdown handle
    pub fn spawn(config: Config, factory: F) -> OrchestratorHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let orchestrator = Self::new(config, factory);
        let join = tokio::spawn(orchestrator.run(shutdown_rx));
        OrchestratorHandle { join, shutdown_tx }
    }

    /// Run until `shutdown` fires
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        let mut ticker = time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "orchestrator started, watching {} every {:?}",
            self.config.storage_root.display(),
            self.config.poll_interval
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick(),
                Some(event) = self.session_rx.recv() => self.handle_session_event(event),
                _ = &mut shutdown => {
                    info!("orchestrator shutting down");
                    break;
                }
            }
        }
    }

    /// One execution of the polling decision logic.
    ///
    /// Launches at most one session, and only when idle. All absence
    /// conditions (no volume, empty playlist) are normal and silently
    /// retried on the next tick.
    fn tick(&mut self) {
        if self.state == PlaybackState::Playing {
            return;
        }

        let Some(volume) = volume::locate(&self.config.storage_root) else {
            debug!(
                "no removable volume under {}",
                self.config.storage_root.display()
            );
            return;
        };

        let entries = playlist::index(&volume.root);
        if entries.is_empty() {
            debug!("volume {} has no numbered media", volume.root.display());
            return;
        }

        let marker_path = volume.marker_path();
        let last_completed = progress::read(&marker_path);
        let position = playlist::next_to_play(last_completed, entries.len());
        let entry = entries[(position - 1) as usize].clone();

        // Entry into Playing happens before control returns to the timer,
        // so a second tick can never double-launch.
        self.state = PlaybackState::Playing;
        debug!(
            "launching entry {} of {} (last completed {})",
            position,
            entries.len(),
            last_completed
        );
        let _session = session::spawn(
            self.factory.create(),
            entry,
            marker_path,
            position,
            self.session_tx.clone(),
        );
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Started { position } => {
                // Informational only; a duplicate must not re-transition
                debug!("session confirmed entry {} is playing", position);
            }
            SessionEvent::Finished {
                position,
                completed,
            } => {
                if completed {
                    info!("entry {} completed", position);
                } else {
                    debug!("entry {} ended without completing", position);
                }
                self.state = PlaybackState::Idle;
                // Start the next entry without waiting for the interval
                self.tick();
            }
        }
    }
}
