//! Opaque player capability
//!
//! The decode/render pipeline is external to this crate. A [`Player`]
//! exposes load/play/stop plus a stream of [`PlayerSignal`]s; the shipped
//! [`CommandPlayer`] backend delegates rendering to an external process
//! such as `ffplay`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::config::{DEFAULT_PLAYER_ARGS, DEFAULT_PLAYER_COMMAND};
use crate::error::{Error, Result};

/// Signals delivered by a player backend to its session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSignal {
    /// The player is producing output
    ReadyToPlay,

    /// Playback reached natural end-of-stream
    NaturalCompletion,

    /// Playback failed
    Error(String),
}

/// One playback backend instance, driving a single media file
pub trait Player: Send + 'static {
    /// Prepare the given media file for playback
    fn load(&mut self, path: &Path) -> Result<()>;

    /// Begin rendering the loaded media
    fn play(&mut self) -> Result<()>;

    /// Tear down rendering; no further signals are required after this
    fn stop(&mut self);

    /// Hand over the signal stream. Valid once per player; a second call
    /// returns an already-closed receiver.
    fn take_signals(&mut self) -> mpsc::UnboundedReceiver<PlayerSignal>;
}

/// Creates a fresh [`Player`] for each playback session
pub trait PlayerFactory: Send + Sync + 'static {
    type Player: Player;

    fn create(&self) -> Self::Player;
}

/// Player backend that spawns an external renderer process.
///
/// Signal mapping: successful spawn → `ReadyToPlay`, zero exit status →
/// `NaturalCompletion`, non-zero exit or spawn/wait failure → `Error`.
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
    media_path: Option<PathBuf>,
    signal_tx: mpsc::UnboundedSender<PlayerSignal>,
    signal_rx: Option<mpsc::UnboundedReceiver<PlayerSignal>>,
    kill_tx: Option<oneshot::Sender<()>>,
}

impl CommandPlayer {
    pub fn new(program: String, args: Vec<String>) -> Self {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        Self {
            program,
            args,
            media_path: None,
            signal_tx,
            signal_rx: Some(signal_rx),
            kill_tx: None,
        }
    }
}

impl Player for CommandPlayer {
    fn load(&mut self, path: &Path) -> Result<()> {
        self.media_path = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let path = self
            .media_path
            .clone()
            .ok_or_else(|| Error::Player("no media loaded".into()))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Player(format!("failed to spawn {}: {}", self.program, e)))?;

        debug!("spawned {} for {}", self.program, path.display());
        let _ = self.signal_tx.send(PlayerSignal::ReadyToPlay);

        let (kill_tx, mut kill_rx) = oneshot::channel();
        self.kill_tx = Some(kill_tx);

        let signal_tx = self.signal_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    let signal = match status {
                        Ok(s) if s.success() => PlayerSignal::NaturalCompletion,
                        Ok(s) => PlayerSignal::Error(format!("renderer exited with {}", s)),
                        Err(e) => PlayerSignal::Error(format!("wait on renderer failed: {}", e)),
                    };
                    let _ = signal_tx.send(signal);
                }
                _ = &mut kill_rx => {
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                }
            }
        });

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(kill) = self.kill_tx.take() {
            let _ = kill.send(());
        }
    }

    fn take_signals(&mut self) -> mpsc::UnboundedReceiver<PlayerSignal> {
        self.signal_rx
            .take()
            .unwrap_or_else(|| mpsc::unbounded_channel().1)
    }
}

/// Factory for [`CommandPlayer`] instances
#[derive(Debug, Clone)]
pub struct CommandPlayerFactory {
    program: String,
    args: Vec<String>,
}

impl CommandPlayerFactory {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

impl Default for CommandPlayerFactory {
    fn default() -> Self {
        Self::new(
            DEFAULT_PLAYER_COMMAND.to_string(),
            DEFAULT_PLAYER_ARGS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl PlayerFactory for CommandPlayerFactory {
    type Player = CommandPlayer;

    fn create(&self) -> CommandPlayer {
        CommandPlayer::new(self.program.clone(), self.args.clone())
    }
}
