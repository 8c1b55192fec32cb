//! Shared test helpers: a scripted player backend and volume fixtures

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use autoplayd::player::{Player, PlayerFactory, PlayerSignal};
use autoplayd::{Error, Result};

/// What a scripted player does after confirming playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// ReadyToPlay, then NaturalCompletion
    Complete,
    /// ReadyToPlay, then Error
    Fail,
    /// ReadyToPlay, then silence until torn down
    Stall,
    /// load() itself fails; nothing is ever rendered
    LoadError,
}

/// Observations shared between the test and all scripted players
#[derive(Default)]
pub struct Observed {
    pub live: AtomicUsize,
    pub max_live: AtomicUsize,
    pub played: Mutex<Vec<String>>,
}

impl Observed {
    /// Filenames handed to play(), in launch order
    pub fn played_names(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }

    pub fn played_count(&self) -> usize {
        self.played.lock().unwrap().len()
    }
}

pub struct ScriptedPlayer {
    outcome: Outcome,
    loaded: Option<PathBuf>,
    signal_tx: mpsc::UnboundedSender<PlayerSignal>,
    signal_rx: Option<mpsc::UnboundedReceiver<PlayerSignal>>,
    observed: Arc<Observed>,
}

impl ScriptedPlayer {
    pub fn new(outcome: Outcome, observed: Arc<Observed>) -> Self {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        Self {
            outcome,
            loaded: None,
            signal_tx,
            signal_rx: Some(signal_rx),
            observed,
        }
    }
}

impl Player for ScriptedPlayer {
    fn load(&mut self, path: &Path) -> Result<()> {
        if self.outcome == Outcome::LoadError {
            return Err(Error::Player("scripted load failure".into()));
        }
        self.loaded = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let path = self
            .loaded
            .clone()
            .ok_or_else(|| Error::Player("no media loaded".into()))?;

        let live = self.observed.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.observed.max_live.fetch_max(live, Ordering::SeqCst);
        self.observed
            .played
            .lock()
            .unwrap()
            .push(path.file_name().unwrap().to_str().unwrap().to_string());

        let _ = self.signal_tx.send(PlayerSignal::ReadyToPlay);

        let outcome = self.outcome;
        let signal_tx = self.signal_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            match outcome {
                Outcome::Complete => {
                    let _ = signal_tx.send(PlayerSignal::NaturalCompletion);
                }
                Outcome::Fail => {
                    let _ = signal_tx.send(PlayerSignal::Error("scripted failure".into()));
                }
                Outcome::Stall | Outcome::LoadError => {}
            }
        });
        Ok(())
    }

    fn stop(&mut self) {
        self.observed.live.fetch_sub(1, Ordering::SeqCst);
    }

    fn take_signals(&mut self) -> mpsc::UnboundedReceiver<PlayerSignal> {
        self.signal_rx
            .take()
            .unwrap_or_else(|| mpsc::unbounded_channel().1)
    }
}

/// Hands out one scripted outcome per session; stalls once exhausted
pub struct ScriptedFactory {
    script: Mutex<VecDeque<Outcome>>,
    pub observed: Arc<Observed>,
}

impl ScriptedFactory {
    pub fn new(script: Vec<Outcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            observed: Arc::new(Observed::default()),
        }
    }
}

impl PlayerFactory for ScriptedFactory {
    type Player = ScriptedPlayer;

    fn create(&self) -> ScriptedPlayer {
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Outcome::Stall);
        ScriptedPlayer::new(outcome, Arc::clone(&self.observed))
    }
}

/// Create a volume directory with the given media files under `storage`
pub fn seed_volume(storage: &Path, name: &str, files: &[&str]) -> PathBuf {
    let dir = storage.join(name);
    fs::create_dir_all(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), b"").unwrap();
    }
    dir
}

/// Poll `cond` until it holds, panicking after five seconds
pub async fn wait_for(cond: impl Fn() -> bool, what: &str) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !cond() {
        if tokio::time::Instant::now() > deadline {
            panic!("timed out waiting for {}", what);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
