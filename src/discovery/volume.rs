//! Removable-volume location
//!
//! Scans the immediate subdirectories of the storage root for a mount that
//! looks like removable media and carries a playlist signal. "No volume"
//! is a normal transient state, re-checked every poll cycle, never an error.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{MARKER_FILE_NAME, USB_NAME_HINTS};

use super::playlist;

/// A directory accepted as the active volume root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeCandidate {
    pub root: PathBuf,
}

impl VolumeCandidate {
    /// Path of the resume marker co-located with the playlist
    pub fn marker_path(&self) -> PathBuf {
        self.root.join(MARKER_FILE_NAME)
    }
}

/// Locate the active volume root under `storage_root`.
///
/// Pass 1 accepts the first readable subdirectory whose name looks like
/// removable media (XXXX-XXXX volume id, or a usb/udisk/usbotg hint) and
/// which carries a playlist signal. Pass 2 falls back to any subdirectory
/// with a playlist signal, for volumes mounted under unexpected names.
pub fn locate(storage_root: &Path) -> Option<VolumeCandidate> {
    let candidates = readable_subdirectories(storage_root);

    for dir in &candidates {
        if name_looks_removable(dir) && has_playlist_signal(dir) {
            debug!("accepted volume {} (name + signal)", dir.display());
            return Some(VolumeCandidate { root: dir.clone() });
        }
    }

    for dir in &candidates {
        if has_playlist_signal(dir) {
            debug!("accepted volume {} (fallback, signal only)", dir.display());
            return Some(VolumeCandidate { root: dir.clone() });
        }
    }

    None
}

fn readable_subdirectories(storage_root: &Path) -> Vec<PathBuf> {
    let Ok(dir) = fs::read_dir(storage_root) else {
        return Vec::new();
    };
    dir.flatten()
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| fs::read_dir(p).is_ok())
        .collect()
}

fn name_looks_removable(dir: &Path) -> bool {
    let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    is_volume_id(&name) || USB_NAME_HINTS.iter().any(|hint| name.contains(hint))
}

/// Matches the FAT volume-id mount name pattern XXXX-XXXX (4 hex digits,
/// dash, 4 hex digits)
fn is_volume_id(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() == 9
        && bytes[4] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || b.is_ascii_hexdigit())
}

/// Marker file present, or at least one numbered media entry
fn has_playlist_signal(dir: &Path) -> bool {
    dir.join(MARKER_FILE_NAME).exists() || !playlist::index(dir).is_empty()
}
