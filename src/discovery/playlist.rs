//! Numbered-media playlist indexing and next-entry selection
//!
//! Media entries are regular files named `<positive integer>.<ext>` at the
//! volume root, played in ascending numeric order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::VIDEO_EXTENSIONS;

/// One playable entry discovered at the volume root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Positive integer parsed from the filename stem
    pub index: u32,

    /// Full path to the media file
    pub path: PathBuf,
}

/// Enumerate numbered media entries directly under `root`, ascending by
/// numeric filename.
///
/// Never fails: an absent or unreadable root yields an empty playlist.
/// Files with non-numeric stems, index 0, or disallowed extensions are
/// silently excluded. Duplicate numbers (same stem, different extension)
/// keep the first file in directory-listing order.
pub fn index(root: &Path) -> Vec<PlaylistEntry> {
    let Ok(dir) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for item in dir.flatten() {
        if !item.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let path = item.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(index) = numbered_media_index(name) {
            entries.push(PlaylistEntry { index, path });
        }
    }

    // Stable sort preserves directory order among duplicates, so dedup
    // keeps the first-encountered file for each number.
    entries.sort_by_key(|e| e.index);
    entries.dedup_by_key(|e| e.index);
    entries
}

/// Parse a filename as `<positive integer>.<allowed extension>`
fn numbered_media_index(name: &str) -> Option<u32> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    if !VIDEO_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v)) {
        return None;
    }
    let number: u32 = stem.parse().ok()?;
    (number > 0).then_some(number)
}

/// Select the next 1-based playlist position to play.
///
/// Wraparound is purely a selection-time computation: the stored marker is
/// never touched here. `total == 0` is a caller error; 1 is returned as a
/// defensive default.
pub fn next_to_play(last_completed: u32, total: usize) -> u32 {
    if total == 0 {
        return 1;
    }
    let candidate = last_completed.saturating_add(1);
    if candidate as usize > total {
        1
    } else {
        candidate
    }
}
