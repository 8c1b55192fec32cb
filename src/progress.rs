//! Resume-marker persistence
//!
//! The marker is a plain-text file named `lastepisode` at the volume root
//! holding one decimal integer: the 1-based playlist position of the last
//! fully played entry, or 0 when nothing has completed yet.
//!
//! The marker is re-read on every poll cycle rather than cached, since the
//! volume can be removed and replaced between polls.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;

/// Read the last-completed position from the marker file.
///
/// Never fails: a missing, empty or corrupt marker is rewritten to `"0"`
/// and reported as 0. I/O failures are treated the same way.
pub fn read(marker: &Path) -> u32 {
    match fs::read_to_string(marker) {
        Ok(text) => match text.trim().parse::<u32>() {
            Ok(number) => number,
            Err(_) => {
                warn!(
                    "marker {} held {:?}, resetting to 0",
                    marker.display(),
                    text.trim()
                );
                reset_to_zero(marker);
                0
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("marker {} missing, creating with 0", marker.display());
            reset_to_zero(marker);
            0
        }
        Err(e) => {
            warn!("could not read marker {}: {}", marker.display(), e);
            reset_to_zero(marker);
            0
        }
    }
}

/// Record `number` as the last fully played position.
///
/// Unlike [`read`], write failures propagate: a failed commit must not be
/// mistaken for success by the caller.
pub fn write(marker: &Path, number: u32) -> Result<()> {
    fs::write(marker, number.to_string())?;
    Ok(())
}

fn reset_to_zero(marker: &Path) {
    if let Err(e) = fs::write(marker, "0") {
        warn!("could not reset marker {}: {}", marker.display(), e);
    }
}
