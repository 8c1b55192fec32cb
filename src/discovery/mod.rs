//! Volume and playlist discovery
//!
//! Locates a plausible removable-media root under the storage directory
//! and enumerates its numbered media entries. Discovery runs afresh on
//! every poll cycle; nothing here is cached.

pub mod playlist;
pub mod volume;

pub use playlist::PlaylistEntry;
pub use volume::VolumeCandidate;
