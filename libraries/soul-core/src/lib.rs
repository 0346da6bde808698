//! Soul Player Core
//!
//! Platform-agnostic playlist types and traits shared by the Soul Player
//! playback libraries.
//!
//! This crate provides the foundational building blocks the sequencer
//! consumes without owning them.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Group`, `GroupKey`, `PlaylistType`
//! - **Core Traits**: `PlaylistAccessor`, the read-only view of a playlist
//! - **Notifications**: `PlaylistChange`, produced by every playlist mutation
//! - **In-memory playlist**: `MemoryPlaylist`, a grouping playlist usable by
//!   tests and by hosts without their own storage
//! - **Error Handling**: Unified `SoulError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soul_core::{GroupType, MemoryPlaylist, PlaylistAccessor, Track};
//! use std::path::PathBuf;
//!
//! let playlist = MemoryPlaylist::new();
//! playlist.add_tracks([
//!     Track::new("Frozen", PathBuf::from("/music/frozen.mp3")).with_artist("Madonna"),
//!     Track::new("Joga", PathBuf::from("/music/joga.mp3")).with_artist("Bjork"),
//! ]);
//!
//! assert_eq!(playlist.size(), 2);
//! assert_eq!(playlist.number_of_groups(GroupType::Artist), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod memory;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SoulError};
pub use events::PlaylistChange;
pub use memory::MemoryPlaylist;
pub use traits::PlaylistAccessor;
pub use types::{Group, GroupKey, GroupType, GroupingInfo, PlaylistType, Track, TrackId};
