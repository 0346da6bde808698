//! Soul Player - Playback Sequencing
//!
//! Decides which track plays next, previous, or automatically after the
//! current one, under the user's repeat and shuffle modes, and keeps that
//! decision consistent while the playlist changes.
//!
//! This crate provides:
//! - Shuffle permutations with continuity pinning ([`ShuffleSequence`])
//! - Index-level sequencing under repeat/shuffle modes ([`PlaybackSequence`])
//! - Playback scopes: all tracks, all groups of a type, or one group
//!   ([`SequenceScope`])
//! - Track-level orchestration over a playlist ([`Sequencer`])
//! - A serialized worker-thread front end ([`SequencerHandle`])
//! - Persisted repeat/shuffle modes ([`SequencerSettings`])
//!
//! # Architecture
//!
//! The sequencer never owns or mutates the playlist. It reads it through
//! [`soul_core::PlaylistAccessor`] and is told about mutations with
//! [`soul_core::PlaylistChange`] values. Nothing here performs I/O except
//! settings persistence.
//!
//! # Example
//!
//! ```rust
//! use soul_core::{MemoryPlaylist, PlaylistType, Track};
//! use soul_sequencer::{RepeatMode, Sequencer, SequencerSettings, ShuffleMode};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let playlist = Arc::new(MemoryPlaylist::with_tracks([
//!     Track::new("Frozen", PathBuf::from("/music/frozen.mp3")),
//!     Track::new("Joga", PathBuf::from("/music/joga.mp3")),
//! ]));
//!
//! let mut sequencer = Sequencer::new(
//!     playlist.clone(),
//!     PlaylistType::Tracks,
//!     SequencerSettings::new(RepeatMode::All, ShuffleMode::Off),
//! );
//!
//! assert_eq!(sequencer.begin().unwrap().title, "Frozen");
//! assert_eq!(sequencer.next().unwrap().title, "Joga");
//! // Repeat All wraps around
//! assert_eq!(sequencer.next().unwrap().title, "Frozen");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod events;
mod handle;
pub mod mapping;
mod scope;
mod sequence;
mod sequencer;
mod settings;
mod shuffle;
pub mod types;

// Public exports
pub use error::{Result, SequencerError};
pub use events::SequencerEvent;
pub use handle::SequencerHandle;
pub use scope::SequenceScope;
pub use sequence::PlaybackSequence;
pub use sequencer::Sequencer;
pub use settings::{SequencerSettings, ENV_PREFIX};
pub use shuffle::ShuffleSequence;
pub use types::{RepeatAndShuffleModes, RepeatMode, SequenceInfo, ShuffleMode};
