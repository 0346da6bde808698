//! Playlist change notifications
//!
//! Every playlist mutation produces one [`PlaylistChange`] describing what
//! happened, with enough detail for listeners to decide whether the change
//! touches the part of the playlist they care about.

use crate::types::{GroupKey, PlaylistType, TrackId};
use serde::{Deserialize, Serialize};

/// A change to the playlist (or to the view the user is looking at)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistChange {
    /// Tracks were appended
    TracksAdded {
        /// IDs of the added tracks
        tracks: Vec<TrackId>,
        /// Groups (of every type) that received at least one track
        affected_groups: Vec<GroupKey>,
    },

    /// Tracks were removed
    TracksRemoved {
        /// IDs of the removed tracks
        tracks: Vec<TrackId>,
        /// Groups (of every type) that lost at least one track
        affected_groups: Vec<GroupKey>,
    },

    /// Tracks or groups were moved within one view
    TracksReordered {
        /// View in which the move happened
        playlist_type: PlaylistType,
        /// Groups whose tracks were moved (empty when only groups moved, or
        /// for the flat view)
        affected_groups: Vec<GroupKey>,
    },

    /// One view was sorted
    PlaylistSorted {
        /// View that was sorted
        playlist_type: PlaylistType,
        /// Whether tracks were sorted (as opposed to only groups)
        tracks_sorted: bool,
        /// Groups whose tracks were sorted; `None` means all of them
        affected_groups: Option<Vec<GroupKey>>,
    },

    /// All tracks were removed
    PlaylistCleared,

    /// The user switched to a different playlist view
    ViewTypeChanged(PlaylistType),
}

impl PlaylistChange {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            PlaylistChange::TracksAdded { .. } => "tracks_added",
            PlaylistChange::TracksRemoved { .. } => "tracks_removed",
            PlaylistChange::TracksReordered { .. } => "tracks_reordered",
            PlaylistChange::PlaylistSorted { .. } => "playlist_sorted",
            PlaylistChange::PlaylistCleared => "playlist_cleared",
            PlaylistChange::ViewTypeChanged(_) => "view_type_changed",
        }
    }
}
