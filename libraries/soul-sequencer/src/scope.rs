//! Sequence scope
//!
//! Which tracks the current playback session walks through: the whole flat
//! playlist, every group of one grouping type, or a single group.

use serde::{Deserialize, Serialize};
use soul_core::{GroupKey, GroupType, PlaylistType};
use std::fmt;

/// Subset of the playlist being sequenced
///
/// Single-group scopes hold a [`GroupKey`], a handle that is resolved
/// against the playlist on use and may go stale if the group disappears.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SequenceScope {
    /// Every track, in flat playlist order
    #[default]
    AllTracks,

    /// Every track, walking the artist groups in order
    AllArtists,

    /// Every track, walking the album groups in order
    AllAlbums,

    /// Every track, walking the genre groups in order
    AllGenres,

    /// Tracks of one artist
    Artist(GroupKey),

    /// Tracks of one album
    Album(GroupKey),

    /// Tracks of one genre
    Genre(GroupKey),
}

impl SequenceScope {
    /// Default scope for a playlist view
    pub fn for_view(playlist_type: PlaylistType) -> Self {
        match playlist_type {
            PlaylistType::Tracks => SequenceScope::AllTracks,
            PlaylistType::Artists => SequenceScope::AllArtists,
            PlaylistType::Albums => SequenceScope::AllAlbums,
            PlaylistType::Genres => SequenceScope::AllGenres,
        }
    }

    /// Scope limited to a single group
    pub fn for_group(key: GroupKey) -> Self {
        match key.group_type {
            GroupType::Artist => SequenceScope::Artist(key),
            GroupType::Album => SequenceScope::Album(key),
            GroupType::Genre => SequenceScope::Genre(key),
        }
    }

    /// The scope's group, for single-group scopes
    pub fn group(&self) -> Option<&GroupKey> {
        match self {
            SequenceScope::Artist(key) | SequenceScope::Album(key) | SequenceScope::Genre(key) => {
                Some(key)
            }
            _ => None,
        }
    }

    /// Grouping type the scope is addressed through (`None` for all tracks)
    pub fn group_type(&self) -> Option<GroupType> {
        match self {
            SequenceScope::AllTracks => None,
            SequenceScope::AllArtists | SequenceScope::Artist(_) => Some(GroupType::Artist),
            SequenceScope::AllAlbums | SequenceScope::Album(_) => Some(GroupType::Album),
            SequenceScope::AllGenres | SequenceScope::Genre(_) => Some(GroupType::Genre),
        }
    }

    /// Playlist view this scope belongs to
    pub fn playlist_type(&self) -> PlaylistType {
        self.group_type()
            .map_or(PlaylistType::Tracks, PlaylistType::for_group_type)
    }

    /// Whether the scope is a single group
    pub fn is_group(&self) -> bool {
        self.group().is_some()
    }
}

impl fmt::Display for SequenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceScope::AllTracks => f.write_str("All tracks"),
            SequenceScope::AllArtists => f.write_str("All artists"),
            SequenceScope::AllAlbums => f.write_str("All albums"),
            SequenceScope::AllGenres => f.write_str("All genres"),
            SequenceScope::Artist(key) => write!(f, "Artist: {}", key.name),
            SequenceScope::Album(key) => write!(f, "Album: {}", key.name),
            SequenceScope::Genre(key) => write!(f, "Genre: {}", key.name),
        }
    }
}
