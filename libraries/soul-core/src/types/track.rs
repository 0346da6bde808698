/// Track domain type
use crate::types::{GroupType, TrackId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Audio track as seen by the playlist
///
/// Two tracks are the same track when their ids match; the metadata is
/// only used for grouping and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Genre
    pub genre: Option<String>,

    /// File path on disk
    pub file_path: PathBuf,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(title: impl Into<String>, file_path: PathBuf) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: None,
            album: None,
            genre: None,
            file_path,
        }
    }

    /// Builder-style artist setter
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Builder-style album setter
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Builder-style genre setter
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Name of the group this track belongs to for a grouping type
    ///
    /// Tracks without the relevant tag fall into an "Unknown ..." group.
    pub fn group_name(&self, group_type: GroupType) -> &str {
        let tag = match group_type {
            GroupType::Artist => self.artist.as_deref(),
            GroupType::Album => self.album.as_deref(),
            GroupType::Genre => self.genre.as_deref(),
        };

        tag.filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| group_type.unknown_group_name())
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}
