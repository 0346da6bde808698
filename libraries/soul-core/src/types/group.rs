/// Grouping domain types
use crate::types::Track;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The tag a grouping playlist groups tracks by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    /// Group by artist
    Artist,

    /// Group by album
    Album,

    /// Group by genre
    Genre,
}

impl GroupType {
    /// All grouping types, in view order
    pub const ALL: [GroupType; 3] = [GroupType::Artist, GroupType::Album, GroupType::Genre];

    /// Name of the group collecting tracks without this tag
    pub fn unknown_group_name(self) -> &'static str {
        match self {
            GroupType::Artist => "Unknown Artist",
            GroupType::Album => "Unknown Album",
            GroupType::Genre => "Unknown Genre",
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupType::Artist => "artist",
            GroupType::Album => "album",
            GroupType::Genre => "genre",
        };
        f.write_str(name)
    }
}

/// Non-owning handle to a group
///
/// A group is identified by its type and name. Holders of a key resolve it
/// against the playlist each time, so a key may outlive its group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    /// Grouping type
    pub group_type: GroupType,

    /// Group name (artist/album/genre name)
    pub name: String,
}

impl GroupKey {
    /// Create a new group key
    pub fn new(group_type: GroupType, name: impl Into<String>) -> Self {
        Self {
            group_type,
            name: name.into(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_type, self.name)
    }
}

/// A named, ordered collection of tracks sharing an artist/album/genre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    key: GroupKey,
    tracks: Vec<Arc<Track>>,
}

impl Group {
    /// Create an empty group
    pub fn new(group_type: GroupType, name: impl Into<String>) -> Self {
        Self {
            key: GroupKey::new(group_type, name),
            tracks: Vec::new(),
        }
    }

    /// Create a group with the given tracks
    pub fn with_tracks(
        group_type: GroupType,
        name: impl Into<String>,
        tracks: Vec<Arc<Track>>,
    ) -> Self {
        Self {
            key: GroupKey::new(group_type, name),
            tracks,
        }
    }

    /// Handle identifying this group
    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Group type
    pub fn group_type(&self) -> GroupType {
        self.key.group_type
    }

    /// Group name
    pub fn name(&self) -> &str {
        &self.key.name
    }

    /// Number of tracks in the group
    pub fn size(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the group has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks in group order
    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    /// Track at a position within the group
    pub fn track_at_index(&self, index: usize) -> Option<Arc<Track>> {
        self.tracks.get(index).cloned()
    }

    /// Position of a track within the group
    pub fn index_of_track(&self, track: &Track) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track.id)
    }

    pub(crate) fn tracks_mut(&mut self) -> &mut Vec<Arc<Track>> {
        &mut self.tracks
    }
}

/// Location of a track within a grouping playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingInfo {
    /// The track's parent group
    pub group: Arc<Group>,

    /// Index of the parent group among all groups of its type
    pub group_index: usize,

    /// Index of the track within its parent group
    pub track_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track(title: &str) -> Arc<Track> {
        Arc::new(Track::new(title, PathBuf::from(format!("/music/{}.mp3", title))))
    }

    #[test]
    fn group_lookup_by_index_and_track() {
        let a = track("a");
        let b = track("b");
        let group = Group::with_tracks(GroupType::Album, "Ray of Light", vec![a.clone(), b.clone()]);

        assert_eq!(group.size(), 2);
        assert_eq!(group.track_at_index(1).as_deref(), Some(b.as_ref()));
        assert_eq!(group.track_at_index(2), None);
        assert_eq!(group.index_of_track(&a), Some(0));
        assert_eq!(group.index_of_track(&track("c")), None);
    }

    #[test]
    fn key_identifies_type_and_name() {
        let group = Group::new(GroupType::Artist, "Madonna");
        assert_eq!(group.key(), &GroupKey::new(GroupType::Artist, "Madonna"));
        assert_ne!(group.key(), &GroupKey::new(GroupType::Album, "Madonna"));
        assert_eq!(group.key().to_string(), "artist:Madonna");
    }
}
