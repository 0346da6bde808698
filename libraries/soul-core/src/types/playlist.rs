/// Playlist view types
use crate::types::GroupType;
use serde::{Deserialize, Serialize};

/// The playlist view currently selected by the user
///
/// The flat "Tracks" view lists every track once; the other views show the
/// same tracks grouped by a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistType {
    /// Flat list of tracks
    #[default]
    Tracks,

    /// Tracks grouped by artist
    Artists,

    /// Tracks grouped by album
    Albums,

    /// Tracks grouped by genre
    Genres,
}

impl PlaylistType {
    /// Grouping type shown by this view (`None` for the flat view)
    pub fn group_type(self) -> Option<GroupType> {
        match self {
            PlaylistType::Tracks => None,
            PlaylistType::Artists => Some(GroupType::Artist),
            PlaylistType::Albums => Some(GroupType::Album),
            PlaylistType::Genres => Some(GroupType::Genre),
        }
    }

    /// View that shows groups of the given type
    pub fn for_group_type(group_type: GroupType) -> Self {
        match group_type {
            GroupType::Artist => PlaylistType::Artists,
            GroupType::Album => PlaylistType::Albums,
            GroupType::Genre => PlaylistType::Genres,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_type_mapping_is_inverse() {
        for group_type in GroupType::ALL {
            let view = PlaylistType::for_group_type(group_type);
            assert_eq!(view.group_type(), Some(group_type));
        }
        assert_eq!(PlaylistType::Tracks.group_type(), None);
    }

    #[test]
    fn default_view_is_tracks() {
        assert_eq!(PlaylistType::default(), PlaylistType::Tracks);
    }
}
