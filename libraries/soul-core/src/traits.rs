/// Core traits for Soul Player
use crate::types::{Group, GroupKey, GroupType, GroupingInfo, Track};
use std::sync::Arc;

/// Read-only access to a playlist and its groupings
///
/// The playlist keeps one flat ordering of all tracks plus, for every
/// [`GroupType`], an ordered list of groups that together contain every
/// track exactly once. Consumers never mutate the playlist through this
/// trait.
///
/// All lookups return `None` for indices or tracks that are not (or no
/// longer) present.
pub trait PlaylistAccessor: Send + Sync {
    /// Total number of tracks
    fn size(&self) -> usize;

    /// Track at a position in the flat playlist
    fn track_at_index(&self, index: usize) -> Option<Arc<Track>>;

    /// Position of a track in the flat playlist
    fn index_of_track(&self, track: &Track) -> Option<usize>;

    /// Whether the track is still in the playlist
    fn has_track(&self, track: &Track) -> bool {
        self.index_of_track(track).is_some()
    }

    /// Group at a position among all groups of a type
    fn group_at_index(&self, group_type: GroupType, index: usize) -> Option<Arc<Group>>;

    /// Number of groups of a type
    fn number_of_groups(&self, group_type: GroupType) -> usize;

    /// Parent group of a track, and the track's position within it
    fn grouping_info_for_track(&self, group_type: GroupType, track: &Track)
        -> Option<GroupingInfo>;

    /// Resolve a group handle to the live group
    fn group_for_key(&self, key: &GroupKey) -> Option<Arc<Group>> {
        (0..self.number_of_groups(key.group_type))
            .filter_map(|index| self.group_at_index(key.group_type, index))
            .find(|group| group.key() == key)
    }
}
