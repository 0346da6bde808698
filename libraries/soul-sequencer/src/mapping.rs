//! Index mapping for grouped scopes
//!
//! In the "all groups" scopes the sequence walks every track, group by group.
//! Its indices are positions in the concatenation of all groups of one type,
//! which differ from flat playlist positions. These helpers convert between
//! the two addressings.

use soul_core::{GroupType, PlaylistAccessor, Track};
use std::sync::Arc;

/// Track at a position in the concatenation of all groups of a type
///
/// Example: with groups of sizes `[3, 2, 4]`, index 4 is the second track of
/// the second group.
pub fn grouped_track_for_absolute_index(
    playlist: &dyn PlaylistAccessor,
    group_type: GroupType,
    index: usize,
) -> Option<Arc<Track>> {
    let mut remaining = index;

    for group_index in 0..playlist.number_of_groups(group_type) {
        let group = playlist.group_at_index(group_type, group_index)?;
        if remaining < group.size() {
            return group.track_at_index(remaining);
        }
        remaining -= group.size();
    }

    None
}

/// Position in the concatenation of all groups of a type for a track given
/// by its group and in-group position
pub fn absolute_index_for_grouped_track(
    playlist: &dyn PlaylistAccessor,
    group_type: GroupType,
    group_index: usize,
    track_index: usize,
) -> Option<usize> {
    let group = playlist.group_at_index(group_type, group_index)?;
    if track_index >= group.size() {
        return None;
    }

    let preceding = (0..group_index)
        .map(|index| {
            playlist
                .group_at_index(group_type, index)
                .map(|group| group.size())
        })
        .sum::<Option<usize>>()?;

    Some(preceding + track_index)
}

/// Position of a track in the concatenation of all groups of a type
pub fn absolute_index_of_track(
    playlist: &dyn PlaylistAccessor,
    group_type: GroupType,
    track: &Track,
) -> Option<usize> {
    let info = playlist.grouping_info_for_track(group_type, track)?;
    absolute_index_for_grouped_track(playlist, group_type, info.group_index, info.track_index)
}
