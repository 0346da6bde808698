//! In-memory grouping playlist
//!
//! Keeps the flat track list and the artist/album/genre groupings in sync.
//! Mutation methods take `&self` (state lives behind a lock) so the playlist
//! can be shared with readers through an `Arc`, and return the
//! [`PlaylistChange`] that listeners should be told about.

use crate::error::{Result, SoulError};
use crate::events::PlaylistChange;
use crate::traits::PlaylistAccessor;
use crate::types::{Group, GroupKey, GroupType, GroupingInfo, PlaylistType, Track};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct PlaylistState {
    tracks: Vec<Arc<Track>>,
    groupings: HashMap<GroupType, Vec<Arc<Group>>>,
}

impl PlaylistState {
    fn groups(&self, group_type: GroupType) -> &[Arc<Group>] {
        self.groupings.get(&group_type).map_or(&[], Vec::as_slice)
    }

    fn groups_mut(&mut self, group_type: GroupType) -> &mut Vec<Arc<Group>> {
        self.groupings.entry(group_type).or_default()
    }

    fn group_position(&self, key: &GroupKey) -> Option<usize> {
        self.groups(key.group_type)
            .iter()
            .position(|group| group.key() == key)
    }
}

/// Playlist held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryPlaylist {
    state: RwLock<PlaylistState>,
}

impl MemoryPlaylist {
    /// Create an empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a playlist pre-filled with tracks
    pub fn with_tracks(tracks: impl IntoIterator<Item = Track>) -> Self {
        let playlist = Self::new();
        playlist.add_tracks(tracks);
        playlist
    }

    fn read(&self) -> RwLockReadGuard<'_, PlaylistState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PlaylistState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All tracks in flat order
    pub fn tracks(&self) -> Vec<Arc<Track>> {
        self.read().tracks.clone()
    }

    /// All groups of a type, in group order
    pub fn groups(&self, group_type: GroupType) -> Vec<Arc<Group>> {
        self.read().groups(group_type).to_vec()
    }

    /// Append tracks
    ///
    /// Each track joins the end of its group for every grouping type; groups
    /// that don't exist yet are created after the existing ones. Tracks that
    /// are already present are skipped.
    pub fn add_tracks(&self, tracks: impl IntoIterator<Item = Track>) -> PlaylistChange {
        let mut state = self.write();
        let mut added = Vec::new();
        let mut affected_groups: Vec<GroupKey> = Vec::new();

        for track in tracks {
            if state.tracks.iter().any(|t| t.id == track.id) {
                continue;
            }

            let track = Arc::new(track);
            state.tracks.push(Arc::clone(&track));

            for group_type in GroupType::ALL {
                let name = track.group_name(group_type).to_string();
                let groups = state.groups_mut(group_type);

                let position = match groups.iter().position(|g| g.name() == name) {
                    Some(position) => position,
                    None => {
                        groups.push(Arc::new(Group::new(group_type, name)));
                        groups.len() - 1
                    }
                };

                let group = &mut groups[position];
                Arc::make_mut(group).tracks_mut().push(Arc::clone(&track));

                if !affected_groups.contains(group.key()) {
                    affected_groups.push(group.key().clone());
                }
            }

            added.push(track.id.clone());
        }

        debug!(count = added.len(), "Added tracks to playlist");

        PlaylistChange::TracksAdded {
            tracks: added,
            affected_groups,
        }
    }

    /// Remove tracks by their flat index
    ///
    /// Groups left empty are removed from their grouping.
    pub fn remove_tracks(&self, indices: &[usize]) -> Result<PlaylistChange> {
        let mut state = self.write();
        let size = state.tracks.len();

        if let Some(&index) = indices.iter().find(|&&index| index >= size) {
            return Err(SoulError::out_of_bounds(index, size));
        }

        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();

        let mut removed: Vec<Arc<Track>> = Vec::with_capacity(indices.len());
        for &index in indices.iter().rev() {
            removed.push(state.tracks.remove(index));
        }
        removed.reverse();

        let mut affected_groups: Vec<GroupKey> = Vec::new();

        for group_type in GroupType::ALL {
            let groups = state.groups_mut(group_type);

            for group in groups.iter_mut() {
                let touched = group.tracks().iter().any(|t| removed.contains(t));
                if touched {
                    Arc::make_mut(group)
                        .tracks_mut()
                        .retain(|t| !removed.contains(t));
                    affected_groups.push(group.key().clone());
                }
            }

            groups.retain(|group| !group.is_empty());
        }

        debug!(count = removed.len(), "Removed tracks from playlist");

        Ok(PlaylistChange::TracksRemoved {
            tracks: removed.iter().map(|t| t.id.clone()).collect(),
            affected_groups,
        })
    }

    /// Move a track within the flat playlist
    pub fn move_track(&self, from: usize, to: usize) -> Result<PlaylistChange> {
        let mut state = self.write();
        move_item(&mut state.tracks, from, to)?;

        Ok(PlaylistChange::TracksReordered {
            playlist_type: PlaylistType::Tracks,
            affected_groups: Vec::new(),
        })
    }

    /// Move a track within its group
    pub fn move_track_in_group(
        &self,
        key: &GroupKey,
        from: usize,
        to: usize,
    ) -> Result<PlaylistChange> {
        let mut state = self.write();
        let position = state
            .group_position(key)
            .ok_or_else(|| SoulError::GroupNotFound(key.clone()))?;

        let group = &mut state.groups_mut(key.group_type)[position];
        move_item(Arc::make_mut(group).tracks_mut(), from, to)?;

        Ok(PlaylistChange::TracksReordered {
            playlist_type: PlaylistType::for_group_type(key.group_type),
            affected_groups: vec![key.clone()],
        })
    }

    /// Move a whole group within its grouping
    pub fn move_group(
        &self,
        group_type: GroupType,
        from: usize,
        to: usize,
    ) -> Result<PlaylistChange> {
        let mut state = self.write();
        move_item(state.groups_mut(group_type), from, to)?;

        Ok(PlaylistChange::TracksReordered {
            playlist_type: PlaylistType::for_group_type(group_type),
            affected_groups: Vec::new(),
        })
    }

    /// Sort the flat playlist by title
    pub fn sort_tracks(&self) -> PlaylistChange {
        let mut state = self.write();
        state.tracks.sort_by(|a, b| a.title.cmp(&b.title));

        PlaylistChange::PlaylistSorted {
            playlist_type: PlaylistType::Tracks,
            tracks_sorted: true,
            affected_groups: None,
        }
    }

    /// Sort the groups of a type by name, and optionally the tracks within
    /// every group by title
    pub fn sort_groups(&self, group_type: GroupType, sort_tracks: bool) -> PlaylistChange {
        let mut state = self.write();
        let groups = state.groups_mut(group_type);
        groups.sort_by(|a, b| a.name().cmp(b.name()));

        if sort_tracks {
            for group in groups.iter_mut() {
                Arc::make_mut(group)
                    .tracks_mut()
                    .sort_by(|a, b| a.title.cmp(&b.title));
            }
        }

        PlaylistChange::PlaylistSorted {
            playlist_type: PlaylistType::for_group_type(group_type),
            tracks_sorted: sort_tracks,
            affected_groups: None,
        }
    }

    /// Remove every track and group
    pub fn clear(&self) -> PlaylistChange {
        let mut state = self.write();
        state.tracks.clear();
        state.groupings.clear();

        debug!("Cleared playlist");
        PlaylistChange::PlaylistCleared
    }
}

fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let size = items.len();
    if from >= size {
        return Err(SoulError::out_of_bounds(from, size));
    }
    if to >= size {
        return Err(SoulError::out_of_bounds(to, size));
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

impl PlaylistAccessor for MemoryPlaylist {
    fn size(&self) -> usize {
        self.read().tracks.len()
    }

    fn track_at_index(&self, index: usize) -> Option<Arc<Track>> {
        self.read().tracks.get(index).cloned()
    }

    fn index_of_track(&self, track: &Track) -> Option<usize> {
        self.read().tracks.iter().position(|t| t.id == track.id)
    }

    fn group_at_index(&self, group_type: GroupType, index: usize) -> Option<Arc<Group>> {
        self.read().groups(group_type).get(index).cloned()
    }

    fn number_of_groups(&self, group_type: GroupType) -> usize {
        self.read().groups(group_type).len()
    }

    fn grouping_info_for_track(
        &self,
        group_type: GroupType,
        track: &Track,
    ) -> Option<GroupingInfo> {
        let state = self.read();

        state
            .groups(group_type)
            .iter()
            .enumerate()
            .find_map(|(group_index, group)| {
                group.index_of_track(track).map(|track_index| GroupingInfo {
                    group: Arc::clone(group),
                    group_index,
                    track_index,
                })
            })
    }

    fn group_for_key(&self, key: &GroupKey) -> Option<Arc<Group>> {
        let state = self.read();
        state
            .group_position(key)
            .map(|position| Arc::clone(&state.groups(key.group_type)[position]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track(title: &str, artist: &str, album: &str) -> Track {
        Track::new(title, PathBuf::from(format!("/music/{}.mp3", title)))
            .with_artist(artist)
            .with_album(album)
    }

    fn sample_playlist() -> MemoryPlaylist {
        MemoryPlaylist::with_tracks([
            track("a1", "Madonna", "Ray of Light"),
            track("b1", "Bjork", "Post"),
            track("a2", "Madonna", "Ray of Light"),
            track("c1", "Cher", "Believe"),
            track("b2", "Bjork", "Homogenic"),
        ])
    }

    fn titles(tracks: &[Arc<Track>]) -> Vec<&str> {
        tracks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn groups_follow_creation_order() {
        let playlist = sample_playlist();

        let artists = playlist.groups(GroupType::Artist);
        let names: Vec<&str> = artists.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["Madonna", "Bjork", "Cher"]);
        assert_eq!(titles(artists[0].tracks()), vec!["a1", "a2"]);

        assert_eq!(playlist.number_of_groups(GroupType::Album), 4);
        assert_eq!(playlist.number_of_groups(GroupType::Genre), 1);
        assert_eq!(
            playlist.group_at_index(GroupType::Genre, 0).unwrap().name(),
            "Unknown Genre"
        );
    }

    #[test]
    fn duplicate_tracks_are_skipped() {
        let playlist = MemoryPlaylist::new();
        let t = track("a1", "Madonna", "Ray of Light");

        playlist.add_tracks([t.clone()]);
        let change = playlist.add_tracks([t]);

        assert_eq!(playlist.size(), 1);
        assert!(matches!(change, PlaylistChange::TracksAdded { tracks, .. } if tracks.is_empty()));
    }

    #[test]
    fn grouping_info_locates_track() {
        let playlist = sample_playlist();
        let b2 = playlist.track_at_index(4).unwrap();

        let info = playlist
            .grouping_info_for_track(GroupType::Artist, &b2)
            .unwrap();
        assert_eq!(info.group.name(), "Bjork");
        assert_eq!(info.group_index, 1);
        assert_eq!(info.track_index, 1);
    }

    #[test]
    fn removing_last_track_of_group_drops_group() {
        let playlist = sample_playlist();

        let change = playlist.remove_tracks(&[3]).unwrap();

        assert_eq!(playlist.size(), 4);
        assert_eq!(playlist.number_of_groups(GroupType::Artist), 2);
        assert!(playlist
            .group_for_key(&GroupKey::new(GroupType::Artist, "Cher"))
            .is_none());

        match change {
            PlaylistChange::TracksRemoved {
                tracks,
                affected_groups,
            } => {
                assert_eq!(tracks.len(), 1);
                assert!(affected_groups.contains(&GroupKey::new(GroupType::Artist, "Cher")));
                assert!(affected_groups.contains(&GroupKey::new(GroupType::Album, "Believe")));
            }
            other => panic!("unexpected change: {:?}", other),
        }
    }

    #[test]
    fn remove_rejects_out_of_range_index() {
        let playlist = sample_playlist();
        assert_eq!(
            playlist.remove_tracks(&[1, 9]),
            Err(SoulError::out_of_bounds(9, 5))
        );
        assert_eq!(playlist.size(), 5);
    }

    #[test]
    fn move_track_in_group_reorders_only_that_group() {
        let playlist = sample_playlist();
        let key = GroupKey::new(GroupType::Artist, "Madonna");

        let change = playlist.move_track_in_group(&key, 1, 0).unwrap();

        let group = playlist.group_for_key(&key).unwrap();
        assert_eq!(titles(group.tracks()), vec!["a2", "a1"]);
        assert_eq!(titles(&playlist.tracks()), vec!["a1", "b1", "a2", "c1", "b2"]);
        assert_eq!(
            change,
            PlaylistChange::TracksReordered {
                playlist_type: PlaylistType::Artists,
                affected_groups: vec![key],
            }
        );
    }

    #[test]
    fn sort_groups_by_name_and_tracks_by_title() {
        let playlist = sample_playlist();
        playlist.move_track_in_group(&GroupKey::new(GroupType::Artist, "Madonna"), 1, 0).unwrap();

        playlist.sort_groups(GroupType::Artist, true);

        let artists = playlist.groups(GroupType::Artist);
        let names: Vec<&str> = artists.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["Bjork", "Cher", "Madonna"]);
        assert_eq!(titles(artists[2].tracks()), vec!["a1", "a2"]);
    }

    #[test]
    fn clear_removes_everything() {
        let playlist = sample_playlist();
        assert_eq!(playlist.clear(), PlaylistChange::PlaylistCleared);
        assert_eq!(playlist.size(), 0);
        assert_eq!(playlist.number_of_groups(GroupType::Album), 0);
    }
}
