//! Sequencer
//!
//! Ties a [`PlaybackSequence`] and a [`SequenceScope`] to a playlist. The
//! sequence only deals in positions within the scope; the sequencer turns
//! those positions into tracks (and back), and keeps the position of the
//! playing track valid while the playlist changes underneath it.
//!
//! The sequencer is single-owner state. Use
//! [`SequencerHandle`](crate::SequencerHandle) to share it between threads.

use crate::events::{EventEmitter, SequencerEvent};
use crate::mapping;
use crate::scope::SequenceScope;
use crate::sequence::PlaybackSequence;
use crate::settings::SequencerSettings;
use crate::types::{RepeatAndShuffleModes, RepeatMode, SequenceInfo, ShuffleMode};
use crossbeam_channel::Receiver;
use soul_core::{GroupKey, PlaylistAccessor, PlaylistChange, PlaylistType, Track};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Track-level playback order over a playlist
pub struct Sequencer {
    sequence: PlaybackSequence,
    scope: SequenceScope,

    /// View the user is looking at; decides the scope of [`begin`](Self::begin)
    playlist_type: PlaylistType,

    playlist: Arc<dyn PlaylistAccessor>,

    /// Track most recently handed out for playback
    current_track: Option<Arc<Track>>,

    events: EventEmitter,
}

impl Sequencer {
    /// Create a sequencer over a playlist, starting with the persisted modes
    pub fn new(
        playlist: Arc<dyn PlaylistAccessor>,
        playlist_type: PlaylistType,
        settings: SequencerSettings,
    ) -> Self {
        Self {
            sequence: PlaybackSequence::new(settings.repeat_mode, settings.shuffle_mode),
            scope: SequenceScope::for_view(playlist_type),
            playlist_type,
            playlist,
            current_track: None,
            events: EventEmitter::default(),
        }
    }

    /// Receive [`SequencerEvent`]s
    pub fn subscribe(&mut self) -> Receiver<SequencerEvent> {
        self.events.subscribe()
    }

    // ===== State =====

    /// Track most recently handed out for playback
    pub fn current_track(&self) -> Option<Arc<Track>> {
        self.current_track.clone()
    }

    /// Active scope
    pub fn scope(&self) -> &SequenceScope {
        &self.scope
    }

    /// View that [`begin`](Self::begin) will scope to
    pub fn playlist_type(&self) -> PlaylistType {
        self.playlist_type
    }

    /// The underlying index sequence
    pub fn sequence(&self) -> &PlaybackSequence {
        &self.sequence
    }

    /// Scope, position and size for display
    pub fn sequence_info(&self) -> SequenceInfo {
        SequenceInfo {
            scope: self.scope.clone(),
            relative_track_index: self.sequence.cursor().map(|cursor| cursor + 1),
            total_tracks: self.sequence.size(),
        }
    }

    /// Current modes, for persisting
    pub fn settings(&self) -> SequencerSettings {
        self.repeat_and_shuffle_modes().into()
    }

    // ===== Modes =====

    /// Current repeat and shuffle modes
    pub fn repeat_and_shuffle_modes(&self) -> RepeatAndShuffleModes {
        self.sequence.repeat_and_shuffle_modes()
    }

    /// Set the repeat mode (repeat One turns shuffle off)
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) -> RepeatAndShuffleModes {
        let modes = self.sequence.set_repeat_mode(mode);
        debug!(?modes, "Repeat mode set");
        modes
    }

    /// Cycle the repeat mode
    pub fn toggle_repeat_mode(&mut self) -> RepeatAndShuffleModes {
        let modes = self.sequence.toggle_repeat_mode();
        debug!(?modes, "Repeat mode toggled");
        modes
    }

    /// Set the shuffle mode (shuffle On moves repeat One to Off)
    pub fn set_shuffle_mode(&mut self, mode: ShuffleMode) -> RepeatAndShuffleModes {
        let modes = self.sequence.set_shuffle_mode(mode);
        debug!(?modes, "Shuffle mode set");
        modes
    }

    /// Flip the shuffle mode
    pub fn toggle_shuffle_mode(&mut self) -> RepeatAndShuffleModes {
        let modes = self.sequence.toggle_shuffle_mode();
        debug!(?modes, "Shuffle mode toggled");
        modes
    }

    // ===== Starting and stopping =====

    /// Start playing the current view from the top (or a shuffled start)
    pub fn begin(&mut self) -> Option<Arc<Track>> {
        self.scope = SequenceScope::for_view(self.playlist_type);
        self.current_track = None;
        self.sequence.resize(self.scope_size(), None);

        info!(scope = %self.scope, size = self.sequence.size(), "Beginning sequence");
        self.subsequent()
    }

    /// Stop: nothing is playing and the scope goes back to the view's default
    pub fn end(&mut self) {
        self.sequence.end();
        self.current_track = None;
        self.scope = SequenceScope::for_view(self.playlist_type);

        debug!(scope = %self.scope, "Ended sequence");
    }

    /// Play a track of the flat playlist, scoping to all tracks
    pub fn select(&mut self, index: usize) -> Option<Arc<Track>> {
        let track = self.playlist.track_at_index(index)?;

        self.scope = SequenceScope::AllTracks;
        self.sequence.resize(self.playlist.size(), Some(index));
        self.current_track = Some(Arc::clone(&track));

        debug!(index, title = %track.title, "Selected track by index");
        Some(track)
    }

    /// Play a specific track
    ///
    /// In the flat view this scopes to all tracks; in a grouping view it
    /// scopes to the track's parent group.
    pub fn select_track(&mut self, track: &Track) -> Option<Arc<Track>> {
        let Some(group_type) = self.playlist_type.group_type() else {
            let index = self.playlist.index_of_track(track)?;
            return self.select(index);
        };

        let info = self.playlist.grouping_info_for_track(group_type, track)?;
        let selected = info.group.track_at_index(info.track_index)?;

        self.scope = SequenceScope::for_group(info.group.key().clone());
        self.sequence.resize(info.group.size(), Some(info.track_index));
        self.current_track = Some(Arc::clone(&selected));

        debug!(scope = %self.scope, index = info.track_index, "Selected track in group");
        Some(selected)
    }

    /// Play a group from its start (or a shuffled start)
    pub fn select_group(&mut self, key: &GroupKey) -> Option<Arc<Track>> {
        let group = self.playlist.group_for_key(key)?;

        self.scope = SequenceScope::for_group(key.clone());
        self.current_track = None;
        self.sequence.resize(group.size(), None);

        debug!(scope = %self.scope, size = group.size(), "Selected group");
        self.subsequent()
    }

    // ===== Iteration =====

    /// Track to play automatically after the current one completes
    ///
    /// When there is none the current track is kept; the caller decides
    /// whether to stop.
    pub fn subsequent(&mut self) -> Option<Arc<Track>> {
        let index = self.sequence.subsequent()?;
        self.advance_to(index)
    }

    /// Track to play when the user skips forward
    pub fn next(&mut self) -> Option<Arc<Track>> {
        let index = self.sequence.next()?;
        self.advance_to(index)
    }

    /// Track to play when the user skips back
    pub fn previous(&mut self) -> Option<Arc<Track>> {
        let index = self.sequence.previous()?;
        self.advance_to(index)
    }

    /// What [`subsequent`](Self::subsequent) would return
    ///
    /// Not guaranteed to match under shuffle when the permutation is about
    /// to be regenerated.
    pub fn peek_subsequent(&self) -> Option<Arc<Track>> {
        self.track_for_index(self.sequence.peek_subsequent()?)
    }

    /// What [`next`](Self::next) would return
    pub fn peek_next(&self) -> Option<Arc<Track>> {
        self.track_for_index(self.sequence.peek_next()?)
    }

    /// What [`previous`](Self::previous) would return
    pub fn peek_previous(&self) -> Option<Arc<Track>> {
        self.track_for_index(self.sequence.peek_previous()?)
    }

    fn advance_to(&mut self, index: usize) -> Option<Arc<Track>> {
        let Some(track) = self.track_for_index(index) else {
            warn!(index, scope = %self.scope, "Sequence index no longer resolves, ending");
            self.end();
            return None;
        };

        trace!(index, title = %track.title, "Advanced sequence");
        self.current_track = Some(Arc::clone(&track));
        Some(track)
    }

    // ===== Index resolution =====

    /// Track at a position within the active scope
    fn track_for_index(&self, index: usize) -> Option<Arc<Track>> {
        let playlist = self.playlist.as_ref();

        if let Some(key) = self.scope.group() {
            return playlist.group_for_key(key)?.track_at_index(index);
        }

        match self.scope.group_type() {
            None => playlist.track_at_index(index),
            Some(group_type) => {
                mapping::grouped_track_for_absolute_index(playlist, group_type, index)
            }
        }
    }

    /// Position of the playing track within the active scope
    fn index_of_playing_track(&self) -> Option<usize> {
        let track = self.current_track.as_deref()?;
        let playlist = self.playlist.as_ref();

        if let Some(key) = self.scope.group() {
            return playlist.group_for_key(key)?.index_of_track(track);
        }

        match self.scope.group_type() {
            None => playlist.index_of_track(track),
            Some(group_type) => mapping::absolute_index_of_track(playlist, group_type, track),
        }
    }

    /// Number of tracks in the active scope (0 for a stale group)
    fn scope_size(&self) -> usize {
        match self.scope.group() {
            Some(key) => self
                .playlist
                .group_for_key(key)
                .map_or(0, |group| group.size()),
            None => self.playlist.size(),
        }
    }

    /// Whether a change touching `affected` groups is outside a single-group
    /// scope
    fn outside_scope_group(&self, affected: &[GroupKey]) -> bool {
        self.scope
            .group()
            .is_some_and(|key| !affected.contains(key))
    }

    // ===== Playlist reconciliation =====

    /// Bring the sequence up to date with a playlist change
    pub fn handle_playlist_change(&mut self, change: &PlaylistChange) {
        trace!(kind = change.kind(), scope = %self.scope, "Playlist changed");

        match change {
            PlaylistChange::TracksAdded {
                tracks,
                affected_groups,
            } => self.tracks_added(tracks.is_empty(), affected_groups),
            PlaylistChange::TracksRemoved {
                tracks,
                affected_groups,
            } => self.tracks_removed(tracks.is_empty(), affected_groups),
            PlaylistChange::TracksReordered {
                playlist_type,
                affected_groups,
            } => self.tracks_reordered(*playlist_type, affected_groups),
            PlaylistChange::PlaylistSorted {
                playlist_type,
                tracks_sorted,
                affected_groups,
            } => self.playlist_sorted(*playlist_type, *tracks_sorted, affected_groups.as_deref()),
            PlaylistChange::PlaylistCleared => self.playlist_cleared(),
            PlaylistChange::ViewTypeChanged(playlist_type) => {
                self.playlist_type = *playlist_type;
                debug!(?playlist_type, "Playlist view changed");
            }
        }
    }

    fn tracks_added(&mut self, nothing_added: bool, affected: &[GroupKey]) {
        if nothing_added || self.outside_scope_group(affected) {
            return;
        }

        self.update_sequence(true);
    }

    fn tracks_removed(&mut self, nothing_removed: bool, affected: &[GroupKey]) {
        if nothing_removed {
            return;
        }

        let removed_playing = self
            .current_track
            .clone()
            .filter(|track| !self.playlist.has_track(track));

        if let Some(track) = removed_playing {
            info!(title = %track.title, "Playing track was removed");
            self.end();
            self.events
                .emit(&SequencerEvent::PlayingTrackRemoved(track));
        }

        if self.outside_scope_group(affected) {
            return;
        }

        self.update_sequence(true);
    }

    fn tracks_reordered(&mut self, playlist_type: PlaylistType, affected: &[GroupKey]) {
        if self.scope.playlist_type() != playlist_type || self.outside_scope_group(affected) {
            return;
        }

        self.update_sequence(false);
    }

    fn playlist_sorted(
        &mut self,
        playlist_type: PlaylistType,
        tracks_sorted: bool,
        affected: Option<&[GroupKey]>,
    ) {
        if self.scope.playlist_type() != playlist_type {
            return;
        }

        if self.scope.is_group() {
            // Sorting only the groups doesn't move anything inside one
            if !tracks_sorted {
                return;
            }
            if affected.is_some_and(|affected| self.outside_scope_group(affected)) {
                return;
            }
        }

        self.update_sequence(false);
    }

    fn playlist_cleared(&mut self) {
        if let Some(track) = self.current_track.clone() {
            self.events
                .emit(&SequencerEvent::PlayingTrackRemoved(track));
        }

        self.end();
        self.sequence.clear();
        info!("Playlist cleared, sequence emptied");
    }

    /// Reposition the sequence on the playing track, resizing it to the
    /// scope when the number of tracks may have changed
    fn update_sequence(&mut self, resize: bool) {
        if let Some(key) = self.scope.group() {
            if self.playlist.group_for_key(key).is_none() {
                warn!(group = %key, "Scope group no longer exists, ending sequence");
                self.end();
                self.sequence.clear();
                return;
            }
        }

        let index = self.index_of_playing_track();

        if !resize {
            self.sequence.start(index);
            return;
        }

        match self.scope_size() {
            0 => self.sequence.clear(),
            size => self.sequence.resize(size, index),
        }
    }
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("sequence", &self.sequence)
            .field("scope", &self.scope)
            .field("playlist_type", &self.playlist_type)
            .field("current_track", &self.current_track)
            .finish_non_exhaustive()
    }
}
