//! Property-based tests for sequencing
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use soul_core::{GroupType, MemoryPlaylist, PlaylistAccessor, Track};
use soul_sequencer::mapping::{absolute_index_of_track, grouped_track_for_absolute_index};
use soul_sequencer::{PlaybackSequence, RepeatMode, ShuffleMode, ShuffleSequence};
use std::collections::HashSet;
use std::path::PathBuf;

// ===== Helpers =====

fn repeat_mode() -> impl Strategy<Value = RepeatMode> {
    prop_oneof![
        Just(RepeatMode::Off),
        Just(RepeatMode::One),
        Just(RepeatMode::All)
    ]
}

fn shuffle_mode() -> impl Strategy<Value = ShuffleMode> {
    prop_oneof![Just(ShuffleMode::Off), Just(ShuffleMode::On)]
}

/// Operations a user or the playlist can apply to a sequence
#[derive(Debug, Clone)]
enum Op {
    Subsequent,
    Next,
    Previous,
    Select(usize),
    Resize(usize, Option<usize>),
    SetRepeat(RepeatMode),
    SetShuffle(ShuffleMode),
    ToggleRepeat,
    ToggleShuffle,
    End,
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Subsequent),
        Just(Op::Next),
        Just(Op::Previous),
        (0usize..25).prop_map(Op::Select),
        (0usize..20, proptest::option::of(0usize..25)).prop_map(|(s, c)| Op::Resize(s, c)),
        repeat_mode().prop_map(Op::SetRepeat),
        shuffle_mode().prop_map(Op::SetShuffle),
        Just(Op::ToggleRepeat),
        Just(Op::ToggleShuffle),
        Just(Op::End),
        Just(Op::Clear),
    ]
}

fn apply(sequence: &mut PlaybackSequence, op: &Op) {
    match *op {
        Op::Subsequent => {
            sequence.subsequent();
        }
        Op::Next => {
            sequence.next();
        }
        Op::Previous => {
            sequence.previous();
        }
        Op::Select(index) => {
            sequence.select(index);
        }
        Op::Resize(size, cursor) => sequence.resize(size, cursor),
        Op::SetRepeat(mode) => {
            sequence.set_repeat_mode(mode);
        }
        Op::SetShuffle(mode) => {
            sequence.set_shuffle_mode(mode);
        }
        Op::ToggleRepeat => {
            sequence.toggle_repeat_mode();
        }
        Op::ToggleShuffle => {
            sequence.toggle_shuffle_mode();
        }
        Op::End => sequence.end(),
        Op::Clear => sequence.clear(),
    }
}

/// Playlist whose tracks land in albums given by `albums[i]`
fn album_playlist(albums: &[usize]) -> MemoryPlaylist {
    MemoryPlaylist::with_tracks(albums.iter().enumerate().map(|(i, album)| {
        Track::new(format!("track {}", i), PathBuf::from(format!("/music/{}.mp3", i)))
            .with_album(format!("album {}", album))
    }))
}

// ===== Property Tests =====

proptest! {
    /// Property: a new shuffle sequence is a permutation of 0..n
    #[test]
    fn shuffle_is_permutation(size in 1usize..200) {
        let sequence = ShuffleSequence::new(size);

        let values: HashSet<usize> = sequence.permutation().iter().copied().collect();
        prop_assert_eq!(sequence.len(), size);
        prop_assert_eq!(values, (0..size).collect::<HashSet<_>>());
    }

    /// Property: a pinned value comes first and is not emitted again
    #[test]
    fn pinned_value_is_consumed(size in 1usize..100, pin_seed in any::<usize>()) {
        let pinned = pin_seed % size;
        let mut sequence = ShuffleSequence::default();
        sequence.resize(size, Some(pinned));

        prop_assert_eq!(sequence.current(), Some(pinned));

        let rest: Vec<usize> = std::iter::from_fn(|| sequence.next()).collect();
        prop_assert_eq!(rest.len(), size - 1);
        prop_assert!(!rest.contains(&pinned));
    }

    /// Property: cursor stays in range and modes never conflict, whatever
    /// operations are applied
    #[test]
    fn sequence_invariants_hold(
        repeat in repeat_mode(),
        shuffle in shuffle_mode(),
        ops in prop::collection::vec(op(), 1..60)
    ) {
        let mut sequence = PlaybackSequence::new(repeat, shuffle);

        for op in &ops {
            apply(&mut sequence, op);

            if let Some(cursor) = sequence.cursor() {
                prop_assert!(cursor < sequence.size(), "cursor {} size {} after {:?}", cursor, sequence.size(), op);
            }

            let modes = sequence.repeat_and_shuffle_modes();
            prop_assert_ne!(modes, (RepeatMode::One, ShuffleMode::On));

            if modes.1 == ShuffleMode::Off {
                prop_assert!(sequence.shuffle_sequence().is_empty());
            }
        }
    }

    /// Property: a full shuffled pass without repeat visits every index once
    #[test]
    fn shuffled_pass_visits_every_index(size in 1usize..60) {
        let mut sequence = PlaybackSequence::new(RepeatMode::Off, ShuffleMode::On);
        sequence.resize(size, None);

        let mut seen = HashSet::new();
        while let Some(index) = sequence.subsequent() {
            prop_assert!(seen.insert(index));
        }
        prop_assert_eq!(seen.len(), size);
    }

    /// Property: repeat All never plays the same index twice in a row across
    /// a regenerated shuffle
    #[test]
    fn repeat_all_shuffle_never_repeats_back_to_back(size in 2usize..30) {
        let mut sequence = PlaybackSequence::new(RepeatMode::All, ShuffleMode::On);
        sequence.resize(size, None);

        let mut previous = sequence.subsequent();
        for _ in 0..size * 3 {
            let current = sequence.subsequent();
            prop_assert!(current.is_some());
            prop_assert_ne!(current, previous);
            previous = current;
        }
    }

    /// Property: grouped index <-> track mapping round-trips
    #[test]
    fn grouped_index_round_trip(albums in prop::collection::vec(0usize..6, 1..50)) {
        let playlist = album_playlist(&albums);

        for index in 0..playlist.size() {
            let track = grouped_track_for_absolute_index(&playlist, GroupType::Album, index);
            prop_assert!(track.is_some());
            let track = track.unwrap();
            prop_assert_eq!(
                absolute_index_of_track(&playlist, GroupType::Album, &track),
                Some(index)
            );
        }

        prop_assert!(
            grouped_track_for_absolute_index(&playlist, GroupType::Album, playlist.size()).is_none()
        );
    }
}
