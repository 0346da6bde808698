//! Core types for playback sequencing

use crate::scope::SequenceScope;
use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the sequence ends
    #[default]
    Off,

    /// Loop current track only
    One,

    /// Loop entire sequence
    All,
}

impl RepeatMode {
    /// Next mode in the repeat button cycle: Off -> One -> All -> Off
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::Off,
        }
    }
}

/// Shuffle mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleMode {
    /// Play in scope order
    #[default]
    Off,

    /// Play in a random permutation of the scope
    On,
}

impl ShuffleMode {
    /// The other shuffle mode
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ShuffleMode::Off => ShuffleMode::On,
            ShuffleMode::On => ShuffleMode::Off,
        }
    }
}

/// Repeat and shuffle modes, as returned by every mode-changing operation
pub type RepeatAndShuffleModes = (RepeatMode, ShuffleMode);

/// Snapshot of the sequence for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceInfo {
    /// Current playback scope
    pub scope: SequenceScope,

    /// 1-based position of the current track within the scope
    /// (`None` when nothing is selected)
    pub relative_track_index: Option<usize>,

    /// Number of tracks in the scope
    pub total_tracks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_mode_cycles_off_one_all() {
        assert_eq!(RepeatMode::Off.toggled(), RepeatMode::One);
        assert_eq!(RepeatMode::One.toggled(), RepeatMode::All);
        assert_eq!(RepeatMode::All.toggled(), RepeatMode::Off);
    }

    #[test]
    fn shuffle_mode_flips() {
        assert_eq!(ShuffleMode::Off.toggled(), ShuffleMode::On);
        assert_eq!(ShuffleMode::On.toggled(), ShuffleMode::Off);
    }

    #[test]
    fn modes_serialize_as_lowercase_tags() {
        assert_eq!(serde_json::to_string(&RepeatMode::One).unwrap(), "\"one\"");
        assert_eq!(serde_json::to_string(&ShuffleMode::On).unwrap(), "\"on\"");
        assert_eq!(
            serde_json::from_str::<RepeatMode>("\"all\"").unwrap(),
            RepeatMode::All
        );
    }

    #[test]
    fn defaults_are_off() {
        assert_eq!(RepeatMode::default(), RepeatMode::Off);
        assert_eq!(ShuffleMode::default(), ShuffleMode::Off);
    }
}
