//! Playback sequence
//!
//! Decides the order tracks are picked in, from the size of the current
//! scope and the repeat/shuffle modes. It knows nothing about tracks or
//! scopes: every index here is a position within the scope (0-based).
//!
//! Two kinds of advance exist:
//! - "subsequent": picked automatically when the current track completes.
//!   Repeat One replays the same index.
//! - "next"/"previous": picked because the user asked. Repeat One has no
//!   effect, the user always moves through the sequence.

use crate::shuffle::ShuffleSequence;
use crate::types::{RepeatAndShuffleModes, RepeatMode, ShuffleMode};
use tracing::{debug, trace};

/// Cursor, size and modes of the sequence for the current scope
#[derive(Debug, Clone)]
pub struct PlaybackSequence {
    /// Number of tracks in the scope
    size: usize,

    /// Position of the current track; `None` when nothing is selected
    cursor: Option<usize>,

    repeat_mode: RepeatMode,
    shuffle_mode: ShuffleMode,

    /// Only populated while shuffle is on
    shuffle: ShuffleSequence,
}

impl PlaybackSequence {
    /// Create an empty sequence with the given modes
    ///
    /// Repeat One and shuffle On can't both hold; if both are requested,
    /// repeat One wins and shuffle is turned off.
    pub fn new(repeat_mode: RepeatMode, shuffle_mode: ShuffleMode) -> Self {
        let shuffle_mode = if repeat_mode == RepeatMode::One {
            ShuffleMode::Off
        } else {
            shuffle_mode
        };

        Self {
            size: 0,
            cursor: None,
            repeat_mode,
            shuffle_mode,
            shuffle: ShuffleSequence::default(),
        }
    }

    /// Number of tracks in the scope
    pub fn size(&self) -> usize {
        self.size
    }

    /// Position of the current track
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The shuffle permutation (empty while shuffle is off)
    pub fn shuffle_sequence(&self) -> &ShuffleSequence {
        &self.shuffle
    }

    /// Current repeat and shuffle modes
    pub fn repeat_and_shuffle_modes(&self) -> RepeatAndShuffleModes {
        (self.repeat_mode, self.shuffle_mode)
    }

    fn is_shuffling(&self) -> bool {
        self.shuffle_mode == ShuffleMode::On
    }

    // ===== Sizing =====

    /// Resize the sequence and restart it at `new_cursor`
    ///
    /// A cursor outside the new size is dropped. While shuffling, the
    /// permutation is rebuilt with the cursor pinned as its first element.
    pub fn resize(&mut self, size: usize, new_cursor: Option<usize>) {
        self.size = size;
        self.cursor = new_cursor.filter(|&cursor| cursor < size);

        if self.is_shuffling() {
            self.shuffle.resize(size, self.cursor);
        }

        debug!(size, cursor = ?self.cursor, "Resized playback sequence");
    }

    /// Restart the sequence at its current size
    pub fn start(&mut self, new_cursor: Option<usize>) {
        self.resize(self.size, new_cursor);
    }

    /// Jump directly to an index (the user picked a track)
    ///
    /// Returns `None` without changing anything if the index is out of range.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index >= self.size {
            return None;
        }

        self.start(Some(index));
        self.cursor
    }

    /// Invalidate the cursor (nothing playing)
    ///
    /// The shuffle position is kept, so a later `subsequent` while shuffling
    /// continues the current permutation instead of starting a new pass.
    pub fn end(&mut self) {
        self.cursor = None;
    }

    /// Empty the sequence (the scope has no tracks)
    pub fn clear(&mut self) {
        self.size = 0;
        self.cursor = None;
        self.shuffle.clear();
    }

    // ===== Repeat and shuffle =====

    /// Set the repeat mode
    ///
    /// Choosing repeat One turns shuffle off.
    pub fn set_repeat_mode(&mut self, repeat_mode: RepeatMode) -> RepeatAndShuffleModes {
        self.repeat_mode = repeat_mode;

        if repeat_mode == RepeatMode::One && self.is_shuffling() {
            self.shuffle_mode = ShuffleMode::Off;
            self.shuffle.clear();
        }

        self.repeat_and_shuffle_modes()
    }

    /// Cycle the repeat mode: Off -> One -> All -> Off
    pub fn toggle_repeat_mode(&mut self) -> RepeatAndShuffleModes {
        self.set_repeat_mode(self.repeat_mode.toggled())
    }

    /// Set the shuffle mode
    ///
    /// Turning shuffle on moves repeat One to Off and builds a permutation
    /// that starts at the current track. Setting the current mode again
    /// changes nothing.
    pub fn set_shuffle_mode(&mut self, shuffle_mode: ShuffleMode) -> RepeatAndShuffleModes {
        if shuffle_mode == self.shuffle_mode {
            return self.repeat_and_shuffle_modes();
        }

        self.shuffle_mode = shuffle_mode;

        match shuffle_mode {
            ShuffleMode::On => {
                if self.repeat_mode == RepeatMode::One {
                    self.repeat_mode = RepeatMode::Off;
                }
                self.shuffle.resize(self.size, self.cursor);
            }
            ShuffleMode::Off => self.shuffle.clear(),
        }

        self.repeat_and_shuffle_modes()
    }

    /// Flip the shuffle mode
    pub fn toggle_shuffle_mode(&mut self) -> RepeatAndShuffleModes {
        self.set_shuffle_mode(self.shuffle_mode.toggled())
    }

    // ===== Iteration =====

    /// Advance automatically (the current track completed)
    ///
    /// Always moves the cursor, possibly to `None` when the sequence is over.
    pub fn subsequent(&mut self) -> Option<usize> {
        if self.size == 0 {
            return None;
        }

        self.cursor = match (self.repeat_mode, self.shuffle_mode) {
            (RepeatMode::One, _) => Some(self.cursor.unwrap_or(0)),
            (_, ShuffleMode::On) => self.next_shuffled(),
            (_, ShuffleMode::Off) => self.linear_subsequent(),
        };

        self.cursor
    }

    /// What [`subsequent`](Self::subsequent) would pick, without moving
    ///
    /// While shuffling, a sequence that is exhausted under repeat All is
    /// regenerated by `subsequent`, so the result here may differ from it.
    pub fn peek_subsequent(&self) -> Option<usize> {
        if self.size == 0 {
            return None;
        }

        match (self.repeat_mode, self.shuffle_mode) {
            (RepeatMode::One, _) => Some(self.cursor.unwrap_or(0)),
            (_, ShuffleMode::On) => self.shuffle.peek_next(),
            (_, ShuffleMode::Off) => self.linear_subsequent(),
        }
    }

    /// Advance because the user asked
    ///
    /// Needs more than one track and a current track. Returns `None` and
    /// keeps the cursor when there is no next track.
    pub fn next(&mut self) -> Option<usize> {
        if self.size <= 1 || self.cursor.is_none() {
            return None;
        }

        let next = if self.is_shuffling() {
            self.next_shuffled()
        } else {
            self.peek_next()
        };

        if next.is_some() {
            self.cursor = next;
        }
        next
    }

    /// What [`next`](Self::next) would pick, without moving
    pub fn peek_next(&self) -> Option<usize> {
        let cursor = self.cursor.filter(|_| self.size > 1)?;

        if self.is_shuffling() {
            return self.shuffle.peek_next();
        }

        if cursor + 1 < self.size {
            Some(cursor + 1)
        } else if self.repeat_mode == RepeatMode::All {
            Some(0)
        } else {
            None
        }
    }

    /// Retreat because the user asked
    ///
    /// Needs more than one track and a current track. Returns `None` and
    /// keeps the cursor when there is no previous track.
    pub fn previous(&mut self) -> Option<usize> {
        if self.size <= 1 || self.cursor.is_none() {
            return None;
        }

        let previous = if self.is_shuffling() {
            self.shuffle.previous()
        } else {
            self.peek_previous()
        };

        if previous.is_some() {
            self.cursor = previous;
        }
        previous
    }

    /// What [`previous`](Self::previous) would pick, without moving
    pub fn peek_previous(&self) -> Option<usize> {
        let cursor = self.cursor.filter(|_| self.size > 1)?;

        if self.is_shuffling() {
            return self.shuffle.peek_previous();
        }

        if cursor > 0 {
            Some(cursor - 1)
        } else if self.repeat_mode == RepeatMode::All {
            Some(self.size - 1)
        } else {
            None
        }
    }

    /// Linear successor for automatic advance
    fn linear_subsequent(&self) -> Option<usize> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.size => Some(cursor + 1),
            // Nothing playing yet: start from the top
            None => Some(0),
            Some(_) if self.repeat_mode == RepeatMode::All => Some(0),
            Some(_) => None,
        }
    }

    /// Pull the next shuffled element, regenerating an exhausted
    /// permutation when repeating all
    fn next_shuffled(&mut self) -> Option<usize> {
        if self.shuffle.ended() && self.repeat_mode == RepeatMode::All {
            trace!(size = self.size, "Shuffle sequence exhausted, regenerating");
            let last = self.shuffle.current();
            self.shuffle.reshuffle(last);
        }

        self.shuffle.next()
    }
}

impl Default for PlaybackSequence {
    fn default() -> Self {
        Self::new(RepeatMode::Off, ShuffleMode::Off)
    }
}
