//! Shuffle sequence
//!
//! A precomputed random permutation of the scope's indices, plus a cursor
//! into that permutation. The cursor indexes the permutation, not the
//! scope: `permutation[cursor]` is the scope index of the current track.
//!
//! Example: for a scope of 10 tracks the permutation might be
//! `[7, 9, 2, 4, 8, 6, 3, 0, 1, 5]`.

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use tracing::trace;

/// Random permutation of `0..size` with a cursor
#[derive(Debug, Clone, Default)]
pub struct ShuffleSequence {
    permutation: Vec<usize>,

    /// Position within `permutation`; `None` before the first element
    cursor: Option<usize>,
}

impl ShuffleSequence {
    /// Build a freshly shuffled sequence that has not started yet
    pub fn new(size: usize) -> Self {
        let mut sequence = Self::default();
        sequence.resize(size, None);
        sequence
    }

    /// Rebuild the permutation for a new size
    ///
    /// With `pinned_first` inside `0..size`, that value is swapped to the
    /// front and treated as already consumed, so the next call to
    /// [`next`](Self::next) yields the second element.
    pub fn resize(&mut self, size: usize, pinned_first: Option<usize>) {
        if size == 0 {
            self.clear();
            return;
        }

        self.permutation = (0..size).collect();
        self.permutation.shuffle(&mut thread_rng());
        self.cursor = None;

        if let Some(pinned) = pinned_first.filter(|&value| value < size) {
            if let Some(position) = self.permutation.iter().position(|&v| v == pinned) {
                self.permutation.swap(0, position);
            }
            self.cursor = Some(0);
        }

        trace!(size, ?pinned_first, "Reshuffled sequence");
    }

    /// Regenerate the permutation at the same size, not started
    ///
    /// When `dont_start_with` would come out first, it is swapped somewhere
    /// into the second half so the same track doesn't play twice in a row.
    pub fn reshuffle(&mut self, dont_start_with: Option<usize>) {
        let size = self.permutation.len();
        self.resize(size, None);

        if size > 1 && self.permutation.first().copied() == dont_start_with {
            let half = (size / 2).max(1);
            let swap_with = thread_rng().gen_range(half..size);
            self.permutation.swap(0, swap_with);
        }
    }

    /// Empty the permutation and reset the cursor
    pub fn clear(&mut self) {
        self.permutation.clear();
        self.cursor = None;
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    /// Whether the sequence has no elements
    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    /// The full permutation
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Position of the cursor within the permutation
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Element under the cursor
    pub fn current(&self) -> Option<usize> {
        self.cursor.map(|c| self.permutation[c])
    }

    /// Advance the cursor and return the element there
    ///
    /// Returns `None` (leaving the cursor alone) at the end.
    pub fn next(&mut self) -> Option<usize> {
        let position = self.next_position()?;
        self.cursor = Some(position);
        Some(self.permutation[position])
    }

    /// Retreat the cursor and return the element there
    ///
    /// Returns `None` (leaving the cursor alone) at the start.
    pub fn previous(&mut self) -> Option<usize> {
        let position = self.previous_position()?;
        self.cursor = Some(position);
        Some(self.permutation[position])
    }

    /// Element [`next`](Self::next) would return
    pub fn peek_next(&self) -> Option<usize> {
        self.next_position().map(|position| self.permutation[position])
    }

    /// Element [`previous`](Self::previous) would return
    pub fn peek_previous(&self) -> Option<usize> {
        self.previous_position().map(|position| self.permutation[position])
    }

    /// Whether the cursor is on the last element
    pub fn ended(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 == self.permutation.len())
    }

    /// Whether the cursor is on, or before, the first element
    pub fn started(&self) -> bool {
        self.cursor.unwrap_or(0) == 0
    }

    fn next_position(&self) -> Option<usize> {
        let position = self.cursor.map_or(0, |cursor| cursor + 1);
        (position < self.permutation.len()).then_some(position)
    }

    fn previous_position(&self) -> Option<usize> {
        self.cursor.and_then(|cursor| cursor.checked_sub(1))
    }
}
