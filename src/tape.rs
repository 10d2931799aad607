//! This module defines the `Tape` struct: unbounded bidirectional storage with
//! implicit blank-filling and head tracking.
//!
//! Storage is a sparse map from position to symbol. Any position absent from
//! the map holds the blank symbol, so the tape never needs to be grown or
//! shifted as the head wanders; positions are plain signed integers and may go
//! arbitrarily negative.

use crate::types::Direction;
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// A single-head, bidirectionally infinite tape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: HashMap<i64, char>,
    head: i64,
    blank: char,
}

impl Tape {
    /// Creates a tape from the given input, written left-aligned from
    /// position 0, with the head at position 0.
    ///
    /// Input characters equal to `blank` stay implicit rather than being
    /// stored, so the map only ever holds non-blank symbols.
    pub fn new(input: &str, blank: char) -> Self {
        let cells = input
            .chars()
            .enumerate()
            .filter(|&(_, c)| c != blank)
            .map(|(i, c)| (i as i64, c))
            .collect();

        Self {
            cells,
            head: 0,
            blank,
        }
    }

    /// Returns the symbol at the head, or the blank symbol for an unwritten
    /// cell. Always succeeds.
    pub fn read(&self) -> char {
        self.cells.get(&self.head).copied().unwrap_or(self.blank)
    }

    /// Writes `symbol` at the head, overwriting any prior value. Writing the
    /// blank symbol removes the entry to keep storage sparse; reads cannot
    /// tell the difference.
    pub fn write(&mut self, symbol: char) {
        if symbol == self.blank {
            self.cells.remove(&self.head);
        } else {
            self.cells.insert(self.head, symbol);
        }
    }

    /// Moves the head one position in the given direction. No bounds exist.
    pub fn shift(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.head -= 1,
            Direction::Right => self.head += 1,
            Direction::Stay => {}
        }
    }

    /// Renders the tape between the lowest and highest occupied positions,
    /// substituting the blank symbol for gaps. Returns an empty string when
    /// no cell is occupied. Side-effect-free and deterministic, so it can be
    /// called repeatedly, including mid-run for tracing.
    pub fn snapshot(&self) -> String {
        match self.occupied_range() {
            Some(range) => self.snapshot_range(range),
            None => String::new(),
        }
    }

    /// Renders the tape over a caller-chosen range of positions.
    pub fn snapshot_range(&self, range: RangeInclusive<i64>) -> String {
        range
            .map(|pos| self.cells.get(&pos).copied().unwrap_or(self.blank))
            .collect()
    }

    /// Returns the span of occupied positions, or `None` for an all-blank tape.
    pub fn occupied_range(&self) -> Option<RangeInclusive<i64>> {
        let min = self.cells.keys().min()?;
        let max = self.cells.keys().max()?;
        Some(*min..=*max)
    }

    /// Returns the current head position.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// Returns the blank symbol of this tape.
    pub fn blank(&self) -> char {
        self.blank
    }
}
