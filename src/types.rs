//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator: machine descriptions, transitions, step limits, run results, and error types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The default blank symbol used on the tape.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The default maximum number of steps to execute before forcing a stop.
pub const DEFAULT_STEP_LIMIT: u64 = 10_000;

/// A fully validated description of a deterministic single-tape Turing machine.
///
/// Produced by the loader and owned by a [`Machine`](crate::machine::Machine)
/// for the duration of one run; never mutated by simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineDescription {
    /// All states of the machine.
    pub states: Vec<String>,
    /// Symbols that may appear on the tape, not counting the blank.
    pub alphabet: Vec<char>,
    /// The blank symbol, implicitly held by every unwritten tape cell.
    pub blank: char,
    /// The transition table, keyed by the current state and the symbol under
    /// the head. A missing key is an undefined transition.
    pub transitions: HashMap<(String, char), Transition>,
    /// The state the machine starts in.
    pub start: String,
    /// The single terminal state; entering it ends the run unconditionally.
    pub halt: String,
}

impl MachineDescription {
    /// Looks up the transition for the given state and tape symbol.
    pub fn transition(&self, state: &str, symbol: char) -> Option<&Transition> {
        self.transitions.get(&(state.to_string(), symbol))
    }
}

/// The action half of a transition table entry: what to write, where to move,
/// and which state to enter next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The symbol written at the head before moving.
    pub write: char,
    /// The direction the head moves after writing.
    pub direction: Direction,
    /// The state the machine transitions to.
    pub next_state: String,
}

/// Represents the possible directions the tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

/// The step budget for a run: either a hard bound or the "no limit" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepLimit {
    /// Stop with [`StopReason::LimitExceeded`] once this many steps have executed.
    Bounded(u64),
    /// Run until the machine halts or gets stuck.
    Unlimited,
}

impl StepLimit {
    /// Whether `steps` has reached the budget. The boundary is inclusive:
    /// a bound of `n` permits exactly `n` executed steps.
    pub fn reached(&self, steps: u64) -> bool {
        match self {
            StepLimit::Bounded(limit) => steps >= *limit,
            StepLimit::Unlimited => false,
        }
    }
}

impl Default for StepLimit {
    fn default() -> Self {
        StepLimit::Bounded(DEFAULT_STEP_LIMIT)
    }
}

/// Why a run stopped. All three are ordinary outcomes of a successful
/// invocation of the engine, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The machine entered the halting state.
    Halted,
    /// The step budget was exhausted before halting.
    LimitExceeded,
    /// No transition is defined for the current state and symbol.
    Stuck,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Halted => write!(f, "halted"),
            StopReason::LimitExceeded => write!(f, "limit_exceeded"),
            StopReason::Stuck => write!(f, "stuck"),
        }
    }
}

/// The record a run produces: final tape contents over the occupied range,
/// the number of steps executed, and why the run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Tape contents between the lowest and highest occupied positions.
    pub tape: String,
    /// Number of transition applications executed.
    pub steps: u64,
    /// The termination reason.
    pub reason: StopReason,
}

/// The outcome of a single engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and can continue.
    Continue,
    /// The machine stopped for the given reason.
    Done(StopReason),
}

/// Errors that can occur while loading a machine description. Termination
/// reasons are not represented here; they travel inside [`RunResult`].
#[derive(Debug, Error)]
pub enum UtmError {
    /// The description file could not be read.
    #[error("file error: {0}")]
    FileError(String),
    /// The description is not well-formed JSON.
    #[error("description parse error: {0}")]
    ParseError(#[from] serde_json::Error),
    /// The description is well-formed but violates a structural rule.
    #[error("description validation error: {0}")]
    ValidationError(String),
}
