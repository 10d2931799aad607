//! This crate provides the core logic for a universal Turing machine
//! simulator: a sparse bidirectionally infinite tape, a deterministic
//! execution engine, and a loader for JSON machine descriptions.

pub mod loader;
pub mod machine;
pub mod tape;
pub mod types;

/// Re-exports the description loading functions from the loader module.
pub use loader::{load_description, load_description_from_str};
/// Re-exports the `Machine` execution engine from the machine module.
pub use machine::Machine;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the data model types from the types module.
pub use types::{
    Direction, MachineDescription, RunResult, Step, StepLimit, StopReason, Transition, UtmError,
    DEFAULT_BLANK_SYMBOL, DEFAULT_STEP_LIMIT,
};
