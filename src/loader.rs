//! This module loads machine descriptions from their JSON format and
//! validates them before any engine is constructed, so the execution engine
//! can assume its preconditions hold.
//!
//! The format defines the following keys:
//!
//! * `states`: list of all states (strings)
//! * `alphabet`: list of symbols that may appear on the tape
//! * `blank`: the symbol representing a blank cell
//! * `transitions`: mapping from `"state:symbol"` to
//!   `[next_state, write_symbol, move_direction]`, with moves `L`, `R`, `S`
//! * `start`: the initial state
//! * `halt`: the halting state

use crate::types::{Direction, MachineDescription, Transition, UtmError};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// The machine description exactly as it appears on disk, before symbol and
/// direction fields are narrowed to their typed forms.
#[derive(Debug, Deserialize)]
struct RawDescription {
    states: Vec<String>,
    alphabet: Vec<String>,
    blank: String,
    transitions: HashMap<String, (String, String, String)>,
    start: String,
    halt: String,
}

/// Loads and validates a machine description from the given JSON file.
///
/// # Returns
///
/// * `Ok(MachineDescription)` if the file is read, parsed, and validated.
/// * `Err(UtmError::FileError)` if the file cannot be read.
/// * `Err(UtmError::ParseError)` if the content is not valid JSON.
/// * `Err(UtmError::ValidationError)` if the description is inconsistent.
pub fn load_description(path: &Path) -> Result<MachineDescription, UtmError> {
    let content = fs::read_to_string(path).map_err(|e| {
        UtmError::FileError(format!("failed to read file {}: {}", path.display(), e))
    })?;

    load_description_from_str(&content)
}

/// Loads and validates a machine description from a JSON string.
pub fn load_description_from_str(content: &str) -> Result<MachineDescription, UtmError> {
    let raw: RawDescription = serde_json::from_str(content)?;
    let description = convert(raw)?;

    validate(&description)?;

    Ok(description)
}

/// Narrows the raw description into typed form: symbols become single
/// characters, transition keys are split into (state, symbol), and move
/// strings become [`Direction`] variants.
fn convert(raw: RawDescription) -> Result<MachineDescription, UtmError> {
    let blank = parse_symbol(&raw.blank, "blank")?;
    let alphabet = raw
        .alphabet
        .iter()
        .map(|s| parse_symbol(s, "alphabet"))
        .collect::<Result<Vec<char>, UtmError>>()?;

    let mut transitions = HashMap::new();
    for (key, (next_state, write, direction)) in raw.transitions {
        let (state, symbol) = split_key(&key)?;
        let transition = Transition {
            write: parse_symbol(&write, &format!("transition '{}' write symbol", key))?,
            direction: parse_direction(&direction, &key)?,
            next_state,
        };

        transitions.insert((state, symbol), transition);
    }

    Ok(MachineDescription {
        states: raw.states,
        alphabet,
        blank,
        transitions,
        start: raw.start,
        halt: raw.halt,
    })
}

/// Splits a `"state:symbol"` transition key at its last colon.
fn split_key(key: &str) -> Result<(String, char), UtmError> {
    let (state, symbol) = key.rsplit_once(':').ok_or_else(|| {
        UtmError::ValidationError(format!(
            "transition key '{}' is not of the form 'state:symbol'",
            key
        ))
    })?;

    let symbol = parse_symbol(symbol, &format!("transition key '{}'", key))?;
    Ok((state.to_string(), symbol))
}

fn parse_symbol(value: &str, context: &str) -> Result<char, UtmError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(UtmError::ValidationError(format!(
            "{}: symbol '{}' must be exactly one character",
            context, value
        ))),
    }
}

fn parse_direction(value: &str, key: &str) -> Result<Direction, UtmError> {
    match value {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        "S" => Ok(Direction::Stay),
        _ => Err(UtmError::ValidationError(format!(
            "transition '{}': unknown move direction '{}' (expected L, R, or S)",
            key, value
        ))),
    }
}

/// Runs every structural check against the converted description. This is
/// the loader's side of the engine contract: the engine never re-validates.
fn validate(description: &MachineDescription) -> Result<(), UtmError> {
    [
        check_start_and_halt_states,
        check_transition_states,
        check_transition_symbols,
    ]
    .iter()
    .try_for_each(|check| check(description))
}

fn check_start_and_halt_states(description: &MachineDescription) -> Result<(), UtmError> {
    for (label, state) in [("start", &description.start), ("halt", &description.halt)] {
        if !description.states.contains(state) {
            return Err(UtmError::ValidationError(format!(
                "{} state '{}' is not in the state set",
                label, state
            )));
        }
    }

    Ok(())
}

fn check_transition_states(description: &MachineDescription) -> Result<(), UtmError> {
    let states: HashSet<&String> = description.states.iter().collect();

    for ((state, symbol), transition) in &description.transitions {
        if !states.contains(state) {
            return Err(UtmError::ValidationError(format!(
                "transition '{}:{}' references undefined state '{}'",
                state, symbol, state
            )));
        }
        if !states.contains(&transition.next_state) {
            return Err(UtmError::ValidationError(format!(
                "transition '{}:{}' references undefined next state '{}'",
                state, symbol, transition.next_state
            )));
        }
    }

    Ok(())
}

fn check_transition_symbols(description: &MachineDescription) -> Result<(), UtmError> {
    for ((state, symbol), transition) in &description.transitions {
        for (label, s) in [("read", *symbol), ("write", transition.write)] {
            if s != description.blank && !description.alphabet.contains(&s) {
                return Err(UtmError::ValidationError(format!(
                    "transition '{}:{}': {} symbol '{}' is not in the alphabet",
                    state, symbol, label, s
                )));
            }
        }
    }

    Ok(())
}
