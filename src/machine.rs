//! This module defines the `Machine` struct, the execution engine that drives
//! the deterministic step loop: read the symbol under the head, look up the
//! transition, write, move, change state, and detect termination.

use crate::tape::Tape;
use crate::types::{MachineDescription, RunResult, Step, StepLimit, StopReason};

/// A deterministic single-tape Turing machine mid-execution.
///
/// Owns its [`MachineDescription`] and [`Tape`] exclusively for the duration
/// of a run; independent machines share nothing and may run in parallel.
pub struct Machine {
    description: MachineDescription,
    input: String,
    tape: Tape,
    state: String,
    step_count: u64,
}

impl Machine {
    /// Creates a machine in its start state, with `input` loaded left-aligned
    /// onto a fresh tape and the head at position 0.
    pub fn new(description: MachineDescription, input: &str) -> Self {
        let tape = Tape::new(input, description.blank);
        let state = description.start.clone();

        Self {
            description,
            input: input.to_string(),
            tape,
            state,
            step_count: 0,
        }
    }

    /// Resets the machine to its initial configuration: start state, freshly
    /// loaded input tape, zero steps executed.
    pub fn reset(&mut self) {
        self.tape = Tape::new(&self.input, self.description.blank);
        self.state = self.description.start.clone();
        self.step_count = 0;
    }

    /// Executes a single step.
    ///
    /// A step reads the symbol under the head, looks up the transition for
    /// the current state and symbol, writes the new symbol, moves the head
    /// (always in that order), and enters the next state. The halting check
    /// happens after the transition completes, so the write and move of the
    /// final transition into the halting state still take effect.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if the machine performed a step and can keep going.
    /// * `Step::Done(StopReason::Halted)` once the halting state is entered
    ///   (including when the machine is already there; no step is taken).
    /// * `Step::Done(StopReason::Stuck)` if no transition is defined for the
    ///   current state and symbol; the tape and step count are left untouched.
    pub fn step(&mut self) -> Step {
        if self.is_halted() {
            return Step::Done(StopReason::Halted);
        }

        let symbol = self.tape.read();
        let transition = match self.description.transition(&self.state, symbol) {
            Some(t) => t.clone(),
            None => return Step::Done(StopReason::Stuck),
        };

        self.tape.write(transition.write);
        self.tape.shift(transition.direction);
        self.state = transition.next_state;
        self.step_count += 1;

        if self.is_halted() {
            Step::Done(StopReason::Halted)
        } else {
            Step::Continue
        }
    }

    /// Runs the machine until it halts, gets stuck, or exhausts `limit`,
    /// and assembles the [`RunResult`].
    ///
    /// The limit boundary is inclusive: the run stops the moment the step
    /// count equals the bound. The budget is checked before the loop as well,
    /// so a zero limit on a non-halted machine reports `LimitExceeded`
    /// without executing a single step.
    pub fn run(&mut self, limit: StepLimit) -> RunResult {
        if self.is_halted() {
            return self.result(StopReason::Halted);
        }
        if limit.reached(self.step_count) {
            return self.result(StopReason::LimitExceeded);
        }

        loop {
            match self.step() {
                Step::Done(reason) => return self.result(reason),
                Step::Continue => {
                    if limit.reached(self.step_count) {
                        return self.result(StopReason::LimitExceeded);
                    }
                }
            }
        }
    }

    /// Packages the current tape snapshot, step count, and `reason` as a
    /// [`RunResult`]. Side-effect-free, so it can be called repeatedly on a
    /// terminated machine with identical results.
    pub fn result(&self, reason: StopReason) -> RunResult {
        RunResult {
            tape: self.tape.snapshot(),
            steps: self.step_count,
            reason,
        }
    }

    /// Whether the machine is in its halting state.
    pub fn is_halted(&self) -> bool {
        self.state == self.description.halt
    }

    /// Returns the current state label.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the number of steps executed so far.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Returns the tape, for snapshots and head inspection.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the machine description this engine is executing.
    pub fn description(&self) -> &MachineDescription {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Transition, DEFAULT_BLANK_SYMBOL};
    use std::collections::HashMap;

    fn transition(write: char, direction: Direction, next_state: &str) -> Transition {
        Transition {
            write,
            direction,
            next_state: next_state.to_string(),
        }
    }

    fn description(
        transitions: Vec<(&str, char, Transition)>,
        start: &str,
        halt: &str,
    ) -> MachineDescription {
        let mut states: Vec<String> = transitions
            .iter()
            .map(|(state, _, _)| state.to_string())
            .chain(transitions.iter().map(|(_, _, t)| t.next_state.clone()))
            .collect();
        states.push(start.to_string());
        states.push(halt.to_string());
        states.sort();
        states.dedup();

        let table: HashMap<(String, char), Transition> = transitions
            .into_iter()
            .map(|(state, symbol, t)| ((state.to_string(), symbol), t))
            .collect();

        MachineDescription {
            states,
            alphabet: vec!['0', '1'],
            blank: DEFAULT_BLANK_SYMBOL,
            transitions: table,
            start: start.to_string(),
            halt: halt.to_string(),
        }
    }

    /// Binary increment-by-one: scan right to the end of the input, then
    /// propagate the carry leftwards.
    fn incrementer() -> MachineDescription {
        description(
            vec![
                ("scan", '0', transition('0', Direction::Right, "scan")),
                ("scan", '1', transition('1', Direction::Right, "scan")),
                ("scan", '_', transition('_', Direction::Left, "carry")),
                ("carry", '1', transition('0', Direction::Left, "carry")),
                ("carry", '0', transition('1', Direction::Stay, "done")),
                ("carry", '_', transition('1', Direction::Stay, "done")),
            ],
            "scan",
            "done",
        )
    }

    #[test]
    fn test_binary_incrementer_halts_with_incremented_tape() {
        let mut machine = Machine::new(incrementer(), "1101");
        let result = machine.run(StepLimit::Bounded(20));

        assert_eq!(result.reason, StopReason::Halted);
        assert_eq!(result.tape, "1110");
        assert!(result.steps <= 20);
    }

    #[test]
    fn test_incrementer_carries_past_the_left_edge() {
        let mut machine = Machine::new(incrementer(), "111");
        let result = machine.run(StepLimit::default());

        assert_eq!(result.reason, StopReason::Halted);
        // 111 + 1 = 1000; the leading 1 lands at position -1.
        assert_eq!(result.tape, "1000");
    }

    #[test]
    fn test_start_state_equal_to_halt_state() {
        let machine_description = description(vec![], "done", "done");
        let mut machine = Machine::new(machine_description, "1101");
        let result = machine.run(StepLimit::default());

        assert_eq!(result.reason, StopReason::Halted);
        assert_eq!(result.steps, 0);
        assert_eq!(result.tape, "1101");
    }

    #[test]
    fn test_zero_step_limit_stops_before_the_first_step() {
        let mut machine = Machine::new(incrementer(), "1101");
        let result = machine.run(StepLimit::Bounded(0));

        assert_eq!(result.reason, StopReason::LimitExceeded);
        assert_eq!(result.steps, 0);
        assert_eq!(result.tape, "1101");
    }

    #[test]
    fn test_zero_step_limit_on_an_already_halted_machine() {
        let machine_description = description(vec![], "done", "done");
        let mut machine = Machine::new(machine_description, "1101");
        let result = machine.run(StepLimit::Bounded(0));

        assert_eq!(result.reason, StopReason::Halted);
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn test_step_count_never_exceeds_the_limit() {
        // The scan state loops right forever over blanks, so only the limit
        // can stop it.
        let looper = description(
            vec![("scan", '_', transition('_', Direction::Right, "scan"))],
            "scan",
            "done",
        );
        let mut machine = Machine::new(looper, "");
        let result = machine.run(StepLimit::Bounded(7));

        assert_eq!(result.reason, StopReason::LimitExceeded);
        assert_eq!(result.steps, 7);
    }

    #[test]
    fn test_undefined_transition_reports_stuck() {
        // No entry for (q0, 'a'): the machine is stuck before its first step.
        let machine_description = description(
            vec![("q0", 'b', transition('b', Direction::Right, "done"))],
            "q0",
            "done",
        );
        let mut machine = Machine::new(machine_description, "a");
        let result = machine.run(StepLimit::default());

        assert_eq!(result.reason, StopReason::Stuck);
        assert_eq!(result.steps, 0);
        assert_eq!(result.tape, "a");
    }

    #[test]
    fn test_stuck_mid_run_keeps_completed_steps() {
        let machine_description = description(
            vec![("q0", '1', transition('0', Direction::Right, "q1"))],
            "q0",
            "done",
        );
        let mut machine = Machine::new(machine_description, "11");
        let result = machine.run(StepLimit::default());

        // One step executed, then (q1, '1') has no entry.
        assert_eq!(result.reason, StopReason::Stuck);
        assert_eq!(result.steps, 1);
        assert_eq!(result.tape, "01");
        assert_eq!(machine.state(), "q1");
    }

    #[test]
    fn test_final_transition_into_halt_still_writes_and_moves() {
        let machine_description = description(
            vec![("q0", '1', transition('0', Direction::Right, "done"))],
            "q0",
            "done",
        );
        let mut machine = Machine::new(machine_description, "1");
        let result = machine.run(StepLimit::default());

        assert_eq!(result.reason, StopReason::Halted);
        assert_eq!(result.steps, 1);
        assert_eq!(result.tape, "0");
        assert_eq!(machine.tape().head(), 1);
    }

    #[test]
    fn test_parity_machine_marks_even_and_odd_inputs() {
        // Flips between even/odd per '1' scanned, then writes an output
        // symbol encoding the parity and enters the single halting state.
        let parity = || {
            description(
                vec![
                    ("even", '1', transition('1', Direction::Right, "odd")),
                    ("odd", '1', transition('1', Direction::Right, "even")),
                    ("even", '_', transition('E', Direction::Stay, "done")),
                    ("odd", '_', transition('O', Direction::Stay, "done")),
                ],
                "even",
                "done",
            )
        };

        let mut machine = Machine::new(parity(), "1111");
        let result = machine.run(StepLimit::default());
        assert_eq!(result.reason, StopReason::Halted);
        assert_eq!(result.tape, "1111E");

        let mut machine = Machine::new(parity(), "111");
        let result = machine.run(StepLimit::default());
        assert_eq!(result.reason, StopReason::Halted);
        assert_eq!(result.tape, "111O");
    }

    #[test]
    fn test_single_stepping_matches_run() {
        let mut stepped = Machine::new(incrementer(), "1101");
        let mut ran = Machine::new(incrementer(), "1101");

        let mut previous = stepped.step_count();
        let reason = loop {
            match stepped.step() {
                Step::Continue => {
                    // Step count grows by exactly one per iteration.
                    assert_eq!(stepped.step_count(), previous + 1);
                    previous = stepped.step_count();
                }
                Step::Done(reason) => break reason,
            }
        };

        let result = ran.run(StepLimit::default());
        assert_eq!(reason, result.reason);
        assert_eq!(stepped.result(reason), result);
    }

    #[test]
    fn test_step_on_a_halted_machine_is_a_no_op() {
        let machine_description = description(vec![], "done", "done");
        let mut machine = Machine::new(machine_description, "1");

        assert_eq!(machine.step(), Step::Done(StopReason::Halted));
        assert_eq!(machine.step(), Step::Done(StopReason::Halted));
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_result_is_idempotent_after_termination() {
        let mut machine = Machine::new(incrementer(), "1101");
        let result = machine.run(StepLimit::default());

        let again = machine.result(result.reason);
        assert_eq!(result, again);
        assert_eq!(machine.result(result.reason), again);
    }

    #[test]
    fn test_reset_restores_the_initial_configuration() {
        let mut machine = Machine::new(incrementer(), "1101");
        let first = machine.run(StepLimit::default());
        assert_eq!(first.reason, StopReason::Halted);

        machine.reset();
        assert_eq!(machine.state(), "scan");
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.tape().snapshot(), "1101");

        let second = machine.run(StepLimit::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_on_a_terminated_machine_reports_halted_again() {
        let mut machine = Machine::new(incrementer(), "1101");
        let first = machine.run(StepLimit::default());
        let second = machine.run(StepLimit::default());

        assert_eq!(first, second);
    }
}
