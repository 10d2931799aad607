use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use utm::{load_description, Machine, Step, StepLimit, StopReason, UtmError, DEFAULT_STEP_LIMIT};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Path to the machine description JSON file
    machine: PathBuf,

    /// Initial tape contents (string of symbols)
    #[clap(short, long, default_value = "")]
    tape: String,

    /// Maximum number of steps to execute
    #[clap(short, long, default_value_t = DEFAULT_STEP_LIMIT)]
    max_steps: u64,

    /// Run without a step limit
    #[clap(long, conflicts_with = "max_steps")]
    no_limit: bool,

    /// Print a step-by-step trace of the machine execution
    #[clap(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), UtmError> {
    let description = load_description(&cli.machine)?;
    let mut machine = Machine::new(description, &cli.tape);

    let limit = if cli.no_limit {
        StepLimit::Unlimited
    } else {
        StepLimit::Bounded(cli.max_steps)
    };

    let result = if cli.trace {
        trace(&mut machine, limit)
    } else {
        machine.run(limit)
    };

    println!("Reason: {}", result.reason);
    println!("Steps executed: {}", result.steps);
    println!("Final tape: {}", result.tape);

    Ok(())
}

/// Drives the machine one step at a time, printing its configuration before
/// every step. Snapshots are side-effect-free, so tracing cannot change the
/// outcome of the run.
fn trace(machine: &mut Machine, limit: StepLimit) -> utm::RunResult {
    loop {
        if machine.is_halted() {
            return machine.result(StopReason::Halted);
        }
        if limit.reached(machine.step_count()) {
            return machine.result(StopReason::LimitExceeded);
        }

        print_configuration(machine);
        match machine.step() {
            Step::Continue => {}
            Step::Done(reason) => return machine.result(reason),
        }
    }
}

fn print_configuration(machine: &Machine) {
    println!(
        "[step {}] state={} head={} read={} tape={}",
        machine.step_count(),
        machine.state(),
        machine.tape().head(),
        machine.tape().read(),
        machine.tape().snapshot()
    );
}
