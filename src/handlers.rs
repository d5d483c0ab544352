//! Command handler: runs the pipeline and turns its outcome into messages
//! and an exit status.

use crate::combiner::{self, RunOutcome};
use crate::config::RunConfig;
use crate::error::{CombineError, Result};
use crate::Cli;
use colored::Colorize;
use std::process::ExitCode;
use tracing::debug;

/// Exit status for every terminal error.
pub const EXIT_FAILURE: u8 = 1;

/// Handle a normal invocation.
pub fn run_combine(cli: &Cli) -> ExitCode {
    let result = RunConfig::from_cli(cli).and_then(|config| {
        let outcome = combiner::run(&config);
        report_outcome(&config, &outcome);
        outcome
    });

    ExitCode::from(exit_status(&result))
}

/// Print the user-facing line for a finished run.
fn report_outcome(config: &RunConfig, outcome: &Result<RunOutcome>) {
    match outcome {
        Ok(RunOutcome::NoFiles) => {
            println!(
                "No {} files found (excluding output file, executable, venv, and excluded patterns) in: {}",
                config.extension,
                config.root.display()
            );
        }
        Ok(RunOutcome::Combined(summary)) => {
            println!(
                "{} {} {} files into:\n{}",
                "Successfully combined".green(),
                summary.files_combined,
                config.extension,
                summary.output.display()
            );
        }
        Err(_) => {}
    }
}

/// Map a run result onto the process exit status, reporting any error.
pub fn exit_status(result: &Result<RunOutcome>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            report_error(e);
            EXIT_FAILURE
        }
    }
}

fn report_error(err: &CombineError) {
    debug!(error = ?err, config = err.is_config_error(), "Run failed");
    eprintln!("{} {}", "Error:".red().bold(), err);
}
