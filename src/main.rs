use clap::Parser;
use combine_files::{Cli, handlers::run_combine, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    run_combine(&cli)
}
