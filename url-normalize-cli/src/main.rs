use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logging;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging(cli.verbose) {
        eprintln!("url-normalize: failed to initialize logging: {err:#}");
    }

    match cli::run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("url-normalize error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
