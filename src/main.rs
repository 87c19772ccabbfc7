//! Testament CLI - Main entry point
//!
//! Parses the command line, installs logging and dispatches the requested
//! command. Every taxonomy error is intercepted here and turned into a
//! message, remediation text and a fixed process exit code.

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use tracing::{debug, error};

use testament::cli::{Cli, Commands};
use testament::{exit_code, logging, runner};

fn main() {
    // Usage errors from the CLI framework exit with the runtime code;
    // help and version output are not errors.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_code::SUCCESS,
                _ => exit_code::RUNTIME_ERROR,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    logging::init(cli.verbose);
    debug!("CLI arguments parsed");

    let result = match cli.command {
        Commands::Run { path } => runner::run_from_file(&path),
    };

    if let Err(err) = result {
        debug!("{err:?}");
        error!("{}", err.message());
        eprintln!("{}", err.help_text().yellow());
        std::process::exit(err.exit_code());
    }
}
