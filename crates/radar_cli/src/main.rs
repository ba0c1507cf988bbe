//! runradar CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Structural error in the radar directory
//! - 5: Parse error in a spec or blip file

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use radar_publish::PublishError;
use radar_spec::{ErrorKind, RadarError};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const STRUCTURAL_ERROR: u8 = 4;
    pub const PARSE_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Render(args) => commands::render::execute(args, cli.quiet),
        Commands::Inspect(args) => commands::inspect::execute(args, cli.quiet),
        Commands::Publishers => commands::publishers::execute(),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,radar={level}")));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(radar) = cause.downcast_ref::<RadarError>() {
            return exit_code_for(radar);
        }
        match cause.downcast_ref::<PublishError>() {
            Some(PublishError::UnknownPublisher { .. }) => return ExitCodes::INVALID_ARGS,
            Some(_) => return ExitCodes::GENERAL_ERROR,
            None => {}
        }
    }
    ExitCodes::GENERAL_ERROR
}

fn exit_code_for(error: &RadarError) -> u8 {
    match error.kind() {
        ErrorKind::Validation => ExitCodes::VALIDATION_FAILURE,
        ErrorKind::Structural => ExitCodes::STRUCTURAL_ERROR,
        ErrorKind::Parse => ExitCodes::PARSE_ERROR,
        ErrorKind::Io => ExitCodes::GENERAL_ERROR,
    }
}
