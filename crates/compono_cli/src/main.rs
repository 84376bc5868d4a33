//! compono CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or configuration
//! - 3: Input error
//! - 4: Decode error
//! - 5: Diagram error

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use compono_diagram::DiagramError;
use compono_input::InputError;

mod args;
mod config;
mod render;

use args::Cli;
use config::{Config, ConfigError, Settings};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const INPUT_ERROR: u8 = 3;
    pub const DECODE_ERROR: u8 = 4;
    pub const DIAGRAM_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(dot) => {
            println!("{}", dot);
            ExitCode::from(ExitCodes::SUCCESS)
        }
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = Config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, config);
    debug!("Resolved settings: {:?}", settings);

    render::render(&settings)
}

/// Logs go to stderr so stdout carries nothing but the diagram.
fn init_logging(cli: &Cli) {
    let default_filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "compono=debug,warn"
    } else {
        "compono=info,warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(err) = cause.downcast_ref::<InputError>() {
            return match err {
                InputError::Decode(_) => ExitCodes::DECODE_ERROR,
                _ => ExitCodes::INPUT_ERROR,
            };
        }
        if cause.downcast_ref::<DiagramError>().is_some() {
            return ExitCodes::DIAGRAM_ERROR;
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return ExitCodes::INVALID_ARGS;
        }
    }

    ExitCodes::GENERAL_ERROR
}
