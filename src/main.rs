//! Pathscope - step-by-step traces of graph searches
//!
//! Loads a graph document, runs one of the engine's algorithms and prints
//! every event it emits, one per line.

mod cli;
mod commands;
mod document;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use pathscope_core::error::PathscopeError;
use pathscope_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Help, version and plain-text errors are clap's to print
        Err(err) if !wants_json(env::args().skip(1)) || is_informational(&err) => err.exit(),
        Err(err) => return fail(&parse_error(&err), OutputFormat::Json, false),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e, cli.format, cli.quiet),
    }
}

/// Report `error` on stderr and turn it into the process exit code
fn fail(error: &PathscopeError, format: OutputFormat, quiet: bool) -> ExitCode {
    match format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if !quiet => eprintln!("error: {error}"),
        OutputFormat::Human => {}
    }
    ExitCode::from(error.exit_code() as u8)
}

fn is_informational(err: &clap::Error) -> bool {
    matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

fn parse_error(err: &clap::Error) -> PathscopeError {
    match err.kind() {
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::MissingSubcommand
        | ErrorKind::ArgumentConflict => PathscopeError::usage(err.to_string()),
        _ => PathscopeError::Other(err.to_string()),
    }
}

/// `--format` is global, but clap can fail before it is parsed, so look at
/// the raw arguments.
fn wants_json(mut args: impl Iterator<Item = String>) -> bool {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format=json" => return true,
            "--format" if args.next().as_deref() == Some("json") => return true,
            _ => {}
        }
    }
    false
}
