//! Credential record CLI.
//!
//! This binary delegates to `user_credentials::cli` for parsing and command
//! execution, keeping the CLI behaviour testable without spawning a process.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use user_credentials::CredentialSettings;
use user_credentials::cli::{self, CliError, ParseOutcome, USAGE};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool, CliError> {
    let invocation = match cli::parse_args(env::args().skip(1))? {
        ParseOutcome::Help => {
            write_stdout(USAGE);
            return Ok(true);
        }
        ParseOutcome::Command(invocation) => invocation,
    };

    let settings =
        CredentialSettings::load_with_overrides("user-credentials", invocation.global_salt())
            .map_err(|e| CliError::Config {
                message: e.to_string(),
            })?;
    let hasher = settings.hasher();

    let outcome = cli::execute(&invocation.command, &hasher)?;
    write_stdout(&cli::render(&outcome)?);
    Ok(outcome.is_success())
}

fn write_stdout(message: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{message}") {
        drop(err);
    }
}
