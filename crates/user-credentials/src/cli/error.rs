//! Error types for the credentials CLI.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::{CredentialError, FormValidationError};

/// Errors surfaced by the CLI parsing and execution flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// No command was supplied.
    #[error("missing command; expected one of: new, verify, identity")]
    MissingCommand,
    /// The command word was not recognized.
    #[error("unknown command: {value}")]
    UnknownCommand {
        /// Command word supplied by the caller.
        value: String,
    },
    /// A required flag was not supplied.
    #[error("missing required flag: {flag}")]
    MissingFlag {
        /// Flag that was required.
        flag: &'static str,
    },
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported argument was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognized.
        value: String,
    },
    /// The username or password was unusable.
    #[error("invalid credentials input: {source}")]
    InvalidForm {
        /// Underlying validation error.
        #[from]
        #[source]
        source: FormValidationError,
    },
    /// The stored record file could not be read.
    #[error("failed to read credential record at '{path}': {message}")]
    RecordRead {
        /// Path to the record file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },
    /// The stored record is malformed or outside the schema.
    #[error("invalid credential record: {message}")]
    RecordParse {
        /// Description of the parse error.
        message: String,
    },
    /// A new credential could not be created.
    #[error("credential creation failed: {source}")]
    Creation {
        /// Underlying creation error.
        #[from]
        #[source]
        source: CredentialError,
    },
    /// Settings could not be loaded.
    #[error("failed to load settings: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
    /// Output could not be rendered.
    #[error("failed to render output: {message}")]
    Render {
        /// Description of the serialization error.
        message: String,
    },
}
