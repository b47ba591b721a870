//! Error types for the user-credentials crate.
//!
//! Verification never produces an error: a mismatch is reported as `false`
//! and nothing else. The enums here cover the remaining failure paths, namely
//! entropy exhaustion while minting a salt, malformed stored records, and
//! invalid inbound form values.

use thiserror::Error;

/// Errors raised while creating a new credential record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The operating-system randomness source could not supply salt bytes.
    #[error("system randomness source unavailable: {message}")]
    EntropyUnavailable {
        /// Description of the underlying failure.
        message: String,
    },
}

/// Errors raised while rebuilding a credential record from stored fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordValidationError {
    /// The stored digest is not 128 lowercase hexadecimal characters.
    #[error("password hash must be {expected} lowercase hex characters")]
    MalformedPasswordHash {
        /// Required digest length in characters.
        expected: usize,
    },

    /// The stored salt is empty.
    #[error("salt must not be empty")]
    EmptySalt,

    /// The stored salt contains characters outside the URL-safe alphabet.
    #[error("salt may only contain URL-safe base64 characters")]
    InvalidSaltCharacters,
}

/// Errors raised when inbound login form values are unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,

    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}
