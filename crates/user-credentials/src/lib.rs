//! User identity records and salted, iterated password credentials.
//!
//! This crate models the two user representations an authentication layer
//! needs:
//!
//! - [`Identity`]: the public view of a user (username and admin flag), safe
//!   to serialize back to clients.
//! - [`Credential`]: the identity plus a password digest and per-user salt,
//!   for persistence only.
//!
//! Passwords are hashed with [`hash_password`]: SHA-512 over
//! `salt + password + global_salt`, re-applied to its own hex output for a
//! fixed total of [`HASH_ITERATIONS`] passes.
//!
//! # Example
//!
//! ```
//! use user_credentials::{Credential, Identity};
//!
//! let credential = Credential::create_new("alice", "correct-password", false);
//! assert!(credential.verify("alice", "correct-password"));
//!
//! let public: Identity = credential.into();
//! assert_eq!(public, Identity::new("alice", false));
//! ```

pub mod cli;
mod config;
mod credential;
mod error;
mod form;
mod hashing;
mod identity;
mod salt;

pub use config::CredentialSettings;
pub use credential::Credential;
pub use error::{CredentialError, FormValidationError, RecordValidationError};
pub use form::{LoginForm, PasswordForm};
pub use hashing::{DIGEST_HEX_LEN, HASH_ITERATIONS, PasswordDigest, PasswordHasher, hash_password};
pub use identity::Identity;
pub use salt::{SALT_BYTES, Salt};
