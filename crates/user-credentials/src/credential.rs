//! Credential record: an identity plus its password digest and salt.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{CredentialError, RecordValidationError};
use crate::form::PasswordForm;
use crate::hashing::{PasswordDigest, PasswordHasher, constant_time_eq};
use crate::identity::Identity;
use crate::salt::Salt;

/// Stored credentials for one user.
///
/// Built once at registration by [`Credential::create_new`] and never
/// mutated. Rotating a password means building a new record, which also
/// draws a new salt.
///
/// The serialized form exists for persistence only and must never be sent to
/// clients; project to [`Identity`] for that.
///
/// ## Invariants
/// - `password_hash` is the digest of the original plaintext with `salt`.
/// - The plaintext password is never stored.
///
/// # Examples
/// ```
/// use user_credentials::Credential;
///
/// let credential = Credential::create_new("alice", "correct-password", false);
///
/// assert_eq!(credential.username(), "alice");
/// assert!(credential.verify("alice", "correct-password"));
/// assert!(!credential.verify("alice", "wrong"));
/// assert!(!credential.verify("bob", "correct-password"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CredentialDto", into = "CredentialDto")]
pub struct Credential {
    identity: Identity,
    password_hash: PasswordDigest,
    salt: Salt,
}

impl Credential {
    /// Register a new credential, panicking if the OS cannot supply entropy.
    ///
    /// Prefer [`Credential::try_create_new`] where the caller can report the
    /// failure instead.
    ///
    /// # Panics
    ///
    /// Panics when the system randomness source is unavailable.
    pub fn create_new(username: impl Into<String>, password: &str, is_admin: bool) -> Self {
        Self::create_new_with(&PasswordHasher::default(), username, password, is_admin)
    }

    /// Register a new credential hashed with a configured global salt.
    ///
    /// # Panics
    ///
    /// Panics when the system randomness source is unavailable.
    pub fn create_new_with(
        hasher: &PasswordHasher,
        username: impl Into<String>,
        password: &str,
        is_admin: bool,
    ) -> Self {
        match Self::try_create_new_with(hasher, username, password, is_admin) {
            Ok(credential) => credential,
            Err(err) => {
                error!(error = %err, "cannot mint credential salt");
                panic!("credential creation requires system entropy: {err}")
            }
        }
    }

    /// Fallible variant of [`Credential::create_new`].
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::EntropyUnavailable`] when no salt can be
    /// generated.
    pub fn try_create_new(
        username: impl Into<String>,
        password: &str,
        is_admin: bool,
    ) -> Result<Self, CredentialError> {
        Self::try_create_new_with(&PasswordHasher::default(), username, password, is_admin)
    }

    /// Fallible variant of [`Credential::create_new_with`].
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::EntropyUnavailable`] when no salt can be
    /// generated.
    pub fn try_create_new_with(
        hasher: &PasswordHasher,
        username: impl Into<String>,
        password: &str,
        is_admin: bool,
    ) -> Result<Self, CredentialError> {
        let salt = Salt::generate()?;
        let password_hash = hasher.hash(password, salt.as_str());
        let identity = Identity::new(username, is_admin);
        debug!(
            username = identity.username(),
            is_admin,
            global_salt = hasher.has_global_salt(),
            "credential created"
        );

        Ok(Self {
            identity,
            password_hash,
            salt,
        })
    }

    /// Register a new credential from a request-form collaborator.
    ///
    /// # Panics
    ///
    /// Panics when the system randomness source is unavailable.
    pub fn from_form(form: &impl PasswordForm, is_admin: bool) -> Self {
        Self::create_new(form.username(), form.password(), is_admin)
    }

    /// Rebuild a record from fields previously read out of a datastore.
    #[must_use]
    pub fn from_parts(identity: Identity, password_hash: PasswordDigest, salt: Salt) -> Self {
        Self {
            identity,
            password_hash,
            salt,
        }
    }

    /// Returns `true` only when both the username and the password match.
    ///
    /// A `false` result deliberately carries no reason.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.verify_with(&PasswordHasher::default(), username, password)
    }

    /// [`Credential::verify`] using a configured global salt.
    ///
    /// The candidate digest is always computed and both comparisons always
    /// run, so a wrong username costs the same as a wrong password.
    #[must_use]
    pub fn verify_with(&self, hasher: &PasswordHasher, username: &str, password: &str) -> bool {
        let candidate = hasher.hash(password, self.salt.as_str());
        let username_matches =
            constant_time_eq(self.identity.username().as_bytes(), username.as_bytes());
        let password_matches = self.password_hash.matches(&candidate);
        let verified = username_matches & password_matches;
        debug!(username = self.identity.username(), verified, "credential checked");
        verified
    }

    /// [`Credential::verify`] against a request-form collaborator.
    #[must_use]
    pub fn check(&self, form: &impl PasswordForm) -> bool {
        self.verify(form.username(), form.password())
    }

    /// [`Credential::check`] using a configured global salt.
    #[must_use]
    pub fn check_with(&self, hasher: &PasswordHasher, form: &impl PasswordForm) -> bool {
        self.verify_with(hasher, form.username(), form.password())
    }

    /// Public identity carried by this record.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Username as supplied at registration.
    #[must_use]
    pub fn username(&self) -> &str {
        self.identity.username()
    }

    /// Whether the user holds administrative rights.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.identity.is_admin()
    }

    /// Stored password digest.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordDigest {
        &self.password_hash
    }

    /// Stored per-user salt.
    #[must_use]
    pub const fn salt(&self) -> &Salt {
        &self.salt
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.identity.username())
            .field("is_admin", &self.identity.is_admin())
            .field("password_hash", &"<redacted>")
            .field("salt", &"<redacted>")
            .finish()
    }
}

impl From<Credential> for Identity {
    fn from(value: Credential) -> Self {
        value.identity
    }
}

impl From<&Credential> for Identity {
    fn from(value: &Credential) -> Self {
        value.identity.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CredentialDto {
    username: String,
    #[serde(alias = "is_admin")]
    is_admin: bool,
    #[serde(alias = "password_hash", alias = "password")]
    password_hash: String,
    salt: String,
}

impl From<Credential> for CredentialDto {
    fn from(value: Credential) -> Self {
        let Credential {
            identity,
            password_hash,
            salt,
        } = value;
        Self {
            username: identity.username().to_owned(),
            is_admin: identity.is_admin(),
            password_hash: password_hash.into(),
            salt: salt.into(),
        }
    }
}

impl TryFrom<CredentialDto> for Credential {
    type Error = RecordValidationError;

    fn try_from(value: CredentialDto) -> Result<Self, Self::Error> {
        let password_hash = PasswordDigest::new(value.password_hash)?;
        let salt = Salt::new(value.salt)?;
        Ok(Self::from_parts(
            Identity::new(value.username, value.is_admin),
            password_hash,
            salt,
        ))
    }
}
