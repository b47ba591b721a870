//! Iterated, salted SHA-512 password hashing.
//!
//! The digest is computed over `salt + password + global_salt` and then
//! re-hashed until [`HASH_ITERATIONS`] SHA-512 passes have run in total. Each
//! pass after the first hashes the lowercase hex text of the previous pass,
//! not its raw bytes, so stored digests stay compatible with records created
//! by earlier deployments of the same scheme.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

use crate::error::RecordValidationError;

/// Total number of SHA-512 passes applied to every password.
pub const HASH_ITERATIONS: usize = 256;

/// Length of a hex-encoded SHA-512 digest.
pub const DIGEST_HEX_LEN: usize = 128;

/// Hex-encoded output of [`hash_password`].
///
/// ## Invariants
/// - Exactly [`DIGEST_HEX_LEN`] characters.
/// - Only lowercase hexadecimal digits.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Validate a stored digest string.
    ///
    /// # Errors
    ///
    /// Returns [`RecordValidationError::MalformedPasswordHash`] when the value
    /// is not [`DIGEST_HEX_LEN`] lowercase hex characters.
    pub fn new(digest: impl Into<String>) -> Result<Self, RecordValidationError> {
        Self::from_owned(digest.into())
    }

    fn from_owned(digest: String) -> Result<Self, RecordValidationError> {
        let well_formed = digest.len() == DIGEST_HEX_LEN
            && digest
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(RecordValidationError::MalformedPasswordHash {
                expected: DIGEST_HEX_LEN,
            });
        }
        Ok(Self(digest))
    }

    /// Compare two digests without an early exit on the first differing byte.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }

    /// Borrow the hex text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

impl From<PasswordDigest> for String {
    fn from(value: PasswordDigest) -> Self {
        value.0
    }
}

impl TryFrom<String> for PasswordDigest {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Hash `password` with the per-user `salt` and a deployment-wide
/// `global_salt`.
///
/// An empty `global_salt` yields the plain salt-and-password digest.
///
/// # Examples
///
/// ```
/// use user_credentials::{DIGEST_HEX_LEN, hash_password};
///
/// let first = hash_password("hunter2", "abc", "");
/// let second = hash_password("hunter2", "abc", "");
///
/// assert_eq!(first, second);
/// assert_eq!(first.as_str().len(), DIGEST_HEX_LEN);
/// ```
#[must_use]
pub fn hash_password(password: &str, salt: &str, global_salt: &str) -> PasswordDigest {
    let mut hasher = Sha512::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.update(global_salt.as_bytes());
    let mut digest = hex::encode(hasher.finalize());

    for _ in 1..HASH_ITERATIONS {
        digest = hex::encode(Sha512::digest(digest.as_bytes()));
    }

    PasswordDigest(digest)
}

/// Password hasher carrying the deployment-wide global salt.
///
/// The default hasher has an empty global salt and therefore produces the
/// same digests as [`hash_password`] called with `""`.
#[derive(Clone, Default)]
pub struct PasswordHasher {
    global_salt: Zeroizing<String>,
}

impl PasswordHasher {
    /// Build a hasher that mixes `global_salt` into every digest.
    pub fn new(global_salt: impl Into<String>) -> Self {
        Self {
            global_salt: Zeroizing::new(global_salt.into()),
        }
    }

    /// Returns `true` when a non-empty global salt is configured.
    #[must_use]
    pub fn has_global_salt(&self) -> bool {
        !self.global_salt.is_empty()
    }

    /// Hash `password` with `salt` and this hasher's global salt.
    #[must_use]
    pub fn hash(&self, password: &str, salt: &str) -> PasswordDigest {
        hash_password(password, salt, self.global_salt.as_str())
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("has_global_salt", &self.has_global_salt())
            .finish()
    }
}

/// Byte comparison whose running time depends only on the input lengths.
pub(crate) fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    let mut diff: u8 = 0;
    for (l, r) in left.iter().zip(right) {
        diff |= l ^ r;
    }
    diff == 0
}
