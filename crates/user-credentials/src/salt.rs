//! Per-credential salt tokens.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::TryRngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::{CredentialError, RecordValidationError};

/// Number of random bytes drawn for every new salt.
pub const SALT_BYTES: usize = 20;

/// URL-safe random token mixed into a single user's password digest.
///
/// ## Invariants
/// - Non-empty.
/// - Only characters from the URL-safe base64 alphabet (`A-Z`, `a-z`, `0-9`,
///   `-`, `_`), without padding.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Salt(String);

impl Salt {
    /// Draw [`SALT_BYTES`] bytes from the operating system and encode them.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::EntropyUnavailable`] when the OS randomness
    /// source fails.
    pub fn generate() -> Result<Self, CredentialError> {
        let mut bytes = [0_u8; SALT_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| CredentialError::EntropyUnavailable {
                message: err.to_string(),
            })?;
        Ok(Self(URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Validate a stored salt string.
    ///
    /// # Errors
    ///
    /// Returns [`RecordValidationError`] when the value is empty or contains
    /// characters outside the URL-safe alphabet.
    pub fn new(salt: impl Into<String>) -> Result<Self, RecordValidationError> {
        Self::from_owned(salt.into())
    }

    fn from_owned(salt: String) -> Result<Self, RecordValidationError> {
        if salt.is_empty() {
            return Err(RecordValidationError::EmptySalt);
        }
        if !salt.bytes().all(is_url_safe_byte) {
            return Err(RecordValidationError::InvalidSaltCharacters);
        }
        Ok(Self(salt))
    }

    /// Borrow the encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

const fn is_url_safe_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

impl AsRef<str> for Salt {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Salt(<redacted>)")
    }
}

impl From<Salt> for String {
    fn from(value: Salt) -> Self {
        value.0
    }
}

impl TryFrom<String> for Salt {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn generated_salt_encodes_twenty_bytes() {
        let salt = Salt::generate().expect("OS entropy available");
        // 20 bytes encode to 27 unpadded base64 characters.
        assert_eq!(salt.as_str().len(), 27);
        let decoded = URL_SAFE_NO_PAD
            .decode(salt.as_str())
            .expect("salt is valid base64");
        assert_eq!(decoded.len(), SALT_BYTES);
    }

    #[rstest]
    fn generated_salt_is_url_safe() {
        let salt = Salt::generate().expect("OS entropy available");
        assert!(salt.as_str().bytes().all(is_url_safe_byte));
        assert!(!salt.as_str().contains('='));
    }

    #[rstest]
    fn generated_salts_are_unique() {
        let salts: HashSet<String> = (0..64)
            .map(|_| String::from(Salt::generate().expect("OS entropy available")))
            .collect();
        assert_eq!(salts.len(), 64);
    }

    #[rstest]
    #[case("abc")]
    #[case("Zm9v-YmFy_YmF6")]
    fn accepts_url_safe_values(#[case] value: &str) {
        let salt = Salt::new(value).expect("valid salt");
        assert_eq!(salt.as_str(), value);
    }

    #[rstest]
    #[case("", RecordValidationError::EmptySalt)]
    #[case("abc=", RecordValidationError::InvalidSaltCharacters)]
    #[case("a/b+c", RecordValidationError::InvalidSaltCharacters)]
    #[case("with space", RecordValidationError::InvalidSaltCharacters)]
    fn rejects_invalid_values(#[case] value: &str, #[case] expected: RecordValidationError) {
        assert_eq!(Salt::new(value), Err(expected));
    }

    #[rstest]
    fn debug_is_redacted() {
        let salt = Salt::new("visible-salt").expect("valid salt");
        assert!(!format!("{salt:?}").contains("visible-salt"));
    }
}
