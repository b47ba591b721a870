//! Username/password sources supplied by request-handling collaborators.
//!
//! Keep transport-level form parsing outside this crate: handlers adapt their
//! payload into something implementing [`PasswordForm`] and pass it to
//! [`Credential::from_form`](crate::Credential::from_form) or
//! [`Credential::check`](crate::Credential::check).

use std::fmt;

use zeroize::Zeroizing;

use crate::error::FormValidationError;

/// Anything that exposes a username and a plaintext password.
pub trait PasswordForm {
    /// Username as typed by the caller.
    fn username(&self) -> &str;

    /// Plaintext password as typed by the caller.
    fn password(&self) -> &str;
}

impl PasswordForm for (&str, &str) {
    fn username(&self) -> &str {
        self.0
    }

    fn password(&self) -> &str {
        self.1
    }
}

/// Validated login form values.
///
/// ## Invariants
/// - `username` must not be empty after trimming, but is kept verbatim so
///   verification compares exactly what the caller sent.
/// - `password` must be non-empty and is wiped from memory on drop.
///
/// # Examples
/// ```
/// use user_credentials::{LoginForm, PasswordForm};
///
/// let form = LoginForm::try_from_parts("alice", "correct-password").unwrap();
/// assert_eq!(form.username(), "alice");
/// assert_eq!(form.password(), "correct-password");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginForm {
    username: String,
    password: Zeroizing<String>,
}

impl LoginForm {
    /// Construct a form from raw username/password inputs.
    ///
    /// # Errors
    ///
    /// Returns [`FormValidationError::EmptyUsername`] for a blank username and
    /// [`FormValidationError::EmptyPassword`] for an empty password.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, FormValidationError> {
        if username.trim().is_empty() {
            return Err(FormValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(FormValidationError::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }
}

impl PasswordForm for LoginForm {
    fn username(&self) -> &str {
        self.username.as_str()
    }

    fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", FormValidationError::EmptyUsername)]
    #[case("   ", "pw", FormValidationError::EmptyUsername)]
    #[case("user", "", FormValidationError::EmptyPassword)]
    fn invalid_forms(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: FormValidationError,
    ) {
        let err = LoginForm::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("alice", "secret")]
    #[case(" padded ", "  spaced password  ")]
    fn valid_forms_keep_values_verbatim(#[case] username: &str, #[case] password: &str) {
        let form =
            LoginForm::try_from_parts(username, password).expect("valid inputs should succeed");
        assert_eq!(form.username(), username);
        assert_eq!(form.password(), password);
    }

    #[rstest]
    fn tuple_exposes_both_fields() {
        let form = ("bob", "hunter2");
        assert_eq!(PasswordForm::username(&form), "bob");
        assert_eq!(PasswordForm::password(&form), "hunter2");
    }

    #[rstest]
    fn debug_hides_password() {
        let form = LoginForm::try_from_parts("alice", "s3cret").expect("valid form");
        let rendered = format!("{form:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("s3cret"));
    }
}
