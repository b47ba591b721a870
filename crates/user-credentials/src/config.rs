//! Credential hashing configuration loaded via OrthoConfig.

use std::ffi::OsString;

use ortho_config::{OrthoConfig, OrthoResult};
use serde::Deserialize;
use tracing::debug;

use crate::hashing::PasswordHasher;

/// Deployment-wide settings for credential hashing.
///
/// Values are layered from configuration files, `USER_CREDENTIALS_*`
/// environment variables, and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_CREDENTIALS")]
pub struct CredentialSettings {
    /// Secret mixed into every password digest. Empty when unset.
    #[ortho_config(default = String::new())]
    #[serde(default)]
    pub global_salt: String,
}

impl CredentialSettings {
    /// Load settings from files and the environment only.
    ///
    /// # Errors
    ///
    /// Returns the loader error when a configuration source is malformed.
    pub fn load_ambient(binary_name: &str) -> OrthoResult<Self> {
        Self::load_with_overrides(binary_name, None)
    }

    /// Load settings, letting a `--global-salt` value take precedence over
    /// files and the environment.
    ///
    /// # Errors
    ///
    /// Returns the loader error when a configuration source is malformed.
    pub fn load_with_overrides(binary_name: &str, global_salt: Option<&str>) -> OrthoResult<Self> {
        let mut args = vec![OsString::from(binary_name)];
        if let Some(value) = global_salt {
            args.push(OsString::from("--global-salt"));
            args.push(OsString::from(value));
        }
        Self::load_from_iter(args)
    }

    /// Build the hasher for these settings.
    #[must_use]
    pub fn hasher(&self) -> PasswordHasher {
        if self.global_salt.is_empty() {
            return PasswordHasher::default();
        }
        debug!("global password salt configured");
        PasswordHasher::new(&self.global_salt)
    }
}
