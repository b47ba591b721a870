//! CLI support for minting and checking credential records.
//!
//! The `user-credentials` binary delegates to these functions so parsing and
//! command execution can be exercised in tests without spawning a process.

mod error;

pub use error::CliError;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::credential::Credential;
use crate::form::{LoginForm, PasswordForm};
use crate::hashing::PasswordHasher;
use crate::identity::Identity;

/// Command-line usage text.
pub const USAGE: &str = concat!(
    "Usage: user-credentials <command> [options]\n",
    "\n",
    "Commands:\n",
    "  new       --username <name> --password <password> [--admin]\n",
    "            Print a new credential record as JSON\n",
    "  verify    --record <path> --username <name> --password <password>\n",
    "            Check a username/password pair against a stored record\n",
    "  identity  --record <path>\n",
    "            Print the public identity of a stored record\n",
    "\n",
    "Options:\n",
    "  --global-salt <secret>  Override the configured global salt\n",
    "  -h, --help              Print this help output\n",
    "\n",
    "Without --global-salt, the global salt is read from\n",
    "USER_CREDENTIALS_GLOBAL_SALT or the configuration file.\n",
);

/// A parsed CLI command.
#[derive(Debug, Clone)]
pub enum Command {
    /// Mint a new credential record.
    New {
        /// Username and password for the new record.
        form: LoginForm,
        /// Whether the new user is an administrator.
        is_admin: bool,
    },
    /// Check a username/password pair against a stored record.
    Verify {
        /// Path to the stored record.
        record_path: PathBuf,
        /// Candidate username and password.
        candidate: Candidate,
    },
    /// Project a stored record to its public identity.
    Identity {
        /// Path to the stored record.
        record_path: PathBuf,
    },
}

/// Unvalidated username/password pair supplied to `verify`.
///
/// Unlike [`LoginForm`], empty values are accepted so that any mismatch is
/// reported as a failed check rather than an input error.
#[derive(Clone, PartialEq, Eq)]
pub struct Candidate {
    username: String,
    password: Zeroizing<String>,
}

impl Candidate {
    /// Wrap a candidate pair without validation.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl PasswordForm for Candidate {
    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A parsed command together with invocation-wide overrides.
#[derive(Clone)]
pub struct Invocation {
    /// Command to run.
    pub command: Command,
    /// Global salt supplied with `--global-salt`, if any.
    pub global_salt: Option<Zeroizing<String>>,
}

impl Invocation {
    /// The `--global-salt` override as a string slice.
    #[must_use]
    pub fn global_salt(&self) -> Option<&str> {
        self.global_salt.as_deref().map(String::as_str)
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("command", &self.command)
            .field("has_global_salt", &self.global_salt.is_some())
            .finish()
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Run the parsed command.
    Command(Invocation),
}

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new credential record was created.
    Created(Credential),
    /// A stored record was checked; `true` means the pair matched.
    Verified(bool),
    /// A stored record was projected to its identity.
    Identity(Identity),
}

impl Outcome {
    /// Whether the process should exit successfully.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Verified(false))
    }
}

#[derive(Default)]
struct Flags {
    username: Option<String>,
    password: Option<String>,
    record_path: Option<PathBuf>,
    global_salt: Option<Zeroizing<String>>,
    is_admin: bool,
}

/// Parses CLI arguments (without the program name) into a command.
///
/// # Errors
///
/// Returns [`CliError`] when the command is unknown, required flags are
/// missing, or the username/password fail validation.
///
/// # Example
///
/// ```
/// use user_credentials::cli::{Command, ParseOutcome, parse_args};
///
/// let args = ["new", "--username", "alice", "--password", "s3cret", "--admin"]
///     .map(str::to_owned);
/// let ParseOutcome::Command(invocation) = parse_args(args.into_iter()).expect("parse args")
/// else {
///     panic!("expected a command");
/// };
///
/// assert!(matches!(invocation.command, Command::New { is_admin: true, .. }));
/// assert!(invocation.global_salt().is_none());
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let command = match args.next() {
        None => return Err(CliError::MissingCommand),
        Some(word) if word == "-h" || word == "--help" => return Ok(ParseOutcome::Help),
        Some(word) => word,
    };

    let mut flags = Flags::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--username" => flags.username = Some(next_value(&mut args, "--username")?),
            "--password" => flags.password = Some(next_value(&mut args, "--password")?),
            "--record" => {
                flags.record_path = Some(PathBuf::from(next_value(&mut args, "--record")?));
            }
            "--global-salt" => {
                flags.global_salt = Some(Zeroizing::new(next_value(&mut args, "--global-salt")?));
            }
            "--admin" if command == "new" => flags.is_admin = true,
            _ => return Err(CliError::UnknownArgument { value: arg }),
        }
    }

    let parsed = match command.as_str() {
        "new" => Command::New {
            form: login_form(&flags)?,
            is_admin: flags.is_admin,
        },
        "verify" => Command::Verify {
            record_path: record_path(&flags)?,
            candidate: candidate(&flags)?,
        },
        "identity" => Command::Identity {
            record_path: record_path(&flags)?,
        },
        _ => return Err(CliError::UnknownCommand { value: command }),
    };
    Ok(ParseOutcome::Command(Invocation {
        command: parsed,
        global_salt: flags.global_salt,
    }))
}

fn next_value<I>(args: &mut I, flag: &'static str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingValue { flag })
}

fn username_and_password(flags: &Flags) -> Result<(&str, &str), CliError> {
    let username = flags
        .username
        .as_deref()
        .ok_or(CliError::MissingFlag { flag: "--username" })?;
    let password = flags
        .password
        .as_deref()
        .ok_or(CliError::MissingFlag { flag: "--password" })?;
    Ok((username, password))
}

fn login_form(flags: &Flags) -> Result<LoginForm, CliError> {
    let (username, password) = username_and_password(flags)?;
    Ok(LoginForm::try_from_parts(username, password)?)
}

fn candidate(flags: &Flags) -> Result<Candidate, CliError> {
    let (username, password) = username_and_password(flags)?;
    Ok(Candidate::new(username, password))
}

fn record_path(flags: &Flags) -> Result<PathBuf, CliError> {
    flags
        .record_path
        .clone()
        .ok_or(CliError::MissingFlag { flag: "--record" })
}

/// Runs a parsed command with the configured hasher.
///
/// # Errors
///
/// Returns [`CliError`] when a record cannot be read or a salt cannot be
/// generated.
pub fn execute(command: &Command, hasher: &PasswordHasher) -> Result<Outcome, CliError> {
    match command {
        Command::New { form, is_admin } => {
            let credential =
                Credential::try_create_new_with(hasher, form.username(), form.password(), *is_admin)?;
            Ok(Outcome::Created(credential))
        }
        Command::Verify {
            record_path,
            candidate,
        } => {
            let credential = read_record(record_path)?;
            Ok(Outcome::Verified(credential.check_with(hasher, candidate)))
        }
        Command::Identity { record_path } => {
            let credential = read_record(record_path)?;
            Ok(Outcome::Identity(credential.into()))
        }
    }
}

/// Loads a stored credential record from a JSON file.
///
/// # Errors
///
/// Returns [`CliError::RecordRead`] when the file cannot be read and
/// [`CliError::RecordParse`] when its contents fail strict parsing.
pub fn read_record(path: &Path) -> Result<Credential, CliError> {
    let contents = fs::read_to_string(path).map_err(|e| CliError::RecordRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| CliError::RecordParse {
        message: e.to_string(),
    })
}

/// Renders an outcome as the text printed on stdout.
///
/// # Errors
///
/// Returns [`CliError::Render`] if JSON serialization fails.
pub fn render(outcome: &Outcome) -> Result<String, CliError> {
    let rendered = match outcome {
        Outcome::Created(credential) => serde_json::to_string_pretty(credential),
        Outcome::Identity(identity) => serde_json::to_string_pretty(identity),
        Outcome::Verified(true) => return Ok("valid".to_owned()),
        Outcome::Verified(false) => return Ok("invalid".to_owned()),
    };
    rendered.map_err(|e| CliError::Render {
        message: e.to_string(),
    })
}
