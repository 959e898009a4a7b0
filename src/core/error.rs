//! Error types for template-maint with contextual messages and exit codes
//!
//! Every command returns `MaintResult`. Errors are grouped by origin so `main` can pick
//! an exit code and print a help line that points the user at the fix.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for template-maint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, environment, missing versions)
  User = 1,
  /// System error (git, network, I/O)
  System = 2,
  /// Validation failure (`sync-linter --check` found drift)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for template-maint
#[derive(Debug)]
pub enum MaintError {
  /// Configuration and environment errors
  Config(ConfigError),

  /// A required version string was not found in an input file
  Lookup(LookupError),

  /// Git operation errors
  Git(GitError),

  /// Hosting API errors
  Api(ApiError),

  /// Validation failures reported by check modes
  Validation { reason: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl MaintError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    MaintError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    MaintError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// I/O errors are folded into a message so the path being touched is not lost.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      MaintError::Message { message, context, help } => MaintError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      MaintError::Io(err) => MaintError::Message {
        message: ctx_str,
        context: Some(format!("I/O error: {}", err)),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      MaintError::Config(_) => ExitCode::User,
      MaintError::Lookup(_) => ExitCode::User,
      MaintError::Git(_) => ExitCode::System,
      MaintError::Api(_) => ExitCode::System,
      MaintError::Validation { .. } => ExitCode::Validation,
      MaintError::Io(_) => ExitCode::System,
      MaintError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      MaintError::Config(e) => e.help_message(),
      MaintError::Lookup(e) => e.help_message(),
      MaintError::Git(e) => e.help_message(),
      MaintError::Api(e) => e.help_message(),
      MaintError::Validation { .. } => Some("Run `template-maint sync-linter` to apply the update.".to_string()),
      MaintError::Message { help, .. } => help.clone(),
      MaintError::Io(_) => None,
    }
  }
}

impl fmt::Display for MaintError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MaintError::Config(e) => write!(f, "{}", e),
      MaintError::Lookup(e) => write!(f, "{}", e),
      MaintError::Git(e) => write!(f, "{}", e),
      MaintError::Api(e) => write!(f, "{}", e),
      MaintError::Validation { reason } => write!(f, "Validation failed: {}", reason),
      MaintError::Io(e) => write!(f, "I/O error: {}", e),
      MaintError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for MaintError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      MaintError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for MaintError {
  fn from(err: io::Error) -> Self {
    MaintError::Io(err)
  }
}

impl From<String> for MaintError {
  fn from(msg: String) -> Self {
    MaintError::message(msg)
  }
}

impl From<&str> for MaintError {
  fn from(msg: &str) -> Self {
    MaintError::message(msg)
  }
}

impl From<toml_edit::TomlError> for MaintError {
  fn from(err: toml_edit::TomlError) -> Self {
    MaintError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for MaintError {
  fn from(err: toml_edit::de::Error) -> Self {
    MaintError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for MaintError {
  fn from(err: serde_json::Error) -> Self {
    MaintError::Api(ApiError::InvalidResponse {
      reason: err.to_string(),
    })
  }
}

impl From<reqwest::Error> for MaintError {
  fn from(err: reqwest::Error) -> Self {
    MaintError::Api(ApiError::Transport {
      reason: err.to_string(),
    })
  }
}

impl From<tera::Error> for MaintError {
  fn from(err: tera::Error) -> Self {
    // Tera keeps the useful part (line, unknown variable) in the source chain
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(inner) = source {
      message.push_str(&format!(": {}", inner));
      source = inner.source();
    }
    MaintError::with_help(
      format!("Template error: {}", message),
      "Check the changelog template; available variables are `groups`, `grouped_pulls`, `release` and `merged_date`.",
    )
  }
}

/// Configuration and environment errors
#[derive(Debug)]
pub enum ConfigError {
  /// Required environment variable is not set
  MissingEnv { var: String, purpose: String },

  /// Environment variable is set but malformed
  InvalidEnv { var: String, reason: String },

  /// maint.toml holds a value outside its accepted range
  InvalidValue { field: String, reason: String },

  /// Configured input file does not exist
  FileNotFound { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MissingEnv { var, .. } => Some(format!("Export {} before running, e.g. `export {}=...`", var, var)),
      ConfigError::InvalidEnv { var, .. } if var == "GITHUB_REPOSITORY" => {
        Some("Use the `owner/name` form, e.g. `cookiecutter/cookiecutter-django`.".to_string())
      }
      ConfigError::InvalidValue { .. } => Some("Fix the value in maint.toml or remove it to use the default.".to_string()),
      ConfigError::FileNotFound { .. } => Some("Pass --root to point at the template repository.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MissingEnv { var, purpose } => {
        write!(f, "No {} set, please set the {} environment variable", purpose, var)
      }
      ConfigError::InvalidEnv { var, reason } => {
        write!(f, "Invalid value for {}: {}", var, reason)
      }
      ConfigError::InvalidValue { field, reason } => {
        write!(f, "Invalid config value for {}: {}", field, reason)
      }
      ConfigError::FileNotFound { path } => {
        write!(f, "File not found: {}", path.display())
      }
    }
  }
}

/// A version string could not be located
#[derive(Debug)]
pub enum LookupError {
  /// No pinned version line for the tool in the requirements file
  PinnedVersion { tool: String, path: PathBuf },

  /// No `<tool>==` entry in the manifest's dependency list
  DeclaredVersion { tool: String, path: PathBuf },
}

impl LookupError {
  fn help_message(&self) -> Option<String> {
    match self {
      LookupError::PinnedVersion { tool, .. } => Some(format!("Pin the tool with a line like `{}==1.2.3`.", tool)),
      LookupError::DeclaredVersion { tool, .. } => Some(format!(
        "Declare it under [project] dependencies, e.g. `\"{}==1.2.3\"`.",
        tool
      )),
    }
  }
}

impl fmt::Display for LookupError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LookupError::PinnedVersion { tool, path } => {
        write!(f, "Could not find {} version in {}", tool, path.display())
      }
      LookupError::DeclaredVersion { tool, path } => {
        write!(f, "Could not find {} version in {}", tool, path.display())
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Required git config value missing (user.name / user.email)
  MissingIdentity { key: String },

  /// Push failed
  PushFailed {
    remote: String,
    branch: String,
    reason: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") {
          Some("The remote has commits you don't have. Pull first, then re-run the release.".to_string())
        } else if reason.contains("403") || reason.to_lowercase().contains("permission") {
          Some("Check that GITHUB_TOKEN has `contents: write` permission.".to_string())
        } else {
          None
        }
      }
      GitError::RepoNotFound { path } => Some(format!(
        "Run the release from inside the template checkout: {}",
        path.display()
      )),
      GitError::MissingIdentity { key } => Some(format!("Set it with `git config {} <value>`.", key)),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::MissingIdentity { key } => {
        write!(f, "Git config value '{}' is not set", key)
      }
      GitError::PushFailed { remote, branch, reason } => {
        write!(f, "Push to {}/{} failed: {}", remote, branch, reason)
      }
    }
  }
}

/// Hosting API errors
#[derive(Debug)]
pub enum ApiError {
  /// Request could not be sent or the response body not read
  Transport { reason: String },

  /// Non-success HTTP status
  Status { status: u16, url: String, message: String },

  /// Response body did not have the expected shape
  InvalidResponse { reason: String },
}

impl ApiError {
  fn help_message(&self) -> Option<String> {
    match self {
      ApiError::Status { status: 401, .. } => Some("GITHUB_TOKEN is missing or expired.".to_string()),
      ApiError::Status { status: 403, .. } => {
        Some("The token lacks permission, or the API rate limit was exceeded.".to_string())
      }
      ApiError::Status { status: 404, .. } => Some("Check GITHUB_REPOSITORY and the token's repository access.".to_string()),
      ApiError::Status { status: 422, .. } => {
        Some("A release with this tag may already exist; delete it or re-run another day.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Transport { reason } => write!(f, "GitHub API request failed: {}", reason),
      ApiError::Status { status, url, message } => {
        write!(f, "GitHub API returned {} for {}: {}", status, url, message)
      }
      ApiError::InvalidResponse { reason } => write!(f, "Unexpected GitHub API response: {}", reason),
    }
  }
}

/// Result type alias for template-maint
pub type MaintResult<T> = Result<T, MaintError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> MaintResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> MaintResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<MaintError>,
{
  fn context(self, ctx: impl Into<String>) -> MaintResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> MaintResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &MaintError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
