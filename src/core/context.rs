//! Project context - build once, pass everywhere
//!
//! `ProjectContext` holds the project root and its loaded `maint.toml`; `ReleaseEnv` holds
//! the CI-provided environment (token, repository, branch). Both are built once in main.rs
//! and handed by reference to the commands, so nothing below reads the process environment
//! or the current directory on its own.

use crate::core::config::MaintConfig;
use crate::core::error::{ConfigError, MaintError, MaintResult, ResultExt};
use crate::utils::is_local_path;
use std::fmt;
use std::path::{Path, PathBuf};

/// Root directory plus configuration shared by every command
#[derive(Debug, Clone)]
pub struct ProjectContext {
  /// Project root (absolute path)
  pub root: PathBuf,

  /// maint.toml contents, or defaults
  pub config: MaintConfig,
}

impl ProjectContext {
  /// Build the context for a root directory, loading maint.toml if present
  ///
  /// A relative root is resolved against the current directory.
  pub fn build(root: &Path) -> MaintResult<Self> {
    if !root.is_dir() {
      return Err(MaintError::Config(ConfigError::FileNotFound {
        path: root.to_path_buf(),
      }));
    }

    let root = root
      .canonicalize()
      .with_context(|| format!("Failed to resolve project root {}", root.display()))?;
    let config = MaintConfig::load(&root)?;
    Ok(Self::with_config(root, config))
  }

  /// Create a context from an explicit config (no file lookup)
  pub fn with_config(root: impl Into<PathBuf>, config: MaintConfig) -> Self {
    Self {
      root: root.into(),
      config,
    }
  }

  /// Resolve a configured path against the project root
  pub fn path(&self, relative: &Path) -> PathBuf {
    self.root.join(relative)
  }
}

/// GitHub repository in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
  pub owner: String,
  pub name: String,
}

impl Repository {
  /// Parse `owner/name`
  pub fn parse(slug: &str) -> Option<Self> {
    let (owner, name) = slug.trim().split_once('/')?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
      return None;
    }
    Some(Self {
      owner: owner.to_string(),
      name: name.to_string(),
    })
  }
}

impl fmt::Display for Repository {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

/// Release environment provided by CI
///
/// Variables:
/// - `GITHUB_TOKEN`: API and push credential (optional, warned when absent)
/// - `GITHUB_REPOSITORY`: `owner/name` (required)
/// - `GITHUB_REF_NAME`: branch to push (required)
#[derive(Clone)]
pub struct ReleaseEnv {
  pub token: Option<String>,
  pub repository: Repository,
  pub branch: String,
}

impl fmt::Debug for ReleaseEnv {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ReleaseEnv")
      .field("token", &self.token.as_ref().map(|_| "***"))
      .field("repository", &self.repository)
      .field("branch", &self.branch)
      .finish()
  }
}

impl ReleaseEnv {
  /// Read the release environment from the process
  pub fn from_env() -> MaintResult<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Read the release environment through a lookup function
  pub fn from_lookup<F>(lookup: F) -> MaintResult<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let slug = non_empty("GITHUB_REPOSITORY").ok_or_else(|| {
      MaintError::Config(ConfigError::MissingEnv {
        var: "GITHUB_REPOSITORY".to_string(),
        purpose: "github repo".to_string(),
      })
    })?;
    let branch = non_empty("GITHUB_REF_NAME").ok_or_else(|| {
      MaintError::Config(ConfigError::MissingEnv {
        var: "GITHUB_REF_NAME".to_string(),
        purpose: "git branch".to_string(),
      })
    })?;

    let repository = Repository::parse(&slug).ok_or_else(|| {
      MaintError::Config(ConfigError::InvalidEnv {
        var: "GITHUB_REPOSITORY".to_string(),
        reason: format!("'{}' is not in owner/name form", slug),
      })
    })?;

    let token = non_empty("GITHUB_TOKEN");
    if token.is_none() {
      tracing::warn!("GITHUB_TOKEN is not set; API calls are unauthenticated and push may be rejected");
    }

    Ok(Self {
      token,
      repository,
      branch,
    })
  }

  /// Push target for the release commit and tag
  ///
  /// A configured override is used verbatim. Otherwise the HTTPS URL embeds the token.
  pub fn push_url(&self, git_host: &str, remote_override: Option<&str>) -> String {
    if let Some(remote) = remote_override {
      tracing::debug!(remote = %redact_url(remote), "using configured push remote");
      return remote.to_string();
    }

    match &self.token {
      Some(token) => format!("https://{}@{}/{}.git", token, git_host, self.repository),
      None => format!("https://{}/{}.git", git_host, self.repository),
    }
  }
}

/// Hide credentials embedded in a URL (`https://<token>@host/...`)
pub fn redact_url(url: &str) -> String {
  if is_local_path(url) {
    return url.to_string();
  }
  let Some(scheme_end) = url.find("://") else {
    return url.to_string();
  };
  let rest = &url[scheme_end + 3..];
  match rest.find('@') {
    Some(at) if !rest[..at].contains('/') => format!("{}***{}", &url[..scheme_end + 3], &rest[at..]),
    _ => url.to_string(),
  }
}
