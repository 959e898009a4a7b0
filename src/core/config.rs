use crate::core::error::{ConfigError, MaintError, MaintResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for template-maint
/// Searched in order: maint.toml, .maint.toml, .config/maint.toml
///
/// Every field has a default matching the template repository layout, so the file is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintConfig {
  pub linter: LinterConfig,
  pub release: ReleaseConfig,
  pub lock: LockConfig,
}

/// The pinned linter and the files that mirror its version
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinterConfig {
  /// Tool name as it appears in the requirements file and manifest
  pub name: String,

  /// Requirements file holding the pinned version (source of truth)
  pub requirements: PathBuf,

  /// Manifest declaring `<name>==<version>` in `[project] dependencies`
  pub manifest: PathBuf,

  /// pre-commit hook repository URL preceding the `rev:` line in mirrors
  pub hook_repo: String,

  /// pre-commit configs whose `rev: v<version>` follows the hook repo line
  pub mirrors: Vec<PathBuf>,
}

impl Default for LinterConfig {
  fn default() -> Self {
    Self {
      name: "ruff".to_string(),
      requirements: PathBuf::from("{{cookiecutter.project_slug}}/requirements/local.txt"),
      manifest: PathBuf::from("pyproject.toml"),
      hook_repo: "https://github.com/astral-sh/ruff-pre-commit".to_string(),
      mirrors: vec![
        PathBuf::from("{{cookiecutter.project_slug}}/.pre-commit-config.yaml"),
        PathBuf::from(".pre-commit-config.yaml"),
      ],
    }
  }
}

/// Daily release generation
///
/// # Example
///
/// ```toml
/// [release]
/// changelog = "CHANGELOG.md"
/// template = ".github/changelog-template.md"
/// page_size = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
  pub changelog: PathBuf,
  pub manifest: PathBuf,
  pub lockfile: PathBuf,
  pub template: PathBuf,

  /// Literal line new sections are inserted after
  pub marker: String,

  /// Pull requests carrying this label never reach the changelog
  pub skip_label: String,

  /// Closed pull requests fetched (first page only)
  pub page_size: u32,

  pub api_url: String,

  /// Host used to build the token-authenticated push URL
  pub git_host: String,

  /// Push target override (URL or local path); the token is not embedded
  pub remote: Option<String>,
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      changelog: PathBuf::from("CHANGELOG.md"),
      manifest: PathBuf::from("pyproject.toml"),
      lockfile: PathBuf::from("uv.lock"),
      template: PathBuf::from(".github/changelog-template.md"),
      marker: "<!-- GENERATOR_PLACEHOLDER -->".to_string(),
      skip_label: "project infrastructure".to_string(),
      page_size: 30,
      api_url: "https://api.github.com".to_string(),
      git_host: "github.com".to_string(),
      remote: None,
    }
  }
}

/// Lockfile regeneration command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
  pub command: Vec<String>,
}

impl Default for LockConfig {
  fn default() -> Self {
    Self {
      command: vec!["uv".to_string(), "lock".to_string(), "--no-upgrade".to_string()],
    }
  }
}

impl MaintConfig {
  /// Find config file in search order: maint.toml, .maint.toml, .config/maint.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("maint.toml"),
      path.join(".maint.toml"),
      path.join(".config").join("maint.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the project root, falling back to defaults when no file exists
  pub fn load(path: &Path) -> MaintResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no maint.toml found, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: MaintConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded configuration");
    Ok(config)
  }

  /// Validate value ranges
  pub fn validate(&self) -> MaintResult<()> {
    if self.linter.name.trim().is_empty() {
      return Err(MaintError::Config(ConfigError::InvalidValue {
        field: "linter.name".to_string(),
        reason: "must not be empty".to_string(),
      }));
    }

    // GitHub caps per_page at 100
    if !(1..=100).contains(&self.release.page_size) {
      return Err(MaintError::Config(ConfigError::InvalidValue {
        field: "release.page_size".to_string(),
        reason: format!("{} is outside 1..=100", self.release.page_size),
      }));
    }

    if self.release.marker.is_empty() {
      return Err(MaintError::Config(ConfigError::InvalidValue {
        field: "release.marker".to_string(),
        reason: "must not be empty".to_string(),
      }));
    }

    if self.lock.command.is_empty() {
      return Err(MaintError::Config(ConfigError::InvalidValue {
        field: "lock.command".to_string(),
        reason: "must name a program".to_string(),
      }));
    }

    Ok(())
  }
}
