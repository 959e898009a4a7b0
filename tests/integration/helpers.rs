//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const SLUG_DIR: &str = "{{cookiecutter.project_slug}}";
pub const MARKER: &str = "<!-- GENERATOR_PLACEHOLDER -->";

/// A template repository checkout with git history
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create a project whose manifest declares `declared` and whose requirements pin `pinned`
  pub fn new(declared: &str, pinned: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::create_dir_all(path.join(SLUG_DIR).join("requirements"))?;
    std::fs::write(
      path.join(SLUG_DIR).join("requirements/local.txt"),
      format!(
        "-r production.txt\n\nruff=={}  # https://github.com/astral-sh/ruff\npytest==8.4.2\n",
        pinned
      ),
    )?;

    std::fs::write(
      path.join("pyproject.toml"),
      format!(
        r#"[project]
name = "project-template"
version = "2026.10.17"
dependencies = [
  "binaryornot==0.4.4",
  "ruff=={}",
  "tox==4.30.3",
]
"#,
        declared
      ),
    )?;

    let hooks = pre_commit_config(declared);
    std::fs::write(path.join(".pre-commit-config.yaml"), &hooks)?;
    std::fs::write(path.join(SLUG_DIR).join(".pre-commit-config.yaml"), &hooks)?;

    std::fs::write(
      path.join("CHANGELOG.md"),
      format!("# Change Log\n\n{}\n\n## 2026.10.16\n\n### Fixed\n\n- Older fix\n", MARKER),
    )?;

    // Lockfile regeneration must not depend on uv being installed
    std::fs::write(path.join("maint.toml"), "[lock]\ncommand = [\"true\"]\n")?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial template"])?;

    Ok(Self { _root: root, path })
  }

  /// Overwrite maint.toml
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("maint.toml"), content)?;
    Ok(())
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Number of commits on HEAD
  pub fn commit_count(&self) -> Result<usize> {
    let output = git(&self.path, &["rev-list", "--count", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().parse()?)
  }
}

pub fn pre_commit_config(version: &str) -> String {
  format!(
    r#"exclude: "^docs/|/migrations/"

repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v6.0.0
    hooks:
      - id: trailing-whitespace

  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: v{}
    hooks:
      - id: ruff-check
        args: [--fix, --exit-non-zero-on-fix]
      - id: ruff-format
"#,
    version
  )
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Build a template-maint command rooted at `cwd` with the release environment cleared
pub fn template_maint(cwd: &Path, args: &[&str]) -> Command {
  let mut cmd = Command::new(env!("CARGO_BIN_EXE_template-maint"));
  cmd
    .current_dir(cwd)
    .args(args)
    .env_remove("GITHUB_TOKEN")
    .env_remove("GITHUB_REPOSITORY")
    .env_remove("GITHUB_REF_NAME")
    .env_remove("RUST_LOG");
  cmd
}

/// Run template-maint, failing on a non-zero exit
pub fn run_template_maint(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = template_maint(cwd, args)
    .output()
    .context("Failed to run template-maint")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "template-maint command failed: template-maint {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run template-maint expecting failure; returns the output for exit code checks
pub fn run_template_maint_failing(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = template_maint(cwd, args)
    .output()
    .context("Failed to run template-maint")?;

  if output.status.success() {
    anyhow::bail!(
      "template-maint {} unexpectedly succeeded\nstdout: {}",
      args.join(" "),
      String::from_utf8_lossy(&output.stdout)
    );
  }

  Ok(output)
}
