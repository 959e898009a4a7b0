//! Release operations for SystemGit (stage, commit, tag, push)

use super::ReleaseVcs;
use super::system_git::SystemGit;
use crate::core::context::redact_url;
use crate::core::error::{GitError, MaintError, MaintResult, ResultExt};
use crate::utils::path_to_git_format;
use std::path::{Path, PathBuf};

impl SystemGit {
  /// Stage a path
  pub fn add(&self, path: &Path) -> MaintResult<()> {
    let path = path_to_git_format(path);
    self.run(&["add", "--", path.as_str()], &format!("git add {}", path))?;
    Ok(())
  }

  /// Read a git config value, erroring when it is unset
  pub fn config_value(&self, key: &str) -> MaintResult<String> {
    let output = self
      .git_cmd()
      .args(["config", "--get", key])
      .output()
      .context("Failed to read git config")?;

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() || value.is_empty() {
      return Err(MaintError::Git(GitError::MissingIdentity { key: key.to_string() }));
    }

    Ok(value)
  }

  /// Commit staged changes with an explicit author
  pub fn commit(&self, message: &str, author: &str) -> MaintResult<()> {
    let author_arg = format!("--author={}", author);
    self.run(&["commit", "-m", message, author_arg.as_str()], "git commit")?;
    Ok(())
  }

  /// Create an annotated tag at HEAD
  pub fn create_annotated_tag(&self, tag: &str, message: &str) -> MaintResult<()> {
    self.run(&["tag", "-a", tag, "-m", message], &format!("git tag -a {}", tag))?;
    Ok(())
  }

  /// Push to a remote URL; `extra` goes before the remote (e.g. `--tags`)
  ///
  /// The URL may carry a token, so it is redacted in output and errors.
  pub fn push(&self, remote_url: &str, branch: &str, extra: &[&str]) -> MaintResult<()> {
    let display = redact_url(remote_url);
    println!("   Pushing {}{} to {}...", branch, tag_suffix(extra), display);

    let mut args = vec!["push"];
    args.extend_from_slice(extra);
    args.push(remote_url);
    args.push(branch);

    let output = self.git_cmd().args(&args).output().context("Failed to push")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).replace(remote_url, &display);
      return Err(MaintError::Git(GitError::PushFailed {
        remote: display,
        branch: branch.to_string(),
        reason: stderr.trim().to_string(),
      }));
    }

    Ok(())
  }
}

fn tag_suffix(extra: &[&str]) -> &'static str {
  if extra.contains(&"--tags") { " (with tags)" } else { "" }
}

impl ReleaseVcs for SystemGit {
  fn commit_tag_push(&self, paths: &[PathBuf], release: &str, remote_url: &str, branch: &str) -> MaintResult<()> {
    for path in paths {
      self.add(path)?;
    }

    let message = format!("Release {}", release);
    let user = self.config_value("user.name")?;
    let email = self.config_value("user.email")?;

    self.commit(&message, &format!("{} <{}>", user, email))?;
    tracing::info!(%release, commit = %self.head_commit()?, work_tree = %self.work_tree().display(), "committed release");

    self.create_annotated_tag(release, &message)?;
    self.push(remote_url, branch, &[])?;
    self.push(remote_url, branch, &["--tags"])?;

    Ok(())
  }
}
