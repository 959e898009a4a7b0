//! Lockfile regeneration via an external dependency manager (default: `uv lock --no-upgrade`)
//!
//! Failures never propagate: a missing tool on the machine running the command should not
//! block a version sync or a release. The outcome is returned so callers can report it.

use std::path::Path;
use std::process::Command;

/// What happened when regenerating the lockfile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
  /// Command ran and exited successfully
  Updated,
  /// Command could not be spawned or exited non-zero
  Failed { reason: String },
}

impl LockOutcome {
  pub fn is_updated(&self) -> bool {
    matches!(self, LockOutcome::Updated)
  }
}

/// Regenerates the lockfile for a project root
pub trait LockRunner {
  fn regenerate(&self, root: &Path) -> LockOutcome;
}

/// Runs a configured command with the project root as working directory
#[derive(Debug, Clone)]
pub struct CommandLock {
  command: Vec<String>,
}

impl CommandLock {
  pub fn new(command: Vec<String>) -> Self {
    Self { command }
  }

  fn display(&self) -> String {
    self.command.join(" ")
  }
}

impl LockRunner for CommandLock {
  fn regenerate(&self, root: &Path) -> LockOutcome {
    let Some((program, args)) = self.command.split_first() else {
      return LockOutcome::Failed {
        reason: "no lock command configured".to_string(),
      };
    };

    tracing::info!(command = %self.display(), root = %root.display(), "regenerating lockfile");

    let outcome = match Command::new(program).args(args).current_dir(root).output() {
      Ok(output) if output.status.success() => LockOutcome::Updated,
      Ok(output) => LockOutcome::Failed {
        reason: format!(
          "{} exited with {}: {}",
          self.display(),
          output.status,
          String::from_utf8_lossy(&output.stderr).trim()
        ),
      },
      Err(e) => LockOutcome::Failed {
        reason: format!("failed to run {}: {}", self.display(), e),
      },
    };

    if let LockOutcome::Failed { reason } = &outcome {
      tracing::warn!(%reason, "lockfile regeneration failed; continuing");
    }

    outcome
  }
}
