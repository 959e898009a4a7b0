//! Linter version synchronization
//!
//! The requirements file pins the linter; the manifest and the pre-commit configs mirror
//! that pin. When they disagree the mirrors are rewritten with exact text substitution and
//! the lockfile is regenerated. Nothing is written when the versions already agree.

use crate::core::config::LinterConfig;
use crate::core::context::ProjectContext;
use crate::core::error::{MaintResult, ResultExt};
use crate::core::lock::{LockOutcome, LockRunner};
use crate::lint::versions::{declared_version, pinned_version};
use crate::utils::edit_file_literal;
use std::fs;
use std::path::PathBuf;

/// Versions read from the project before any edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPair {
  /// Declared in the manifest
  pub declared: String,
  /// Pinned in the requirements file
  pub pinned: String,
}

impl VersionPair {
  pub fn in_sync(&self) -> bool {
    self.declared == self.pinned
  }
}

/// A file touched by the sync and how many occurrences were replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEdit {
  pub path: PathBuf,
  pub replacements: usize,
}

/// Outcome of a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
  /// Manifest already declares the pinned version; nothing written
  UpToDate { version: String },
  /// Versions differ and check-only mode was requested; nothing written
  Drift(VersionPair),
  /// Files rewritten to the pinned version
  Updated {
    versions: VersionPair,
    edits: Vec<FileEdit>,
    lock: LockOutcome,
  },
}

/// Read both versions from the project
pub fn read_versions(ctx: &ProjectContext) -> MaintResult<VersionPair> {
  let linter = &ctx.config.linter;

  let requirements_path = ctx.path(&linter.requirements);
  let requirements = fs::read_to_string(&requirements_path)
    .with_context(|| format!("Failed to read {}", requirements_path.display()))?;
  let pinned = pinned_version(&requirements, &linter.name, &linter.requirements)?;

  let manifest_path = ctx.path(&linter.manifest);
  let manifest =
    fs::read_to_string(&manifest_path).with_context(|| format!("Failed to read {}", manifest_path.display()))?;
  let declared = declared_version(&manifest, &linter.name, &linter.manifest)?;

  tracing::debug!(tool = %linter.name, %pinned, %declared, "read linter versions");
  Ok(VersionPair { declared, pinned })
}

/// Bring the manifest and mirrored configs in line with the pinned version
///
/// With `check_only`, drift is reported as `SyncOutcome::Drift` and no file is touched.
pub fn sync_versions(ctx: &ProjectContext, lock: &dyn LockRunner, check_only: bool) -> MaintResult<SyncOutcome> {
  let versions = read_versions(ctx)?;

  if versions.in_sync() {
    return Ok(SyncOutcome::UpToDate {
      version: versions.pinned,
    });
  }

  if check_only {
    return Ok(SyncOutcome::Drift(versions));
  }

  let edits = rewrite_versions(ctx, &versions.declared, &versions.pinned)?;
  let lock = lock.regenerate(&ctx.root);

  Ok(SyncOutcome::Updated { versions, edits, lock })
}

/// Replace the old version with the new one in the manifest and every mirror
///
/// Files are written one by one; a failure part-way leaves earlier files modified.
pub fn rewrite_versions(ctx: &ProjectContext, old: &str, new: &str) -> MaintResult<Vec<FileEdit>> {
  let linter = &ctx.config.linter;
  let mut edits = Vec::with_capacity(linter.mirrors.len() + 1);

  let (from, to) = manifest_pins(linter, old, new);
  let manifest_path = ctx.path(&linter.manifest);
  edits.push(FileEdit {
    replacements: edit_file_literal(&manifest_path, &from, &to)?,
    path: linter.manifest.clone(),
  });

  let (from, to) = hook_blocks(linter, old, new);
  for mirror in &linter.mirrors {
    edits.push(FileEdit {
      replacements: edit_file_literal(&ctx.path(mirror), &from, &to)?,
      path: mirror.clone(),
    });
  }

  Ok(edits)
}

fn manifest_pins(linter: &LinterConfig, old: &str, new: &str) -> (String, String) {
  (
    format!("{}=={}", linter.name, old),
    format!("{}=={}", linter.name, new),
  )
}

// pre-commit block: the hook repo line followed by a four-space indented rev line
fn hook_blocks(linter: &LinterConfig, old: &str, new: &str) -> (String, String) {
  let block = |version: &str| format!("repo: {}\n    rev: v{}", linter.hook_repo, version);
  (block(old), block(new))
}
