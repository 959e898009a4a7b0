//! Lint command implementation

use crate::core::context::ProjectContext;
use crate::core::error::{MaintError, MaintResult};
use crate::core::lock::{CommandLock, LockOutcome};
use crate::lint::{SyncOutcome, VersionPair, sync_versions};

/// Run the sync-linter command
///
/// With `check`, version drift is reported and the command fails with a validation error
/// instead of rewriting files.
pub fn run_sync_linter(ctx: &ProjectContext, check: bool) -> MaintResult<()> {
  let lock = CommandLock::new(ctx.config.lock.command.clone());
  let outcome = sync_versions(ctx, &lock, check)?;
  let tool = &ctx.config.linter.name;

  match outcome {
    SyncOutcome::UpToDate { version } => {
      println!("✅ {} {} is already in sync", tool, version);
      Ok(())
    }
    SyncOutcome::Drift(versions) => {
      print_drift(tool, &versions);
      Err(MaintError::Validation {
        reason: format!(
          "{} version drift: manifest declares {}, requirements pin {}",
          tool, versions.declared, versions.pinned
        ),
      })
    }
    SyncOutcome::Updated { versions, edits, lock } => {
      println!("🔄 Updating {} {} → {}", tool, versions.declared, versions.pinned);
      for edit in &edits {
        if edit.replacements == 0 {
          println!("   ⚠️  {} (no occurrence of {})", edit.path.display(), versions.declared);
        } else {
          println!("   ✅ {} ({} replaced)", edit.path.display(), edit.replacements);
        }
      }
      match &lock {
        LockOutcome::Updated => println!("   ✅ Lockfile regenerated"),
        LockOutcome::Failed { reason } => println!("   ⚠️  Lockfile not regenerated: {}", reason),
      }
      println!("🎉 {} synced to {}", tool, versions.pinned);
      Ok(())
    }
  }
}

fn print_drift(tool: &str, versions: &VersionPair) {
  println!("⚠️  {} version drift detected", tool);
  println!("   Declared: {}", versions.declared);
  println!("   Pinned:   {}", versions.pinned);
  println!();
  println!("   Run without --check to update the manifest and pre-commit configs");
}
