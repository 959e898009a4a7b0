pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

use crate::core::error::MaintResult;
use std::path::PathBuf;

/// Version-control side of a release: record the files, tag them, publish both
pub trait ReleaseVcs {
  /// Stage `paths`, commit as `Release <release>`, create annotated tag `<release>`,
  /// then push the branch and the tags to `remote_url`
  fn commit_tag_push(&self, paths: &[PathBuf], release: &str, remote_url: &str, branch: &str) -> MaintResult<()>;
}
