//! Text edits and path helpers shared by both commands

use crate::core::error::{MaintResult, ResultExt};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Result of a find-and-replace over a file's contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
  /// Contents after replacement (unchanged when `count == 0`)
  pub content: String,
  /// Number of occurrences replaced
  pub count: usize,
}

impl Replacement {
  /// Whether anything was replaced
  pub fn changed(&self) -> bool {
    self.count > 0
  }
}

/// Replace every literal occurrence of `from` with `to`
///
/// Matching is exact: differing whitespace or line endings mean no match.
pub fn replace_literal(content: &str, from: &str, to: &str) -> Replacement {
  if from.is_empty() {
    return Replacement {
      content: content.to_string(),
      count: 0,
    };
  }
  let count = content.matches(from).count();
  Replacement {
    content: if count > 0 { content.replace(from, to) } else { content.to_string() },
    count,
  }
}

/// Replace every match of `pattern` with the literal `to`
pub fn replace_regex(content: &str, pattern: &Regex, to: &str) -> Replacement {
  let count = pattern.find_iter(content).count();
  Replacement {
    content: pattern.replace_all(content, regex::NoExpand(to)).into_owned(),
    count,
  }
}

/// Apply a literal replacement to a file, writing only when something matched
///
/// Returns the number of occurrences replaced. Zero is logged as a warning.
pub fn edit_file_literal(path: &Path, from: &str, to: &str) -> MaintResult<usize> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let replacement = replace_literal(&content, from, to);

  if replacement.changed() {
    fs::write(path, &replacement.content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = replacement.count, "replaced text");
  } else {
    tracing::warn!(path = %path.display(), pattern = %from.escape_debug(), "expected text not found; file left unchanged");
  }

  Ok(replacement.count)
}

/// Check if a path is a local filesystem path (not a remote URL)
///
/// Returns true for:
/// - Absolute paths on Unix: /path/to/repo
/// - Absolute paths on Windows: C:\path\to\repo or C:/path/to/repo
/// - Relative paths: ./path or ../path
/// - UNC paths on Windows: \\server\share
///
/// Returns false for:
/// - SSH URLs: git@github.com:user/repo.git
/// - HTTPS URLs: <https://github.com/user/repo.git>
pub fn is_local_path(path: &str) -> bool {
  let p = Path::new(path);

  if path.starts_with("./") || path.starts_with("../") {
    return true;
  }

  // Windows drive letter (C:\ or C:/), checked before the URL test since it contains ':'
  if path.len() >= 3 {
    let bytes = path.as_bytes();
    if bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && (bytes[2] == b'\\' || bytes[2] == b'/') {
      return true;
    }
  }

  if path.starts_with("\\\\") {
    return true;
  }

  // Unix absolute paths; Path::is_absolute() is false for these on Windows
  if path.starts_with('/') && !path.contains("://") && !path.contains('@') {
    return true;
  }

  p.is_absolute()
}

/// Convert a path to Git format (always forward slashes)
pub fn path_to_git_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}
