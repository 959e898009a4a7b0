//! Version lookup: the pinned linter version and the version the manifest declares

use crate::core::error::{LookupError, MaintError, MaintResult};
use std::path::Path;
use toml_edit::DocumentMut;

/// Find the pinned version of `tool` in a requirements file
///
/// The first line starting with `tool` wins. Its first whitespace-separated token is split
/// on `==` and the part after it is the version, so trailing hashes or comments are ignored.
pub fn pinned_version(requirements: &str, tool: &str, path: &Path) -> MaintResult<String> {
  let not_found = || {
    MaintError::Lookup(LookupError::PinnedVersion {
      tool: tool.to_string(),
      path: path.to_path_buf(),
    })
  };

  let line = requirements.lines().find(|line| line.starts_with(tool)).ok_or_else(not_found)?;
  let requirement = line.split_whitespace().next().unwrap_or_default();

  match requirement.split("==").nth(1) {
    Some(version) if !version.is_empty() => Ok(version.to_string()),
    _ => Err(not_found()),
  }
}

/// Find the version of `tool` declared in `[project] dependencies` as `"<tool>==<version>"`
pub fn declared_version(manifest: &str, tool: &str, path: &Path) -> MaintResult<String> {
  let doc: DocumentMut = manifest.parse()?;
  let prefix = format!("{}==", tool);

  doc
    .get("project")
    .and_then(|project| project.get("dependencies"))
    .and_then(|deps| deps.as_array())
    .and_then(|deps| {
      deps
        .iter()
        .filter_map(|dep| dep.as_str())
        .find_map(|dep| dep.strip_prefix(&prefix).map(|rest| rest.split("==").next().unwrap_or(rest)))
    })
    .map(str::to_string)
    .ok_or_else(|| {
      MaintError::Lookup(LookupError::DeclaredVersion {
        tool: tool.to_string(),
        path: path.to_path_buf(),
      })
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  const REQUIREMENTS: &str = "\
-r production.txt

Werkzeug[watchdog]==3.1.3 # https://github.com/pallets/werkzeug
ruff==0.12.4  # https://github.com/astral-sh/ruff
coverage==7.9.2  # https://github.com/nedbat/coveragepy
";

  const PYPROJECT: &str = r#"[project]
name = "cookiecutter-django"
version = "2025.07.20"
dependencies = [
  "binaryornot==0.4.4",
  "cookiecutter==2.6",
  "ruff==0.12.3",
  "tox==4.27",
]
"#;

  fn path() -> &'static Path {
    Path::new("file")
  }

  #[test]
  fn test_pinned_version_ignores_trailing_comment() {
    assert_eq!(pinned_version(REQUIREMENTS, "ruff", path()).unwrap(), "0.12.4");
  }

  #[test]
  fn test_pinned_version_takes_first_match() {
    let content = "ruff==1.0.0\nruff==2.0.0\n";
    assert_eq!(pinned_version(content, "ruff", path()).unwrap(), "1.0.0");
  }

  #[test]
  fn test_pinned_version_missing() {
    let err = pinned_version("django==5.0\n", "ruff", Path::new("requirements/local.txt")).unwrap_err();
    assert_eq!(err.to_string(), "Could not find ruff version in requirements/local.txt");
  }

  #[test]
  fn test_pinned_version_without_separator() {
    assert!(pinned_version("ruff>=0.1\n", "ruff", path()).is_err());
  }

  #[test]
  fn test_pinned_version_requires_line_start() {
    assert!(pinned_version("  ruff==1.0.0\n", "ruff", path()).is_err());
  }

  #[test]
  fn test_declared_version() {
    assert_eq!(declared_version(PYPROJECT, "ruff", path()).unwrap(), "0.12.3");
  }

  #[test]
  fn test_declared_version_requires_exact_pin() {
    let manifest = "[project]\ndependencies = [\"ruff>=0.1\", \"ruff-lsp==0.0.1\"]\n";
    assert!(declared_version(manifest, "ruff", path()).is_err());
  }

  #[test]
  fn test_declared_version_missing_project_table() {
    let err = declared_version("[tool.ruff]\nline-length = 88\n", "ruff", Path::new("pyproject.toml")).unwrap_err();
    assert!(err.to_string().contains("pyproject.toml"));
  }

  #[test]
  fn test_declared_version_invalid_toml() {
    assert!(declared_version("[project\n", "ruff", path()).is_err());
  }
}
