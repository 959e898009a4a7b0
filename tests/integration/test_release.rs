//! Integration tests for `template-maint release`
//!
//! These never reach GitHub: they cover environment validation and failure paths that abort
//! before anything is written.

use crate::helpers::{TestProject, run_template_maint, run_template_maint_failing, template_maint};
use anyhow::Result;

#[test]
fn test_release_requires_repository() -> Result<()> {
  let project = TestProject::new("0.12.5", "0.12.5")?;

  let output = template_maint(&project.path, &["release"])
    .env("GITHUB_REF_NAME", "main")
    .output()?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(
    stderr.contains("No github repo set, please set the GITHUB_REPOSITORY environment variable"),
    "stderr: {}",
    stderr
  );

  Ok(())
}

#[test]
fn test_release_requires_branch() -> Result<()> {
  let project = TestProject::new("0.12.5", "0.12.5")?;

  let output = template_maint(&project.path, &["release"])
    .env("GITHUB_REPOSITORY", "acme/template")
    .output()?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("GITHUB_REF_NAME"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_release_rejects_malformed_repository() -> Result<()> {
  let project = TestProject::new("0.12.5", "0.12.5")?;

  let output = template_maint(&project.path, &["release"])
    .env("GITHUB_REPOSITORY", "not-a-slug")
    .env("GITHUB_REF_NAME", "main")
    .output()?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("GITHUB_REPOSITORY"));

  Ok(())
}

#[test]
fn test_release_api_failure_writes_nothing() -> Result<()> {
  let project = TestProject::new("0.12.5", "0.12.5")?;
  // Nothing listens on the discard port; the request fails to connect
  project.write_config(
    r#"
[release]
api_url = "http://127.0.0.1:9"

[lock]
command = ["true"]
"#,
  )?;
  let changelog_before = project.read_file("CHANGELOG.md")?;
  let manifest_before = project.read_file("pyproject.toml")?;

  let output = template_maint(&project.path, &["release", "--date", "2026-10-18"])
    .env("GITHUB_TOKEN", "s3cr3t")
    .env("GITHUB_REPOSITORY", "acme/template")
    .env("GITHUB_REF_NAME", "main")
    .output()?;
  assert_eq!(output.status.code(), Some(2));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("GitHub API request failed"), "stderr: {}", stderr);
  assert!(!stderr.contains("s3cr3t"));

  assert_eq!(project.read_file("CHANGELOG.md")?, changelog_before);
  assert_eq!(project.read_file("pyproject.toml")?, manifest_before);
  assert_eq!(project.commit_count()?, 1);

  Ok(())
}

#[test]
fn test_release_rejects_bad_date() -> Result<()> {
  let project = TestProject::new("0.12.5", "0.12.5")?;
  let output = run_template_maint_failing(&project.path, &["release", "--date", "18/10/2026"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(String::from_utf8_lossy(&output.stderr).contains("YYYY-MM-DD"));
  Ok(())
}

#[test]
fn test_help_lists_both_commands() -> Result<()> {
  let project = TestProject::new("0.12.5", "0.12.5")?;
  let output = run_template_maint(&project.path, &["--help"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("sync-linter"));
  assert!(stdout.contains("release"));
  Ok(())
}
