//! Integration tests for `template-maint sync-linter`

use crate::helpers::{SLUG_DIR, TestProject, pre_commit_config, run_template_maint, run_template_maint_failing};
use anyhow::Result;

#[test]
fn test_sync_updates_manifest_and_pre_commit_configs() -> Result<()> {
  let project = TestProject::new("0.12.4", "0.12.5")?;

  let output = run_template_maint(&project.path, &["sync-linter"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("0.12.4 → 0.12.5"), "stdout: {}", stdout);

  let manifest = project.read_file("pyproject.toml")?;
  assert!(manifest.contains("\"ruff==0.12.5\""));
  assert!(!manifest.contains("ruff==0.12.4"));
  assert!(manifest.contains("\"binaryornot==0.4.4\""));

  assert_eq!(project.read_file(".pre-commit-config.yaml")?, pre_commit_config("0.12.5"));
  assert_eq!(
    project.read_file(&format!("{}/.pre-commit-config.yaml", SLUG_DIR))?,
    pre_commit_config("0.12.5")
  );

  Ok(())
}

#[test]
fn test_sync_in_sync_leaves_files_untouched() -> Result<()> {
  let project = TestProject::new("0.12.5", "0.12.5")?;
  let manifest_before = project.read_file("pyproject.toml")?;
  let hooks_before = project.read_file(".pre-commit-config.yaml")?;

  let output = run_template_maint(&project.path, &["sync-linter"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("already in sync"), "stdout: {}", stdout);

  assert_eq!(project.read_file("pyproject.toml")?, manifest_before);
  assert_eq!(project.read_file(".pre-commit-config.yaml")?, hooks_before);

  Ok(())
}

#[test]
fn test_sync_check_reports_drift_with_validation_exit_code() -> Result<()> {
  let project = TestProject::new("0.12.4", "0.12.5")?;
  let manifest_before = project.read_file("pyproject.toml")?;

  let output = run_template_maint_failing(&project.path, &["sync-linter", "--check"])?;
  assert_eq!(output.status.code(), Some(3));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("drift"), "stdout: {}", stdout);
  assert_eq!(project.read_file("pyproject.toml")?, manifest_before);

  Ok(())
}

#[test]
fn test_sync_check_passes_when_in_sync() -> Result<()> {
  let project = TestProject::new("0.12.5", "0.12.5")?;
  run_template_maint(&project.path, &["sync-linter", "--check"])?;
  Ok(())
}

#[test]
fn test_sync_missing_pin_is_a_user_error() -> Result<()> {
  let project = TestProject::new("0.12.4", "0.12.5")?;
  std::fs::write(
    project.path.join(SLUG_DIR).join("requirements/local.txt"),
    "pytest==8.4.2\n",
  )?;

  let output = run_template_maint_failing(&project.path, &["sync-linter"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Could not find ruff version"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_sync_respects_root_flag() -> Result<()> {
  let project = TestProject::new("0.12.4", "0.12.5")?;
  let elsewhere = tempfile::TempDir::new()?;
  let root = project.path.to_string_lossy().to_string();

  run_template_maint(elsewhere.path(), &["--root", &root, "sync-linter"])?;
  assert!(project.read_file("pyproject.toml")?.contains("ruff==0.12.5"));

  Ok(())
}

#[test]
fn test_sync_accepts_relative_root() -> Result<()> {
  let project = TestProject::new("0.12.4", "0.12.5")?;
  let parent = project.path.parent().expect("tempdir has a parent");
  let name = project.path.file_name().expect("tempdir has a name").to_string_lossy().to_string();

  run_template_maint(parent, &["--root", &name, "sync-linter"])?;
  assert!(project.read_file("pyproject.toml")?.contains("ruff==0.12.5"));

  Ok(())
}

#[test]
fn test_sync_with_custom_linter_config() -> Result<()> {
  let project = TestProject::new("0.12.4", "0.12.5")?;
  project.write_config(
    r#"
[linter]
mirrors = [".pre-commit-config.yaml"]

[lock]
command = ["true"]
"#,
  )?;

  run_template_maint(&project.path, &["sync-linter"])?;
  assert_eq!(project.read_file(".pre-commit-config.yaml")?, pre_commit_config("0.12.5"));
  assert_eq!(
    project.read_file(&format!("{}/.pre-commit-config.yaml", SLUG_DIR))?,
    pre_commit_config("0.12.4")
  );

  Ok(())
}
