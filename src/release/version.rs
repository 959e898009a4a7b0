//! Calendar release identifiers and the manifest version bump

use crate::core::error::{MaintResult, ResultExt};
use crate::utils::{Replacement, replace_regex};
use chrono::{Local, NaiveDate};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// `version = "X.Y.Z"` on its own line; calendar versions (`2026.10.18`) match too
static VERSION_LINE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"\nversion = "\d+\.\d+\.\d+"\n"#).expect("Invalid version line regex"));

/// Release identifier for pulls merged on `date`, e.g. `2026.10.18`
pub fn release_id(date: NaiveDate) -> String {
  date.format("%Y.%m.%d").to_string()
}

/// The day before `today`
pub fn previous_day(today: NaiveDate) -> NaiveDate {
  today.pred_opt().unwrap_or(today)
}

/// Yesterday in the local timezone of the machine running the release
pub fn yesterday() -> NaiveDate {
  previous_day(Local::now().date_naive())
}

/// Replace the manifest's version line with `release`
pub fn bump_version(manifest: &str, release: &str) -> Replacement {
  replace_regex(manifest, &VERSION_LINE, &format!("\nversion = \"{}\"\n", release))
}

/// Rewrite the version line of the manifest file
pub fn update_version(path: &Path, release: &str) -> MaintResult<Replacement> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let updated = bump_version(&content, release);

  if updated.changed() {
    fs::write(path, &updated.content).with_context(|| format!("Failed to write {}", path.display()))?;
  } else {
    tracing::warn!(path = %path.display(), "no `version = \"X.Y.Z\"` line found; version not bumped");
  }

  Ok(updated)
}
