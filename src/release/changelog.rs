//! Changelog rendering and insertion
//!
//! The changelog fragment is rendered from a Tera template (Jinja-like syntax). The
//! template sees:
//!
//! - `groups`: list of `{ name, pulls }` in section order (Changed, Fixed, Documentation, Updated)
//! - `grouped_pulls`: the same pulls keyed by section name, iterating in section order
//! - `release`: release identifier, e.g. `2026.10.18`
//! - `merged_date`: ISO date the pulls were merged
//!
//! Each pull exposes `number`, `title`, `html_url`, `author` and `labels`.
//!
//! Output of `{{ ... }}` is escaped for `& < > " '` only; `/` is left alone so links survive.

use crate::core::error::{MaintResult, ResultExt};
use crate::release::pulls::{ChangeGroups, PullRequest};
use crate::utils::{Replacement, replace_literal};
use chrono::NaiveDate;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fs;
use std::path::Path;
use tera::{Context, Tera};

/// Used when the configured template file does not exist
pub const DEFAULT_TEMPLATE: &str = r#"{% for group in groups %}{% if group.pulls %}
### {{ group.name }}

{% for pull_request in group.pulls %}- {{ pull_request.title }} ([#{{ pull_request.number }}]({{ pull_request.html_url }}))
{% endfor %}{% endif %}{% endfor %}"#;

const TEMPLATE_NAME: &str = "changelog.md";

#[derive(Debug, Serialize)]
struct GroupView<'a> {
  name: &'static str,
  pulls: &'a [PullRequest],
}

/// Section name -> pulls, serialized as a map in section order
struct GroupedPulls<'a>(&'a [GroupView<'a>]);

impl Serialize for GroupedPulls<'_> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.0.len()))?;
    for view in self.0 {
      map.serialize_entry(view.name, view.pulls)?;
    }
    map.end()
  }
}

/// Markup escaping for rendered values: `& < > " '`
fn escape_markup(input: &str) -> String {
  let mut escaped = String::with_capacity(input.len());
  for c in input.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&#34;"),
      '\'' => escaped.push_str("&#39;"),
      _ => escaped.push(c),
    }
  }
  escaped
}

/// Load the template source, falling back to `DEFAULT_TEMPLATE` when the file is missing
pub fn load_template(path: &Path) -> MaintResult<String> {
  if !path.exists() {
    tracing::warn!(path = %path.display(), "changelog template not found, using built-in template");
    return Ok(DEFAULT_TEMPLATE.to_string());
  }
  fs::read_to_string(path).with_context(|| format!("Failed to read template {}", path.display()))
}

/// Render the markdown fragment for one release
pub fn render(template: &str, groups: &ChangeGroups, release: &str, merged_date: NaiveDate) -> MaintResult<String> {
  let views: Vec<GroupView<'_>> = groups
    .iter()
    .map(|(category, pulls)| GroupView {
      name: category.as_str(),
      pulls,
    })
    .collect();

  let mut context = Context::new();
  context.insert("groups", &views);
  context.insert("grouped_pulls", &GroupedPulls(&views));
  context.insert("release", release);
  context.insert("merged_date", &merged_date.format("%Y-%m-%d").to_string());

  // Tera's built-in HTML escaping also rewrites `/`, which breaks markdown links
  let mut tera = Tera::default();
  tera.add_raw_template(TEMPLATE_NAME, template)?;
  tera.autoescape_on(vec![TEMPLATE_NAME]);
  tera.set_escape_fn(escape_markup);

  Ok(tera.render(TEMPLATE_NAME, &context)?)
}

/// Section text inserted below the marker
pub fn release_section(release: &str, summary: &str) -> String {
  format!("## {}\n{}", release, summary)
}

/// Insert a release section directly after the marker
///
/// Text already below the marker is left untouched, so the newest section always sits
/// first. A missing marker is reported as zero replacements.
pub fn insert_section(changelog: &str, marker: &str, release: &str, summary: &str) -> Replacement {
  let section = release_section(release, summary);
  replace_literal(changelog, marker, &format!("{}\n\n{}", marker, section))
}

/// Insert a release section into the changelog file
pub fn write_changelog(path: &Path, marker: &str, release: &str, summary: &str) -> MaintResult<Replacement> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let updated = insert_section(&content, marker, release, summary);

  if updated.changed() {
    fs::write(path, &updated.content).with_context(|| format!("Failed to write {}", path.display()))?;
  } else {
    tracing::warn!(path = %path.display(), %marker, "changelog marker not found; no section inserted");
  }

  Ok(updated)
}
