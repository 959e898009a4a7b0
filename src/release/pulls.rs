//! Merged pull requests and their grouping into changelog categories

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A pull request as consumed by the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
  pub number: u64,
  pub title: String,
  pub html_url: String,
  /// Login of the author, when the account still exists
  pub author: Option<String>,
  /// `None` for pull requests closed without merging
  pub merged_at: Option<DateTime<Utc>>,
  pub labels: BTreeSet<String>,
}

impl PullRequest {
  pub fn has_label(&self, label: &str) -> bool {
    self.labels.contains(label)
  }

  /// Whether this pull request was merged on `date` (UTC)
  pub fn merged_on(&self, date: NaiveDate) -> bool {
    self.merged_at.is_some_and(|at| at.date_naive() == date)
  }
}

/// Changelog section a pull request is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeCategory {
  Changed,
  Fixed,
  Documentation,
  Updated,
}

impl ChangeCategory {
  /// Sections in the order they are rendered
  pub const ALL: [ChangeCategory; 4] = [
    ChangeCategory::Changed,
    ChangeCategory::Fixed,
    ChangeCategory::Documentation,
    ChangeCategory::Updated,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      ChangeCategory::Changed => "Changed",
      ChangeCategory::Fixed => "Fixed",
      ChangeCategory::Documentation => "Documentation",
      ChangeCategory::Updated => "Updated",
    }
  }

  /// Pick the category for a set of labels: update > bug > docs > everything else
  pub fn from_labels(labels: &BTreeSet<String>) -> Self {
    if labels.contains("update") {
      ChangeCategory::Updated
    } else if labels.contains("bug") {
      ChangeCategory::Fixed
    } else if labels.contains("docs") {
      ChangeCategory::Documentation
    } else {
      ChangeCategory::Changed
    }
  }

  fn index(self) -> usize {
    match self {
      ChangeCategory::Changed => 0,
      ChangeCategory::Fixed => 1,
      ChangeCategory::Documentation => 2,
      ChangeCategory::Updated => 3,
    }
  }
}

/// Pull requests grouped by category, preserving the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeGroups {
  groups: [Vec<PullRequest>; 4],
}

impl ChangeGroups {
  /// Group pull requests, dropping those labeled `skip_label`
  pub fn classify<I>(pulls: I, skip_label: &str) -> Self
  where
    I: IntoIterator<Item = PullRequest>,
  {
    let mut grouped = Self::default();
    for pull in pulls {
      if pull.has_label(skip_label) {
        tracing::debug!(number = pull.number, "skipping infrastructure pull request");
        continue;
      }
      let category = ChangeCategory::from_labels(&pull.labels);
      grouped.groups[category.index()].push(pull);
    }
    grouped
  }

  pub fn get(&self, category: ChangeCategory) -> &[PullRequest] {
    &self.groups[category.index()]
  }

  /// Categories with their pull requests, in render order
  pub fn iter(&self) -> impl Iterator<Item = (ChangeCategory, &[PullRequest])> {
    ChangeCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
  }

  pub fn is_empty(&self) -> bool {
    self.groups.iter().all(Vec::is_empty)
  }

  pub fn len(&self) -> usize {
    self.groups.iter().map(Vec::len).sum()
  }
}
