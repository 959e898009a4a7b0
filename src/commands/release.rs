//! Release command implementation
//!
//! One invocation publishes at most one release, for the pull requests merged on a single day:
//! fetch -> classify -> render -> changelog -> version bump -> lockfile -> commit/tag/push -> publish.
//! A day without releasable pull requests is a successful no-op.

use crate::core::context::{ProjectContext, ReleaseEnv, redact_url};
use crate::core::error::MaintResult;
use crate::core::lock::{CommandLock, LockOutcome, LockRunner};
use crate::core::vcs::{ReleaseVcs, SystemGit};
use crate::release::changelog::{load_template, render, write_changelog};
use crate::release::version::{release_id, update_version, yesterday};
use crate::release::{ChangeGroups, GitHubClient, HostingApi};
use chrono::NaiveDate;
use std::path::PathBuf;

/// What a release run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
  /// No pull request was merged on the target date
  NoMergedPulls,
  /// Pull requests were merged, but all of them were excluded
  NothingToRelease { skipped: usize },
  /// Dry run: the release that would have been published
  Planned { release: String, summary: String },
  /// Release committed, tagged, pushed and published
  Released {
    release: String,
    summary: String,
    lock: LockOutcome,
  },
}

/// Run the release command against GitHub and the local git checkout
pub fn run_release(ctx: &ProjectContext, date: Option<NaiveDate>, dry_run: bool) -> MaintResult<()> {
  // Environment problems surface before any network or file work
  let env = ReleaseEnv::from_env()?;
  let date = date.unwrap_or_else(yesterday);

  let host = GitHubClient::new(&ctx.config.release.api_url, &env)?;
  let vcs = SystemGit::open(&ctx.root)?;
  let lock = CommandLock::new(ctx.config.lock.command.clone());

  let outcome = release_day(ctx, &env, &host, &vcs, &lock, date, dry_run)?;
  report(&outcome);
  Ok(())
}

/// The release pipeline for pull requests merged on `date`
pub fn release_day(
  ctx: &ProjectContext,
  env: &ReleaseEnv,
  host: &dyn HostingApi,
  vcs: &dyn ReleaseVcs,
  lock: &dyn LockRunner,
  date: NaiveDate,
  dry_run: bool,
) -> MaintResult<ReleaseOutcome> {
  let config = &ctx.config.release;

  let pulls = host.merged_pulls(date, config.page_size)?;
  if pulls.is_empty() {
    tracing::info!(%date, "no pull requests merged; nothing to release");
    return Ok(ReleaseOutcome::NoMergedPulls);
  }

  let merged = pulls.len();
  let groups = ChangeGroups::classify(pulls, &config.skip_label);
  if groups.is_empty() {
    tracing::info!(%date, merged, "all merged pull requests are excluded; nothing to release");
    return Ok(ReleaseOutcome::NothingToRelease { skipped: merged });
  }

  let release = release_id(date);
  let template = load_template(&ctx.path(&config.template))?;
  let summary = render(&template, &groups, &release, date)?;
  tracing::info!(%release, pulls = groups.len(), "rendered changelog fragment");

  let push_url = env.push_url(&config.git_host, config.remote.as_deref());

  if dry_run {
    print_plan(ctx, env, &release, &summary, &push_url);
    return Ok(ReleaseOutcome::Planned { release, summary });
  }

  println!("📝 Writing release {} to {}", release, config.changelog.display());
  write_changelog(&ctx.path(&config.changelog), &config.marker, &release, &summary)?;

  println!("🔖 Bumping {} to {}", config.manifest.display(), release);
  update_version(&ctx.path(&config.manifest), &release)?;

  let lock_outcome = lock.regenerate(&ctx.root);

  let paths = staged_paths(ctx);
  println!("📦 Committing and tagging {}", release);
  vcs.commit_tag_push(&paths, &release, &push_url, &env.branch)?;

  println!("🚀 Publishing release {} on {}", release, env.repository);
  host.create_release(&release, &release, &summary)?;

  Ok(ReleaseOutcome::Released {
    release,
    summary,
    lock: lock_outcome,
  })
}

// Changelog and manifest always; the lockfile only when the lock command produced one
fn staged_paths(ctx: &ProjectContext) -> Vec<PathBuf> {
  let config = &ctx.config.release;
  let mut paths = vec![config.changelog.clone(), config.manifest.clone()];

  if ctx.path(&config.lockfile).exists() {
    paths.push(config.lockfile.clone());
  } else {
    tracing::warn!(lockfile = %config.lockfile.display(), "lockfile not found; not staged");
  }

  paths
}

fn print_plan(ctx: &ProjectContext, env: &ReleaseEnv, release: &str, summary: &str, push_url: &str) {
  let config = &ctx.config.release;

  println!("\n🔍 DRY-RUN MODE - No changes will be made\n");
  println!("## {}", release);
  println!("{}", summary);
  println!("   Would insert the section below {} in {}", config.marker, config.changelog.display());
  println!("   Would set version = \"{}\" in {}", release, config.manifest.display());
  println!("   Would run: {}", ctx.config.lock.command.join(" "));
  println!("   Would commit and tag 'Release {}'", release);
  println!("   Would push {} (with tags) to {}", env.branch, redact_url(push_url));
  println!("   Would publish release {} on {}", release, env.repository);
}

fn report(outcome: &ReleaseOutcome) {
  match outcome {
    ReleaseOutcome::NoMergedPulls | ReleaseOutcome::NothingToRelease { .. } | ReleaseOutcome::Planned { .. } => {}
    ReleaseOutcome::Released { release, lock, .. } => {
      if !lock.is_updated() {
        println!("⚠️  Lockfile not regenerated; commit it by hand once the lock command works");
      }
      println!("🎉 Released {}", release);
    }
  }
}
