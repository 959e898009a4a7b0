mod commands;
mod core;
mod lint;
mod release;
mod utils;

use crate::core::error::{MaintError, print_error};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Maintenance tasks for the project template repository
#[derive(Parser)]
#[command(name = "template-maint")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Project root (defaults to the current directory)
  #[arg(long, global = true, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Show diagnostics on stderr (-v info, -vv debug)
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Align the linter version in the manifest and pre-commit configs with the pinned requirement
  SyncLinter {
    /// Report drift and exit with code 3 instead of rewriting files
    #[arg(long)]
    check: bool,
  },

  /// Publish the changelog entry and release for pull requests merged on one day
  Release {
    /// Merge date to release (YYYY-MM-DD, default: yesterday)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Render and print the release without writing, committing or publishing
    #[arg(long)]
    dry_run: bool,
  },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
  NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_tracing(verbose: u8) {
  let filter = match std::env::var("RUST_LOG") {
    Ok(filter) => filter,
    Err(_) => match verbose {
      0 => "warn".to_string(),
      1 => "info".to_string(),
      _ => "debug".to_string(),
    },
  };

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => handle_error(MaintError::from(e).context("Failed to get current directory")),
    },
  };

  // Build project context once (root + maint.toml)
  let ctx = match crate::core::context::ProjectContext::build(&root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::SyncLinter { check } => commands::run_sync_linter(&ctx, check),
    Commands::Release { date, dry_run } => commands::run_release(&ctx, date, dry_run),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: MaintError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
