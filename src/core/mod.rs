//! Shared building blocks for the maintenance commands
//!
//! - **config**: optional maint.toml with defaults for the template repository layout
//! - **context**: project root + config, and the CI release environment
//! - **error**: error types with contextual help messages and exit codes
//! - **lock**: lockfile regeneration through the project's dependency manager
//! - **vcs**: git operations (SystemGit) behind the `ReleaseVcs` seam

pub mod config;
pub mod context;
pub mod error;
pub mod lock;
pub mod vcs;
