//! CLI commands for template-maint
//!
//! - **lint**: keep the linter version in the manifest and pre-commit configs in line with
//!   the pinned requirement (`sync-linter`)
//! - **release**: daily changelog entry, version bump, tag and hosted release (`release`)
//!
//! Both commands take `&ProjectContext` built once in main.rs.

pub mod lint;
pub mod release;

pub use lint::run_sync_linter;
pub use release::run_release;
