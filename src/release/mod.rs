//! Daily changelog and release generation
//!
//! A release covers the pull requests merged on one calendar day (UTC). The pipeline lives in
//! `commands::release`; the pieces it is built from live here:
//!
//! - **pulls**: pull-request model and grouping into Changed / Fixed / Documentation / Updated
//! - **github**: `HostingApi` and its GitHub REST implementation
//! - **changelog**: Tera rendering and insertion below the changelog marker
//! - **version**: `YYYY.MM.DD` identifiers and the manifest version bump

pub mod changelog;
pub mod github;
pub mod pulls;
pub mod version;

pub use github::{GitHubClient, HostingApi};
pub use pulls::ChangeGroups;
