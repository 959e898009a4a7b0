pub mod sync;
pub mod versions;

pub use sync::{SyncOutcome, VersionPair, sync_versions};
