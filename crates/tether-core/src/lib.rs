//! # tether-core
//!
//! Core library for tether, providing:
//! - Argument disambiguation into `(revision, path)` pairs
//! - Remote URL normalization and hosting-service URL construction
//! - The default-branch sync state machine
//! - Configuration loading

pub mod config;
pub mod error;
pub mod path;
pub mod remote;
pub mod revision;
pub mod sync;
pub mod url;

#[cfg(test)]
mod test_mocks;

pub use config::Config;
pub use error::{Error, Result};
pub use remote::{Host, RemoteDescriptor};
pub use revision::{ResolvedRef, RevisionDescriptor, RevisionResolver};
pub use sync::{Relationship, Strategy, SyncDefaultBranch, SyncOutcome, SyncState};
pub use url::{BrowseMode, UrlBuilder};
