//! # tether-git
//!
//! Repository access layer for tether. Read-only queries (revision parsing,
//! object types, merge bases, configuration) go through git2-rs; operations
//! whose output and exit status belong to the user (fetch, stash, checkout,
//! merge, rebase) run the `git` executable with inherited standard streams.

mod error;
mod exec;
mod repository;
mod traits;

pub use error::{Error, Result};
pub use git2::Oid;
pub use repository::{ObjectKind, Repository};
pub use traits::GitOps;
