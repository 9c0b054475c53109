//! Error types for tether-git.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not inside a git repository.
    #[error("not a git repository")]
    NotARepository,

    /// Repository has no working directory.
    #[error("cannot run in a bare repository")]
    BareRepository,

    /// A revision token did not resolve to any object.
    #[error("unknown revision: {0}")]
    UnknownRevision(String),

    /// A `<rev>:<path>` expression did not name an object.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// A directory lies outside the repository working tree.
    #[error("{} is outside the repository", .0.display())]
    OutsideRepository(PathBuf),

    /// Branch not found.
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// Remote not found.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// A `git` subprocess exited unsuccessfully.
    #[error("`git {command}` failed{}", .code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    CommandFailed {
        /// Arguments passed to git, space separated.
        command: String,
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
    },

    /// IO error (spawning git, canonicalizing paths).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

impl Error {
    /// Exit code a process should terminate with for this error.
    ///
    /// Failed subprocesses propagate their own code; everything else is 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } => code.unwrap_or(1),
            _ => 1,
        }
    }
}
