//! Error types for tether-core.

use crate::sync::Strategy;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tether-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed command-line input.
    #[error("{0}")]
    InvalidArgument(String),

    /// A revision token resolves to nothing.
    #[error("unknown revision: {0}")]
    UnknownRevision(String),

    /// A path is absent from the resolved revision.
    #[error("path '{path}' does not exist in '{revision}'")]
    PathNotFound {
        /// Revision the path was looked up in.
        revision: String,
        /// Repository-root-relative path.
        path: String,
    },

    /// No remote URL could be determined.
    #[error("cannot resolve remote '{0}'")]
    RemoteResolution(String),

    /// The remote is hosted somewhere other than GitHub or GitLab.
    #[error("unsupported host: {0}")]
    UnsupportedHost(String),

    /// Merge or rebase exited unsuccessfully. Cleanup has already run.
    #[error("{strategy} failed - resolve the repository state manually")]
    Integration {
        /// How the default branch was being integrated.
        strategy: Strategy,
        /// Exit code of the failed git command.
        code: i32,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Git operation error.
    #[error("{0}")]
    Git(#[from] tether_git::Error),
}

impl Error {
    /// Exit code a process should terminate with for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Integration { code, .. } => *code,
            Self::Git(e) => e.exit_code(),
            _ => 1,
        }
    }
}
