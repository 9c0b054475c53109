//! Slash-separated path handling for user-supplied path arguments.
//!
//! [`RelPath`] keeps a path as a list of segments plus the flags that matter
//! when resolving it: whether it was absolute and whether it ended in `/`.
//! Empty segments (`a//b`) are dropped; `.` and `..` are kept so the path can
//! still be handed to the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};

/// A path split into segments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelPath {
    segments: Vec<String>,
    absolute: bool,
    trailing_slash: bool,
}

impl RelPath {
    /// Parse a `/`-separated path.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();

        Self {
            absolute: path.starts_with('/'),
            trailing_slash: path.ends_with('/') && !segments.is_empty(),
            segments,
        }
    }

    /// Whether the path was written with a trailing `/`.
    #[must_use]
    pub const fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Whether the path is exactly `.` or `..`.
    #[must_use]
    pub fn is_dot_or_dotdot(&self) -> bool {
        !self.absolute && matches!(self.segments.as_slice(), [s] if s == "." || s == "..")
    }

    /// Whether the path starts with a `.` or `..` segment.
    #[must_use]
    pub fn is_cwd_relative(&self) -> bool {
        !self.absolute
            && self
                .segments
                .first()
                .is_some_and(|s| s == "." || s == "..")
    }

    /// Same path in directory form (exactly one trailing slash).
    #[must_use]
    pub fn into_dir(mut self) -> Self {
        self.trailing_slash = !self.segments.is_empty();
        self
    }

    /// Same path without a trailing slash.
    #[must_use]
    pub fn without_trailing_slash(mut self) -> Self {
        self.trailing_slash = false;
        self
    }

    /// Split into the directory holding the final segment and that segment.
    ///
    /// A path in directory form, or ending in `.` or `..`, is its own
    /// directory with an empty final segment. A single relative segment
    /// lives in `.`.
    #[must_use]
    pub fn split_last(&self) -> (Self, String) {
        let ends_in_dot = self.segments.last().is_some_and(|s| s == "." || s == "..");
        if self.trailing_slash || ends_in_dot || self.segments.is_empty() {
            return (self.clone().without_trailing_slash(), String::new());
        }

        let (last, parent) = self
            .segments
            .split_last()
            .map(|(last, parent)| (last.clone(), parent.to_vec()))
            .unwrap_or_default();

        let dir = Self {
            segments: parent,
            absolute: self.absolute,
            trailing_slash: false,
        };
        (dir, last)
    }

    /// Resolve against `base`, as a shell `cd` from `base` would.
    #[must_use]
    pub fn to_path(&self, base: &Path) -> PathBuf {
        let mut path = if self.absolute {
            PathBuf::from("/")
        } else {
            base.to_path_buf()
        };
        path.extend(&self.segments);
        path
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            f.write_str("/")?;
        }
        if self.segments.is_empty() && !self.absolute {
            return Ok(());
        }
        f.write_str(&self.segments.join("/"))?;
        if self.trailing_slash {
            f.write_str("/")?;
        }
        Ok(())
    }
}

/// Join a repository prefix (empty or ending in `/`) and a final segment,
/// dropping any trailing slash.
///
/// An empty result names the root tree.
#[must_use]
pub fn join_prefix(prefix: &str, last: &str) -> String {
    let joined = format!("{prefix}{last}");
    joined.trim_end_matches('/').to_string()
}
