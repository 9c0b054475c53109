//! Disambiguation of browse arguments into a `(revision, path)` pair.
//!
//! Accepted shapes, checked in this order:
//!
//! | input             | revision   | path                         |
//! |-------------------|------------|------------------------------|
//! | *(nothing)*       | -          | -                            |
//! | `<rev> <path>`    | `<rev>`    | working-tree relative        |
//! | `:/<regex>`       | whole arg  | -                            |
//! | `:<anything>`     | rejected   |                              |
//! | `<rev>:<path>`    | `<rev>`    | revision relative            |
//! | `<existing path>` | `HEAD`     | working-tree relative        |
//! | `<rev>`           | whole arg  | -                            |
//!
//! Revision-relative paths are taken from the repository root unless they
//! start with `./` or `../`, in which case they are anchored at the current
//! directory. Working-tree paths are always anchored at the current
//! directory.

use std::fmt;
use std::path::PathBuf;

use tether_git::{GitOps, ObjectKind};

use crate::error::{Error, Result};
use crate::path::{RelPath, join_prefix};

const CHECKOUT_TIP: &str = "HEAD";

/// What a revision resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedRef {
    /// A branch or tag name, usable as-is in a URL.
    Named(String),
    /// A full object hash.
    Hash(String),
}

impl ResolvedRef {
    /// The name or hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(s) | Self::Hash(s) => s,
        }
    }

    /// Whether this is a branch or tag name.
    #[must_use]
    pub const fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

impl fmt::Display for ResolvedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated revision, optionally narrowed to a path inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionDescriptor {
    /// The revision token as the user wrote it (or `HEAD` when implied).
    pub requested: String,
    /// Branch/tag name, or full hash when the revision has no name.
    pub resolved: ResolvedRef,
    /// Repository-root-relative path without leading or trailing slash.
    ///
    /// `Some("")` is the root tree; `None` means the revision itself.
    pub path: Option<String>,
}

impl RevisionDescriptor {
    /// `<rev>` or `<rev>:<path>`, as git spells the object.
    #[must_use]
    pub fn object_spec(&self) -> String {
        match &self.path {
            Some(path) => format!("{}:{path}", self.resolved),
            None => self.resolved.to_string(),
        }
    }

    /// The kind of page to browse for this revision.
    ///
    /// A named ref without a path lands on its file tree rather than on the
    /// tip commit.
    ///
    /// # Errors
    /// Returns error if the object no longer resolves.
    pub fn object_kind<G: GitOps>(&self, repo: &G) -> Result<ObjectKind> {
        let kind = repo
            .object_kind(&self.object_spec())
            .map_err(|_| self.not_found())?;

        if kind == ObjectKind::Commit && self.path.is_none() && self.resolved.is_named() {
            return Ok(ObjectKind::Tree);
        }
        Ok(kind)
    }

    fn not_found(&self) -> Error {
        match &self.path {
            Some(path) => Error::PathNotFound {
                revision: self.requested.clone(),
                path: path.clone(),
            },
            None => Error::UnknownRevision(self.requested.clone()),
        }
    }
}

/// How a path argument should be anchored.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathArg {
    /// From `<rev>:<path>`.
    InRevision(String),
    /// A filesystem path, from `<rev> <path>` or a bare path.
    InWorkingTree(String),
}

/// Arguments split into revision and path, not yet checked against git.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Request {
    revision: String,
    path: Option<PathArg>,
}

/// Resolves browse arguments against a repository.
pub struct RevisionResolver<'a, G: GitOps> {
    repo: &'a G,
    cwd: PathBuf,
}

impl<'a, G: GitOps> RevisionResolver<'a, G> {
    /// Create a resolver for arguments given in `cwd`.
    #[must_use]
    pub fn new(repo: &'a G, cwd: impl Into<PathBuf>) -> Self {
        Self {
            repo,
            cwd: cwd.into(),
        }
    }

    /// Resolve positional arguments.
    ///
    /// Returns `None` when no revision was requested.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] for argument shapes that can't be parsed
    /// - [`Error::UnknownRevision`] if the revision names nothing
    /// - [`Error::PathNotFound`] if the path is absent from the revision
    pub fn resolve(&self, args: &[String]) -> Result<Option<RevisionDescriptor>> {
        let Some(request) = self.parse(args)? else {
            return Ok(None);
        };

        let resolved = self.resolve_ref(&request.revision)?;

        let not_found = |path: &str| Error::PathNotFound {
            revision: request.revision.clone(),
            path: path.to_string(),
        };

        let path = match &request.path {
            None => None,
            Some(PathArg::InRevision(raw)) => {
                Some(self.revision_relative(raw).map_err(|_| not_found(raw))?)
            }
            Some(PathArg::InWorkingTree(raw)) => {
                Some(self.working_tree_relative(raw).map_err(|_| not_found(raw))?)
            }
        };

        if let Some(path) = &path {
            self.repo
                .object_kind(&format!("{resolved}:{path}"))
                .map_err(|_| not_found(path))?;
        }

        log::debug!("resolved {:?} to {resolved} path={path:?}", request.revision);

        Ok(Some(RevisionDescriptor {
            requested: request.revision,
            resolved,
            path,
        }))
    }

    fn parse(&self, args: &[String]) -> Result<Option<Request>> {
        match args {
            [] => Ok(None),
            [arg] => self.parse_single(arg).map(Some),
            [revision, path] => {
                if revision.contains(':') {
                    return Err(Error::InvalidArgument(format!(
                        "'{revision}': use either <rev>:<path> or <rev> <path>, not both"
                    )));
                }
                Ok(Some(Request {
                    revision: revision.clone(),
                    path: Some(PathArg::InWorkingTree(path.clone())),
                }))
            }
            _ => Err(Error::InvalidArgument(
                "too many arguments - expected [<rev>] [<path>]".into(),
            )),
        }
    }

    fn parse_single(&self, arg: &str) -> Result<Request> {
        let whole = || Request {
            revision: arg.to_string(),
            path: None,
        };

        // `:/<regex>` searches commit messages
        if arg.starts_with(":/") {
            return Ok(whole());
        }

        if arg.starts_with(':') {
            return Err(Error::InvalidArgument(format!(
                "'{arg}' names an index entry - use <rev>:<path>"
            )));
        }

        if let Some((revision, path)) = arg.rsplit_once(':') {
            return Ok(Request {
                revision: revision.to_string(),
                path: Some(PathArg::InRevision(path.to_string())),
            });
        }

        if self.cwd.join(arg).exists() {
            return Ok(Request {
                revision: CHECKOUT_TIP.to_string(),
                path: Some(PathArg::InWorkingTree(arg.to_string())),
            });
        }

        Ok(whole())
    }

    fn resolve_ref(&self, revision: &str) -> Result<ResolvedRef> {
        let unknown = |_: tether_git::Error| Error::UnknownRevision(revision.to_string());

        if let Some(name) = self.repo.symbolic_name(revision).map_err(unknown)? {
            return Ok(ResolvedRef::Named(name));
        }
        self.repo
            .resolve_commitish(revision)
            .map(ResolvedRef::Hash)
            .map_err(unknown)
    }

    /// Path from `<rev>:<path>`: root-relative unless it starts with `./` or `../`.
    fn revision_relative(&self, raw: &str) -> Result<String> {
        let mut path = RelPath::parse(raw);
        if path.is_dot_or_dotdot() {
            path = path.into_dir();
        }

        if !path.is_cwd_relative() {
            return Ok(path.without_trailing_slash().to_string());
        }
        self.anchor(&path)
    }

    /// Path naming something on disk, relative to the current directory.
    fn working_tree_relative(&self, raw: &str) -> Result<String> {
        let mut path = RelPath::parse(raw);
        if path.to_path(&self.cwd).is_dir() {
            path = path.into_dir();
        }
        self.anchor(&path)
    }

    /// Root-relative form of a path anchored at the current directory.
    fn anchor(&self, path: &RelPath) -> Result<String> {
        let (dir, last) = path.split_last();
        let prefix = self.repo.prefix_of(&dir.to_path(&self.cwd))?;
        Ok(join_prefix(&prefix, &last))
    }
}
