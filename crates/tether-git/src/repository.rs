//! Repository wrapper providing high-level git operations.

use std::fmt;
use std::path::Path;

use git2::{BranchType, ErrorCode, ObjectType, Oid, StatusOptions};

use crate::GitOps;
use crate::error::{Error, Result};
use crate::exec::run_git;

/// The addressable content types a revision can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A commit.
    Commit,
    /// A directory snapshot.
    Tree,
    /// A file.
    Blob,
}

impl ObjectKind {
    /// Lowercase name, as git and the hosting services spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// High-level wrapper around a git repository.
pub struct Repository {
    inner: git2::Repository,
}

impl Repository {
    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                Error::NotARepository
            } else {
                Error::Git2(e)
            }
        })?;
        Ok(Self { inner })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    fn require_workdir(&self) -> Result<&Path> {
        self.inner.workdir().ok_or(Error::BareRepository)
    }

    fn config_value(&self, key: &str) -> Option<String> {
        self.inner.config().ok()?.get_string(key).ok()
    }

    fn git(&self, args: &[&str]) -> Result<()> {
        run_git(self.require_workdir()?, args)
    }
}

impl GitOps for Repository {
    fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    fn prefix_of(&self, dir: &Path) -> Result<String> {
        let root = self.require_workdir()?.canonicalize()?;
        let dir = dir.canonicalize()?;
        let relative = dir
            .strip_prefix(&root)
            .map_err(|_| Error::OutsideRepository(dir.clone()))?;

        let mut prefix = String::new();
        for component in relative.components() {
            prefix.push_str(&component.as_os_str().to_string_lossy());
            prefix.push('/');
        }
        Ok(prefix)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let head = self.inner.head()?;
        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(String::from))
    }

    fn head_ref(&self) -> Result<String> {
        if let Some(branch) = self.current_branch()? {
            return Ok(branch);
        }
        Ok(self.inner.head()?.peel_to_commit()?.id().to_string())
    }

    fn symbolic_name(&self, rev: &str) -> Result<Option<String>> {
        let (_, reference) = self
            .inner
            .revparse_ext(rev)
            .map_err(|_| Error::UnknownRevision(rev.into()))?;

        let Some(reference) = reference else {
            return Ok(None);
        };

        // HEAD resolves to the branch it points at; a detached HEAD stays "HEAD".
        let resolved = reference.resolve()?;
        if !(resolved.is_branch() || resolved.is_tag() || resolved.is_remote()) {
            return Ok(None);
        }
        Ok(resolved.shorthand().map(String::from))
    }

    fn resolve_commitish(&self, rev: &str) -> Result<String> {
        let object = self
            .inner
            .revparse_single(rev)
            .map_err(|_| Error::UnknownRevision(rev.into()))?;

        let id = object
            .peel(ObjectType::Commit)
            .map_or_else(|_| object.id(), |commit| commit.id());
        Ok(id.to_string())
    }

    fn object_kind(&self, spec: &str) -> Result<ObjectKind> {
        let mut object = self
            .inner
            .revparse_single(spec)
            .map_err(|_| Error::ObjectNotFound(spec.into()))?;

        if object.kind() == Some(ObjectType::Tag) {
            object = object.peel(ObjectType::Any)?;
        }

        match object.kind() {
            Some(ObjectType::Commit) => Ok(ObjectKind::Commit),
            Some(ObjectType::Tree) => Ok(ObjectKind::Tree),
            Some(ObjectType::Blob) => Ok(ObjectKind::Blob),
            _ => Err(Error::ObjectNotFound(spec.into())),
        }
    }

    fn ref_commit(&self, name: &str) -> Result<Oid> {
        let object = self
            .inner
            .revparse_single(name)
            .map_err(|_| Error::UnknownRevision(name.into()))?;
        Ok(object.peel_to_commit()?.id())
    }

    fn merge_base(&self, one: Oid, two: Oid) -> Result<Oid> {
        Ok(self.inner.merge_base(one, two)?)
    }

    fn upstream_of(&self, branch: &str) -> Result<Option<String>> {
        let local = self
            .inner
            .find_branch(branch, BranchType::Local)
            .map_err(|_| Error::BranchNotFound(branch.into()))?;

        match local.upstream() {
            Ok(upstream) => Ok(upstream.name()?.map(String::from)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn branch_remote(&self, branch: &str) -> Option<String> {
        self.config_value(&format!("branch.{branch}.remote"))
    }

    fn remote_url(&self, name: &str) -> Result<String> {
        let remote = self
            .inner
            .find_remote(name)
            .map_err(|_| Error::RemoteNotFound(name.into()))?;

        remote
            .url()
            .map(String::from)
            .ok_or_else(|| Error::RemoteNotFound(name.into()))
    }

    fn is_dirty(&self) -> Result<bool> {
        // Untracked files are left alone by `git stash`, so they don't count.
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);

        let statuses = self.inner.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    fn fetch_prune(&self) -> Result<()> {
        self.git(&["fetch", "--prune"])
    }

    fn stash_push(&self, message: &str) -> Result<()> {
        self.git(&["stash", "push", "-m", message])
    }

    fn stash_pop(&self) -> Result<()> {
        self.git(&["stash", "pop"])
    }

    fn switch(&self, target: &str) -> Result<()> {
        self.git(&["checkout", target])
    }

    fn merge(&self, target: &str) -> Result<()> {
        self.git(&["merge", target])
    }

    fn rebase(&self, target: &str) -> Result<()> {
        self.git(&["rebase", target])
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.git_dir())
            .finish()
    }
}
