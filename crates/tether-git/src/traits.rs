//! Trait abstractions for git operations.
//!
//! This module defines the `GitOps` trait, the single seam through which the
//! resolver, URL builder and sync engine observe and mutate a repository.
//! Tests substitute a recording mock.

use std::path::Path;

use git2::Oid;

use crate::{ObjectKind, Result};

/// Trait for git repository operations.
///
/// This trait abstracts git operations, allowing for:
/// - Dependency injection in the browse and sync services
/// - Deterministic tests with a fake repository
///
/// All calls are blocking. Mutating operations inherit the caller's
/// standard streams so git's own progress and conflict output reach the user.
#[allow(clippy::missing_errors_doc)]
pub trait GitOps {
    // === Repository Info ===

    /// Get the working directory path.
    fn workdir(&self) -> Option<&Path>;

    /// Repository-root-relative prefix of `dir`.
    ///
    /// Empty for the root itself, otherwise ends in `/` (like
    /// `git rev-parse --show-prefix`). `dir` must exist.
    fn prefix_of(&self, dir: &Path) -> Result<String>;

    /// Get the current branch name, or `None` when HEAD is detached.
    fn current_branch(&self) -> Result<Option<String>>;

    /// The checked-out ref: branch name, or full commit hash when detached.
    fn head_ref(&self) -> Result<String>;

    // === Revision queries ===

    /// Short branch or tag name that `rev` refers to, if any.
    ///
    /// `HEAD` yields the current branch; a detached HEAD or a plain hash
    /// yields `None`.
    fn symbolic_name(&self, rev: &str) -> Result<Option<String>>;

    /// Full object hash for `rev`, peeling annotated tags to their commit.
    fn resolve_commitish(&self, rev: &str) -> Result<String>;

    /// Kind of the object named by `spec` (`<rev>` or `<rev>:<path>`).
    fn object_kind(&self, spec: &str) -> Result<ObjectKind>;

    /// Commit a ref points to.
    fn ref_commit(&self, name: &str) -> Result<Oid>;

    /// Find the merge base of two commits.
    fn merge_base(&self, one: Oid, two: Oid) -> Result<Oid>;

    // === Configuration ===

    /// Remote-tracking ref configured as `branch`'s upstream (`origin/main`).
    fn upstream_of(&self, branch: &str) -> Result<Option<String>>;

    /// Value of `branch.<branch>.remote`.
    fn branch_remote(&self, branch: &str) -> Option<String>;

    /// URL configured for the named remote.
    fn remote_url(&self, name: &str) -> Result<String>;

    // === Working Directory ===

    /// Check whether tracked files have uncommitted changes.
    fn is_dirty(&self) -> Result<bool>;

    // === Porcelain (subprocess) ===

    /// `git fetch --prune`.
    fn fetch_prune(&self) -> Result<()>;

    /// `git stash push -m <message>`.
    fn stash_push(&self, message: &str) -> Result<()>;

    /// `git stash pop`.
    fn stash_pop(&self) -> Result<()>;

    /// `git checkout <target>` (branch name or commit hash).
    fn switch(&self, target: &str) -> Result<()>;

    /// `git merge <target>` into the current branch.
    fn merge(&self, target: &str) -> Result<()>;

    /// `git rebase <target>` of the current branch.
    fn rebase(&self, target: &str) -> Result<()>;
}
