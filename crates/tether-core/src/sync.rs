//! Sync engine for the default branch.
//!
//! This module contains the core logic for `git-sync-default`, which brings
//! the local default branch up to date with its remote-tracking ref:
//!
//! ```text
//! fetch --prune
//!   -> compare local, remote and merge-base commits
//!      up to date | ahead -> done, repository untouched
//!      behind             -> [stash] [checkout default] merge  [checkout back] [stash pop]
//!      diverged           -> [stash] [checkout default] rebase [checkout back] [stash pop]
//! ```
//!
//! Checking the original ref back out and popping the stash run on the way
//! out no matter how the merge or rebase went. A conflicted rebase therefore
//! still gets the stash popped on top of it, exactly as running the same git
//! commands by hand would.

use std::fmt;

use chrono::Local;
use tether_git::{GitOps, Oid};

use crate::error::{Error, Result};

/// Remote used when the default branch has neither upstream nor remote.
const FALLBACK_REMOTE: &str = "origin";

/// How the local default branch relates to its remote-tracking ref.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Same commit.
    UpToDate,
    /// Local has commits the remote doesn't; remote has nothing new.
    Ahead,
    /// Remote has commits local doesn't; local has nothing new.
    Behind,
    /// Both sides have new commits.
    Diverged,
}

/// How remote changes are brought into the local default branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Fast-forward style merge for a branch that is strictly behind.
    Merge,
    /// Replay local commits on top of the remote for diverged histories.
    Rebase,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => f.write_str("merge"),
            Self::Rebase => f.write_str("rebase"),
        }
    }
}

/// Commits compared to classify a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncState {
    /// Local default branch tip.
    pub local: Oid,
    /// Remote-tracking ref tip.
    pub remote: Oid,
    /// Nearest common ancestor of the two.
    pub merge_base: Oid,
}

impl SyncState {
    /// Classify the relationship between local and remote.
    #[must_use]
    pub fn classify(&self) -> Relationship {
        if self.local == self.remote {
            Relationship::UpToDate
        } else if self.merge_base == self.remote {
            Relationship::Ahead
        } else if self.merge_base == self.local {
            Relationship::Behind
        } else {
            Relationship::Diverged
        }
    }
}

/// Result of a sync operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Local already matches the remote.
    UpToDate,
    /// Local is ahead; nothing was changed.
    Ahead,
    /// Remote changes were merged or rebased in.
    Integrated {
        /// How they were integrated.
        strategy: Strategy,
        /// Whether local changes were stashed and popped around it.
        stashed: bool,
    },
}

/// Syncs one branch with its remote-tracking ref.
pub struct SyncDefaultBranch<'a, G: GitOps> {
    repo: &'a G,
    branch: String,
}

impl<'a, G: GitOps> SyncDefaultBranch<'a, G> {
    /// Create a sync for `branch`.
    #[must_use]
    pub fn new(repo: &'a G, branch: impl Into<String>) -> Self {
        Self {
            repo,
            branch: branch.into(),
        }
    }

    /// The branch being synced.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// The remote-tracking ref the branch is compared against.
    ///
    /// The configured upstream, else `<branch remote or origin>/<branch>`.
    ///
    /// # Errors
    /// Returns error if the branch doesn't exist locally.
    pub fn remote_ref(&self) -> Result<String> {
        if let Some(upstream) = self.repo.upstream_of(&self.branch)? {
            return Ok(upstream);
        }

        let remote = self
            .repo
            .branch_remote(&self.branch)
            .unwrap_or_else(|| FALLBACK_REMOTE.into());
        Ok(format!("{remote}/{}", self.branch))
    }

    /// Read the commits to compare.
    ///
    /// # Errors
    /// Returns error if either ref can't be resolved.
    pub fn state(&self, remote_ref: &str) -> Result<SyncState> {
        let local = self.repo.ref_commit(&self.branch)?;
        let remote = self.repo.ref_commit(remote_ref)?;
        let merge_base = self.repo.merge_base(local, remote)?;

        Ok(SyncState {
            local,
            remote,
            merge_base,
        })
    }

    /// Fetch, classify and integrate if needed.
    ///
    /// # Errors
    /// - A failed fetch aborts before anything is touched.
    /// - A failed merge or rebase is returned as [`Error::Integration`] after
    ///   the original checkout and any stash have been restored.
    pub fn run(&self) -> Result<SyncOutcome> {
        self.repo.fetch_prune()?;

        let remote_ref = self.remote_ref()?;
        let state = self.state(&remote_ref)?;
        let relationship = state.classify();

        log::debug!(
            "{} local={} remote={remote_ref}@{} base={} -> {relationship:?}",
            self.branch,
            state.local,
            state.remote,
            state.merge_base
        );

        match relationship {
            Relationship::UpToDate => Ok(SyncOutcome::UpToDate),
            Relationship::Ahead => Ok(SyncOutcome::Ahead),
            Relationship::Behind => self.integrate(Strategy::Merge, &remote_ref),
            Relationship::Diverged => self.integrate(Strategy::Rebase, &remote_ref),
        }
    }

    fn integrate(&self, strategy: Strategy, target: &str) -> Result<SyncOutcome> {
        let stash = StashGuard::push(self.repo)?;
        let checkout = CheckoutGuard::switch(self.repo, &self.branch)?;

        let result = match strategy {
            Strategy::Merge => self.repo.merge(target),
            Strategy::Rebase => self.repo.rebase(target),
        };

        // Original ref first, stash last.
        drop(checkout);
        let stashed = stash.active;
        drop(stash);

        result.map_err(|e| Error::Integration {
            strategy,
            code: e.exit_code(),
        })?;

        Ok(SyncOutcome::Integrated { strategy, stashed })
    }
}

/// Stashes local changes and pops them when dropped.
struct StashGuard<'a, G: GitOps> {
    repo: &'a G,
    active: bool,
}

impl<'a, G: GitOps> StashGuard<'a, G> {
    /// Stash if the working tree is dirty. A failed stash is logged and the
    /// sync carries on with the changes in place.
    fn push(repo: &'a G) -> Result<Self> {
        let mut active = false;

        if repo.is_dirty()? {
            let message = format!("git-sync-default {}", Local::now().to_rfc3339());
            match repo.stash_push(&message) {
                Ok(()) => active = true,
                Err(e) => log::warn!("could not stash local changes: {e}"),
            }
        }

        Ok(Self { repo, active })
    }
}

impl<G: GitOps> Drop for StashGuard<'_, G> {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.repo.stash_pop() {
                log::warn!("could not restore stashed changes ({e}) - they are still in `git stash list`");
            }
        }
    }
}

/// Checks out a branch and returns to the original ref when dropped.
struct CheckoutGuard<'a, G: GitOps> {
    repo: &'a G,
    original: Option<String>,
}

impl<'a, G: GitOps> CheckoutGuard<'a, G> {
    fn switch(repo: &'a G, branch: &str) -> Result<Self> {
        if repo.current_branch()?.as_deref() == Some(branch) {
            return Ok(Self {
                repo,
                original: None,
            });
        }

        let original = repo.head_ref()?;
        repo.switch(branch)?;

        Ok(Self {
            repo,
            original: Some(original),
        })
    }
}

impl<G: GitOps> Drop for CheckoutGuard<'_, G> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            if let Err(e) = self.repo.switch(&original) {
                log::warn!("could not check out {original} again: {e}");
            }
        }
    }
}
