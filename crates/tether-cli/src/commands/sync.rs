//! `git sync-default` command - bring the default branch up to date.

use anyhow::{Context, Result};
use clap::Parser;
use tether_core::{Config, Strategy, SyncDefaultBranch, SyncOutcome};
use tether_git::{GitOps, Repository};

use crate::output;

/// Fetch and merge or rebase the default branch onto its upstream, without
/// leaving the current branch.
///
/// The branch is read from `.default-branch` at the repository root, else
/// `[sync] default_branch` in `.git/tether.toml`, else `master`.
#[derive(Debug, Parser)]
#[command(name = "git-sync-default", version)]
pub struct SyncArgs {}

/// Run the sync command from the current directory.
///
/// # Errors
/// Returns error if fetching fails, the default branch can't be compared
/// with its upstream, or the merge/rebase fails.
pub fn run(_args: &SyncArgs) -> Result<()> {
    let repo = Repository::open_current().context("Not inside a git repository")?;
    let workdir = repo.workdir().context("Cannot run in bare repository")?;
    let config = Config::load_for(repo.git_dir())?;
    let branch = config.default_branch(workdir)?;

    let sync = SyncDefaultBranch::new(&repo, branch);
    let outcome = sync.run()?;
    report(sync.branch(), outcome);
    Ok(())
}

fn report(branch: &str, outcome: SyncOutcome) {
    match outcome {
        SyncOutcome::UpToDate => output::success(&format!("{branch} is up to date")),
        SyncOutcome::Ahead => {
            output::info(&format!("{branch} is ahead of its upstream - nothing to sync"));
        }
        SyncOutcome::Integrated { strategy, stashed } => {
            let how = match strategy {
                Strategy::Merge => "merged upstream changes",
                Strategy::Rebase => "rebased onto upstream",
            };
            output::success(&format!("{branch}: {how}"));
            if stashed {
                output::detail("  local changes were stashed and restored");
            }
        }
    }
}
