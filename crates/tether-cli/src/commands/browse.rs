//! `git browse` command - open the hosted page for a revision, path or listing.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tether_core::{BrowseMode, Config, RevisionResolver, UrlBuilder};
use tether_git::Repository;

use crate::launcher::Launcher;
use crate::output;

/// Open a GitHub or GitLab page for the current repository.
#[derive(Debug, Parser)]
#[command(
    name = "git-browse",
    version,
    override_usage = "git browse [-r <REMOTE>] [-n] [(<rev> | <rev>:<path> | <rev> <path> | <path>)]\n       \
                      git browse [-r <REMOTE>] [-n] (-i [<ID>] | -p [<ID>] | -t [<TAG>])"
)]
pub struct BrowseArgs {
    /// Open the issue list, or issue <ID>
    #[arg(
        short = 'i',
        long = "issue",
        value_name = "ID",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with = "pull_request"
    )]
    pub issue: Option<String>,

    /// Open the pull/merge request list, or request <ID>
    #[arg(
        short = 'p',
        long = "pull-request",
        value_name = "ID",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub pull_request: Option<String>,

    /// Open the release list, or the release for <TAG>
    #[arg(
        short = 't',
        long = "tag",
        value_name = "TAG",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with_all = ["issue", "pull_request"]
    )]
    pub tag: Option<String>,

    /// Remote name or URL to browse (default: the branch's remote)
    #[arg(short = 'r', long = "remote", value_name = "REMOTE")]
    pub remote: Option<String>,

    /// Print the URL without opening it
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// `<rev>`, `<rev>:<path>`, `<rev> <path>` or `<path>`
    #[arg(value_name = "TARGET")]
    pub target: Vec<String>,
}

impl BrowseArgs {
    /// Listing modes chosen by flag. Positional targets are ignored when one
    /// of these is set.
    fn flag_mode(&self) -> Option<BrowseMode> {
        if let Some(id) = &self.issue {
            Some(BrowseMode::Issue(non_empty(id)))
        } else if let Some(id) = &self.pull_request {
            Some(BrowseMode::PullRequest(non_empty(id)))
        } else {
            self.tag.as_ref().map(|tag| BrowseMode::Release(non_empty(tag)))
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Run the browse command from the current directory.
///
/// # Errors
/// Returns error if the URL can't be resolved or the browser can't be opened.
pub fn run(args: &BrowseArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    let repo = Repository::open(&cwd).context("Not inside a git repository")?;
    let config = Config::load_for(repo.git_dir())?;

    let url = resolve_url(&repo, &config, args, &cwd)?;
    output::essential(&url);

    if !args.dry_run {
        Launcher::from_env(&config).open(&url)?;
    }
    Ok(())
}

/// Resolve the URL `args` describe, as seen from `cwd`.
///
/// Nothing is printed, so a failure leaves no partial output.
///
/// # Errors
/// Returns error for malformed arguments, unknown revisions or paths, and
/// remotes that can't be resolved or aren't on GitHub/GitLab.
pub fn resolve_url(
    repo: &Repository,
    config: &Config,
    args: &BrowseArgs,
    cwd: &Path,
) -> Result<String> {
    let mode = match args.flag_mode() {
        Some(mode) => mode,
        None => RevisionResolver::new(repo, cwd)
            .resolve(&args.target)?
            .map_or(BrowseMode::Home, BrowseMode::Revision),
    };
    log::debug!("browse mode: {mode:?}");

    let url = UrlBuilder::new(repo, &config.browse.remote)
        .build_url(args.remote.as_deref(), &mode)?;
    Ok(url)
}
