//! Hosting-service URL construction.
//!
//! | mode                | GitHub                   | GitLab                      |
//! |---------------------|--------------------------|-----------------------------|
//! | issues              | `/issues[/<id>]`         | `/-/issues[/<id>]`          |
//! | pull/merge requests | `/pulls` or `/pull/<id>` | `/-/merge_requests[/<id>]`  |
//! | releases            | `/releases[/tag/<tag>]`  | `/-/releases[/<tag>]`       |
//! | revision            | `/<kind>/<rev>/<path>`   | `/-/<kind>/<rev>/<path>`    |

use tether_git::{GitOps, ObjectKind};

use crate::error::{Error, Result};
use crate::remote::{Host, RemoteDescriptor, looks_like_url};
use crate::revision::RevisionDescriptor;

/// What to browse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseMode {
    /// Repository home page.
    Home,
    /// Issue list, or one issue by id.
    Issue(Option<String>),
    /// Pull/merge request list, or one by id.
    PullRequest(Option<String>),
    /// Release list, or one release by tag.
    Release(Option<String>),
    /// A commit, tree or blob.
    Revision(RevisionDescriptor),
}

/// Builds browse URLs for a repository.
pub struct UrlBuilder<'a, G: GitOps> {
    repo: &'a G,
    fallback_remote: String,
}

impl<'a, G: GitOps> UrlBuilder<'a, G> {
    /// Create a builder; `fallback_remote` is used when the branch being
    /// browsed has no remote configured.
    #[must_use]
    pub fn new(repo: &'a G, fallback_remote: impl Into<String>) -> Self {
        Self {
            repo,
            fallback_remote: fallback_remote.into(),
        }
    }

    /// Build the URL for `mode` on `remote` (a remote name or a URL).
    ///
    /// Without a remote, the remote of the browsed branch (or of the current
    /// branch) is used.
    ///
    /// # Errors
    /// - [`Error::RemoteResolution`] if no URL can be found for the remote
    /// - [`Error::UnsupportedHost`] if the remote is not on GitHub or GitLab
    /// - [`Error::InvalidArgument`] for malformed issue/PR ids
    pub fn build_url(&self, remote: Option<&str>, mode: &BrowseMode) -> Result<String> {
        let revision = match mode {
            BrowseMode::Revision(revision) => Some(revision),
            _ => None,
        };
        let remote = self.resolve_remote(remote, revision)?;

        let suffix = match mode {
            BrowseMode::Home => String::new(),
            BrowseMode::Issue(id) => issue_path(remote.host, parse_id(id.as_deref())?.as_deref()),
            BrowseMode::PullRequest(id) => {
                pull_request_path(remote.host, parse_id(id.as_deref())?.as_deref())
            }
            BrowseMode::Release(tag) => release_path(remote.host, tag.as_deref()),
            BrowseMode::Revision(revision) => {
                let kind = revision.object_kind(self.repo)?;
                revision_path(remote.host, kind, revision)
            }
        };

        Ok(format!("{}{suffix}", remote.base_url))
    }

    /// Find the remote to browse.
    ///
    /// # Errors
    /// See [`UrlBuilder::build_url`].
    pub fn resolve_remote(
        &self,
        remote: Option<&str>,
        revision: Option<&RevisionDescriptor>,
    ) -> Result<RemoteDescriptor> {
        let name = match remote {
            Some(name) => name.to_string(),
            None => self.branch_remote(revision),
        };

        if looks_like_url(&name) {
            return RemoteDescriptor::new(name.clone(), name);
        }

        let url = self
            .repo
            .remote_url(&name)
            .map_err(|_| Error::RemoteResolution(name.clone()))?;
        log::debug!("remote {name} -> {url}");

        RemoteDescriptor::new(name, url)
    }

    fn branch_remote(&self, revision: Option<&RevisionDescriptor>) -> String {
        let branch = match revision {
            Some(revision) if revision.resolved.is_named() => {
                Some(revision.resolved.as_str().to_string())
            }
            _ => self.repo.current_branch().unwrap_or_default(),
        };

        branch
            .and_then(|b| self.repo.branch_remote(&b))
            .unwrap_or_else(|| self.fallback_remote.clone())
    }
}

/// Validate an issue/PR id: digits, optionally prefixed by `#`.
fn parse_id(id: Option<&str>) -> Result<Option<String>> {
    let Some(raw) = id.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let digits = raw.strip_prefix('#').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidArgument(format!(
            "invalid id '{raw}' - expected a number like 42 or #42"
        )));
    }
    Ok(Some(digits.to_string()))
}

const fn dash(host: Host) -> &'static str {
    match host {
        Host::GitHub => "",
        Host::GitLab => "/-",
    }
}

fn issue_path(host: Host, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("{}/issues/{id}", dash(host)),
        None => format!("{}/issues", dash(host)),
    }
}

fn pull_request_path(host: Host, id: Option<&str>) -> String {
    match (host, id) {
        (Host::GitHub, None) => "/pulls".into(),
        (Host::GitHub, Some(id)) => format!("/pull/{id}"),
        (Host::GitLab, None) => "/-/merge_requests".into(),
        (Host::GitLab, Some(id)) => format!("/-/merge_requests/{id}"),
    }
}

fn release_path(host: Host, tag: Option<&str>) -> String {
    match (host, tag.filter(|t| !t.is_empty())) {
        (Host::GitHub, None) => "/releases".into(),
        (Host::GitHub, Some(tag)) => format!("/releases/tag/{tag}"),
        (Host::GitLab, None) => "/-/releases".into(),
        (Host::GitLab, Some(tag)) => format!("/-/releases/{tag}"),
    }
}

fn revision_path(host: Host, kind: ObjectKind, revision: &RevisionDescriptor) -> String {
    let path = format!(
        "{}/{kind}/{}/{}",
        dash(host),
        revision.resolved,
        revision.path.as_deref().unwrap_or_default()
    );
    path.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revision::ResolvedRef;
    use crate::test_mocks::MockGitOps;
    use std::path::Path;

    const SHA: &str = "2222222222222222222222222222222222222222";

    fn github_repo() -> MockGitOps {
        MockGitOps::new(Path::new("/repo"))
            .with_current_branch("main")
            .with_remote("origin", "git@github.com:org/repo.git")
    }

    fn gitlab_repo() -> MockGitOps {
        MockGitOps::new(Path::new("/repo"))
            .with_current_branch("main")
            .with_remote("origin", "https://gitlab.com/org/repo.git")
    }

    fn build(repo: &MockGitOps, mode: &BrowseMode) -> Result<String> {
        UrlBuilder::new(repo, "origin").build_url(None, mode)
    }

    fn named(name: &str, path: Option<&str>) -> RevisionDescriptor {
        RevisionDescriptor {
            requested: name.into(),
            resolved: ResolvedRef::Named(name.into()),
            path: path.map(String::from),
        }
    }

    #[test]
    fn test_home() {
        assert_eq!(
            build(&github_repo(), &BrowseMode::Home).unwrap(),
            "https://github.com/org/repo"
        );
        assert_eq!(
            build(&gitlab_repo(), &BrowseMode::Home).unwrap(),
            "https://gitlab.com/org/repo"
        );
    }

    #[test]
    fn test_issues() {
        let one = BrowseMode::Issue(Some("42".into()));
        assert_eq!(
            build(&github_repo(), &one).unwrap(),
            "https://github.com/org/repo/issues/42"
        );
        assert_eq!(
            build(&gitlab_repo(), &one).unwrap(),
            "https://gitlab.com/org/repo/-/issues/42"
        );
        assert_eq!(
            build(&github_repo(), &BrowseMode::Issue(None)).unwrap(),
            "https://github.com/org/repo/issues"
        );
        assert_eq!(
            build(&gitlab_repo(), &BrowseMode::Issue(None)).unwrap(),
            "https://gitlab.com/org/repo/-/issues"
        );
    }

    #[test]
    fn test_issue_id_with_hash_prefix() {
        assert_eq!(
            build(&github_repo(), &BrowseMode::Issue(Some("#7".into()))).unwrap(),
            "https://github.com/org/repo/issues/7"
        );
    }

    #[test]
    fn test_invalid_ids() {
        for bad in ["abc", "#", "12a", "-1"] {
            let err = build(&github_repo(), &BrowseMode::PullRequest(Some(bad.into()))).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "{bad}");
        }
    }

    #[test]
    fn test_pull_requests() {
        assert_eq!(
            build(&github_repo(), &BrowseMode::PullRequest(None)).unwrap(),
            "https://github.com/org/repo/pulls"
        );
        assert_eq!(
            build(&github_repo(), &BrowseMode::PullRequest(Some("5".into()))).unwrap(),
            "https://github.com/org/repo/pull/5"
        );
        assert_eq!(
            build(&gitlab_repo(), &BrowseMode::PullRequest(None)).unwrap(),
            "https://gitlab.com/org/repo/-/merge_requests"
        );
        assert_eq!(
            build(&gitlab_repo(), &BrowseMode::PullRequest(Some("#5".into()))).unwrap(),
            "https://gitlab.com/org/repo/-/merge_requests/5"
        );
    }

    #[test]
    fn test_releases() {
        assert_eq!(
            build(&github_repo(), &BrowseMode::Release(None)).unwrap(),
            "https://github.com/org/repo/releases"
        );
        assert_eq!(
            build(&github_repo(), &BrowseMode::Release(Some("v1.2".into()))).unwrap(),
            "https://github.com/org/repo/releases/tag/v1.2"
        );
        assert_eq!(
            build(&gitlab_repo(), &BrowseMode::Release(None)).unwrap(),
            "https://gitlab.com/org/repo/-/releases"
        );
        assert_eq!(
            build(&gitlab_repo(), &BrowseMode::Release(Some("v1.2".into()))).unwrap(),
            "https://gitlab.com/org/repo/-/releases/v1.2"
        );
    }

    #[test]
    fn test_named_branch_lands_on_tree() {
        let repo = github_repo().with_object("main", ObjectKind::Commit);
        let mode = BrowseMode::Revision(named("main", None));
        assert_eq!(
            build(&repo, &mode).unwrap(),
            "https://github.com/org/repo/tree/main"
        );
    }

    #[test]
    fn test_root_tree_has_no_trailing_slash() {
        let repo = gitlab_repo().with_object("main:", ObjectKind::Tree);
        let mode = BrowseMode::Revision(named("main", Some("")));
        assert_eq!(
            build(&repo, &mode).unwrap(),
            "https://gitlab.com/org/repo/-/tree/main"
        );
    }

    #[test]
    fn test_blob_and_commit() {
        let repo = github_repo()
            .with_object("main:src/lib.rs", ObjectKind::Blob)
            .with_object(SHA, ObjectKind::Commit);

        let blob = BrowseMode::Revision(named("main", Some("src/lib.rs")));
        assert_eq!(
            build(&repo, &blob).unwrap(),
            "https://github.com/org/repo/blob/main/src/lib.rs"
        );

        let commit = BrowseMode::Revision(RevisionDescriptor {
            requested: "HEAD~2".into(),
            resolved: ResolvedRef::Hash(SHA.into()),
            path: None,
        });
        assert_eq!(
            build(&repo, &commit).unwrap(),
            format!("https://github.com/org/repo/commit/{SHA}")
        );
    }

    #[test]
    fn test_remote_from_named_branch() {
        let repo = github_repo()
            .with_remote("fork", "git@gitlab.com:me/repo.git")
            .with_branch_remote("feature", "fork")
            .with_object("feature", ObjectKind::Commit);

        let mode = BrowseMode::Revision(named("feature", None));
        assert_eq!(
            build(&repo, &mode).unwrap(),
            "https://gitlab.com/me/repo/-/tree/feature"
        );
    }

    #[test]
    fn test_remote_from_current_branch() {
        let repo = github_repo()
            .with_remote("fork", "git@gitlab.com:me/repo.git")
            .with_branch_remote("main", "fork");
        assert_eq!(
            build(&repo, &BrowseMode::Home).unwrap(),
            "https://gitlab.com/me/repo"
        );
    }

    #[test]
    fn test_explicit_remote_name_and_url() {
        let repo = github_repo().with_remote("upstream", "https://github.com/up/repo.git");
        let builder = UrlBuilder::new(&repo, "origin");

        assert_eq!(
            builder.build_url(Some("upstream"), &BrowseMode::Home).unwrap(),
            "https://github.com/up/repo"
        );
        assert_eq!(
            builder
                .build_url(Some("git@gitlab.com:direct/repo.git"), &BrowseMode::Home)
                .unwrap(),
            "https://gitlab.com/direct/repo"
        );
    }

    #[test]
    fn test_missing_remote() {
        let repo = MockGitOps::new(Path::new("/repo")).with_current_branch("main");
        let err = build(&repo, &BrowseMode::Home).unwrap_err();
        assert!(matches!(err, Error::RemoteResolution(ref r) if r == "origin"));
    }

    #[test]
    fn test_unsupported_host() {
        let repo = MockGitOps::new(Path::new("/repo"))
            .with_current_branch("main")
            .with_remote("origin", "https://bitbucket.org/org/repo");
        let err = build(&repo, &BrowseMode::Home).unwrap_err();
        assert!(matches!(err, Error::UnsupportedHost(ref h) if h == "bitbucket.org"));
    }

    #[test]
    fn test_fallback_remote_name() {
        let repo = MockGitOps::new(Path::new("/repo"))
            .with_detached_head(SHA)
            .with_remote("upstream", "git@github.com:up/repo.git");
        let builder = UrlBuilder::new(&repo, "upstream");
        assert_eq!(
            builder.build_url(None, &BrowseMode::Home).unwrap(),
            "https://github.com/up/repo"
        );
    }
}
