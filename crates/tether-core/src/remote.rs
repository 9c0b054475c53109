//! Remote URL normalization and hosting-service detection.

use std::fmt;

use crate::error::{Error, Result};

/// Hosting services with known URL layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// github.com
    GitHub,
    /// gitlab.com
    GitLab,
}

impl Host {
    /// Classify a normalized base URL.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedHost`] naming the bare hostname when the
    /// URL belongs to neither service.
    pub fn detect(base_url: &str) -> Result<Self> {
        if base_url.contains("github.com") {
            Ok(Self::GitHub)
        } else if base_url.contains("gitlab.com") {
            Ok(Self::GitLab)
        } else {
            Err(Error::UnsupportedHost(hostname(base_url).to_string()))
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub => f.write_str("GitHub"),
            Self::GitLab => f.write_str("GitLab"),
        }
    }
}

/// A remote resolved to a browsable base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDescriptor {
    /// Remote name, or the URL itself when one was given directly.
    pub name: String,
    /// URL as configured.
    pub raw_url: String,
    /// `https://host/org/repo`, no trailing slash or `.git`.
    pub base_url: String,
    /// Hosting service.
    pub host: Host,
}

impl RemoteDescriptor {
    /// Normalize `raw_url` and detect its host.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedHost`] for hosts other than GitHub/GitLab.
    pub fn new(name: impl Into<String>, raw_url: impl Into<String>) -> Result<Self> {
        let raw_url = raw_url.into();
        let base_url = normalize_url(&raw_url);
        let host = Host::detect(&base_url)?;

        Ok(Self {
            name: name.into(),
            raw_url,
            base_url,
            host,
        })
    }
}

/// Whether a remote argument is a URL rather than a remote name.
#[must_use]
pub fn looks_like_url(remote: &str) -> bool {
    ["git@", "http://", "https://", "ssh://"]
        .iter()
        .any(|prefix| remote.starts_with(prefix))
}

/// Convert a clone URL into the web URL of the repository.
///
/// # Supported URL formats
///
/// - `https://[user@]<host>/<path>[.git]` (scheme kept)
/// - `git@<host>:<path>[.git]`
/// - `ssh://[user@]<host>[:port]/<path>[.git]`
///
/// Anything else is returned trimmed of `.git` and trailing slashes.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let url = trim_suffixes(raw.trim());

    if let Some(rest) = url.strip_prefix("git@") {
        if let Some((host, path)) = rest.split_once(':') {
            return format!("https://{host}/{}", path.trim_start_matches('/'));
        }
    }

    if let Some(rest) = url.strip_prefix("ssh://") {
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        let host = strip_userinfo(authority);
        let host = host.split_once(':').map_or(host, |(h, _port)| h);
        return trim_suffixes(&format!("https://{host}/{path}")).to_string();
    }

    for scheme in ["https://", "http://"] {
        if let Some(rest) = url.strip_prefix(scheme) {
            let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
            return trim_suffixes(&format!("{scheme}{}/{path}", strip_userinfo(authority)))
                .to_string();
        }
    }

    url.to_string()
}

fn trim_suffixes(url: &str) -> &str {
    let url = url.trim_end_matches('/');
    url.strip_suffix(".git")
        .unwrap_or(url)
        .trim_end_matches('/')
}

fn strip_userinfo(authority: &str) -> &str {
    authority
        .rsplit_once('@')
        .map_or(authority, |(_user, host)| host)
}

/// Bare hostname of a base URL: between the scheme and the first path segment.
fn hostname(base_url: &str) -> &str {
    let rest = base_url
        .split_once("://")
        .map_or(base_url, |(_scheme, rest)| rest);
    rest.split('/').next().unwrap_or(rest)
}
