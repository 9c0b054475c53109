//! Configuration management for tether.
//!
//! Two sources are consulted:
//! - `.default-branch` at the repository root, a plain file naming the branch to sync
//! - `.git/tether.toml`, optional, for everything else

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// File at the repository root naming the default branch.
pub const DEFAULT_BRANCH_FILE: &str = ".default-branch";

/// Default branch when nothing is configured.
pub const FALLBACK_DEFAULT_BRANCH: &str = "master";

/// Config file name inside the git directory.
pub const CONFIG_FILE: &str = "tether.toml";

/// Environment variable naming a custom command to open URLs with.
pub const OPENER_ENV: &str = "GIT_BROWSE_OPENER";

/// tether configuration loaded from `.git/tether.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Default-branch sync settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Browse settings.
    #[serde(default)]
    pub browse: BrowseConfig,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config stored in a repository's git directory.
    ///
    /// # Errors
    /// Returns error if the file exists but can't be read or parsed.
    pub fn load_for(git_dir: &Path) -> Result<Self> {
        Self::load(git_dir.join(CONFIG_FILE))
    }

    /// Name of the branch `git-sync-default` tracks.
    ///
    /// `.default-branch` wins over `[sync] default_branch`, which wins over
    /// [`FALLBACK_DEFAULT_BRANCH`].
    ///
    /// # Errors
    /// Returns error if `.default-branch` exists but can't be read.
    pub fn default_branch(&self, workdir: &Path) -> Result<String> {
        let file = workdir.join(DEFAULT_BRANCH_FILE);
        if file.is_file() {
            let content = fs::read_to_string(&file)?;
            if let Some(name) = content.lines().map(str::trim).find(|l| !l.is_empty()) {
                return Ok(name.to_string());
            }
        }

        Ok(self
            .sync
            .default_branch
            .clone()
            .unwrap_or_else(|| FALLBACK_DEFAULT_BRANCH.into()))
    }
}

/// Sync settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncConfig {
    /// Branch to keep in step with its upstream.
    pub default_branch: Option<String>,
}

/// Browse settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowseConfig {
    /// Remote used when the current branch has none configured.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Command used to open URLs, overridden by [`OPENER_ENV`].
    pub opener: Option<String>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            opener: None,
        }
    }
}

fn default_remote() -> String {
    "origin".into()
}
