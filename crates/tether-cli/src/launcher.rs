//! Hands a URL to the desktop's default handler.
//!
//! Precedence: `GIT_BROWSE_OPENER`, then `[browse] opener` from
//! `.git/tether.toml`, then the platform default.

use std::fs;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tether_core::Config;
use tether_core::config::OPENER_ENV;

/// Kernel release file; WSL kernels carry "microsoft" in their release string.
const OSRELEASE: &str = "/proc/sys/kernel/osrelease";

/// How a URL gets opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launcher {
    /// User-supplied shell command; the URL is passed as `$1`.
    Custom(String),
    /// Platform opener followed by the URL.
    Platform {
        program: &'static str,
        args: &'static [&'static str],
    },
}

impl Launcher {
    /// Pick the launcher from the environment and configuration.
    #[must_use]
    pub fn from_env(config: &Config) -> Self {
        Self::select(std::env::var(OPENER_ENV).ok(), config)
    }

    /// Pick the launcher given the value of `GIT_BROWSE_OPENER`, if set.
    #[must_use]
    pub fn select(env_opener: Option<String>, config: &Config) -> Self {
        env_opener
            .or_else(|| config.browse.opener.clone())
            .filter(|opener| !opener.trim().is_empty())
            .map_or_else(Self::platform_default, Self::Custom)
    }

    /// The opener for the platform this binary was built for.
    #[must_use]
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::Platform {
                program: "open",
                args: &[],
            }
        } else if cfg!(windows) {
            // The empty argument is start's window title.
            Self::Platform {
                program: "cmd",
                args: &["/C", "start", ""],
            }
        } else if is_wsl() {
            Self::Platform {
                program: "cmd.exe",
                args: &["/C", "start", ""],
            }
        } else {
            Self::Platform {
                program: "xdg-open",
                args: &[],
            }
        }
    }

    /// Command that opens `url`.
    #[must_use]
    pub fn command(&self, url: &str) -> Command {
        match self {
            Self::Custom(opener) => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c")
                    .arg(format!("{opener} \"$1\""))
                    .arg("sh")
                    .arg(url);
                cmd
            }
            Self::Platform { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(*args).arg(url);
                cmd
            }
        }
    }

    /// Open `url`, blocking until the opener exits.
    ///
    /// # Errors
    /// Returns error if the opener can't be started or exits unsuccessfully.
    pub fn open(&self, url: &str) -> Result<()> {
        let mut cmd = self.command(url);
        log::debug!("$ {cmd:?}");

        let status = cmd
            .status()
            .with_context(|| format!("Failed to start browser opener {self}"))?;
        if !status.success() {
            bail!("Browser opener {self} exited with {status}");
        }
        Ok(())
    }
}

impl std::fmt::Display for Launcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom(opener) => write!(f, "`{opener}`"),
            Self::Platform { program, .. } => write!(f, "`{program}`"),
        }
    }
}

fn is_wsl() -> bool {
    fs::read_to_string(OSRELEASE)
        .is_ok_and(|release| release.to_ascii_lowercase().contains("microsoft"))
}
