//! # tether-cli
//!
//! Shared plumbing for the `git-browse` and `git-sync-default` binaries:
//! argument parsing, terminal output, the URL launcher and logging setup.

pub mod commands;
pub mod launcher;
pub mod output;

/// Environment variable holding the `env_logger` filter.
pub const LOG_ENV: &str = "TETHER_LOG";

/// Initialize diagnostic logging. Call once at startup.
///
/// Quiet by default; `TETHER_LOG=debug` shows every git invocation.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
