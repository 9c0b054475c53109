//! Subprocess execution for git porcelain commands.
//!
//! Every spawned `git` goes through [`run_git`] so invocations are logged
//! consistently:
//!
//! ```text
//! $ git fetch --prune
//! [tether-trace] cmd="git fetch --prune" dur=412.7ms ok=true
//! ```

use std::path::Path;
use std::process::{Command, ExitStatus};
use std::time::Instant;

use crate::error::{Error, Result};

/// Run `git <args>` in `dir`, inheriting stdin/stdout/stderr.
///
/// Blocks until git exits. A non-zero exit becomes [`Error::CommandFailed`]
/// carrying git's exit code.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);

    let status = run(&mut cmd)?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::CommandFailed {
            command: args.join(" "),
            code: status.code(),
        })
    }
}

/// Execute a command with timing and debug logging.
fn run(cmd: &mut Command) -> std::io::Result<ExitStatus> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    let cmd_str = if args.is_empty() {
        program
    } else {
        format!("{program} {}", args.join(" "))
    };

    log::debug!("$ {cmd_str}");

    let t0 = Instant::now();
    let result = cmd.status();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

    match &result {
        Ok(status) => log::debug!(
            "[tether-trace] cmd=\"{cmd_str}\" dur={duration_ms:.1}ms ok={}",
            status.success()
        ),
        Err(e) => log::debug!("[tether-trace] cmd=\"{cmd_str}\" dur={duration_ms:.1}ms err=\"{e}\""),
    }

    result
}
