//! Command implementations and their argument definitions.

pub mod browse;
pub mod sync;

use clap::Parser;

pub use browse::BrowseArgs;
pub use sync::SyncArgs;

/// Parse the command line, exiting on `-h`/`--version` or bad arguments.
///
/// Help and version exit 0. Argument errors print usage to stderr and exit 1
/// rather than clap's usual 2.
#[must_use]
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = i32::from(e.use_stderr());
            // Nothing useful left to do if the terminal is gone.
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

/// Exit code for a failed command.
///
/// Git failures keep git's own exit code; everything else is 1.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<tether_core::Error>() {
        e.exit_code()
    } else if let Some(e) = err.downcast_ref::<tether_git::Error>() {
        e.exit_code()
    } else {
        1
    }
}
