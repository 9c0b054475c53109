//! git-sync-default - sync the default branch with its upstream.

use tether_cli::commands::{self, SyncArgs};
use tether_cli::output;

fn main() {
    let args: SyncArgs = commands::parse_or_exit();
    tether_cli::init_logging();

    if let Err(e) = commands::sync::run(&args) {
        output::error(&e.to_string());
        std::process::exit(commands::exit_code(&e));
    }
}
