//! git-browse - open the GitHub/GitLab page for a revision, path or listing.

use tether_cli::commands::{self, BrowseArgs};
use tether_cli::output;

fn main() {
    let args: BrowseArgs = commands::parse_or_exit();
    tether_cli::init_logging();

    if let Err(e) = commands::browse::run(&args) {
        output::error(&e.to_string());
        std::process::exit(commands::exit_code(&e));
    }
}
