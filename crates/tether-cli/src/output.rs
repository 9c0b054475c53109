//! Terminal output formatting utilities.

use colored::Colorize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{}", error_line(msg));
}

/// Print an info message.
pub fn info(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

/// Print a detail line without prefix.
///
/// Use for indented detail lines that accompany info or warn messages.
pub fn detail(msg: &str) {
    println!("{msg}");
}

/// Print essential machine-readable output.
///
/// Use for results that should be available for piping, like browse URLs.
pub fn essential(msg: &str) {
    println!("{msg}");
}

fn error_line(msg: &str) -> String {
    format!("{} {}", "✗".red(), msg)
}
