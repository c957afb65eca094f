//! Styling helpers for terminal output.

use console::style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// A section header line.
#[must_use]
pub fn header(text: &str) -> String {
    if is_color_disabled() {
        format!("=== {text} ===")
    } else {
        style(format!("=== {text} ===")).bold().cyan().to_string()
    }
}

/// A line reporting a rejected null hypothesis or a significant result.
#[must_use]
pub fn highlight(text: &str) -> String {
    if is_color_disabled() {
        text.to_string()
    } else {
        style(text).green().bold().to_string()
    }
}

/// An error line.
#[must_use]
pub fn error(text: &str) -> String {
    if is_color_disabled() {
        format!("[ERROR] {text}")
    } else {
        format!("{} {text}", style("[ERROR]").red().bold())
    }
}

/// Print an error message to stderr.
pub fn print_error(text: &str) {
    eprintln!("{}", error(text));
}
