//! Output formatting utilities

use console::{style, Style};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("    {}: {}", style(key).dim(), value)
}

/// Render a boolean flag as yes/no
pub fn flag(enabled: bool) -> String {
    if enabled {
        style("yes").green().to_string()
    } else {
        style("no").dim().to_string()
    }
}

/// Style for variant names
pub fn variant_style() -> Style {
    Style::new().cyan().bold()
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}
