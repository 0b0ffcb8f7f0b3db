//! Status-line prefixes for user-facing output.
//!
//! Colors are only emitted when the target stream supports them, so piped
//! output stays plain.

use owo_colors::{OwoColorize, Stream, Style};
use std::fmt::Display;

fn prefix(label: &str, stream: Stream, style: Style) -> String {
    label
        .if_supports_color(stream, |text| text.style(style))
        .to_string()
}

pub fn info(message: impl Display) -> String {
    format!("{} {}", prefix("[INFO]", Stream::Stdout, Style::new().blue()), message)
}

pub fn success(message: impl Display) -> String {
    format!("{} {}", prefix("[OK]", Stream::Stdout, Style::new().green()), message)
}

pub fn warning(message: impl Display) -> String {
    format!("{} {}", prefix("[WARN]", Stream::Stdout, Style::new().yellow()), message)
}

/// Errors are printed to stderr.
pub fn error(message: impl Display) -> String {
    format!(
        "{} {}",
        prefix("[ERR]", Stream::Stderr, Style::new().red().bold()),
        message
    )
}

/// Heading used in list output.
pub fn heading(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bold()).to_string()
}
