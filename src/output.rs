//! # Output Configuration
//!
//! Controls how the `modulemd` CLI decorates its status lines: with emoji and
//! colors on capable terminals, or with plain bracketed markers otherwise.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```
//! use modulemd::output::{status_line, OutputConfig, Status};
//!
//! let config = OutputConfig::from_env_and_flag("never");
//! let line = status_line(&config, Status::Ok, "modules.yaml: 2 document(s)");
//! assert_eq!(line, "[OK] modules.yaml: 2 document(s)");
//! ```

use std::env;

use console::style;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: "always" forces colors on
    /// (overriding `NO_COLOR`), "never" forces them off, anything else detects
    /// support from the environment and the terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Outcome reported by a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
    Info,
}

impl Status {
    fn markers(self) -> (&'static str, &'static str) {
        match self {
            Status::Ok => ("✅", "[OK]"),
            Status::Error => ("❌", "[ERR]"),
            Status::Info => ("📦", "[INFO]"),
        }
    }
}

/// Returns the appropriate string based on color configuration.
///
/// When colors are enabled, returns the emoji. When disabled, returns
/// the plain text alternative.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Format `message` behind the marker for `status`.
///
/// With colors enabled, error messages are also rendered in red.
pub fn status_line(config: &OutputConfig, status: Status, message: &str) -> String {
    let (emoji_str, plain) = status.markers();
    let marker = emoji(config, emoji_str, plain);
    if config.use_color && status == Status::Error {
        format!("{} {}", marker, style(message).red())
    } else {
        format!("{} {}", marker, message)
    }
}
