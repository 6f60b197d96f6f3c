//! Console appender implementation
//!
//! Mirrors every accepted event as exactly one line, `[<level>] <message>`,
//! before delivery is attempted. Warning, error and fatal events go to
//! stderr; info and debug go to stdout.

use crate::core::LogLevel;
use colored::Colorize;

pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Write one mirrored line for the event.
    ///
    /// Runs before delivery and regardless of the delivery outcome.
    pub fn write(&self, level: LogLevel, message: &str) {
        let line = self.format_line(level, message);
        match level {
            LogLevel::Warning | LogLevel::Error | LogLevel::Fatal => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }

    /// Format the mirrored line, optionally coloring the level tag.
    pub fn format_line(&self, level: LogLevel, message: &str) -> String {
        let level_str = if self.use_colors {
            level.as_str().color(level.color_code()).to_string()
        } else {
            level.as_str().to_string()
        };
        format!("[{}] {}", level_str, message)
    }

    pub fn flush(&self) -> std::io::Result<()> {
        use std::io::Write;
        // Flush both streams since both channels are in use
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}
