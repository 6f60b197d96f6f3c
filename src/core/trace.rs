//! Best-effort call-site extraction from backtrace text
//!
//! Used when a log call arrives without an explicit file/line: a fresh
//! backtrace is rendered to text and scanned for the first frame carrying a
//! `<location>:<line>:<column>` tail. Extraction failures never fail the log
//! call; the event builder falls back to sentinel values instead.

use std::backtrace::{Backtrace, BacktraceStatus};

/// Call-site information recovered from a stack, each part independently
/// possibly absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceInfo {
    pub file: Option<String>,
    pub line: Option<String>,
    pub column: Option<String>,
    /// Full original stack text, kept whenever a frame was resolved
    pub backtrace: Option<String>,
}

impl TraceInfo {
    fn absent() -> Self {
        Self::default()
    }
}

/// Capture the current stack and extract the first resolvable frame.
///
/// Returns an all-absent [`TraceInfo`] when the runtime provides no captured
/// backtrace (e.g. backtraces disabled at build time).
pub fn capture() -> TraceInfo {
    let backtrace = Backtrace::force_capture();
    if backtrace.status() != BacktraceStatus::Captured {
        return TraceInfo::absent();
    }
    parse_stack(&backtrace.to_string())
}

/// Scan stack text for the first frame matching `<location>:<line>:<column>`.
///
/// Two frame shapes are recognized: URL-scheme locations
/// (`https://host/app.js:12:5`, as produced by remote or embedded runtimes)
/// and local source locations (`at src/main.rs:12:5`). If no line matches,
/// every field of the result is absent.
pub fn parse_stack(text: &str) -> TraceInfo {
    for line in text.lines() {
        let candidate = match frame_location(line) {
            Some(c) => c,
            None => continue,
        };
        if let Some((file, line_no, column)) = split_location(candidate) {
            return TraceInfo {
                file: Some(file.to_string()),
                line: Some(line_no.to_string()),
                column: Some(column.to_string()),
                backtrace: Some(text.to_string()),
            };
        }
    }
    TraceInfo::absent()
}

/// Pick the location portion of a stack line, if the line looks like a frame.
fn frame_location(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if let Some(idx) = trimmed.find("http") {
        return Some(&trimmed[idx..]);
    }
    if let Some(rest) = trimmed.strip_prefix("at ") {
        return Some(rest);
    }
    None
}

/// Split `file:line:column` from the right, requiring numeric line and column.
/// Trailing decoration after the column (a closing paren in browser-style
/// frames) is ignored.
fn split_location(location: &str) -> Option<(&str, &str, &str)> {
    let location = location.trim_end_matches(|c: char| !c.is_ascii_digit());
    let (rest, column) = location.rsplit_once(':')?;
    let (file, line) = rest.rsplit_once(':')?;
    if file.is_empty() || !is_digits(line) || !is_digits(column) {
        return None;
    }
    Some((file, line, column))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
