//! Canonical log event construction
//!
//! A [`LogEvent`] is the wire record delivered to the collection endpoint.
//! [`build_event`] implements the construction rules: empty messages suppress
//! the event entirely, missing call-site data degrades to captured trace
//! information and then to sentinels, and config-derived context keys always
//! win over caller-supplied keys on collision.

use super::config::LoggerConfig;
use super::context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use super::trace;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sentinel used when no call-site information could be recovered
pub const UNKNOWN: &str = "unknown";

/// Identity string reported as the `agent` context field
fn agent() -> String {
    format!(
        "{}/{} ({}; {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Canonical log event, serialized as the delivery body.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
    /// ISO-8601 instant with millisecond precision, UTC
    pub time: String,
    pub src_file: String,
    pub src_line: String,
    pub context: BTreeMap<String, FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<String>,
}

/// Inputs to event construction beyond the level.
///
/// `file`/`line` are only supplied by callers that already hold a resolved
/// call site (the uncaught-error hook); direct level calls leave them empty
/// and rely on trace capture.
#[derive(Debug, Clone, Default)]
pub struct EventParams {
    pub message: String,
    pub file: Option<String>,
    pub line: Option<String>,
    pub backtrace: Option<String>,
    pub context: Option<LogContext>,
}

impl EventParams {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }
}

/// Sanitize a log message to prevent log injection.
///
/// Replaces newlines, carriage returns and tabs with escape sequences so a
/// message cannot forge additional console lines.
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Build a canonical event, or `None` when the message is empty.
///
/// `None` means the call is not accepted: no console write and no delivery
/// may happen for it.
pub fn build_event(level: LogLevel, params: EventParams, config: &LoggerConfig) -> Option<LogEvent> {
    if params.message.is_empty() {
        return None;
    }

    let (src_file, src_line, backtrace) = resolve_call_site(&params);
    let context = merge_context(params.context, config);

    Some(LogEvent {
        level,
        message: sanitize_message(&params.message),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        src_file,
        src_line,
        context,
        backtrace: Some(backtrace),
    })
}

/// Resolve file/line/backtrace, capturing the stack only when the caller did
/// not supply an explicit call site.
fn resolve_call_site(params: &EventParams) -> (String, String, String) {
    if params.file.is_some() || params.line.is_some() {
        let file = params.file.clone().unwrap_or_else(|| UNKNOWN.to_string());
        let line = params.line.clone().unwrap_or_else(|| "0".to_string());
        let backtrace = params
            .backtrace
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string());
        return (file, line, backtrace);
    }

    let captured = trace::capture();
    let file = captured.file.unwrap_or_else(|| UNKNOWN.to_string());
    let line = captured.line.unwrap_or_else(|| "0".to_string());
    let backtrace = params
        .backtrace
        .clone()
        .or(captured.backtrace)
        .unwrap_or_else(|| UNKNOWN.to_string());
    (file, line, backtrace)
}

/// Merge caller context with config-derived fields.
///
/// Precedence is canonical: config-derived keys overwrite caller-supplied
/// keys of the same name. `app_type` and `client_id` are only present when
/// configured.
pub fn merge_context(
    caller: Option<LogContext>,
    config: &LoggerConfig,
) -> BTreeMap<String, FieldValue> {
    let mut merged = caller.map(LogContext::into_fields).unwrap_or_default();

    merged.insert("release".to_string(), config.release.as_str().into());
    merged.insert("locale".to_string(), config.locale.as_str().into());
    merged.insert("location".to_string(), config.location.as_str().into());
    merged.insert(
        "environment".to_string(),
        config.environment.as_str().into(),
    );
    merged.insert("platform".to_string(), config.platform.as_str().into());
    merged.insert("agent".to_string(), agent().into());
    merged.insert("url".to_string(), program_location().into());
    if let Some(app_type) = &config.app_type {
        merged.insert("app_type".to_string(), app_type.as_str().into());
    }
    if let Some(client_id) = &config.client_id {
        merged.insert("client_id".to_string(), client_id.clone());
    }

    merged
}

/// Path of the running program, the process-level analog of a page location.
fn program_location() -> String {
    std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}
