//! Main logger implementation

use super::config::{ConfigHandle, LoggerConfig};
use super::context::{FieldValue, LogContext};
use super::error::Result;
use super::event::{build_event, EventParams, LogEvent};
use super::hook;
use super::log_level::LogLevel;
use crate::appenders::{ConsoleAppender, HttpTransport, Transport};
use std::sync::Arc;

/// Client-side structured logger.
///
/// Every level method runs synchronously through event construction and the
/// console mirror, then hands the event to the transport as a detached
/// delivery that is never awaited. The returned `bool` is an acceptance
/// signal: the event was built and dispatch was initiated. It says nothing
/// about whether the collection endpoint received it.
///
/// Cloning is cheap; clones share configuration and transport. Instances are
/// expected to be long-lived, typically singletons, because construction also
/// registers the process-wide uncaught-error hook.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    config: ConfigHandle,
    console: ConsoleAppender,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

impl Logger {
    /// Construct a logger and register it as the process-wide uncaught-error
    /// forwarder.
    ///
    /// Fails with [`LoggerError::MissingField`](super::error::LoggerError)
    /// when a required configuration field is missing or empty, before any
    /// console or network activity. Constructing a second logger replaces the
    /// first one's hook registration (last-writer-wins).
    pub fn new(config: LoggerConfig) -> Result<Self> {
        let config = ConfigHandle::new(config)?;
        let transport = Arc::new(HttpTransport::new(config.clone()));
        let logger = Self::assemble(config, transport);
        hook::install(logger.clone());
        Ok(logger)
    }

    /// Construct a logger with a custom transport.
    ///
    /// Unlike [`Logger::new`] this does not touch the process-wide error
    /// hook, which makes it suitable for tests and for shipping to
    /// non-HTTP destinations.
    pub fn with_transport(config: LoggerConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let config = ConfigHandle::new(config)?;
        Ok(Self::assemble(config, transport))
    }

    fn assemble(config: ConfigHandle, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                config,
                console: ConsoleAppender::new(),
                transport,
            }),
        }
    }

    /// Live view of the configuration shared with this logger.
    pub fn config_handle(&self) -> ConfigHandle {
        self.inner.config.clone()
    }

    /// Overwrite the configured location. Unchecked, immediately visible.
    pub fn set_location(&self, value: impl Into<String>) {
        self.inner.config.set_location(value);
    }

    /// Overwrite the configured locale. Unchecked, immediately visible.
    pub fn set_locale(&self, value: impl Into<String>) {
        self.inner.config.set_locale(value);
    }

    /// Overwrite or clear the client identity. `None` removes the
    /// `client_id` key from subsequent events.
    pub fn set_client_id(&self, value: Option<FieldValue>) {
        self.inner.config.set_client_id(value);
    }

    /// Build and emit an event from explicit parameters.
    ///
    /// This is the general entry point behind every level method. Returns
    /// `false` without side effects when the message is empty.
    pub fn log_with(&self, level: LogLevel, params: EventParams) -> bool {
        let config = self.inner.config.snapshot();
        let event = match build_event(level, params, &config) {
            Some(event) => event,
            None => return false,
        };

        // Mirror first: the console line appears regardless of delivery outcome
        self.inner.console.write(event.level, &event.message);
        self.dispatch(event);
        true
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> bool {
        self.log_with(level, EventParams::message(message))
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Debug, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Info, message)
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Warning, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Error, message)
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Fatal, message)
    }

    /// Log with structured context fields
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) -> bool {
        self.log_with(level, EventParams::message(message).with_context(context))
    }

    pub fn debug_with_context(&self, message: impl Into<String>, context: LogContext) -> bool {
        self.log_with_context(LogLevel::Debug, message, context)
    }

    pub fn info_with_context(&self, message: impl Into<String>, context: LogContext) -> bool {
        self.log_with_context(LogLevel::Info, message, context)
    }

    pub fn warning_with_context(&self, message: impl Into<String>, context: LogContext) -> bool {
        self.log_with_context(LogLevel::Warning, message, context)
    }

    pub fn error_with_context(&self, message: impl Into<String>, context: LogContext) -> bool {
        self.log_with_context(LogLevel::Error, message, context)
    }

    pub fn fatal_with_context(&self, message: impl Into<String>, context: LogContext) -> bool {
        self.log_with_context(LogLevel::Fatal, message, context)
    }

    /// Log an error carrying an already-captured backtrace.
    pub fn error_with_backtrace(
        &self,
        message: impl Into<String>,
        context: Option<LogContext>,
        backtrace: impl Into<String>,
    ) -> bool {
        let mut params = EventParams::message(message).with_backtrace(backtrace);
        params.context = context;
        self.log_with(LogLevel::Error, params)
    }

    /// Log a fatal event carrying an already-captured backtrace.
    pub fn fatal_with_backtrace(
        &self,
        message: impl Into<String>,
        context: Option<LogContext>,
        backtrace: impl Into<String>,
    ) -> bool {
        let mut params = EventParams::message(message).with_backtrace(backtrace);
        params.context = context;
        self.log_with(LogLevel::Fatal, params)
    }

    /// Forward an uncaught error at error level.
    ///
    /// This is the capability behind the process-wide hook, matching the host
    /// callback contract `(message, file, line, column, error)`. `column` is
    /// accepted for parity with that contract but is not carried in the
    /// event. Delivery on this path is synchronous best-effort: a detached
    /// task would not outlive a crashing process. The returned acceptance
    /// conventionally tells the host whether default error handling may be
    /// suppressed.
    pub fn handle_uncaught(
        &self,
        message: &str,
        file: &str,
        line: u32,
        _column: u32,
        backtrace: Option<&str>,
    ) -> bool {
        let params = EventParams {
            message: message.to_string(),
            file: Some(file.to_string()),
            line: Some(line.to_string()),
            backtrace: backtrace.map(str::to_string),
            context: None,
        };

        let config = self.inner.config.snapshot();
        let event = match build_event(LogLevel::Error, params, &config) {
            Some(event) => event,
            None => return false,
        };

        self.inner.console.write(event.level, &event.message);
        self.deliver_blocking(event);
        true
    }

    /// Hand the event to the transport without awaiting the outcome.
    ///
    /// Inside a Tokio runtime the delivery runs as a spawned task; otherwise
    /// it runs on a detached thread with the blocking client. Failures are
    /// reported to the local console only.
    fn dispatch(&self, event: LogEvent) {
        let transport = Arc::clone(&self.inner.transport);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = transport.send(&event).await {
                        eprintln!("[LOGGER ERROR] Delivery failed: {}", e);
                    }
                });
            }
            Err(_) => {
                std::thread::spawn(move || {
                    if let Err(e) = transport.send_blocking(&event) {
                        eprintln!("[LOGGER ERROR] Delivery failed: {}", e);
                    }
                });
            }
        }
    }

    /// Synchronous best-effort delivery for the uncaught-error path.
    ///
    /// Runs on a fresh thread and joins it, so it works from panic hooks on
    /// runtime threads, where blocking in place is not allowed.
    fn deliver_blocking(&self, event: LogEvent) {
        let transport = Arc::clone(&self.inner.transport);
        let worker = std::thread::spawn(move || transport.send_blocking(&event));
        match worker.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => eprintln!("[LOGGER ERROR] Delivery failed: {}", e),
            Err(_) => eprintln!("[LOGGER ERROR] Delivery worker panicked"),
        }
    }
}
