//! # Remote Logger
//!
//! A client-side structured-logging SDK: leveled log calls and uncaught
//! runtime errors become canonical JSON events, mirrored as one line on the
//! local console and shipped fire-and-forget to a remote collection endpoint.
//!
//! ## Features
//!
//! - **Never in the caller's way**: a log call never throws and never blocks
//!   on network I/O; delivery failures are reported to the console only
//! - **Canonical events**: call-site trace capture, ISO-8601 timestamps, and
//!   key-ordered context merging with documented precedence
//! - **Uncaught-error hook**: constructing a logger registers it as the
//!   process-wide panic forwarder (last-writer-wins)
//!
//! ```no_run
//! use remote_logger::prelude::*;
//!
//! let logger = Logger::new(LoggerConfig {
//!     url: "https://log.example.com/".into(),
//!     credential: "dXNlcjpwYXNz".into(),
//!     release: "1.2.3".into(),
//!     locale: "en_HK".into(),
//!     location: "HK_HKG".into(),
//!     environment: "production".into(),
//!     platform: "webapp".into(),
//!     app_type: None,
//!     client_id: None,
//! })?;
//!
//! logger.info("Application started");
//! logger.error_with_context("Checkout failed", LogContext::new().with_field("order_id", 42));
//! # Ok::<(), remote_logger::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, HttpTransport, Transport};
    pub use crate::core::{
        ConfigHandle, EventParams, FieldValue, LogContext, LogEvent, LogLevel, Logger,
        LoggerConfig, LoggerError, Result, TraceInfo,
    };
}

pub use appenders::{ConsoleAppender, HttpTransport, Transport};
pub use core::{
    ConfigHandle, EventParams, FieldValue, LogContext, LogEvent, LogLevel, Logger, LoggerConfig,
    LoggerError, Result, TraceInfo,
};
