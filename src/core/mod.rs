//! Core logger types and traits

pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub(crate) mod hook;
pub mod log_level;
pub mod logger;
pub mod trace;

pub use config::{ConfigHandle, LoggerConfig};
pub use context::{FieldValue, LogContext};
pub use error::{LoggerError, Result};
pub use event::{EventParams, LogEvent};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use trace::{capture as capture_trace, parse_stack, TraceInfo};
