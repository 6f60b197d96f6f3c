//! Appender implementations

pub mod console;
pub mod http;

pub use console::ConsoleAppender;
pub use http::{HttpTransport, Transport};
