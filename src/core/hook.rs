//! Process-wide uncaught-error hook
//!
//! Constructing a [`Logger`](super::logger::Logger) registers it as the
//! active panic forwarder. Exactly one forwarder is active at a time:
//! installing another logger silently replaces the previous one
//! (last-writer-wins) and there is no unregister operation. The hook that was
//! in place before the first install keeps running after forwarding, so
//! standard panic output is preserved.

use super::logger::Logger;
use parking_lot::Mutex;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::PanicHookInfo;
use std::sync::Once;

static HOOK_INIT: Once = Once::new();
static ACTIVE: Mutex<Option<Logger>> = Mutex::new(None);

/// Register `logger` as the process-wide uncaught-error forwarder.
pub(crate) fn install(logger: Logger) {
    *ACTIVE.lock() = Some(logger);
    HOOK_INIT.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            forward(info);
            previous(info);
        }));
    });
}

/// Forward a panic to the currently registered logger at error level.
fn forward(info: &PanicHookInfo<'_>) {
    let logger = match ACTIVE.lock().clone() {
        Some(logger) => logger,
        None => return,
    };

    let message = panic_message(info);
    let (file, line, column) = match info.location() {
        Some(location) => (location.file().to_string(), location.line(), location.column()),
        None => (crate::core::event::UNKNOWN.to_string(), 0, 0),
    };

    let backtrace = Backtrace::force_capture();
    let backtrace = if backtrace.status() == BacktraceStatus::Captured {
        Some(backtrace.to_string())
    } else {
        None
    };

    logger.handle_uncaught(&message, &file, line, column, backtrace.as_deref());
}

/// Extract the panic payload as a message string.
fn panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
