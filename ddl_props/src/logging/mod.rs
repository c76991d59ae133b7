//! Global logging module for the property grammar engine
//!
//! Provides thread-safe global logging with a clean macro interface. Nothing is
//! emitted until `init_global_logging` installs a service.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, Logger, LoggingService, MemoryLogger, NullLogger, StructuredLogger,
};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system from runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    // Every registered code must resolve before anything is logged.
    for code in [
        codes::system::INTERNAL_ERROR,
        codes::lexical::INVALID_CHARACTER,
        codes::grammar::GRAMMAR_MISMATCH,
        codes::render::RENDER_UNSUPPORTED,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let mut event = LogEvent::error(code, message);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    logger.log_event(event);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let mut event = LogEvent::success(code, message);
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    logger.log_event(event);
}

/// Memory logger installed as the process-wide logger for tests
///
/// The global logger installs once per process, so every test that inspects
/// logged events shares this one.
#[cfg(test)]
pub(crate) fn test_memory_logger() -> Arc<MemoryLogger> {
    static MEMORY: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
    MEMORY
        .get_or_init(|| {
            let logger = Arc::new(MemoryLogger::new());
            let _ = init_global_logging_with_service(Arc::new(LoggingService::new(
                logger.clone(),
                LogLevel::Debug,
            )));
            logger
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_logger_installs_once() {
        let _memory = test_memory_logger();
        let second = init_global_logging_with_service(Arc::new(LoggingService::new(
            Arc::new(NullLogger),
            LogLevel::Debug,
        )));

        assert!(second.is_err());
        assert!(is_initialized());
    }

    #[test]
    fn test_context_reaches_installed_logger() {
        let memory = test_memory_logger();
        log_error_with_context(
            codes::render::RENDER_UNSUPPORTED,
            "Render failed",
            None,
            vec![("label", "LOGGING_CONTEXT_MARKER")],
        );

        assert!(memory.get_errors().iter().any(|event| {
            event.code == codes::render::RENDER_UNSUPPORTED
                && event.context.get("label").map(String::as_str) == Some("LOGGING_CONTEXT_MARKER")
        }));
    }
}
