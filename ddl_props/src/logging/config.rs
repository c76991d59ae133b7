//! Configuration access for logging
//!
//! Buffer and message limits come from compile-time constants. Verbosity and
//! output format come from runtime preferences, installed once per process.

use crate::config::compile_time::logging::{LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH};
use crate::config::runtime::{GrammarPreferences, LoggingPreferences, RuntimeConfig};
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<RuntimeConfig> = OnceLock::new();
static DEFAULT_PREFERENCES: OnceLock<RuntimeConfig> = OnceLock::new();

/// Install runtime preferences for the process
pub fn init_runtime_preferences(config: RuntimeConfig) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(config)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Installed preferences, or the built-in defaults resolved once
fn preferences() -> &'static RuntimeConfig {
    RUNTIME_PREFERENCES
        .get()
        .unwrap_or_else(|| DEFAULT_PREFERENCES.get_or_init(RuntimeConfig::default))
}

fn logging_preferences() -> &'static LoggingPreferences {
    &preferences().logging
}

fn grammar_preferences() -> &'static GrammarPreferences {
    &preferences().grammar
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Get minimum log level (user preference)
pub fn get_min_log_level() -> EventsLogLevel {
    logging_preferences().min_log_level.to_events_log_level()
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    logging_preferences().use_structured_logging
}

/// Check if console logging is enabled
pub fn use_console_logging() -> bool {
    logging_preferences().enable_console_logging
}

/// Whether each descriptor match attempt is logged at debug level
pub fn log_match_attempts() -> bool {
    grammar_preferences().log_match_attempts
}

/// Whether every typecheck logs its raw input at debug level
pub fn log_typecheck_details() -> bool {
    grammar_preferences().log_typecheck_details
}

/// Whether rendered fragments are logged at debug level
pub fn log_rendered_fragments() -> bool {
    grammar_preferences().log_rendered_fragments
}

/// Get memory logger buffer size (compile-time constant)
pub fn get_log_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Get maximum log message length (compile-time constant)
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 100_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_MESSAGE_LENGTH < 80 {
        return Err(format!(
            "Log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    Ok(())
}
