// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while loading runtime configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid runtime configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Grammar diagnostics; all off unless a configuration turns them on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarPreferences {
    /// Whether to log every descriptor match attempt at debug level
    pub log_match_attempts: bool,

    /// Whether every typecheck logs its raw input at debug level
    pub log_typecheck_details: bool,

    /// Whether rendered fragments are logged at debug level
    pub log_rendered_fragments: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console logging
    pub enable_console_logging: bool,

    /// Minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: false,
            enable_console_logging: false,
            min_log_level: LogLevel::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub grammar: GrammarPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse runtime preferences from TOML text; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load runtime preferences from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_defaults_are_quiet() {
        let config = RuntimeConfig::default();

        assert!(!config.grammar.log_match_attempts);
        assert!(!config.grammar.log_typecheck_details);
        assert!(!config.grammar.log_rendered_fragments);
        assert!(!config.logging.enable_console_logging);
        assert_eq!(config.logging.min_log_level, LogLevel::Info);
    }

    #[test]
    fn test_from_toml_str_partial() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [logging]
            use_structured_logging = true
            min_log_level = "debug"

            [grammar]
            log_match_attempts = true
            "#,
        )
        .unwrap();

        assert!(config.logging.use_structured_logging);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(config.grammar.log_match_attempts);
    }

    #[test]
    fn test_from_toml_str_rejects_bad_level() {
        let result = RuntimeConfig::from_toml_str("[logging]\nmin_log_level = \"loud\"\n");
        assert_matches!(result, Err(ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[grammar]\nlog_rendered_fragments = true").unwrap();

        let config = RuntimeConfig::load(file.path()).unwrap();
        assert!(config.grammar.log_rendered_fragments);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RuntimeConfig::load(&dir.path().join("missing.toml"));
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }
}
