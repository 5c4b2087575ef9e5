//! # Structured Logging
//!
//! Structured logging via the `tracing` ecosystem:
//!
//! - Output formats (JSON, Pretty, Compact)
//! - Level filtering, overridable through `RUST_LOG`
//! - Output to stderr, so stdout stays reserved for results
//!
//! ## Example
//!
//! ```rust,ignore
//! use linkrate_core::observe::{init_logging, LogConfig, LogLevel};
//!
//! let config = LogConfig {
//!     level: LogLevel::Debug,
//!     ..Default::default()
//! };
//!
//! init_logging(&config);
//!
//! tracing::debug!(cnr = 94184717.7, "link evaluated");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::{fmt as tfmt, prelude::*, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level (default)
    #[default]
    Warn,
    /// Error level (least verbose)
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (machine-readable)
    Json,
    /// Pretty format (human-readable, multi-line)
    Pretty,
    /// Compact format (one line per event)
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include timestamps
    pub timestamps: bool,
    /// Include source location (file:line)
    pub source_location: bool,
    /// Module filter (e.g., "linkrate_core=trace")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            timestamps: true,
            source_location: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Verbose, human-readable configuration.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            source_location: true,
            ..Default::default()
        }
    }

    /// Errors only.
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            format: LogFormat::Compact,
            timestamps: false,
            ..Default::default()
        }
    }

    /// Filter directive used when neither `filter` nor `RUST_LOG` is set.
    fn directive(&self) -> String {
        self.filter.clone().unwrap_or_else(|| self.level.to_string())
    }
}

/// Initialize the global logging subscriber.
///
/// An explicit `filter` wins, then `RUST_LOG`, then `level`.
/// Subsequent calls are silently ignored.
pub fn init_logging(config: &LogConfig) {
    let filter = match config.filter {
        Some(ref custom) => {
            EnvFilter::try_new(custom).unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive())),
    };

    let layer = tfmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_target(config.source_location);

    let result = match (config.format, config.timestamps) {
        (LogFormat::Json, true) => {
            tracing_subscriber::registry().with(filter).with(layer.json()).try_init()
        }
        (LogFormat::Json, false) => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json().without_time())
            .try_init(),
        (LogFormat::Pretty, true) => {
            tracing_subscriber::registry().with(filter).with(layer.pretty()).try_init()
        }
        (LogFormat::Pretty, false) => tracing_subscriber::registry()
            .with(filter)
            .with(layer.pretty().without_time())
            .try_init(),
        (LogFormat::Compact, true) => {
            tracing_subscriber::registry().with(filter).with(layer.compact()).try_init()
        }
        (LogFormat::Compact, false) => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact().without_time())
            .try_init(),
    };

    // Ignore error if subscriber was already set
    let _ = result;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Debug), "debug");
        assert_eq!(format!("{}", LogLevel::Warn), "warn");
        assert_eq!(format!("{}", LogLevel::Error), "error");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("TRACE".parse::<LogLevel>(), Ok(LogLevel::Trace));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_config_presets() {
        let default = LogConfig::default();
        assert_eq!(default.level, LogLevel::Warn);
        assert_eq!(default.format, LogFormat::Compact);

        let dev = LogConfig::development();
        assert_eq!(dev.level, LogLevel::Debug);
        assert_eq!(dev.format, LogFormat::Pretty);
        assert!(dev.source_location);

        let quiet = LogConfig::quiet();
        assert_eq!(quiet.level, LogLevel::Error);
        assert!(!quiet.timestamps);
    }

    #[test]
    fn test_directive() {
        assert_eq!(LogConfig::default().directive(), "warn");
        let custom = LogConfig {
            filter: Some("linkrate_core=trace".into()),
            ..Default::default()
        };
        assert_eq!(custom.directive(), "linkrate_core=trace");
    }

    #[test]
    fn test_config_serde() {
        let config = LogConfig::development();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"level\":\"debug\""));
        let parsed: LogConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(&LogConfig::quiet());
        init_logging(&LogConfig::default());
        tracing::error!("still alive");
    }
}
