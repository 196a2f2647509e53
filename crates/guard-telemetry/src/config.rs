//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup banner and metrics
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Whether to log the metrics text dump when the guard exits
    pub dump_metrics_on_exit: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ssid-guard".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            dump_metrics_on_exit: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SG_SERVICE_NAME`: Service name (default: ssid-guard)
    /// - `SG_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SG_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SG_JSON_LOGS`: Enable JSON logs (default: false, true under systemd)
    /// - `SG_METRICS_DUMP`: Log metrics on exit (default: true)
    pub fn from_env() -> Self {
        let under_journald = env::var("JOURNAL_STREAM").is_ok();

        Self {
            service_name: env::var("SG_SERVICE_NAME")
                .unwrap_or_else(|_| "ssid-guard".to_string()),

            log_level: env::var("SG_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("SG_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),

            json_logs: env::var("SG_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(under_journald),

            dump_metrics_on_exit: env::var("SG_METRICS_DUMP")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value != "false" && value != "0" && value != "no"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "ssid-guard");
        assert_eq!(config.log_level, "info");
        assert!(config.console_output);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(" no "));
    }
}
