use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fallbacks for the command surface. CLI flags and environment variables
/// take precedence over anything set here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Binary name or path of the stack runner.
    #[serde(default = "default_terragrunt_bin")]
    pub terragrunt_bin: String,

    #[serde(default)]
    pub stack_root: Option<String>,

    #[serde(default)]
    pub log_file: Option<String>,

    #[serde(default)]
    pub non_interactive: bool,
}

fn default_terragrunt_bin() -> String {
    "terragrunt".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            terragrunt_bin: default_terragrunt_bin(),
            stack_root: None,
            log_file: None,
            non_interactive: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "tgops_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}
