//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use consilium_application::BehaviorConfig;
use consilium_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default Gemini REST base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model answering for all four personas
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Default sampling temperature (favoring diverse voices)
pub const DEFAULT_TEMPERATURE: f64 = 0.9;

/// Environment variables checked for the credential, in order
pub const DEFAULT_CREDENTIAL_VARS: [&str; 2] = ["VITE_GEMINI_API_KEY", "REACT_APP_GEMINI_API_KEY"];

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("backend.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("backend.model cannot be empty")]
    EmptyModel,

    #[error("backend.temperature must be between 0.0 and 2.0 (got {0})")]
    InvalidTemperature(f64),

    #[error("backend.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("credential.env_vars must name at least one variable")]
    NoCredentialVars,
}

/// Raw backend configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// REST base URL, without the `/models/...` suffix
    pub base_url: String,
    /// Model name used for the director call
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Request timeout; transport default when unset
    pub timeout_seconds: Option<u64>,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: None,
        }
    }
}

impl FileBackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// Raw credential configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCredentialConfig {
    /// Environment variable names, checked in order
    pub env_vars: Vec<String>,
}

impl Default for FileCredentialConfig {
    fn default() -> Self {
        Self {
            env_vars: DEFAULT_CREDENTIAL_VARS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Delay before returning the locked set (milliseconds)
    pub locked_delay_ms: u64,
    /// Delay before revealing consensus (milliseconds)
    pub consensus_reveal_delay_ms: u64,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        let defaults = BehaviorConfig::default();
        Self {
            locked_delay_ms: defaults.locked_delay.as_millis() as u64,
            consensus_reveal_delay_ms: defaults.consensus_reveal_delay.as_millis() as u64,
        }
    }
}

impl FileBehaviorConfig {
    /// Convert to the application-layer type
    pub fn to_behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig::default()
            .with_locked_delay(Duration::from_millis(self.locked_delay_ms))
            .with_consensus_reveal_delay(Duration::from_millis(self.consensus_reveal_delay_ms))
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Directory exported reports are written to
    pub report_dir: Option<String>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            report_dir: None,
        }
    }
}

impl FileOutputConfig {
    /// Report directory, defaulting to the working directory
    pub fn report_dir(&self) -> PathBuf {
        self.report_dir
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl FileReplConfig {
    /// History file path with a leading `~` expanded
    pub fn history_file(&self) -> Option<PathBuf> {
        self.history_file.as_deref().map(expand_home)
    }
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> PathBuf {
    if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return home;
    }
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub backend: FileBackendConfig,
    pub credential: FileCredentialConfig,
    pub behavior: FileBehaviorConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.backend.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModel);
        }
        if !(0.0..=2.0).contains(&self.backend.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                self.backend.temperature,
            ));
        }
        if self.backend.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self
            .credential
            .env_vars
            .iter()
            .all(|name| name.trim().is_empty())
        {
            return Err(ConfigValidationError::NoCredentialVars);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.model, DEFAULT_MODEL);
        assert_eq!(config.backend.temperature, 0.9);
        assert_eq!(
            config.credential.env_vars,
            vec!["VITE_GEMINI_API_KEY", "REACT_APP_GEMINI_API_KEY"]
        );
        assert_eq!(config.output.format, OutputFormat::Full);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
[backend]
model = "gemini-2.0-flash"

[behavior]
consensus_reveal_delay_ms = 0

[output]
format = "json"
report_dir = "reports"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.model, "gemini-2.0-flash");
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.report_dir(), PathBuf::from("reports"));

        let behavior = config.behavior.to_behavior_config();
        assert_eq!(behavior.locked_delay, Duration::from_millis(1500));
        assert_eq!(behavior.consensus_reveal_delay, Duration::ZERO);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.backend.model = " ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModel));

        let mut config = FileConfig::default();
        config.backend.temperature = 3.5;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature(3.5))
        );

        let mut config = FileConfig::default();
        config.backend.timeout_seconds = Some(0);
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.credential.env_vars = vec![];
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::NoCredentialVars)
        );
    }

    #[test]
    fn test_report_dir_defaults_to_cwd() {
        assert_eq!(FileOutputConfig::default().report_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_history_file_expands_home() {
        let repl = FileReplConfig {
            history_file: Some("~/.local/share/consilium/history.txt".to_string()),
            ..Default::default()
        };
        let expected = dirs::home_dir()
            .map(|home| home.join(".local/share/consilium/history.txt"))
            .unwrap_or_else(|| PathBuf::from("~/.local/share/consilium/history.txt"));
        assert_eq!(repl.history_file(), Some(expected));
    }

    #[test]
    fn test_history_file_keeps_plain_paths() {
        let absolute = FileReplConfig {
            history_file: Some("/var/tmp/history.txt".to_string()),
            ..Default::default()
        };
        assert_eq!(
            absolute.history_file(),
            Some(PathBuf::from("/var/tmp/history.txt"))
        );

        let relative = FileReplConfig {
            history_file: Some("~user/history.txt".to_string()),
            ..Default::default()
        };
        assert_eq!(
            relative.history_file(),
            Some(PathBuf::from("~user/history.txt"))
        );
        assert_eq!(FileReplConfig::default().history_file(), None);
    }
}
