//! Serializable logger configuration

use super::{
    code_unit::wide,
    error::{LoggerError, Result},
    log_level::LogLevel,
    template::DEFAULT_FORMAT,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Logger settings that can be loaded from JSON.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
///
/// ```
/// use ak_logger::{LoggerConfig, LogLevel};
///
/// let config = LoggerConfig::from_json(r#"{"level": "warn", "colors": false}"#).unwrap();
/// assert_eq!(config.level, LogLevel::Warning);
/// assert_eq!(config.format, "[%l %t]: %s\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Narrow wrapper template
    pub format: String,
    /// Wide wrapper template, stored as text and encoded to UTF-16 on use
    pub wide_format: String,
    /// Initial level
    pub level: LogLevel,
    /// Force colors on or off; `None` lets the console decide
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<bool>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            wide_format: DEFAULT_FORMAT.to_string(),
            level: LogLevel::Info,
            colors: None,
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading config", path.display().to_string(), e)
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that both templates can produce output.
    ///
    /// A template that is empty, or empty up to its first NUL, renders
    /// nothing at all.
    pub fn validate(&self) -> Result<()> {
        Self::check_template("format", &self.format)?;
        Self::check_template("wide_format", &self.wide_format)
    }

    /// Wide template as UTF-16 units
    pub fn wide_format_units(&self) -> Vec<u16> {
        wide(&self.wide_format)
    }

    fn check_template(field: &str, template: &str) -> Result<()> {
        if template.split('\0').next().unwrap_or_default().is_empty() {
            return Err(LoggerError::config(field, "template renders nothing"));
        }
        if !template.contains("%s") {
            eprintln!(
                "[LOGGER WARNING] {} template {:?} has no %s, messages will not be shown",
                field, template
            );
        }
        Ok(())
    }
}
