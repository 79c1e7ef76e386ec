use std::fs;
use std::path::PathBuf;
use serde::Deserialize;

/// Default directory (relative to the working directory) for converted profiles
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Property-list encoding of the written `.terminal` file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Binary,
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_create_output_dir() -> bool {
    true
}

/// Converter settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Output directory, joined onto the working directory
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Create the output directory when it does not exist.
    /// When false, a missing directory makes every write fail.
    #[serde(default = "default_create_output_dir")]
    pub create_output_dir: bool,
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            create_output_dir: default_create_output_dir(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Returns the config directory path (~/.iterm2terminal)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".iterm2terminal"))
    }

    /// Returns the config file path (~/.iterm2terminal/settings.json)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.json"))
    }

    /// Loads settings from the config file, returns default if not found or invalid
    pub fn load() -> Self {
        match Self::load_with_error() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!(error = %e, "using default settings");
                Self::default()
            }
        }
    }

    /// Loads settings from the config file with error information
    pub fn load_with_error() -> Result<Self, String> {
        let config_path = Self::config_path()
            .ok_or_else(|| "Could not determine config path".to_string())?;

        let content = fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read settings file: {}", e))?;

        let settings = Self::from_json(&content)?;
        tracing::debug!(path = %config_path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content)
            .map_err(|e| format!("Invalid JSON in settings.json: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.output_dir, "dist");
        assert!(settings.create_output_dir);
        assert_eq!(settings.output_format, OutputFormat::Xml);
    }

    #[test]
    fn test_parse_partial_json() {
        let settings = Settings::from_json(r#"{"output_format":"binary"}"#).unwrap();
        assert_eq!(settings.output_format, OutputFormat::Binary);
        assert_eq!(settings.output_dir, "dist");
        assert!(settings.create_output_dir);
    }

    #[test]
    fn test_parse_empty_object() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings.output_dir, DEFAULT_OUTPUT_DIR);
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(err.starts_with("Invalid JSON"));
        assert!(Settings::from_json(r#"{"output_format":"yaml"}"#).is_err());
    }
}
