//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/assetree/assetree.toml`
//! 3. Environment variables: `ASSETREE_*` prefix

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::ExportAction;

/// Unified configuration for assetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default action tag stamped on every exported row
    pub action: ExportAction,
    /// Pretty-print exported workbook files
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            action: ExportAction::Insert,
            pretty: true,
        }
    }
}

/// Get the XDG config directory for assetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "assetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("assetree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("action", defaults.action.to_string())
            .map_err(config_err)?
            .set_default("pretty", defaults.pretty)
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        builder = builder.add_source(Environment::with_prefix("ASSETREE"));

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# assetree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/assetree/assetree.toml
#   Env:    ASSETREE_* environment variables (explicit overrides)

# Default action tag for exported rows: "INSERT" or "DELETE"
# action = "INSERT"

# Pretty-print exported workbook files
# pretty = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load().expect("load defaults");
        assert_eq!(settings.action, ExportAction::Insert);
        assert!(settings.pretty);
    }

    #[test]
    fn given_template_when_parsing_then_valid_toml() {
        let template = Settings::template();
        let parsed: Result<toml::Value, _> = toml::from_str(&template);
        assert!(parsed.is_ok(), "template should be valid TOML");
    }

    #[test]
    fn given_settings_when_rendering_toml_then_round_trips() {
        let settings = Settings {
            action: ExportAction::Delete,
            pretty: false,
        };
        let rendered = settings.to_toml().expect("render");
        let back: Settings = toml::from_str(&rendered).expect("parse");
        assert_eq!(back, settings);
    }
}
