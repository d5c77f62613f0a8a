//! Configuration Settings

use std::path::{Path, PathBuf};

use hclsense_validate::required::DEFAULT_SUPPRESSED_BLOCKS;
use hclsense_validate::{BodySchema, MissingRequiredAttribute, SchemaError, ValidationEngine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the configuration file looked up in the workspace root
pub const CONFIG_FILE_NAME: &str = "hclsense.toml";

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Validation settings
    pub validation: ValidationSettings,
    /// Schema settings
    pub schema: SchemaSettings,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationSettings {
    /// Run validation at all
    pub enabled: bool,
    /// Report missing required attributes
    pub required_attributes: bool,
    /// Top-level block types whose bodies are never checked
    pub suppressed_blocks: Vec<String>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            required_attributes: true,
            suppressed_blocks: DEFAULT_SUPPRESSED_BLOCKS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Schema configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SchemaSettings {
    /// Schema file, relative to the workspace root
    pub path: Option<String>,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load `hclsense.toml` from `dir`, or defaults when there is none
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Build a validation engine from these settings
    pub fn build_engine(&self) -> ValidationEngine {
        let mut engine = ValidationEngine::new();
        if !self.validation.enabled {
            return engine;
        }

        if self.validation.required_attributes {
            engine.add_validator(Box::new(MissingRequiredAttribute::with_suppressed_blocks(
                self.validation.suppressed_blocks.iter().cloned(),
            )));
        }
        engine
    }

    /// Load the configured schema, resolving its path against `root`
    pub fn load_schema(&self, root: &Path) -> Result<BodySchema, ConfigError> {
        match &self.schema.path {
            Some(path) => Ok(BodySchema::load(&root.join(path))?),
            None => Ok(BodySchema::builtin()?),
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_validation_defaults() {
        let settings = ValidationSettings::default();
        assert!(settings.enabled);
        assert!(settings.required_attributes);
        assert_eq!(settings.suppressed_blocks, vec!["provider"]);
    }

    #[test]
    fn test_settings_debug() {
        let settings = Settings::default();
        let debug_str = format!("{:?}", settings);
        assert!(debug_str.contains("Settings"));
    }
}
