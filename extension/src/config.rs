// Background worker configuration
// Service workers have no filesystem, so extension.toml is embedded at build time

use serde::Deserialize;

use crate::error::{ExtensionError, Result};

const EMBEDDED_CONFIG: &str = include_str!("../extension.toml");

pub const DEFAULT_TARGET_ORIGIN: &str = "https://wplace.live";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExtensionConfig {
    #[serde(default = "default_target_origin")]
    pub target_origin: String,

    #[serde(default = "default_monitoring_on_load")]
    pub monitoring_on_load: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String, // "trace", "debug", "info", "warn", "error"
}

fn default_target_origin() -> String {
    DEFAULT_TARGET_ORIGIN.to_string()
}

fn default_monitoring_on_load() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            target_origin: default_target_origin(),
            monitoring_on_load: default_monitoring_on_load(),
            log_level: default_log_level(),
        }
    }
}

impl ExtensionConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ExtensionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The extension.toml compiled into the worker
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.target_origin.starts_with("https://") || self.target_origin.starts_with("http://"))
        {
            return Err(ExtensionError::InvalidConfig(format!(
                "target_origin must be an http(s) URL prefix, got '{}'",
                self.target_origin
            )));
        }

        // Scheme alone would match every page
        if self.target_origin.ends_with("://") {
            return Err(ExtensionError::InvalidConfig(
                "target_origin has no host".to_string(),
            ));
        }

        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<log::Level> {
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" => Ok(log::Level::Trace),
            "debug" => Ok(log::Level::Debug),
            "info" => Ok(log::Level::Info),
            "warn" => Ok(log::Level::Warn),
            "error" => Ok(log::Level::Error),
            other => Err(ExtensionError::InvalidConfig(format!(
                "Unknown log_level: {}",
                other
            ))),
        }
    }
}
