//! bindui configuration file handling (bindui.toml)
//!
//! ```toml
//! [platform]
//! api_level = 33
//!
//! [debounce]
//! min_interval_ms = 500
//!
//! [markup]
//! mode = "legacy"   # or "compact"
//! ```
//!
//! Every section and key is optional.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use bindui_core::DEFAULT_MIN_INTERVAL;
use bindui_text::MarkupMode;

use crate::error::ConfigError;
use crate::version::ApiLevel;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BinduiConfig {
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub debounce: DebounceConfig,
    #[serde(default)]
    pub markup: MarkupConfig,
}

/// Platform selection
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// Pin the API level instead of detecting it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_level: Option<ApiLevel>,
}

/// Debounce guard defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DebounceConfig {
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

fn default_min_interval_ms() -> u64 {
    DEFAULT_MIN_INTERVAL.as_millis() as u64
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl DebounceConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

/// Markup conversion
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MarkupConfig {
    #[serde(default)]
    pub mode: MarkupMode,
}

impl BinduiConfig {
    /// Parse from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded bindui config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}
