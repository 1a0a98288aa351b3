//! Host platform API levels

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, Result};

/// Environment variable that overrides the detected API level
pub const API_LEVEL_ENV: &str = "BINDUI_API_LEVEL";

/// Host platform API level
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    /// First level with selectable markup compatibility modes
    pub const NOUGAT: ApiLevel = ApiLevel(24);
    /// First level with type-checked payload retrieval
    pub const TIRAMISU: ApiLevel = ApiLevel(33);
    /// Level assumed when nothing else is known
    pub const LATEST: ApiLevel = ApiLevel(35);

    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this level offers everything introduced at `min`
    pub fn supports(self, min: ApiLevel) -> bool {
        self >= min
    }

    /// Parse an API level such as `"33"`
    pub fn parse(value: &str) -> Result<Self> {
        value
            .trim()
            .parse::<u32>()
            .map(ApiLevel)
            .map_err(|e| PlatformError::InvalidApiLevel {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }

    /// Read the [`API_LEVEL_ENV`] override, if set
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var(API_LEVEL_ENV) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }
}

impl Default for ApiLevel {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}
