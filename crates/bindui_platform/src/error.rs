//! Platform error types

use std::path::PathBuf;

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// `Platform::init` was called after the platform was already selected
    #[error("Platform already initialized (api level {0})")]
    AlreadyInitialized(u32),

    /// API level override could not be parsed
    #[error("Invalid api level {value:?}: {reason}")]
    InvalidApiLevel { value: String, reason: String },

    /// Logging subscriber could not be installed
    #[error("Logging initialization failed: {0}")]
    Logging(String),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid TOML or has the wrong shape
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized back to TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
