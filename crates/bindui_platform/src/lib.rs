//! bindui Platform
//!
//! Everything that depends on which host platform version the app runs on.
//! The API level is decided once, and the strategy for each version-gated
//! capability is picked from it at that point:
//!
//! - **Payload retrieval**: type-checked on API 33+, cast-after-fetch below
//! - **Markup conversion**: explicit compatibility mode on API 24+, fixed
//!   legacy behaviour below
//!
//! # Initialization
//!
//! Hosts either select the platform explicitly at startup:
//!
//! ```ignore
//! let config = BinduiConfig::load("bindui.toml")?;
//! Platform::init(Platform::from_config(&config))?;
//! ```
//!
//! or let the first [`Platform::current`] call detect it.

pub mod config;
pub mod error;
pub mod intent;
pub mod logging;
pub mod payload;
pub mod version;

use std::any::Any;
use std::sync::OnceLock;
use std::time::Duration;

use bindui_core::{DebounceGuard, DEFAULT_MIN_INTERVAL};
use bindui_text::{MarkupConverter, MarkupMode, RichText};

pub use config::BinduiConfig;
pub use error::{ConfigError, PlatformError, Result};
pub use intent::{get_intent_extra, Intent};
pub use logging::init_logging;
pub use payload::{Payload, PayloadAccessor, RetrievalStrategy};
pub use version::{ApiLevel, API_LEVEL_ENV};

/// Global platform instance
static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Detect the API level: the environment override if valid, else the latest
pub fn detect_api_level() -> ApiLevel {
    resolve_api_level(ApiLevel::from_env(), ApiLevel::LATEST)
}

/// Apply an override read from the environment, falling back when it is
/// absent or invalid
fn resolve_api_level(from_env: Result<Option<ApiLevel>>, fallback: ApiLevel) -> ApiLevel {
    match from_env {
        Ok(Some(level)) => level,
        Ok(None) => fallback,
        Err(e) => {
            tracing::warn!("Ignoring {}: {}", API_LEVEL_ENV, e);
            fallback
        }
    }
}

/// The selected platform and the strategies chosen for it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Platform {
    api_level: ApiLevel,
    payload: PayloadAccessor,
    markup: MarkupConverter,
    min_interval: Duration,
}

impl Platform {
    /// Select strategies for `api_level` with default settings
    pub fn new(api_level: ApiLevel) -> Self {
        Self::with_settings(api_level, MarkupMode::default(), DEFAULT_MIN_INTERVAL)
    }

    fn with_settings(api_level: ApiLevel, mode: MarkupMode, min_interval: Duration) -> Self {
        let markup = if api_level.supports(ApiLevel::NOUGAT) {
            MarkupConverter::modern(mode)
        } else {
            MarkupConverter::legacy()
        };

        Self {
            api_level,
            payload: PayloadAccessor::for_api_level(api_level),
            markup,
            min_interval,
        }
    }

    /// Select from the environment alone
    pub fn detect() -> Self {
        Self::new(detect_api_level())
    }

    /// Select from configuration
    ///
    /// The environment override still wins over `platform.api_level`.
    pub fn from_config(config: &BinduiConfig) -> Self {
        let api_level = resolve_api_level(
            ApiLevel::from_env(),
            config.platform.api_level.unwrap_or(ApiLevel::LATEST),
        );
        Self::with_settings(api_level, config.markup.mode, config.debounce.min_interval())
    }

    /// Install `platform` as the global platform (call once at app startup)
    pub fn init(platform: Platform) -> Result<&'static Platform> {
        if let Err(rejected) = PLATFORM.set(platform) {
            let current = PLATFORM.get().map_or(rejected.api_level, |p| p.api_level);
            return Err(PlatformError::AlreadyInitialized(current.get()));
        }
        tracing::info!(
            api_level = platform.api_level.get(),
            payload = ?platform.payload.strategy(),
            markup = ?platform.markup.strategy(),
            "platform initialized"
        );
        Ok(Platform::current())
    }

    /// The global platform, detecting it on first use if `init` was never called
    pub fn current() -> &'static Platform {
        PLATFORM.get_or_init(Platform::detect)
    }

    /// The global platform, if already selected
    pub fn try_get() -> Option<&'static Platform> {
        PLATFORM.get()
    }

    pub fn api_level(&self) -> ApiLevel {
        self.api_level
    }

    pub fn payload(&self) -> &PayloadAccessor {
        &self.payload
    }

    pub fn markup(&self) -> &MarkupConverter {
        &self.markup
    }

    /// Configured default debounce interval
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// A fresh guard using the configured interval
    pub fn debounce_guard(&self) -> DebounceGuard {
        DebounceGuard::with_interval(self.min_interval)
    }

    /// Typed value from `payload`
    pub fn get<T: Any + Clone>(&self, payload: &Payload, key: &str) -> Option<T> {
        self.payload.get(payload, key)
    }

    /// Convert markup with this platform's strategy
    pub fn convert_markup(&self, markup: &str) -> RichText {
        self.markup.convert(markup)
    }
}

/// Convert markup using the global platform
pub fn convert_from_markup(markup: &str) -> RichText {
    Platform::current().convert_markup(markup)
}

/// Typed payload value using the global platform
pub fn get_from_payload<T: Any + Clone>(payload: &Payload, key: &str) -> Option<T> {
    Platform::current().get(payload, key)
}
