//! Configuration and settings management
//!
//! Loads settings from config files and environment variables and validates
//! them once at startup. Everything downstream receives an immutable [`Settings`].

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::warn;

/// Default Sonarr location inside a compose network.
pub const DEFAULT_SONARR_URL: &str = "http://sonarr:8989";
/// Default Radarr location inside a compose network.
pub const DEFAULT_RADARR_URL: &str = "http://radarr:7878";
/// Per-request timeout for backend calls.
pub const BACKEND_HTTP_TIMEOUT_SECS: u64 = 10;
/// Number of search results offered as buttons.
pub const SEARCH_RESULT_LIMIT: usize = 5;
/// Number of library entries rendered in a listing.
pub const LIBRARY_LISTING_LIMIT: usize = 20;

/// Raw values as they come out of the config sources, before validation.
#[derive(Debug, Deserialize, Default)]
struct RawSettings {
    telegram_bot_token: Option<String>,
    #[serde(rename = "allowed_users")]
    allowed_users_str: Option<String>,
    #[serde(default = "default_sonarr_url")]
    sonarr_url: String,
    sonarr_api_key: Option<String>,
    #[serde(default = "default_radarr_url")]
    radarr_url: String,
    radarr_api_key: Option<String>,
    #[serde(default = "default_backend_timeout")]
    backend_http_timeout_secs: u64,
}

fn default_sonarr_url() -> String {
    DEFAULT_SONARR_URL.to_string()
}

fn default_radarr_url() -> String {
    DEFAULT_RADARR_URL.to_string()
}

const fn default_backend_timeout() -> u64 {
    BACKEND_HTTP_TIMEOUT_SECS
}

/// Location and credentials of one media-management backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    /// Base URL without the `/api/v3` suffix
    pub url: String,
    /// Value sent in the `X-Api-Key` header
    pub api_key: String,
}

/// Validated application settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Telegram Bot API token
    pub telegram_token: String,
    /// Telegram user ids allowed to use the bot
    pub allowed_users: HashSet<i64>,
    /// Sonarr (TV shows) backend
    pub sonarr: BackendSettings,
    /// Radarr (movies) backend
    pub radarr: BackendSettings,
    /// Timeout applied to every backend request
    pub backend_timeout: Duration,
}

impl Settings {
    /// Load settings from config files and the environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a source cannot be read or a required value is missing.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(build_config()?)
    }

    /// Validate settings from an already assembled [`Config`].
    ///
    /// All missing values are reported at once.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` listing every missing required value.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let raw: RawSettings = config.try_deserialize()?;
        let allowed_users = raw
            .allowed_users_str
            .as_deref()
            .map(parse_user_ids)
            .unwrap_or_default();

        let mut errors = Vec::new();
        let telegram_token = required(raw.telegram_bot_token, "TELEGRAM_BOT_TOKEN", &mut errors);
        if allowed_users.is_empty() {
            errors.push("ALLOWED_USERS is not set".to_string());
        }
        let sonarr_api_key = required(raw.sonarr_api_key, "SONARR_API_KEY", &mut errors);
        let radarr_api_key = required(raw.radarr_api_key, "RADARR_API_KEY", &mut errors);
        if raw.backend_http_timeout_secs == 0 {
            errors.push("BACKEND_HTTP_TIMEOUT_SECS must be greater than 0".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::Message(format!(
                "Configuration errors: {}",
                errors.join(", ")
            )));
        }

        Ok(Self {
            telegram_token,
            allowed_users,
            sonarr: BackendSettings {
                url: raw.sonarr_url,
                api_key: sonarr_api_key,
            },
            radarr: BackendSettings {
                url: raw.radarr_url,
                api_key: radarr_api_key,
            },
            backend_timeout: Duration::from_secs(raw.backend_http_timeout_secs),
        })
    }
}

/// Assemble the layered config sources.
///
/// # Errors
///
/// Returns a `ConfigError` if a present config file is malformed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Not checked into git
        .add_source(File::with_name("config/local").required(false))
        // UPPER_SNAKE_CASE env vars map onto snake_case keys
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

fn required(value: Option<String>, name: &str, errors: &mut Vec<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            errors.push(format!("{name} is not set"));
            String::new()
        }
    }
}

/// Parse a list of Telegram ids separated by commas, semicolons or whitespace.
#[must_use]
pub fn parse_user_ids(s: &str) -> HashSet<i64> {
    s.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring malformed user id in ALLOWED_USERS: {token}");
                None
            }
        })
        .collect()
}
