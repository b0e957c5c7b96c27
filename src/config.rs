//! Configuration management for the `TravelChat` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelChatError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure for the `TravelChat` service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelChatConfig {
    /// Weather provider configuration
    pub weather: WeatherConfig,
    /// Chatbot behaviour (location bias, aliases)
    pub chat: ChatConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
}

/// Weather provider configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Weather API key. Chat requests fail with a configuration reply while unset.
    pub api_key: Option<String>,
    /// Base URL for the weather API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Chatbot settings consumed by the intent parser and location resolver
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Country favoured when the user does not name one explicitly
    pub preferred_country: Option<String>,
    /// Extra alias pairs (misspelling -> canonical name), applied over the built-ins
    pub aliases: HashMap<String, String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    16 * 1024
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl TravelChatConfig {
    /// Load configuration from `config_path`, or the default location when `None`,
    /// with environment overrides applied on top
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRAVELCHAT_WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("TRAVELCHAT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelChatConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelchat").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self
            .weather
            .api_key
            .as_ref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.weather.api_key = None;
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self
            .chat
            .preferred_country
            .as_ref()
            .is_some_and(|country| country.trim().is_empty())
        {
            self.chat.preferred_country = None;
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.max_body_bytes == 0 {
            self.server.max_body_bytes = default_max_body_bytes();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_aliases()?;
        Ok(())
    }

    /// Whether the weather provider credential is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.weather.api_key.is_some()
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                TravelChatError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.port == 0 {
            return Err(TravelChatError::config("Server port must be non-zero").into());
        }

        if self.server.max_body_bytes > 1024 * 1024 {
            return Err(
                TravelChatError::config("Server max body size cannot exceed 1 MiB").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelChatError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelChatError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(TravelChatError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    fn validate_aliases(&self) -> Result<()> {
        for (alias, canonical) in &self.chat.aliases {
            if alias.trim().is_empty() || canonical.trim().is_empty() {
                return Err(TravelChatError::config(format!(
                    "Alias entries cannot be blank (got '{alias}' -> '{canonical}')"
                ))
                .into());
            }
        }
        Ok(())
    }
}
