//! `TravelChat` - weather assistant for the travel planner
//!
//! Turns free-text questions such as "forecast for Bengaluru tomorrow" into a
//! resolved place and a short weather reply.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use chat::{AliasTable, ChatMeta, ChatReply, ChatService, Day, Intent, IntentParser};
pub use chat::{LocationResolver, Resolution};
pub use config::TravelChatConfig;
pub use error::TravelChatError;
pub use models::{CurrentConditions, DailyForecast, Forecast, LocationCandidate, ResolvedLocation};
pub use weather::{WeatherApiClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelChatError>;
