//! Chat orchestration: parse, resolve, fetch, reply
//!
//! [`ChatService::respond`] never fails. Every error path ends in a reply the
//! user can read; provider faults are logged here and nowhere else.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use super::alias::AliasTable;
use super::intent::{Day, IntentParser};
use super::reply;
use super::resolver::{LocationResolver, Resolution};
use crate::config::TravelChatConfig;
use crate::models::ResolvedLocation;
use crate::weather::{WeatherApiClient, WeatherProvider};
use crate::{Result, TravelChatError};

/// Forecast length requested when the user asks about tomorrow
const TOMORROW_FORECAST_DAYS: u8 = 2;

/// Longest message, in characters, the parser will look at
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Reply returned for every chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ChatMeta>,
}

/// Summary of what was answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMeta {
    pub day: Day,
    /// Label of the resolved location, absent when nothing was resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ChatReply {
    fn text(reply: String) -> Self {
        Self { reply, meta: None }
    }

    fn with_meta(reply: String, day: Day, location: Option<String>) -> Self {
        Self {
            reply,
            meta: Some(ChatMeta { day, location }),
        }
    }
}

pub struct ChatService {
    /// `None` when no API key is configured
    provider: Option<Arc<dyn WeatherProvider>>,
    parser: IntentParser,
    resolver: LocationResolver,
}

impl ChatService {
    pub fn new(
        provider: Option<Arc<dyn WeatherProvider>>,
        aliases: AliasTable,
        preferred_country: Option<String>,
    ) -> Self {
        let aliases = Arc::new(aliases);
        Self {
            provider,
            parser: IntentParser::new(Arc::clone(&aliases)),
            resolver: LocationResolver::new(aliases, preferred_country),
        }
    }

    /// Build the service from configuration.
    ///
    /// A missing API key is not an error here: the service starts and answers
    /// every message with the configuration reply.
    pub fn from_config(config: &TravelChatConfig) -> Result<Self> {
        let provider: Option<Arc<dyn WeatherProvider>> = if config.has_api_key() {
            Some(Arc::new(WeatherApiClient::new(&config.weather)?))
        } else {
            warn!("No weather API key configured; chat replies will ask for configuration");
            None
        };

        let aliases = AliasTable::with_overrides(&config.chat.aliases);
        info!(
            "Chat service ready with {} aliases, preferred country {:?}",
            aliases.len(),
            config.chat.preferred_country
        );

        Ok(Self::new(
            provider,
            aliases,
            config.chat.preferred_country.clone(),
        ))
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Answer one message
    #[instrument(skip(self))]
    pub async fn respond(&self, message: &str) -> ChatReply {
        let Some(provider) = self.provider.as_deref() else {
            let err = TravelChatError::config("Weather API key is not configured");
            warn!("Rejecting chat message: {}", err);
            return ChatReply::text(err.user_message());
        };

        if message.trim().is_empty() {
            return ChatReply::text(reply::HELP_MESSAGE.to_string());
        }

        if let Err(err) = check_length(message) {
            warn!("Rejecting chat message: {}", err);
            return ChatReply::text(err.user_message());
        }

        let Some(intent) = self.parser.parse(message) else {
            return ChatReply::text(reply::HELP_MESSAGE.to_string());
        };

        let Some(city) = intent.city else {
            return ChatReply::with_meta(reply::missing_location(), intent.day, None);
        };

        match self.answer(provider, &city, intent.day).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(status = ?err.status(), "Weather lookup for '{}' failed: {}", city, err);
                ChatReply::text(err.user_message())
            }
        }
    }

    async fn answer(&self, provider: &dyn WeatherProvider, city: &str, day: Day) -> Result<ChatReply> {
        let location = match self.resolver.resolve(provider, city).await? {
            Resolution::Resolved(location) => location,
            Resolution::NotFound { query } => {
                return Ok(ChatReply::with_meta(
                    reply::location_not_found(&query, self.resolver.preferred_country()),
                    day,
                    None,
                ));
            }
        };

        let text = weather_reply(provider, &location, day).await?;
        Ok(ChatReply::with_meta(text, day, Some(location.label)))
    }
}

fn check_length(message: &str) -> Result<()> {
    let length = message.chars().count();
    if length > MAX_MESSAGE_CHARS {
        return Err(TravelChatError::validation(format!(
            "That message is a bit long ({length} characters). Please keep weather questions to {MAX_MESSAGE_CHARS} characters or fewer."
        )));
    }
    Ok(())
}

async fn weather_reply(
    provider: &dyn WeatherProvider,
    location: &ResolvedLocation,
    day: Day,
) -> Result<String> {
    match day {
        Day::Today => {
            let current = provider.current(&location.query_key).await?;
            Ok(reply::current_conditions(&location.label, &current))
        }
        Day::Tomorrow => {
            let forecast = provider
                .forecast(&location.query_key, TOMORROW_FORECAST_DAYS)
                .await?;
            let tomorrow = forecast.day(day.offset()).ok_or_else(|| {
                TravelChatError::api(format!(
                    "Forecast for {} returned {} days, expected {}",
                    location.label,
                    forecast.days.len(),
                    TOMORROW_FORECAST_DAYS
                ))
            })?;
            Ok(reply::tomorrow_forecast(&location.label, tomorrow))
        }
    }
}
