//! Error types and handling for the `TravelChat` service

use thiserror::Error;

/// Main error type for the `TravelChat` service
#[derive(Error, Debug)]
pub enum TravelChatError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather provider communication errors (transport, non-2xx, bad payload)
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status returned by the provider, when one was received
        status: Option<u16>,
    },

    /// Chat input the service refuses to process
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl TravelChatError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error without a status code
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
            status: None,
        }
    }

    /// Create a new API error for a non-success HTTP status
    pub fn api_status<S: Into<String>>(message: S, status: u16) -> Self {
        Self::Api {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status reported by the provider, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            TravelChatError::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelChatError::Config { .. } => {
                "The weather assistant is not configured yet. Please ask an administrator to set the weather API key."
                    .to_string()
            }
            TravelChatError::Api { .. } => {
                "Sorry, I couldn't reach the weather service right now. Please try again in a moment."
                    .to_string()
            }
            TravelChatError::Validation { message } => message.clone(),
        }
    }
}
