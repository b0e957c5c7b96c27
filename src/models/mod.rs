//! Data models for the TravelChat service
//!
//! This module contains the core domain models organized by concern:
//! - Location: provider search candidates and resolved locations
//! - Weather: current conditions and daily forecasts

pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{LocationCandidate, ResolvedLocation};
pub use weather::{CurrentConditions, DailyForecast, Forecast};
