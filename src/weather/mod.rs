//! Weather provider seam
//!
//! The chat service and location resolver only talk to the provider through
//! [`WeatherProvider`], so tests can swap in an in-memory fake.

use async_trait::async_trait;

use crate::Result;
use crate::models::{CurrentConditions, Forecast, LocationCandidate};

pub mod weatherapi;

pub use weatherapi::WeatherApiClient;

/// Search, current-conditions and forecast lookups against a weather provider
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Free-text place search. An unknown place is `Ok(vec![])`, not an error.
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>>;

    /// Current conditions for a `"<lat>,<lon>"` query key
    async fn current(&self, query_key: &str) -> Result<CurrentConditions>;

    /// Daily forecast for `days` days starting today
    async fn forecast(&self, query_key: &str, days: u8) -> Result<Forecast>;
}
