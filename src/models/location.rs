//! Location models: provider search candidates and the resolved location

use serde::{Deserialize, Serialize};

/// One result from the provider's search endpoint
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationCandidate {
    /// Place name (city, town, etc.)
    pub name: String,
    /// Region, state or province. Empty when the provider has none
    #[serde(default)]
    pub region: String,
    /// Country name. Empty when the provider has none
    #[serde(default)]
    pub country: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl LocationCandidate {
    /// Create a new candidate
    #[must_use]
    pub fn new(name: &str, region: &str, country: &str, lat: f64, lon: f64) -> Self {
        Self {
            name: name.to_string(),
            region: region.to_string(),
            country: country.to_string(),
            lat,
            lon,
        }
    }

    /// Coordinate key used for every weather query after resolution
    #[must_use]
    pub fn query_key(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }

    /// Display label, `"<name>[, <region>], <country>"` with empty segments skipped
    #[must_use]
    pub fn label(&self) -> String {
        [&self.name, &self.region, &self.country]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The candidate chosen by the resolver, reduced to what the weather fetch needs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// `"<lat>,<lon>"` of the chosen candidate
    pub query_key: String,
    /// Human-readable display name
    pub label: String,
}

impl From<&LocationCandidate> for ResolvedLocation {
    fn from(candidate: &LocationCandidate) -> Self {
        Self {
            query_key: candidate.query_key(),
            label: candidate.label(),
        }
    }
}
