//! Weather data models and display methods

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current conditions at a location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature_c: f32,
    /// Apparent temperature in Celsius
    pub feels_like_c: f32,
    /// Human-readable description of weather conditions
    pub condition: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in km/h
    pub wind_kph: f32,
}

impl CurrentConditions {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format_celsius(self.temperature_c)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} km/h", self.wind_kph)
    }
}

/// Aggregated forecast for one calendar day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Daily high in Celsius
    pub max_c: f32,
    /// Daily low in Celsius
    pub min_c: f32,
    /// Daily average in Celsius
    pub avg_c: f32,
    pub condition: String,
    /// Chance of rain percentage (0-100)
    pub chance_of_rain: u8,
    /// Average humidity percentage (0-100)
    pub avg_humidity: u8,
    /// Maximum wind speed in km/h
    pub max_wind_kph: f32,
}

impl DailyForecast {
    /// Format the high/low range, e.g. `"31.2°C / 21.0°C"`
    #[must_use]
    pub fn format_range(&self) -> String {
        format!("{} / {}", format_celsius(self.max_c), format_celsius(self.min_c))
    }

    /// Format the day's peak wind speed with unit
    #[must_use]
    pub fn format_max_wind(&self) -> String {
        format!("{:.1} km/h", self.max_wind_kph)
    }
}

/// Daily forecasts ordered from today onwards
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Forecast {
    pub days: Vec<DailyForecast>,
}

impl Forecast {
    /// Forecast for `offset` days after today (0 = today)
    #[must_use]
    pub fn day(&self, offset: usize) -> Option<&DailyForecast> {
        self.days.get(offset)
    }
}

fn format_celsius(value: f32) -> String {
    format!("{value:.1}°C")
}
