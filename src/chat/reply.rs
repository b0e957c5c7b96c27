//! Templated reply strings

use crate::models::{CurrentConditions, DailyForecast};

pub const HELP_MESSAGE: &str = "I can help with the weather for your trip. Try \"weather in Tokyo\" or \"forecast for Bengaluru tomorrow\".";

/// Weather question without a place
#[must_use]
pub fn missing_location() -> String {
    "Which city should I check? Try something like \"weather in Paris\".".to_string()
}

/// Resolver came back empty for `city`; the example suffix is the preferred country when one is set
#[must_use]
pub fn location_not_found(city: &str, preferred_country: Option<&str>) -> String {
    match preferred_country {
        Some(country) => format!(
            "I couldn't find \"{city}\". Try adding a country, for example \"{city}, {country}\"."
        ),
        None => format!(
            "I couldn't find \"{city}\". Try adding the country after a comma, like \"{city}, <country>\"."
        ),
    }
}

#[must_use]
pub fn current_conditions(label: &str, current: &CurrentConditions) -> String {
    format!(
        "Right now in {label}: {}, {} (feels like {:.1}°C). Humidity {}%, wind {}.",
        current.condition,
        current.format_temperature(),
        current.feels_like_c,
        current.humidity,
        current.format_wind()
    )
}

#[must_use]
pub fn tomorrow_forecast(label: &str, day: &DailyForecast) -> String {
    format!(
        "Tomorrow ({}) in {label}: {}, {} (avg {:.1}°C), {}% chance of rain. Humidity {}%, wind up to {}.",
        day.date.format("%a %d %b"),
        day.condition,
        day.format_range(),
        day.avg_c,
        day.chance_of_rain,
        day.avg_humidity,
        day.format_max_wind()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_conditions_reply() {
        let current = CurrentConditions {
            temperature_c: 24.0,
            feels_like_c: 25.5,
            condition: "Partly cloudy".to_string(),
            humidity: 70,
            wind_kph: 12.6,
        };
        assert_eq!(
            current_conditions("Bengaluru, Karnataka, India", &current),
            "Right now in Bengaluru, Karnataka, India: Partly cloudy, 24.0°C (feels like 25.5°C). Humidity 70%, wind 12.6 km/h."
        );
    }

    #[test]
    fn test_tomorrow_reply() {
        let day = DailyForecast {
            date: "2026-10-19".parse().unwrap(),
            max_c: 28.0,
            min_c: 19.5,
            avg_c: 23.0,
            condition: "Moderate rain".to_string(),
            chance_of_rain: 89,
            avg_humidity: 81,
            max_wind_kph: 20.0,
        };
        assert_eq!(
            tomorrow_forecast("Tokyo, Japan", &day),
            "Tomorrow (Mon 19 Oct) in Tokyo, Japan: Moderate rain, 28.0°C / 19.5°C (avg 23.0°C), 89% chance of rain. Humidity 81%, wind up to 20.0 km/h."
        );
    }

    #[test]
    fn test_not_found_suggests_preferred_country() {
        let reply = location_not_found("Springfeld", Some("Germany"));
        assert!(reply.contains("\"Springfeld\""));
        assert!(reply.contains("\"Springfeld, Germany\""));
    }

    #[test]
    fn test_not_found_without_preferred_country_names_none() {
        let reply = location_not_found("Springfeld", None);
        assert!(reply.contains("\"Springfeld\""));
        assert!(reply.contains("country"));
        assert!(!reply.contains("India"));
    }
}
