//! Weather inputs: current readings and forecast entries.
//!
//! Readings arrive already mapped from the provider. The engine does not
//! default or clamp anything; callers run [`WeatherReading::validate`] and
//! fill in missing visibility with [`DEFAULT_VISIBILITY_M`] first.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ReadingError;

/// Visibility assumed when the provider omits it (meters).
pub const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

/// Precipitation probability assumed when only a rain tag is known.
pub const ASSUMED_RAIN_PROBABILITY: f64 = 0.5;

static RAIN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rain|drizzle|thunderstorm").expect("static regex")
});

static STORM_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)thunderstorm").expect("static regex"));

/// True when any tag carries rain (rain, drizzle or thunderstorm).
pub fn has_rain_tag(conditions: &[String]) -> bool {
    conditions.iter().any(|c| RAIN_TAG.is_match(c))
}

/// True when any tag mentions a thunderstorm.
pub fn has_storm_tag(conditions: &[String]) -> bool {
    conditions.iter().any(|c| STORM_TAG.is_match(c))
}

/// Current conditions at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// °C
    pub temp: f64,
    /// °C
    pub feels_like: f64,
    /// Percent
    pub humidity: f64,
    /// m/s
    pub wind_speed: f64,
    /// Meters
    pub visibility: f64,
    /// Provider condition tags, e.g. "Rain", "Thunderstorm", "Clear".
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Probability of precipitation (0..=1) when the provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f64>,
}

impl WeatherReading {
    pub fn has_rain(&self) -> bool {
        has_rain_tag(&self.conditions)
    }

    pub fn has_storm(&self) -> bool {
        has_storm_tag(&self.conditions)
    }

    /// Precipitation value fed to the scorer.
    ///
    /// Uses the supplied probability when there is one, otherwise 0 for dry
    /// tags and [`ASSUMED_RAIN_PROBABILITY`] when a rain tag is present.
    pub fn precipitation_value(&self) -> f64 {
        match self.precipitation_probability {
            Some(p) => p,
            None if self.has_rain() => ASSUMED_RAIN_PROBABILITY,
            None => 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), ReadingError> {
        let numeric = [
            ("temp", self.temp),
            ("feels_like", self.feels_like),
            ("humidity", self.humidity),
            ("wind_speed", self.wind_speed),
            ("visibility", self.visibility),
        ];
        for (field, value) in numeric {
            if !value.is_finite() {
                return Err(ReadingError::NonFinite { field });
            }
        }

        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(ReadingError::HumidityOutOfRange(self.humidity));
        }
        if self.wind_speed < 0.0 {
            return Err(ReadingError::Negative {
                field: "wind_speed",
                value: self.wind_speed,
            });
        }
        if self.visibility < 0.0 {
            return Err(ReadingError::Negative {
                field: "visibility",
                value: self.visibility,
            });
        }
        if let Some(p) = self.precipitation_probability {
            if !p.is_finite() {
                return Err(ReadingError::NonFinite {
                    field: "precipitation_probability",
                });
            }
            if !(0.0..=1.0).contains(&p) {
                return Err(ReadingError::ProbabilityOutOfRange(p));
            }
        }
        Ok(())
    }
}

/// One forecast step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temp_min: f64,
    pub temp_max: f64,
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Probability of precipitation (0..=1)
    pub pop: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl ForecastEntry {
    /// Mean of the step's min and max temperature.
    pub fn mean_temp(&self) -> f64 {
        (self.temp_min + self.temp_max) / 2.0
    }

    /// Reading equivalent used for scoring a forecast step.
    pub fn to_reading(&self) -> WeatherReading {
        let temp = self.mean_temp();
        WeatherReading {
            temp,
            feels_like: temp,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            visibility: self.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
            conditions: self.conditions.clone(),
            precipitation_probability: Some(self.pop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading(conditions: &[&str]) -> WeatherReading {
        WeatherReading {
            temp: 20.0,
            feels_like: 20.0,
            humidity: 50.0,
            wind_speed: 3.0,
            visibility: DEFAULT_VISIBILITY_M,
            conditions: conditions.iter().map(|s| s.to_string()).collect(),
            precipitation_probability: None,
        }
    }

    #[test]
    fn test_rain_tags_are_case_insensitive() {
        assert!(reading(&["Rain"]).has_rain());
        assert!(reading(&["light DRIZZLE"]).has_rain());
        assert!(reading(&["Thunderstorm"]).has_rain());
        assert!(!reading(&["Clear", "Clouds"]).has_rain());
    }

    #[test]
    fn test_storm_tag() {
        assert!(reading(&["Clouds", "thunderstorm"]).has_storm());
        assert!(!reading(&["Rain"]).has_storm());
    }

    #[test]
    fn test_precipitation_proxy() {
        assert_eq!(reading(&["Clear"]).precipitation_value(), 0.0);
        assert_eq!(reading(&["Rain"]).precipitation_value(), 0.5);
    }

    #[test]
    fn test_supplied_probability_wins_over_tags() {
        let mut r = reading(&["Rain"]);
        r.precipitation_probability = Some(0.15);
        assert_eq!(r.precipitation_value(), 0.15);

        let mut dry = reading(&["Clear"]);
        dry.precipitation_probability = Some(0.4);
        assert_eq!(dry.precipitation_value(), 0.4);
    }

    #[test]
    fn test_validate() {
        reading(&[]).validate().unwrap();

        let mut r = reading(&[]);
        r.temp = f64::NAN;
        assert_eq!(r.validate(), Err(ReadingError::NonFinite { field: "temp" }));

        let mut r = reading(&[]);
        r.humidity = 140.0;
        assert_eq!(r.validate(), Err(ReadingError::HumidityOutOfRange(140.0)));

        let mut r = reading(&[]);
        r.wind_speed = -1.0;
        assert!(matches!(r.validate(), Err(ReadingError::Negative { field: "wind_speed", .. })));

        let mut r = reading(&[]);
        r.precipitation_probability = Some(1.5);
        assert_eq!(r.validate(), Err(ReadingError::ProbabilityOutOfRange(1.5)));
    }

    #[test]
    fn test_reading_json_defaults() {
        let json = r#"{"temp":18,"feels_like":17,"humidity":60,"wind_speed":4,"visibility":9000}"#;
        let r: WeatherReading = serde_json::from_str(json).unwrap();
        assert!(r.conditions.is_empty());
        assert_eq!(r.precipitation_probability, None);
    }

    #[test]
    fn test_forecast_entry_to_reading() {
        let e = ForecastEntry {
            time: Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap(),
            temp_min: 14.0,
            temp_max: 22.0,
            conditions: vec!["Clouds".into()],
            pop: 0.3,
            wind_speed: 5.0,
            humidity: 55.0,
            visibility: None,
        };
        let r = e.to_reading();
        assert_eq!(r.temp, 18.0);
        assert_eq!(r.feels_like, 18.0);
        assert_eq!(r.visibility, DEFAULT_VISIBILITY_M);
        assert_eq!(r.precipitation_value(), 0.3);
    }
}
