//! Load readings and forecasts from JSON files.
//!
//! This is where provider-shaped data gets sanitized: missing visibility is
//! defaulted and every reading is validated before the engine sees it.

use anyhow::{Context, Result};
use fairweather_core::{DEFAULT_VISIBILITY_M, ForecastEntry, WeatherReading};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Reading as supplied by the user; visibility may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingInput {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub precipitation_probability: Option<f64>,
}

impl ReadingInput {
    pub fn into_reading(self) -> WeatherReading {
        WeatherReading {
            temp: self.temp,
            feels_like: self.feels_like,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            visibility: self.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
            conditions: self.conditions,
            precipitation_probability: self.precipitation_probability,
        }
    }
}

pub fn parse_reading(s: &str) -> Result<WeatherReading> {
    let input: ReadingInput = serde_json::from_str(s).context("parse reading JSON")?;
    let reading = input.into_reading();
    reading.validate().context("invalid reading")?;
    Ok(reading)
}

pub fn load_reading(path: &Path) -> Result<WeatherReading> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_reading(&s).with_context(|| format!("load {}", path.display()))
}

pub fn parse_forecast(s: &str) -> Result<Vec<ForecastEntry>> {
    let entries: Vec<ForecastEntry> = serde_json::from_str(s).context("parse forecast JSON")?;
    for (idx, e) in entries.iter().enumerate() {
        e.to_reading()
            .validate()
            .with_context(|| format!("forecast[{idx}] at {}", e.time))?;
    }
    Ok(entries)
}

pub fn load_forecast(path: &Path) -> Result<Vec<ForecastEntry>> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_forecast(&s).with_context(|| format!("load {}", path.display()))
}
