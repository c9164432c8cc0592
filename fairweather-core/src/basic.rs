//! Threshold-based assessor driven only by user preferences.
//!
//! Independent of activity profiles: each check adds a fixed number of
//! points to an integer risk score, and the total picks one of three tiers.
//! Precipitation here comes from condition tags only.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::preferences::UserPreferences;
use crate::weather::WeatherReading;

/// Degrees inside a temperature threshold that still earn a soft advisory.
const SOFT_TEMP_MARGIN: f64 = 5.0;

/// Fraction of `very_windy` above which it is breezy.
const BREEZY_FRACTION: f64 = 0.7;

const HIGH_RISK_POINTS: u32 = 5;
const MEDIUM_RISK_POINTS: u32 = 3;

pub const DEFAULT_BASIC_MESSAGE: &str = "Conditions look great for outdoor activities!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicTier {
    Low,
    Medium,
    High,
}

impl BasicTier {
    pub fn from_points(points: u32) -> Self {
        if points >= HIGH_RISK_POINTS {
            BasicTier::High
        } else if points >= MEDIUM_RISK_POINTS {
            BasicTier::Medium
        } else {
            BasicTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BasicTier::Low => "low",
            BasicTier::Medium => "medium",
            BasicTier::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureStatus {
    #[default]
    Comfortable,
    Hot,
    Cold,
}

impl TemperatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureStatus::Comfortable => "comfortable",
            TemperatureStatus::Hot => "hot",
            TemperatureStatus::Cold => "cold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindStatus {
    #[default]
    Calm,
    Breezy,
    Windy,
}

impl WindStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindStatus::Calm => "calm",
            WindStatus::Breezy => "breezy",
            WindStatus::Windy => "windy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationStatus {
    #[default]
    Dry,
    Light,
    Heavy,
}

impl PrecipitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrecipitationStatus::Dry => "dry",
            PrecipitationStatus::Light => "light",
            PrecipitationStatus::Heavy => "heavy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumidityStatus {
    #[default]
    Comfortable,
    Humid,
}

impl HumidityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumidityStatus::Comfortable => "comfortable",
            HumidityStatus::Humid => "humid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BasicFactors {
    pub temperature: TemperatureStatus,
    pub wind: WindStatus,
    pub precipitation: PrecipitationStatus,
    pub humidity: HumidityStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicRiskAssessment {
    pub overall: BasicTier,
    /// Accumulated risk points behind `overall`.
    pub risk_score: u32,
    pub factors: BasicFactors,
    pub recommendations: Vec<String>,
}

pub fn assess_basic(reading: &WeatherReading, prefs: &UserPreferences) -> BasicRiskAssessment {
    let mut points = 0u32;
    let mut factors = BasicFactors::default();
    let mut recommendations = Vec::new();

    let effective = (reading.temp + reading.feels_like) / 2.0;
    if effective >= prefs.very_hot {
        factors.temperature = TemperatureStatus::Hot;
        points += 2;
        recommendations.push(format!(
            "Very hot conditions ({}°C) - consider rescheduling during cooler hours",
            effective.round()
        ));
    } else if effective <= prefs.very_cold {
        factors.temperature = TemperatureStatus::Cold;
        points += 2;
        recommendations.push(format!(
            "Very cold conditions ({}°C) - dress warmly and consider indoor alternatives",
            effective.round()
        ));
    } else if effective >= prefs.very_hot - SOFT_TEMP_MARGIN {
        recommendations
            .push("Warm conditions - stay hydrated and seek shade when possible".to_string());
    } else if effective <= prefs.very_cold + SOFT_TEMP_MARGIN {
        recommendations.push("Cool conditions - dress in layers for comfort".to_string());
    }

    if reading.wind_speed >= prefs.very_windy {
        factors.wind = WindStatus::Windy;
        points += 2;
        recommendations.push(format!(
            "Strong winds ({} m/s) - secure loose items and avoid exposed areas",
            reading.wind_speed
        ));
    } else if reading.wind_speed > prefs.very_windy * BREEZY_FRACTION {
        factors.wind = WindStatus::Breezy;
        points += 1;
        recommendations
            .push("Breezy conditions - be aware of wind effects on activities".to_string());
    }

    if reading.humidity >= prefs.very_humid {
        factors.humidity = HumidityStatus::Humid;
        points += 1;
        recommendations.push(format!(
            "High humidity ({}%) - stay hydrated and take frequent breaks",
            reading.humidity
        ));
    }

    if reading.has_storm() {
        factors.precipitation = PrecipitationStatus::Heavy;
        points += 3;
        recommendations
            .push("Thunderstorm conditions - seek indoor shelter immediately".to_string());
    } else if reading.has_rain() {
        factors.precipitation = PrecipitationStatus::Heavy;
        points += 2;
        recommendations
            .push("Rain detected - bring waterproof gear or consider postponing".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(DEFAULT_BASIC_MESSAGE.to_string());
    }

    let overall = BasicTier::from_points(points);
    debug!(points, overall = ?overall, "basic risk assessed");

    BasicRiskAssessment {
        overall,
        risk_score: points,
        factors,
        recommendations,
    }
}
