//! Activity profiles: per-factor weights plus optimal and acceptable bounds.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::factor::{Bounds, Direction, Factor};

/// Degrees added on each side of the optimal temperature range.
pub const TEMP_ACCEPTABLE_MARGIN: f64 = 5.0;
pub const WIND_ACCEPTABLE_MULTIPLIER: f64 = 1.5;
pub const PRECIPITATION_ACCEPTABLE_MULTIPLIER: f64 = 2.0;
pub const HUMIDITY_ACCEPTABLE_MULTIPLIER: f64 = 1.2;
/// Visibility is higher-is-better, so the acceptable bound sits below optimal.
pub const VISIBILITY_ACCEPTABLE_MULTIPLIER: f64 = 0.5;

/// Linear weights used to combine factor scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub temperature: f64,
    pub wind: f64,
    pub precipitation: f64,
    pub humidity: f64,
    pub visibility: f64,
}

impl FactorWeights {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Temperature => self.temperature,
            Factor::Wind => self.wind,
            Factor::Precipitation => self.precipitation,
            Factor::Humidity => self.humidity,
            Factor::Visibility => self.visibility,
        }
    }

    pub fn total(&self) -> f64 {
        Factor::ALL.iter().map(|f| self.get(*f)).sum()
    }
}

/// Ideal conditions for an activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalConditions {
    /// Comfortable temperature band in °C.
    pub temp_range: (f64, f64),
    /// m/s
    pub max_wind: f64,
    /// Probability 0..=1
    pub max_precipitation: f64,
    /// Percent
    pub max_humidity: f64,
    /// Meters
    pub min_visibility: f64,
}

/// Outer tolerance bounds; past these a factor is `poor` or `dangerous`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptableConditions {
    pub temp_range: (f64, f64),
    pub max_wind: f64,
    pub max_precipitation: f64,
    pub max_humidity: f64,
    pub min_visibility: f64,
}

impl AcceptableConditions {
    /// Derive acceptable bounds with the conventional margins and multipliers.
    pub fn derive_from(optimal: &OptimalConditions) -> Self {
        let (min, max) = optimal.temp_range;
        Self {
            temp_range: (min - TEMP_ACCEPTABLE_MARGIN, max + TEMP_ACCEPTABLE_MARGIN),
            max_wind: optimal.max_wind * WIND_ACCEPTABLE_MULTIPLIER,
            max_precipitation: optimal.max_precipitation * PRECIPITATION_ACCEPTABLE_MULTIPLIER,
            max_humidity: optimal.max_humidity * HUMIDITY_ACCEPTABLE_MULTIPLIER,
            min_visibility: optimal.min_visibility * VISIBILITY_ACCEPTABLE_MULTIPLIER,
        }
    }
}

/// Profile as written in a catalog file. Acceptable bounds are optional and
/// derived from the optimal ones when left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub weights: FactorWeights,
    pub optimal_conditions: OptimalConditions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_conditions: Option<AcceptableConditions>,
}

/// A validated activity profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub weights: FactorWeights,
    pub optimal_conditions: OptimalConditions,
    pub acceptable_conditions: AcceptableConditions,
}

impl ActivityProfile {
    /// Build a profile with derived acceptable bounds. Not validated; use
    /// [`ActivityProfile::from_definition`] for untrusted input.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        weights: FactorWeights,
        optimal_conditions: OptimalConditions,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            weights,
            acceptable_conditions: AcceptableConditions::derive_from(&optimal_conditions),
            optimal_conditions,
        }
    }

    /// Override the derived acceptable bounds.
    pub fn with_acceptable(mut self, acceptable: AcceptableConditions) -> Self {
        self.acceptable_conditions = acceptable;
        self
    }

    /// Build and validate a profile from a catalog definition.
    pub fn from_definition(def: ProfileDefinition) -> Result<Self, ProfileError> {
        let mut profile = Self::new(
            def.id,
            def.name,
            def.description,
            def.weights,
            def.optimal_conditions,
        );
        if let Some(acceptable) = def.acceptable_conditions {
            profile = profile.with_acceptable(acceptable);
        }
        profile.validate()?;
        Ok(profile)
    }

    pub fn to_definition(&self) -> ProfileDefinition {
        ProfileDefinition {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            weights: self.weights,
            optimal_conditions: self.optimal_conditions,
            acceptable_conditions: Some(self.acceptable_conditions),
        }
    }

    /// Scoring bounds for one factor.
    pub fn bounds(&self, factor: Factor) -> Bounds {
        let opt = &self.optimal_conditions;
        let acc = &self.acceptable_conditions;
        match factor {
            Factor::Temperature => Bounds::Range {
                optimal: opt.temp_range,
                acceptable: acc.temp_range,
            },
            Factor::Wind => Bounds::Threshold {
                optimal: opt.max_wind,
                acceptable: acc.max_wind,
                direction: Direction::LowerIsBetter,
            },
            Factor::Precipitation => Bounds::Threshold {
                optimal: opt.max_precipitation,
                acceptable: acc.max_precipitation,
                direction: Direction::LowerIsBetter,
            },
            Factor::Humidity => Bounds::Threshold {
                optimal: opt.max_humidity,
                acceptable: acc.max_humidity,
                direction: Direction::LowerIsBetter,
            },
            Factor::Visibility => Bounds::Threshold {
                optimal: opt.min_visibility,
                acceptable: acc.min_visibility,
                direction: Direction::HigherIsBetter,
            },
        }
    }

    /// Midpoint of the optimal temperature band.
    pub fn temp_midpoint(&self) -> f64 {
        let (min, max) = self.optimal_conditions.temp_range;
        (min + max) / 2.0
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.id.trim().is_empty() {
            return Err(ProfileError::EmptyId);
        }

        let opt = &self.optimal_conditions;
        let acc = &self.acceptable_conditions;
        let (min, max) = opt.temp_range;
        if !(min < max) {
            return Err(ProfileError::InvalidTemperatureRange {
                id: self.id.clone(),
                min,
                max,
            });
        }

        let thresholds = [
            ("max_wind", opt.max_wind),
            ("max_precipitation", opt.max_precipitation),
            ("max_humidity", opt.max_humidity),
            ("min_visibility", opt.min_visibility),
        ];
        for (field, value) in thresholds {
            if !(value > 0.0) {
                return Err(ProfileError::NonPositiveThreshold {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }

        for factor in Factor::ALL {
            let value = self.weights.get(factor);
            if !(0.0..=1.0).contains(&value) {
                return Err(ProfileError::WeightOutOfRange {
                    id: self.id.clone(),
                    factor: factor.as_str(),
                    value,
                });
            }
        }

        let (acc_min, acc_max) = acc.temp_range;
        let enclosing = [
            ("temp_range", acc_min <= min && acc_max >= max),
            ("max_wind", acc.max_wind >= opt.max_wind),
            ("max_precipitation", acc.max_precipitation >= opt.max_precipitation),
            ("max_humidity", acc.max_humidity >= opt.max_humidity),
            (
                "min_visibility",
                acc.min_visibility > 0.0 && acc.min_visibility <= opt.min_visibility,
            ),
        ];
        for (field, ok) in enclosing {
            if !ok {
                return Err(ProfileError::AcceptableNarrowerThanOptimal {
                    id: self.id.clone(),
                    field,
                });
            }
        }

        Ok(())
    }
}
