//! User comfort thresholds.

use serde::{Deserialize, Serialize};

use crate::error::PreferencesError;
use crate::profile::{ActivityProfile, TEMP_ACCEPTABLE_MARGIN};
use crate::registry::GENERAL_ACTIVITY_ID;

/// Thresholds owned by the user. Read per call, never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// °C at or above which it is too hot.
    pub very_hot: f64,
    /// °C at or below which it is too cold.
    pub very_cold: f64,
    /// m/s
    pub very_windy: f64,
    /// Probability threshold (0..=1).
    pub very_wet: f64,
    /// Percent
    pub very_humid: f64,
    pub preferred_activity: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            very_hot: 30.0,
            very_cold: 5.0,
            very_windy: 20.0,
            very_wet: 0.7,
            very_humid: 80.0,
            preferred_activity: GENERAL_ACTIVITY_ID.to_string(),
        }
    }
}

impl UserPreferences {
    /// Defaults tuned to an activity's optimal conditions.
    pub fn for_activity(profile: &ActivityProfile) -> Self {
        let opt = &profile.optimal_conditions;
        Self {
            very_hot: opt.temp_range.1 + TEMP_ACCEPTABLE_MARGIN,
            very_cold: opt.temp_range.0 - TEMP_ACCEPTABLE_MARGIN,
            very_windy: opt.max_wind,
            very_humid: opt.max_humidity,
            preferred_activity: profile.id.clone(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PreferencesError> {
        if !(self.very_cold < self.very_hot) {
            return Err(PreferencesError::InvertedTemperature {
                cold: self.very_cold,
                hot: self.very_hot,
            });
        }
        for (field, value) in [("very_windy", self.very_windy), ("very_humid", self.very_humid)] {
            if !(value > 0.0) {
                return Err(PreferencesError::NonPositive { field, value });
            }
        }
        if !(self.very_wet > 0.0 && self.very_wet <= 1.0) {
            return Err(PreferencesError::WetOutOfRange(self.very_wet));
        }
        Ok(())
    }
}
