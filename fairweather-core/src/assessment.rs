//! Activity-weighted risk aggregation.
//!
//! Scores all five factors against an activity profile, combines them with
//! the profile's weights and classifies the result into a four-level tier.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::factor::{Factor, FactorScore, FactorStatus, score_factor};
use crate::forecast::TimeWindow;
use crate::profile::{ActivityProfile, FactorWeights};
use crate::recommendations::{Recommendation, generate_recommendations};
use crate::weather::WeatherReading;

/// Overall risk tier of the activity engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskTier {
    /// Classify an unrounded weighted score. Each cut point belongs to the
    /// bucket above it: 25 is `High`, 50 is `Medium`, 75 is `Low`.
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            RiskTier::Extreme
        } else if score < 50.0 {
            RiskTier::High
        } else if score < 75.0 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::Extreme => "extreme",
        }
    }
}

/// Score, status and explanation for one factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorAssessment {
    pub score: u8,
    pub status: FactorStatus,
    pub impact: String,
}

impl FactorAssessment {
    fn from_score(score: FactorScore, impact: String) -> Self {
        Self {
            score: score.score,
            status: score.status,
            impact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorAssessments {
    pub temperature: FactorAssessment,
    pub wind: FactorAssessment,
    pub precipitation: FactorAssessment,
    pub humidity: FactorAssessment,
    pub visibility: FactorAssessment,
}

impl FactorAssessments {
    pub fn get(&self, factor: Factor) -> &FactorAssessment {
        match factor {
            Factor::Temperature => &self.temperature,
            Factor::Wind => &self.wind,
            Factor::Precipitation => &self.precipitation,
            Factor::Humidity => &self.humidity,
            Factor::Visibility => &self.visibility,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, &FactorAssessment)> {
        Factor::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Lowest-scoring factor; ties resolve to the earlier factor.
    pub fn weakest(&self) -> (Factor, &FactorAssessment) {
        self.iter()
            .reduce(|worst, next| if next.1.score < worst.1.score { next } else { worst })
            .unwrap_or((Factor::Temperature, &self.temperature))
    }
}

/// Full activity-specific assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedRiskAssessment {
    pub overall: RiskTier,
    /// Weighted score rounded for display.
    pub score: u8,
    pub factors: FactorAssessments,
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub best_time_windows: Vec<TimeWindow>,
}

/// Linear weighted sum of factor scores. Weights are not renormalized.
pub fn weighted_score(factors: &FactorAssessments, weights: &FactorWeights) -> f64 {
    factors
        .iter()
        .map(|(factor, a)| f64::from(a.score) * weights.get(factor))
        .sum()
}

/// Score every factor of `reading` against `profile`, without recommendations.
pub fn score_factors(reading: &WeatherReading, profile: &ActivityProfile) -> FactorAssessments {
    let opt = &profile.optimal_conditions;
    let precipitation = reading.precipitation_value();

    let temperature = score_factor(reading.temp, &profile.bounds(Factor::Temperature));
    let wind = score_factor(reading.wind_speed, &profile.bounds(Factor::Wind));
    let precip = score_factor(precipitation, &profile.bounds(Factor::Precipitation));
    let humidity = score_factor(reading.humidity, &profile.bounds(Factor::Humidity));
    let visibility = score_factor(reading.visibility, &profile.bounds(Factor::Visibility));

    let precipitation_impact = match reading.precipitation_probability {
        Some(p) => format!(
            "Precipitation probability: {}% (Max recommended: {}%)",
            (p * 100.0).round(),
            (opt.max_precipitation * 100.0).round()
        ),
        None if reading.has_rain() => "Rain detected in current conditions".to_string(),
        None => "No precipitation expected".to_string(),
    };

    FactorAssessments {
        temperature: FactorAssessment::from_score(
            temperature,
            format!(
                "Current: {}°C (Optimal: {}-{}°C)",
                reading.temp.round(),
                opt.temp_range.0,
                opt.temp_range.1
            ),
        ),
        wind: FactorAssessment::from_score(
            wind,
            format!(
                "Current: {} m/s (Max recommended: {} m/s)",
                reading.wind_speed, opt.max_wind
            ),
        ),
        precipitation: FactorAssessment::from_score(precip, precipitation_impact),
        humidity: FactorAssessment::from_score(
            humidity,
            format!(
                "Current: {}% (Max comfortable: {}%)",
                reading.humidity, opt.max_humidity
            ),
        ),
        visibility: FactorAssessment::from_score(
            visibility,
            format!(
                "Current: {}km (Min recommended: {}km)",
                (reading.visibility / 1000.0).round(),
                (opt.min_visibility / 1000.0).round()
            ),
        ),
    }
}

/// Assess `reading` for the activity described by `profile`.
pub fn assess_activity_risk(
    reading: &WeatherReading,
    profile: &ActivityProfile,
) -> EnhancedRiskAssessment {
    let factors = score_factors(reading, profile);
    let raw = weighted_score(&factors, &profile.weights);
    let overall = RiskTier::from_score(raw);

    let mut assessment = EnhancedRiskAssessment {
        overall,
        score: raw.clamp(0.0, 100.0).round() as u8,
        factors,
        recommendations: Vec::new(),
        best_time_windows: Vec::new(),
    };
    assessment.recommendations = generate_recommendations(&assessment, profile, reading);

    debug!(
        activity = %profile.id,
        score = raw,
        overall = overall.as_str(),
        recommendations = assessment.recommendations.len(),
        "activity risk assessed"
    );
    assessment
}
