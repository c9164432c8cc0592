//! Rule-based advisories for an activity assessment.
//!
//! Rules run in a fixed order: temperature, wind, precipitation,
//! visibility, then the overall score band. Every category is evaluated and
//! the list keeps evaluation order; it is not sorted by priority. The score
//! band always fires, so the list is never empty.

use serde::{Deserialize, Serialize};

use crate::assessment::EnhancedRiskAssessment;
use crate::factor::FactorStatus;
use crate::profile::ActivityProfile;
use crate::weather::WeatherReading;

/// Degrees past the optimal band that mark a heat or cold emergency.
const EMERGENCY_MARGIN: f64 = 10.0;

/// Activity id that receives headwind advisories.
const CYCLING_ACTIVITY_ID: &str = "cycling";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Recommendation {
    fn new(priority: Priority, message: &str) -> Self {
        Self {
            priority,
            message: message.to_string(),
            action: None,
        }
    }

    fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }
}

pub fn generate_recommendations(
    assessment: &EnhancedRiskAssessment,
    profile: &ActivityProfile,
    reading: &WeatherReading,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let factors = &assessment.factors;

    if let Some(r) = temperature_advice(factors.temperature.status, profile, reading.temp) {
        out.push(r);
    }

    match factors.wind.status {
        FactorStatus::Dangerous => out.push(
            Recommendation::new(Priority::High, "Dangerous wind conditions")
                .with_action("Avoid exposed areas and consider postponing"),
        ),
        FactorStatus::Poor if profile.id == CYCLING_ACTIVITY_ID => out.push(
            Recommendation::new(Priority::Medium, "Strong headwinds expected")
                .with_action("Plan shorter routes and allow extra time"),
        ),
        _ => {}
    }

    match factors.precipitation.status {
        FactorStatus::Dangerous => out.push(
            Recommendation::new(Priority::High, "Heavy precipitation expected")
                .with_action("Postpone outdoor activities"),
        ),
        FactorStatus::Poor => out.push(
            Recommendation::new(Priority::Medium, "Light rain possible")
                .with_action("Bring waterproof gear"),
        ),
        _ => {}
    }

    if factors.visibility.status == FactorStatus::Dangerous {
        out.push(
            Recommendation::new(Priority::High, "Very poor visibility conditions")
                .with_action("Avoid driving and outdoor navigation"),
        );
    }

    out.push(score_band_advice(assessment.score));
    out
}

fn temperature_advice(
    status: FactorStatus,
    profile: &ActivityProfile,
    temp: f64,
) -> Option<Recommendation> {
    let (lower, upper) = profile.optimal_conditions.temp_range;
    match status {
        FactorStatus::Dangerous => {
            // Emergency edges first; a dangerous reading closer than the edges
            // (custom acceptable bands) picks its side from the band midpoint.
            let hot = if temp > upper + EMERGENCY_MARGIN {
                true
            } else if temp < lower - EMERGENCY_MARGIN {
                false
            } else {
                temp > profile.temp_midpoint()
            };
            Some(if hot {
                Recommendation::new(Priority::High, "Extreme heat conditions detected")
                    .with_action("Postpone activity or move to air-conditioned location")
            } else {
                Recommendation::new(Priority::High, "Extreme cold conditions detected")
                    .with_action("Dress in layers and consider postponing")
            })
        }
        FactorStatus::Poor => Some(if temp > upper {
            Recommendation::new(Priority::Medium, "Hot conditions expected")
                .with_action("Stay hydrated and take frequent breaks")
        } else {
            Recommendation::new(Priority::Medium, "Cold conditions expected")
                .with_action("Dress warmly and check for hypothermia signs")
        }),
        FactorStatus::Acceptable | FactorStatus::Optimal => None,
    }
}

fn score_band_advice(score: u8) -> Recommendation {
    match score {
        80.. => Recommendation::new(Priority::Low, "Excellent conditions for outdoor activities!"),
        60..=79 => Recommendation::new(Priority::Low, "Good conditions with minor considerations"),
        40..=59 => {
            Recommendation::new(Priority::Medium, "Moderate conditions - prepare accordingly")
        }
        _ => Recommendation::new(Priority::High, "Poor conditions - consider alternative plans"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::assess_activity_risk;
    use crate::registry::ActivityRegistry;
    use crate::weather::DEFAULT_VISIBILITY_M;

    fn reading(temp: f64, wind: f64, conditions: &[&str], visibility: f64) -> WeatherReading {
        WeatherReading {
            temp,
            feels_like: temp,
            humidity: 50.0,
            wind_speed: wind,
            visibility,
            conditions: conditions.iter().map(|s| s.to_string()).collect(),
            precipitation_probability: None,
        }
    }

    fn messages(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.message.as_str()).collect()
    }

    #[test]
    fn test_perfect_day_gets_single_positive_message() {
        let reg = ActivityRegistry::builtin();
        let a = assess_activity_risk(
            &reading(20.0, 3.0, &[], DEFAULT_VISIBILITY_M),
            reg.get_by_id("general"),
        );
        assert_eq!(a.recommendations.len(), 1);
        assert_eq!(a.recommendations[0].priority, Priority::Low);
        assert_eq!(a.recommendations[0].message, "Excellent conditions for outdoor activities!");
        assert_eq!(a.recommendations[0].action, None);
    }

    #[test]
    fn test_extreme_heat() {
        let reg = ActivityRegistry::builtin();
        // general: acceptable up to 30, 45 is 15 beyond -> score 20, dangerous
        let a = assess_activity_risk(
            &reading(45.0, 3.0, &[], DEFAULT_VISIBILITY_M),
            reg.get_by_id("general"),
        );
        assert_eq!(a.recommendations[0].priority, Priority::High);
        assert_eq!(a.recommendations[0].message, "Extreme heat conditions detected");
    }

    #[test]
    fn test_extreme_cold() {
        let reg = ActivityRegistry::builtin();
        // general: acceptable down to 10, -5 is 15 beyond -> score 20, and
        // below the 15 - 10 emergency edge.
        let a = assess_activity_risk(
            &reading(-5.0, 3.0, &[], DEFAULT_VISIBILITY_M),
            reg.get_by_id("general"),
        );
        assert_eq!(a.factors.temperature.score, 20);
        assert_eq!(a.factors.temperature.status, FactorStatus::Dangerous);
        assert_eq!(a.recommendations[0].priority, Priority::High);
        assert_eq!(a.recommendations[0].message, "Extreme cold conditions detected");
        assert_eq!(
            a.recommendations[0].action.as_deref(),
            Some("Dress in layers and consider postponing")
        );
    }

    #[test]
    fn test_priority_names_match_wire_format() {
        for p in [Priority::High, Priority::Medium, Priority::Low] {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
        }
    }

    #[test]
    fn test_poor_cold_suggests_layers() {
        let reg = ActivityRegistry::builtin();
        // general: acceptable down to 10, 5 is 5 beyond -> 40, poor
        let a = assess_activity_risk(
            &reading(5.0, 3.0, &[], DEFAULT_VISIBILITY_M),
            reg.get_by_id("general"),
        );
        assert_eq!(a.recommendations[0].priority, Priority::Medium);
        assert_eq!(a.recommendations[0].message, "Cold conditions expected");
    }

    #[test]
    fn test_dangerous_temperature_inside_emergency_edges_uses_midpoint() {
        // Hand-built profile with an acceptable band inside the optimal one,
        // so a dangerous score can occur within 10 degrees of the optimal edges.
        let base = ActivityRegistry::builtin().get_by_id("general").clone();
        let mut acc = base.acceptable_conditions;
        acc.temp_range = (18.0, 22.0);
        let tight = base.with_acceptable(acc);

        let cold = assess_activity_risk(&reading(5.0, 3.0, &[], DEFAULT_VISIBILITY_M), &tight);
        assert_eq!(cold.factors.temperature.status, FactorStatus::Dangerous);
        assert_eq!(cold.recommendations[0].message, "Extreme cold conditions detected");

        let hot = assess_activity_risk(&reading(35.0, 3.0, &[], DEFAULT_VISIBILITY_M), &tight);
        assert_eq!(hot.factors.temperature.status, FactorStatus::Dangerous);
        assert_eq!(hot.recommendations[0].message, "Extreme heat conditions detected");
    }

    #[test]
    fn test_headwind_advice_is_cycling_only() {
        let reg = ActivityRegistry::builtin();
        // cycling: 25 / 37.5, wind 45 -> 50 - 50 * 7.5 / 37.5 = 40, poor
        let cycling = assess_activity_risk(
            &reading(18.0, 45.0, &[], DEFAULT_VISIBILITY_M),
            reg.get_by_id("cycling"),
        );
        assert_eq!(cycling.factors.wind.status, FactorStatus::Poor);
        assert!(messages(&cycling.recommendations).contains(&"Strong headwinds expected"));

        // hiking: 20 / 30, wind 35 -> 50 - 50 * 5 / 30 = 41.7, poor, no headwind rule
        let hiking = assess_activity_risk(
            &reading(18.0, 35.0, &[], DEFAULT_VISIBILITY_M),
            reg.get_by_id("hiking"),
        );
        assert_eq!(hiking.factors.wind.status, FactorStatus::Poor);
        assert!(!messages(&hiking.recommendations).contains(&"Strong headwinds expected"));
    }

    #[test]
    fn test_output_follows_rule_order_not_priority() {
        let reg = ActivityRegistry::builtin();
        // Dangerous wind, heavy rain and fog for a picnic.
        let a = assess_activity_risk(
            &reading(20.0, 40.0, &["Rain"], 500.0),
            reg.get_by_id("picnic"),
        );
        assert_eq!(
            messages(&a.recommendations),
            vec![
                "Dangerous wind conditions",
                "Heavy precipitation expected",
                "Very poor visibility conditions",
                "Poor conditions - consider alternative plans",
            ]
        );
        assert_eq!(a.recommendations.last().unwrap().priority, Priority::High);
    }

    #[test]
    fn test_poor_precipitation_suggests_waterproof_gear() {
        let reg = ActivityRegistry::builtin();
        let mut r = reading(20.0, 3.0, &[], DEFAULT_VISIBILITY_M);
        // general: 0.1 / 0.2, 0.25 -> 50 - 50 * 0.05 / 0.2 = 37.5, poor
        r.precipitation_probability = Some(0.25);
        let a = assess_activity_risk(&r, reg.get_by_id("general"));
        assert_eq!(a.factors.precipitation.status, FactorStatus::Poor);
        assert_eq!(a.recommendations[0].message, "Light rain possible");
        assert_eq!(a.recommendations[0].action.as_deref(), Some("Bring waterproof gear"));
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(score_band_advice(100).priority, Priority::Low);
        assert_eq!(score_band_advice(80).message, "Excellent conditions for outdoor activities!");
        assert_eq!(score_band_advice(79).message, "Good conditions with minor considerations");
        assert_eq!(score_band_advice(60).priority, Priority::Low);
        assert_eq!(score_band_advice(59).priority, Priority::Medium);
        assert_eq!(score_band_advice(40).priority, Priority::Medium);
        assert_eq!(score_band_advice(39).priority, Priority::High);
        assert_eq!(score_band_advice(0).message, "Poor conditions - consider alternative plans");
    }
}
