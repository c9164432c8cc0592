//! Forecast steps for an activity: a coarse per-step rating with the
//! temperature trend, and the best time windows ranked by full assessment.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::{EnhancedRiskAssessment, RiskTier, assess_activity_risk};
use crate::factor::FactorStatus;
use crate::profile::ActivityProfile;
use crate::weather::{ForecastEntry, WeatherReading};

/// Window length used when a forecast has a single entry.
const DEFAULT_STEP_HOURS: i64 = 3;

/// Degrees of change below which the temperature counts as steady.
const TREND_DEAD_BAND: f64 = 1.0;

/// `pop` above which a step earns one or two precipitation points.
const LIKELY_RAIN_POP: f64 = 0.3;
const HEAVY_RAIN_POP: f64 = 0.7;

const HIGH_STEP_POINTS: u32 = 4;
const MEDIUM_STEP_POINTS: u32 = 2;

/// Coarse rating of one forecast step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepRisk {
    Low,
    Medium,
    High,
}

impl StepRisk {
    pub fn from_points(points: u32) -> Self {
        if points >= HIGH_STEP_POINTS {
            StepRisk::High
        } else if points >= MEDIUM_STEP_POINTS {
            StepRisk::Medium
        } else {
            StepRisk::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepRisk::Low => "low",
            StepRisk::Medium => "medium",
            StepRisk::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureTrend {
    Rising,
    Steady,
    Falling,
}

impl TemperatureTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureTrend::Rising => "rising",
            TemperatureTrend::Steady => "steady",
            TemperatureTrend::Falling => "falling",
        }
    }
}

/// One row of a forecast outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastStep {
    pub time: DateTime<Utc>,
    /// Mean of min and max, °C.
    pub temp: f64,
    pub trend: TemperatureTrend,
    pub risk: StepRisk,
}

pub fn temperature_trend(current: f64, previous: f64) -> TemperatureTrend {
    let diff = current - previous;
    if diff.abs() < TREND_DEAD_BAND {
        TemperatureTrend::Steady
    } else if diff > 0.0 {
        TemperatureTrend::Rising
    } else {
        TemperatureTrend::Falling
    }
}

/// Rate a forecast step with point thresholds instead of the weighted score.
///
/// Temperature adds 3 past the acceptable band or 1 past the optimal one,
/// wind adds 2 past the acceptable limit or 1 past the optimal one, and
/// `pop` adds 2 above 0.7 or 1 above 0.3. Humidity and visibility are not
/// considered.
pub fn forecast_step_risk(entry: &ForecastEntry, profile: &ActivityProfile) -> StepRisk {
    let opt = &profile.optimal_conditions;
    let acc = &profile.acceptable_conditions;
    let temp = entry.mean_temp();
    let mut points = 0;

    let outside = |(min, max): (f64, f64)| temp < min || temp > max;
    if outside(acc.temp_range) {
        points += 3;
    } else if outside(opt.temp_range) {
        points += 1;
    }

    if entry.wind_speed > acc.max_wind {
        points += 2;
    } else if entry.wind_speed > opt.max_wind {
        points += 1;
    }

    if entry.pop > HEAVY_RAIN_POP {
        points += 2;
    } else if entry.pop > LIKELY_RAIN_POP {
        points += 1;
    }

    StepRisk::from_points(points)
}

/// Per-step outlook in chronological order. The first step's trend is steady.
pub fn forecast_outlook(
    entries: &[ForecastEntry],
    profile: &ActivityProfile,
) -> Vec<ForecastStep> {
    let mut ordered: Vec<&ForecastEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.time);

    let mut previous: Option<f64> = None;
    ordered
        .into_iter()
        .map(|entry| {
            let temp = entry.mean_temp();
            let trend = temperature_trend(temp, previous.unwrap_or(temp));
            previous = Some(temp);
            ForecastStep {
                time: entry.time,
                temp,
                trend,
                risk: forecast_step_risk(entry, profile),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub score: u8,
    pub reason: String,
}

/// Best windows among `entries`, highest score first.
///
/// Entries are sorted by time before windows are built. Steps rated `high`
/// or `extreme` are skipped; equal scores keep chronological order.
pub fn best_time_windows(
    entries: &[ForecastEntry],
    profile: &ActivityProfile,
    limit: usize,
) -> Vec<TimeWindow> {
    let mut ordered: Vec<&ForecastEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.time);

    let mut windows: Vec<TimeWindow> = ordered
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let assessment = assess_activity_risk(&entry.to_reading(), profile);
            if matches!(assessment.overall, RiskTier::High | RiskTier::Extreme) {
                return None;
            }
            Some(TimeWindow {
                start: entry.time,
                end: entry.time + step_after(&ordered, i),
                score: assessment.score,
                reason: window_reason(&assessment),
            })
        })
        .collect();

    // Stable sort keeps chronological order among equal scores.
    windows.sort_by(|a, b| b.score.cmp(&a.score));
    windows.truncate(limit);
    windows
}

/// Current-conditions assessment with forecast windows attached.
pub fn assess_with_forecast(
    reading: &WeatherReading,
    forecast: &[ForecastEntry],
    profile: &ActivityProfile,
    limit: usize,
) -> EnhancedRiskAssessment {
    let mut assessment = assess_activity_risk(reading, profile);
    assessment.best_time_windows = best_time_windows(forecast, profile, limit);
    assessment
}

fn step_after(ordered: &[&ForecastEntry], i: usize) -> Duration {
    if let Some(next) = ordered.get(i + 1) {
        return next.time - ordered[i].time;
    }
    if i > 0 {
        return ordered[i].time - ordered[i - 1].time;
    }
    Duration::hours(DEFAULT_STEP_HOURS)
}

fn window_reason(assessment: &EnhancedRiskAssessment) -> String {
    let (factor, weakest) = assessment.factors.weakest();
    if weakest.status == FactorStatus::Optimal {
        "All factors optimal".to_string()
    } else {
        format!("Limited by {} (score {})", factor, weakest.score)
    }
}
