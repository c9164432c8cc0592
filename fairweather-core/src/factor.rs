//! Factor scoring: one raw measurement -> 0..=100 suitability score.
//!
//! Two shapes of bounds are supported:
//! - `Bounds::Range` for temperature, where comfort is a band `[min, max]`
//! - `Bounds::Threshold` for wind, precipitation, humidity and visibility,
//!   where comfort is a single limit in one direction
//!
//! Inside the optimal bound a factor scores 100. Inside the acceptable band
//! the score falls linearly to 50 at the acceptable edge. Beyond that it
//! keeps falling towards 0 and the status turns `poor`, then `dangerous`
//! once the score is 25 or lower.

use serde::{Deserialize, Serialize};

/// Score at or below which an out-of-band factor is `dangerous`.
pub const DANGEROUS_SCORE: f64 = 25.0;

/// Score at the edge of the acceptable band.
const ACCEPTABLE_FLOOR: f64 = 50.0;

/// Points lost per degree beyond the acceptable temperature band.
const RANGE_PENALTY_PER_UNIT: f64 = 2.0;

/// The five weather dimensions scored for an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Temperature,
    Wind,
    Precipitation,
    Humidity,
    Visibility,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::Temperature,
        Factor::Wind,
        Factor::Precipitation,
        Factor::Humidity,
        Factor::Visibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Temperature => "temperature",
            Factor::Wind => "wind",
            Factor::Precipitation => "precipitation",
            Factor::Humidity => "humidity",
            Factor::Visibility => "visibility",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative status of a factor.
///
/// Variants are declared from least to most desirable, so `Ord` compares by
/// desirability (`Dangerous < Poor < Acceptable < Optimal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    Dangerous,
    Poor,
    Acceptable,
    Optimal,
}

impl FactorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorStatus::Dangerous => "dangerous",
            FactorStatus::Poor => "poor",
            FactorStatus::Acceptable => "acceptable",
            FactorStatus::Optimal => "optimal",
        }
    }

    fn beyond_acceptable(score: f64) -> Self {
        if score > DANGEROUS_SCORE {
            FactorStatus::Poor
        } else {
            FactorStatus::Dangerous
        }
    }
}

/// Which side of a threshold is comfortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Wind, precipitation, humidity: less is better.
    LowerIsBetter,
    /// Visibility: more is better.
    HigherIsBetter,
}

/// Optimal and acceptable bounds for one factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    Range {
        optimal: (f64, f64),
        acceptable: (f64, f64),
    },
    Threshold {
        optimal: f64,
        acceptable: f64,
        direction: Direction,
    },
}

/// Rounded score and status for a single factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub score: u8,
    pub status: FactorStatus,
}

impl FactorScore {
    fn new(raw: f64, status: FactorStatus) -> Self {
        Self {
            score: raw.clamp(0.0, 100.0).round() as u8,
            status,
        }
    }

    fn optimal() -> Self {
        Self {
            score: 100,
            status: FactorStatus::Optimal,
        }
    }
}

/// Score `value` against `bounds`.
pub fn score_factor(value: f64, bounds: &Bounds) -> FactorScore {
    match *bounds {
        Bounds::Range {
            optimal,
            acceptable,
        } => score_range(value, optimal, acceptable),
        Bounds::Threshold {
            optimal,
            acceptable,
            direction,
        } => score_threshold(value, optimal, acceptable, direction),
    }
}

/// Range mode, used for temperature.
pub fn score_range(value: f64, optimal: (f64, f64), acceptable: (f64, f64)) -> FactorScore {
    let (opt_min, opt_max) = optimal;
    let (acc_min, acc_max) = acceptable;

    if (opt_min..=opt_max).contains(&value) {
        return FactorScore::optimal();
    }

    if (acc_min..=acc_max).contains(&value) {
        let distance = if value < opt_min {
            opt_min - value
        } else {
            value - opt_max
        };
        let max_distance = (opt_min - acc_min).max(acc_max - opt_max);
        let raw = (100.0 - distance / max_distance * 50.0).max(ACCEPTABLE_FLOOR);
        return FactorScore::new(raw, FactorStatus::Acceptable);
    }

    let beyond = if value < acc_min {
        acc_min - value
    } else {
        value - acc_max
    };
    let raw = (ACCEPTABLE_FLOOR - beyond * RANGE_PENALTY_PER_UNIT).max(0.0);
    FactorScore::new(raw, FactorStatus::beyond_acceptable(raw))
}

/// Threshold mode, used for wind, precipitation, humidity and visibility.
pub fn score_threshold(
    value: f64,
    optimal: f64,
    acceptable: f64,
    direction: Direction,
) -> FactorScore {
    match direction {
        Direction::LowerIsBetter => {
            if value <= optimal {
                FactorScore::optimal()
            } else if value <= acceptable {
                let raw = 50.0 + (acceptable - value) / (acceptable - optimal) * 50.0;
                FactorScore::new(raw, FactorStatus::Acceptable)
            } else {
                let raw = (50.0 - (value - acceptable) / acceptable * 50.0).max(0.0);
                FactorScore::new(raw, FactorStatus::beyond_acceptable(raw))
            }
        }
        Direction::HigherIsBetter => {
            if value >= optimal {
                FactorScore::optimal()
            } else if value >= acceptable {
                let raw = 50.0 + (value - acceptable) / (optimal - acceptable) * 50.0;
                FactorScore::new(raw, FactorStatus::Acceptable)
            } else {
                let raw = (value / acceptable * 50.0).max(0.0);
                FactorScore::new(raw, FactorStatus::beyond_acceptable(raw))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_optimal() {
        let s = score_range(18.0, (15.0, 25.0), (10.0, 30.0));
        assert_eq!(s.score, 100);
        assert_eq!(s.status, FactorStatus::Optimal);
    }

    #[test]
    fn test_range_acceptable_interpolates() {
        // 2.5 degrees above a 5 degree margin -> halfway between 100 and 50
        let s = score_range(27.5, (15.0, 25.0), (10.0, 30.0));
        assert_eq!(s.score, 75);
        assert_eq!(s.status, FactorStatus::Acceptable);

        let edge = score_range(30.0, (15.0, 25.0), (10.0, 30.0));
        assert_eq!(edge.score, 50);
        assert_eq!(edge.status, FactorStatus::Acceptable);
    }

    #[test]
    fn test_range_beyond_acceptable() {
        let poor = score_range(35.0, (15.0, 25.0), (10.0, 30.0));
        assert_eq!(poor.score, 40);
        assert_eq!(poor.status, FactorStatus::Poor);

        let dangerous = score_range(-5.0, (15.0, 25.0), (10.0, 30.0));
        assert_eq!(dangerous.score, 20);
        assert_eq!(dangerous.status, FactorStatus::Dangerous);

        let floor = score_range(80.0, (15.0, 25.0), (10.0, 30.0));
        assert_eq!(floor.score, 0);
        assert_eq!(floor.status, FactorStatus::Dangerous);
    }

    #[test]
    fn test_range_status_boundary_at_25() {
        // 12.5 beyond the edge -> exactly 25 -> dangerous
        let s = score_range(42.5, (15.0, 25.0), (10.0, 30.0));
        assert_eq!(s.score, 25);
        assert_eq!(s.status, FactorStatus::Dangerous);
    }

    #[test]
    fn test_range_is_symmetric() {
        for d in [1.0, 3.0, 5.0, 8.0, 20.0] {
            let above = score_range(25.0 + d, (15.0, 25.0), (10.0, 30.0));
            let below = score_range(15.0 - d, (15.0, 25.0), (10.0, 30.0));
            assert_eq!(above, below, "asymmetric at distance {d}");
        }
    }

    #[test]
    fn test_threshold_lower_is_better() {
        let calm = score_threshold(10.0, 25.0, 37.5, Direction::LowerIsBetter);
        assert_eq!(calm.score, 100);
        assert_eq!(calm.status, FactorStatus::Optimal);

        let breezy = score_threshold(30.0, 25.0, 37.5, Direction::LowerIsBetter);
        assert_eq!(breezy.score, 80);
        assert_eq!(breezy.status, FactorStatus::Acceptable);

        // 50 - 50 * (50 - 37.5) / 37.5 = 33.3
        let gale = score_threshold(50.0, 25.0, 37.5, Direction::LowerIsBetter);
        assert_eq!(gale.score, 33);
        assert_eq!(gale.status, FactorStatus::Poor);

        let storm = score_threshold(80.0, 25.0, 37.5, Direction::LowerIsBetter);
        assert_eq!(storm.score, 0);
        assert_eq!(storm.status, FactorStatus::Dangerous);
    }

    #[test]
    fn test_threshold_higher_is_better() {
        let clear = score_threshold(12000.0, 5000.0, 2500.0, Direction::HigherIsBetter);
        assert_eq!(clear.score, 100);

        let hazy = score_threshold(3750.0, 5000.0, 2500.0, Direction::HigherIsBetter);
        assert_eq!(hazy.score, 75);
        assert_eq!(hazy.status, FactorStatus::Acceptable);

        let misty = score_threshold(2000.0, 5000.0, 2500.0, Direction::HigherIsBetter);
        assert_eq!(misty.score, 40);
        assert_eq!(misty.status, FactorStatus::Poor);

        let fog = score_threshold(1000.0, 5000.0, 2500.0, Direction::HigherIsBetter);
        assert_eq!(fog.score, 20);
        assert_eq!(fog.status, FactorStatus::Dangerous);
    }

    #[test]
    fn test_threshold_scores_never_increase_with_worse_values() {
        let mut last = 100u8;
        for step in 0..200 {
            let wind = step as f64 * 0.5;
            let s = score_threshold(wind, 15.0, 22.5, Direction::LowerIsBetter);
            assert!(s.score <= last, "score rose at wind {wind}");
            last = s.score;
        }
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        for v in [-100.0, -10.0, 0.0, 0.5, 14.9, 15.0, 99.0, 1e6] {
            let r = score_range(v, (15.0, 25.0), (10.0, 30.0));
            let t = score_threshold(v, 15.0, 22.5, Direction::LowerIsBetter);
            let h = score_threshold(v, 5000.0, 2500.0, Direction::HigherIsBetter);
            for s in [r, t, h] {
                assert!(s.score <= 100);
                if s.status == FactorStatus::Optimal {
                    assert_eq!(s.score, 100);
                }
                if s.status == FactorStatus::Dangerous {
                    assert!(s.score <= 25);
                }
            }
        }
    }

    #[test]
    fn test_status_orders_by_desirability() {
        assert!(FactorStatus::Dangerous < FactorStatus::Poor);
        assert!(FactorStatus::Poor < FactorStatus::Acceptable);
        assert!(FactorStatus::Acceptable < FactorStatus::Optimal);
    }

    #[test]
    fn test_score_factor_dispatches_on_bounds() {
        let range = Bounds::Range {
            optimal: (15.0, 25.0),
            acceptable: (10.0, 30.0),
        };
        assert_eq!(score_factor(35.0, &range).score, 40);

        let threshold = Bounds::Threshold {
            optimal: 0.1,
            acceptable: 0.2,
            direction: Direction::LowerIsBetter,
        };
        assert_eq!(score_factor(0.0, &threshold).status, FactorStatus::Optimal);
    }
}
