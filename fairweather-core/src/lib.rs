//! fairweather-core: activity risk scoring for weather conditions
//!
//! Pure, synchronous scoring. Readings and preferences come in already
//! sanitized; nothing here performs I/O or keeps state between calls.

pub mod assessment;
pub mod basic;
pub mod error;
pub mod factor;
pub mod forecast;
pub mod preferences;
pub mod profile;
pub mod recommendations;
pub mod registry;
pub mod weather;

pub use assessment::{
    EnhancedRiskAssessment, FactorAssessment, FactorAssessments, RiskTier, assess_activity_risk,
    score_factors, weighted_score,
};
pub use basic::{
    BasicFactors, BasicRiskAssessment, BasicTier, HumidityStatus, PrecipitationStatus,
    TemperatureStatus, WindStatus, assess_basic,
};
pub use error::{PreferencesError, ProfileError, ReadingError};
pub use factor::{Bounds, Direction, Factor, FactorScore, FactorStatus, score_factor};
pub use forecast::{
    ForecastStep, StepRisk, TemperatureTrend, TimeWindow, assess_with_forecast,
    best_time_windows, forecast_outlook, forecast_step_risk, temperature_trend,
};
pub use preferences::UserPreferences;
pub use profile::{
    AcceptableConditions, ActivityProfile, FactorWeights, OptimalConditions, ProfileDefinition,
};
pub use recommendations::{Priority, Recommendation, generate_recommendations};
pub use registry::{ActivityRegistry, GENERAL_ACTIVITY_ID};
pub use weather::{DEFAULT_VISIBILITY_M, ForecastEntry, WeatherReading};
