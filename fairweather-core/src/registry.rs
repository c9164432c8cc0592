//! Activity profile registry.
//!
//! An ordered, read-only catalog. Build it once at startup and pass it by
//! reference; the first profile is the fallback for unknown ids.

use std::collections::HashSet;

use tracing::debug;

use crate::error::ProfileError;
use crate::profile::{ActivityProfile, FactorWeights, OptimalConditions, ProfileDefinition};

/// Id of the built-in fallback profile.
pub const GENERAL_ACTIVITY_ID: &str = "general";

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRegistry {
    profiles: Vec<ActivityProfile>,
}

impl ActivityRegistry {
    /// Build a registry from validated or hand-built profiles.
    ///
    /// Every profile is validated; the catalog must be non-empty and ids
    /// must be unique.
    pub fn new(profiles: Vec<ActivityProfile>) -> Result<Self, ProfileError> {
        if profiles.is_empty() {
            return Err(ProfileError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for p in &profiles {
            p.validate()?;
            if !seen.insert(p.id.as_str()) {
                return Err(ProfileError::DuplicateId(p.id.clone()));
            }
        }

        debug!(count = profiles.len(), "activity registry loaded");
        Ok(Self { profiles })
    }

    /// Build a registry from catalog file definitions.
    pub fn from_definitions(defs: Vec<ProfileDefinition>) -> Result<Self, ProfileError> {
        let profiles = defs
            .into_iter()
            .map(ActivityProfile::from_definition)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(profiles)
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            profiles: builtin_profiles(),
        }
    }

    /// Look up a profile, falling back to the first entry for unknown ids.
    pub fn get_by_id(&self, id: &str) -> &ActivityProfile {
        match self.find(id) {
            Some(p) => p,
            None => {
                debug!(id, fallback = %self.profiles[0].id, "unknown activity id");
                &self.profiles[0]
            }
        }
    }

    /// Exact lookup without fallback.
    pub fn find(&self, id: &str) -> Option<&ActivityProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// All profiles in catalog order.
    pub fn all(&self) -> &[ActivityProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ActivityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn weights(
    temperature: f64,
    wind: f64,
    precipitation: f64,
    humidity: f64,
    visibility: f64,
) -> FactorWeights {
    FactorWeights {
        temperature,
        wind,
        precipitation,
        humidity,
        visibility,
    }
}

fn optimal(
    temp_range: (f64, f64),
    max_wind: f64,
    max_precipitation: f64,
    max_humidity: f64,
    min_visibility: f64,
) -> OptimalConditions {
    OptimalConditions {
        temp_range,
        max_wind,
        max_precipitation,
        max_humidity,
        min_visibility,
    }
}

fn builtin_profiles() -> Vec<ActivityProfile> {
    vec![
        ActivityProfile::new(
            GENERAL_ACTIVITY_ID,
            "General Outdoor Activity",
            "Walking, casual outdoor events",
            weights(0.3, 0.2, 0.3, 0.1, 0.1),
            optimal((15.0, 25.0), 15.0, 0.1, 70.0, 5000.0),
        ),
        ActivityProfile::new(
            "hiking",
            "Hiking & Trekking",
            "Mountain hiking, trail walking",
            weights(0.25, 0.25, 0.25, 0.15, 0.1),
            optimal((10.0, 22.0), 20.0, 0.2, 75.0, 3000.0),
        ),
        ActivityProfile::new(
            "cycling",
            "Cycling",
            "Road cycling, mountain biking",
            weights(0.2, 0.4, 0.3, 0.05, 0.05),
            optimal((12.0, 24.0), 25.0, 0.1, 80.0, 8000.0),
        ),
        ActivityProfile::new(
            "water_sports",
            "Water Sports",
            "Swimming, kayaking, sailing",
            weights(0.35, 0.3, 0.15, 0.05, 0.15),
            optimal((20.0, 30.0), 15.0, 0.3, 85.0, 2000.0),
        ),
        ActivityProfile::new(
            "picnic",
            "Picnic & BBQ",
            "Outdoor dining, family gatherings",
            weights(0.25, 0.25, 0.4, 0.05, 0.05),
            optimal((18.0, 28.0), 12.0, 0.05, 75.0, 5000.0),
        ),
        ActivityProfile::new(
            "photography",
            "Photography",
            "Outdoor photography sessions",
            weights(0.15, 0.15, 0.25, 0.1, 0.35),
            optimal((5.0, 30.0), 20.0, 0.1, 80.0, 10000.0),
        ),
    ]
}
