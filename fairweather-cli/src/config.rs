use anyhow::{Context, Result};
use fairweather_core::{ActivityRegistry, ProfileDefinition, UserPreferences};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::state::{ensure_fairweather_home, fairweather_home};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional TOML file with `[[activities]]` replacing the built-in catalog.
    /// Relative paths resolve against the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Print JSON instead of text by default.
    #[serde(default)]
    pub json: bool,
    /// Number of forecast windows to show.
    #[serde(default = "default_windows")]
    pub windows: usize,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            json: false,
            windows: default_windows(),
        }
    }
}

fn default_windows() -> usize {
    3
}

/// Custom activity catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub activities: Vec<ProfileDefinition>,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(fairweather_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s).context("parse config.toml")?;
    cfg.preferences
        .validate()
        .context("invalid [preferences] in config.toml")?;
    Ok(cfg)
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        debug!(path = %p.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("load {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let dir = ensure_fairweather_home()?;
    let p = dir.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn parse_catalog(s: &str) -> Result<ActivityRegistry> {
    let file: CatalogFile = toml::from_str(s).context("parse activity catalog")?;
    Ok(ActivityRegistry::from_definitions(file.activities)?)
}

/// Registry for this run: the configured catalog, or the built-in one.
pub fn load_registry(cfg: &Config) -> Result<ActivityRegistry> {
    let Some(catalog) = &cfg.catalog else {
        return Ok(ActivityRegistry::builtin());
    };
    let path = resolve_catalog_path(catalog)?;
    let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let registry = parse_catalog(&s).with_context(|| format!("load {}", path.display()))?;
    info!(path = %path.display(), activities = registry.len(), "loaded custom catalog");
    Ok(registry)
}

fn resolve_catalog_path(p: &Path) -> Result<PathBuf> {
    if p.is_absolute() {
        Ok(p.to_path_buf())
    } else {
        Ok(fairweather_home()?.join(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.output.windows, 3);
    }

    #[test]
    fn test_parse_preferences_section() {
        let cfg = parse_config(
            r#"
[preferences]
very_hot = 28.0
very_cold = 2.0
very_windy = 15.0
very_wet = 0.5
very_humid = 75.0
preferred_activity = "hiking"

[output]
json = true
"#,
        )
        .unwrap();
        assert_eq!(cfg.preferences.preferred_activity, "hiking");
        assert_eq!(cfg.preferences.very_hot, 28.0);
        assert!(cfg.output.json);
        assert_eq!(cfg.output.windows, 3);
    }

    #[test]
    fn test_rejects_inverted_preferences() {
        let err = parse_config(
            r#"
[preferences]
very_hot = 5.0
very_cold = 10.0
very_windy = 15.0
very_wet = 0.5
very_humid = 75.0
preferred_activity = "general"
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("very_cold"));
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let cfg = Config {
            catalog: Some(PathBuf::from("activities.toml")),
            ..Config::default()
        };
        let s = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(parse_config(&s).unwrap(), cfg);
    }

    #[test]
    fn test_parse_catalog() {
        let reg = parse_catalog(
            r#"
[[activities]]
id = "trail_running"
name = "Trail Running"
description = "Off-road running"
weights = { temperature = 0.35, wind = 0.15, precipitation = 0.2, humidity = 0.2, visibility = 0.1 }
optimal_conditions = { temp_range = [5.0, 18.0], max_wind = 15.0, max_precipitation = 0.2, max_humidity = 70.0, min_visibility = 2000.0 }

[[activities]]
id = "stargazing"
name = "Stargazing"
weights = { temperature = 0.1, wind = 0.1, precipitation = 0.3, humidity = 0.1, visibility = 0.4 }
optimal_conditions = { temp_range = [0.0, 25.0], max_wind = 10.0, max_precipitation = 0.05, max_humidity = 80.0, min_visibility = 15000.0 }
acceptable_conditions = { temp_range = [-10.0, 30.0], max_wind = 14.0, max_precipitation = 0.1, max_humidity = 90.0, min_visibility = 10000.0 }
"#,
        )
        .unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get_by_id("unknown").id, "trail_running");
        let star = reg.get_by_id("stargazing");
        assert_eq!(star.acceptable_conditions.min_visibility, 10000.0);
        assert_eq!(star.description, "");
    }

    #[test]
    fn test_catalog_with_bad_profile_is_rejected() {
        let err = parse_catalog(
            r#"
[[activities]]
id = "broken"
name = "Broken"
weights = { temperature = 0.2, wind = 0.2, precipitation = 0.2, humidity = 0.2, visibility = 0.2 }
optimal_conditions = { temp_range = [20.0, 10.0], max_wind = 15.0, max_precipitation = 0.2, max_humidity = 70.0, min_visibility = 2000.0 }
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
