//! Run settings
//!
//! Which variant to run and the ambient parameters of the loop. Loaded from
//! a JSON file when one is given, otherwise defaults are used.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::error::ConfigError;
use crate::sim::Variant;
use crate::sim::geom::Playfield;

/// Settings for a single run of the frame driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Which game to simulate
    pub variant: Variant,
    /// Seed for the simulation RNG (ball directions and tints)
    pub seed: u64,
    /// Ticks per second
    pub tick_rate: u32,
    /// Playfield bounds handed to the simulation
    pub playfield: Playfield,
    /// Stop after this many ticks (headless runs)
    pub max_ticks: Option<u64>,
    /// Pace the loop against the wall clock
    pub realtime: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            variant: Variant::Battle,
            seed: 0,
            tick_rate: TICK_RATE,
            playfield: Playfield::default(),
            max_ticks: None,
            realtime: true,
        }
    }
}

impl RunSettings {
    /// Default settings for a variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Load settings from a JSON file (missing fields keep defaults)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings: Self = read_json(path)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        let Playfield { width, height } = self.playfield;
        if width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "playfield must have positive extent, got {width}x{height}"
            )));
        }
        Ok(())
    }

    /// Length of one tick in seconds
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// Read and deserialize a JSON file
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RunSettings::default();
        assert_eq!(settings.tick_rate, 60);
        assert_eq!(settings.playfield, Playfield::new(800.0, 600.0));
        assert!(settings.validate().is_ok());
        assert!((settings.tick_seconds() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{ "variant": "fighter", "seed": 7 }"#;
        let settings: RunSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.variant, Variant::Fighter);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.tick_rate, 60);
    }

    #[test]
    fn test_validate_rejects_zero_rate() {
        let settings = RunSettings {
            tick_rate: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("stick_arcade_settings_{}.json", std::process::id()));
        let settings = RunSettings {
            seed: 99,
            max_ticks: Some(120),
            ..RunSettings::for_variant(Variant::Breaker)
        };
        settings.save(&path).unwrap();

        let loaded = RunSettings::load(&path).unwrap();
        assert_eq!(loaded.variant, Variant::Breaker);
        assert_eq!(loaded.seed, 99);
        assert_eq!(loaded.max_ticks, Some(120));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RunSettings::load(Path::new("/nonexistent/stick_arcade.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
