//! Simulation configuration. Loaded from `config.ron` at startup.

use procgen::{LifecycleConfig, SpawnError, SpawnerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::flight::FlightConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("fixed_rate_hz must be positive and finite, got {0}")]
    InvalidFixedRate(f64),
    #[error("flight.{name} is out of range: {value}")]
    InvalidFlight { name: &'static str, value: f32 },
    #[error("vehicle_radius must be positive, got {0}")]
    InvalidVehicleRadius(f32),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

/// Persistent simulation settings. Every field has a default, so a partial
/// file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Physics and flight-control tick rate.
    #[serde(default = "default_fixed_rate_hz")]
    pub fixed_rate_hz: f64,
    /// World seed. Unset means a fresh world every run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Radius of the vehicle's collision sphere.
    #[serde(default = "default_vehicle_radius")]
    pub vehicle_radius: f32,
    #[serde(default)]
    pub flight: FlightConfig,
    #[serde(default)]
    pub spawner: SpawnerConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

fn default_fixed_rate_hz() -> f64 {
    engine_core::time::DEFAULT_FIXED_RATE_HZ
}
fn default_vehicle_radius() -> f32 {
    2.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_rate_hz: default_fixed_rate_hz(),
            seed: None,
            vehicle_radius: default_vehicle_radius(),
            flight: FlightConfig::default(),
            spawner: SpawnerConfig::default(),
            lifecycle: LifecycleConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load config from `path`. A missing file yields defaults; a file that
    /// exists but cannot be read or parsed is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_rate_hz.is_finite() && self.fixed_rate_hz > 0.0) {
            return Err(ConfigError::InvalidFixedRate(self.fixed_rate_hz));
        }
        if !(self.vehicle_radius.is_finite() && self.vehicle_radius > 0.0) {
            return Err(ConfigError::InvalidVehicleRadius(self.vehicle_radius));
        }
        self.flight.validate()?;
        self.spawner.validate()?;
        self.lifecycle.validate()?;
        Ok(())
    }
}

/// `config.ron` in the current directory.
pub fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("skyward-{}-{name}.ron", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("skyward-does-not-exist.ron");
        let config = GameConfig::load_from(&path).unwrap();
        assert_eq!(config, GameConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let path = temp_file(
            "partial",
            "(seed: Some(42), flight: (forward_speed: 80.0, invert_y: true), spawner: (max_spawn_attempts: 4))",
        );
        let config = GameConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.flight.forward_speed, 80.0);
        assert!(config.flight.invert_y);
        assert_eq!(config.flight.strafe_speed, 30.0);
        assert_eq!(config.spawner.max_spawn_attempts, 4);
        assert_eq!(config.spawner.min_buffer_distance, 3000.0);
        assert_eq!(config.lifecycle, LifecycleConfig::default());
        assert_eq!(config.fixed_rate_hz, 50.0);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_file("broken", "(seed: Some(42), flight: (");
        let result = GameConfig::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn validation_reaches_every_section() {
        let config = GameConfig {
            fixed_rate_hz: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidFixedRate(_))));

        let mut config = GameConfig::default();
        config.spawner.body_kinds.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Spawn(SpawnError::NoBodyKinds))
        ));

        let mut config = GameConfig::default();
        config.lifecycle.cleanup_distance = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Spawn(_))));

        let mut config = GameConfig::default();
        config.flight.pitch_limit = 95.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFlight { name: "pitch_limit", .. })
        ));
    }
}
