use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;
use crate::error::{Result, TrajectoryError};
use crate::types::SimulationParameters;

/// Generation run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of particles in the box
    pub particle_count: usize,
    /// Side length of the cubic box
    pub box_width: f64,
    /// Initial velocity components are drawn from [-max, max)
    pub max_initial_velocity: f64,
    /// Number of recorded steps
    pub step_count: usize,
    /// Integration time step (seconds)
    pub time_step: f64,
    /// Random seed for deterministic initial conditions
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            box_width: DEFAULT_BOX_WIDTH,
            max_initial_velocity: DEFAULT_MAX_INITIAL_VELOCITY,
            step_count: DEFAULT_STEP_COUNT,
            time_step: DEFAULT_TIME_STEP,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| TrajectoryError::config(format!("toml: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_initial_velocity >= 0.0 && self.max_initial_velocity.is_finite()) {
            return Err(TrajectoryError::config(format!(
                "max_initial_velocity must be finite and >= 0, got {}",
                self.max_initial_velocity
            )));
        }
        self.parameters().map(|_| ())
    }

    /// The fixed run metadata that ends up in the trajectory header
    pub fn parameters(&self) -> Result<SimulationParameters> {
        SimulationParameters::new(
            self.particle_count,
            self.box_width,
            self.step_count,
            self.time_step,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        let params = config.parameters().unwrap();
        assert_eq!(params.particle_count, 5);
        assert_eq!(params.step_count, 10_000);
    }

    #[test]
    fn test_rejects_non_positive_fields() {
        let bad = [
            SimConfig { particle_count: 0, ..SimConfig::default() },
            SimConfig { box_width: 0.0, ..SimConfig::default() },
            SimConfig { box_width: -1.0, ..SimConfig::default() },
            SimConfig { step_count: 0, ..SimConfig::default() },
            SimConfig { time_step: 0.0, ..SimConfig::default() },
            SimConfig { time_step: f64::NAN, ..SimConfig::default() },
            SimConfig { max_initial_velocity: -0.1, ..SimConfig::default() },
        ];
        for config in bad {
            let err = config.validate().unwrap_err();
            assert!(matches!(err, TrajectoryError::Config(_)), "{config:?}: {err}");
        }
    }

    #[test]
    fn test_zero_velocity_allowed() {
        let config = SimConfig { max_initial_velocity: 0.0, ..SimConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = SimConfig::from_toml_str("particle_count = 3\ntime_step = 0.5\n").unwrap();
        assert_eq!(config.particle_count, 3);
        assert_eq!(config.time_step, 0.5);
        assert_eq!(config.box_width, DEFAULT_BOX_WIDTH);
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_toml_invalid_value() {
        let err = SimConfig::from_toml_str("box_width = -2.0\n").unwrap_err();
        assert!(matches!(err, TrajectoryError::Config(_)));

        let err = SimConfig::from_toml_str("particle_count = \"many\"\n").unwrap_err();
        assert!(matches!(err, TrajectoryError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        std::fs::write(&path, "step_count = 7\nseed = 9\n").unwrap();
        let config = SimConfig::load(&path).unwrap();
        assert_eq!(config.step_count, 7);
        assert_eq!(config.seed, 9);
    }
}
