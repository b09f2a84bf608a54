//! Startup configuration
//!
//! Read once before the engine is built and never changed afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::tuning::Tuning;

/// Base seed of the per-particle random streams when none is configured
pub const DEFAULT_SEED: u64 = 1234;

/// Which executor runs the per-particle passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendKind {
    /// One task per particle, three kind groups in flight at once
    Parallel,
    /// Single thread, kinds in order
    Sequential,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Parallel => "parallel",
            BackendKind::Sequential => "sequential",
        }
    }
}

/// Configuration surface of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Particle counts ===
    pub seekers: usize,
    pub cruisers: usize,
    pub wanderers: usize,

    // === Toggles ===
    /// Use the parallel (accelerated) backend
    pub parallel: bool,
    /// Whether a collision may kill the player
    pub player_can_die: bool,
    /// Activate particles gradually instead of all at once
    pub staggered_start: bool,

    // === Parallel backend ===
    /// Base seed of the per-particle streams
    pub seed: u64,
    /// Worker threads for the parallel backend (0 = one per core)
    pub worker_threads: usize,

    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seekers: 1000,
            cruisers: 1000,
            wanderers: 200,

            parallel: true,
            player_can_die: true,
            staggered_start: true,

            seed: DEFAULT_SEED,
            worker_threads: 0,

            tuning: Tuning::default(),
        }
    }
}

impl SimConfig {
    /// Config with the given counts and defaults everywhere else
    pub fn with_counts(seekers: usize, cruisers: usize, wanderers: usize) -> Self {
        Self {
            seekers,
            cruisers,
            wanderers,
            ..Self::default()
        }
    }

    pub fn backend(&self) -> BackendKind {
        if self.parallel {
            BackendKind::Parallel
        } else {
            BackendKind::Sequential
        }
    }

    pub fn total_particles(&self) -> usize {
        self.seekers + self.cruisers + self.wanderers
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: SimConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.tuning.first_invalid() {
            Some(field) => Err(SimError::InvalidConfig { field }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_selection() {
        let mut config = SimConfig::default();
        assert_eq!(config.backend(), BackendKind::Parallel);
        config.parallel = false;
        assert_eq!(config.backend(), BackendKind::Sequential);
    }

    #[test]
    fn test_json_overrides() {
        let config: SimConfig = serde_json::from_str(
            r#"{ "seekers": 3, "cruisers": 0, "wanderers": 7, "parallel": false,
                 "tuning": { "wanderer_bigger": 3.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.total_particles(), 10);
        assert_eq!(config.backend(), BackendKind::Sequential);
        assert_eq!(config.tuning.wanderer_bigger, 3.0);
        assert!(config.staggered_start);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let mut config = SimConfig::default();
        config.tuning.cruiser_turn_modulus = 0;
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig {
                field: "cruiser_turn_modulus"
            })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
