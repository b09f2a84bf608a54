//! Error types for the simulation run

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SimError>;

/// Everything that can go wrong while setting up or running a simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// The worker pool for the parallel backend could not be created
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Someone else holds the particle buffer
    #[error("particle buffer is busy ({holder})")]
    BufferBusy { holder: &'static str },

    /// A previous holder panicked inside its access window
    #[error("particle buffer lock was poisoned")]
    BufferPoisoned,

    /// Configuration file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for `SimConfig`
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration parsed but holds unusable values
    #[error("invalid config value for `{field}`")]
    InvalidConfig { field: &'static str },
}

impl SimError {
    /// Whether the sequential backend may skip the tick and keep running
    pub fn is_buffer_contention(&self) -> bool {
        matches!(self, SimError::BufferBusy { .. } | SimError::BufferPoisoned)
    }
}
