//! Swarmfield - a particle swarm around a player avatar
//!
//! Core modules:
//! - `sim`: Particle simulation (kind rules, executors, shared buffer)
//! - `render`: Read-side contract for a drawing backend
//! - `settings`: Startup configuration
//! - `tuning`: Data-driven simulation constants

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Result, SimError};
pub use settings::{BackendKind, SimConfig};
pub use sim::{Engine, Player, PlayerInput, RunSummary};
pub use tuning::Tuning;

/// Buffer layout constants
pub mod consts {
    /// Floats per particle record: pos(2) color(3) vel(2) attr(2)
    pub const FLOATS_PER_PARTICLE: usize = 9;
    /// Bytes per particle record
    pub const RECORD_BYTES: usize = FLOATS_PER_PARTICLE * std::mem::size_of::<f32>();

    /// Visible region is [-HALF_EXTENT, HALF_EXTENT] on both axes
    pub const HALF_EXTENT: f32 = 1.0;

    /// Step used by the headless runner (60 Hz)
    pub const RUNNER_DT: f32 = 1.0 / 60.0;
}
