//! Particle simulation core
//!
//! Everything that moves particles lives here:
//! - Kind rules (seeker, cruiser, wanderer)
//! - Collision and bounds oracle
//! - Random streams and the two executors
//! - The shared buffer and the per-tick engine
//!
//! No drawing or windowing dependencies.

pub mod buffer;
pub mod clock;
pub mod collision;
pub mod cruiser;
pub mod engine;
pub mod executor;
pub mod particle;
pub mod player;
pub mod random;
pub mod seeker;
pub mod spawn;
pub mod state;
pub mod wanderer;

pub use buffer::{ParticleBuffer, ReadWindow, WriteWindow};
pub use clock::{Clock, FixedClock, FrameTime, WallClock};
pub use collision::{collides_with_target, is_off_screen};
pub use engine::{Engine, RunSummary, TickOutcome};
pub use executor::{DeathFlags, Executor};
pub use particle::{KindLayout, Particle, ParticleKind};
pub use player::{Player, PlayerInput, PlayerState, PlayerTarget, TargetSnapshot};
pub use random::{RandomSource, RandomStreams, SharedRng};
pub use spawn::{Edge, spawn_on_edge};
pub use state::{RunStats, SimulationState, TickContext};
