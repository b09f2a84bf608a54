//! Run-wide simulation state
//!
//! Everything that is global to a run (speed ramp, active flag, timing,
//! counters) lives in [`SimulationState`], owned by the engine. Particle
//! passes only see the read-only [`TickContext`] built from it.

use serde::{Deserialize, Serialize};

use super::clock::FrameTime;
use super::particle::{KindLayout, ParticleKind};
use super::player::TargetSnapshot;
use crate::tuning::Tuning;

/// Read-only inputs shared by every particle task during one tick
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub dt: f32,
    pub total_time: f32,
    /// Global base speed after this tick's ramp step
    pub base_speed: f32,
    /// Player as it stood before the particle passes
    pub target: TargetSnapshot,
    pub tuning: &'a Tuning,
}

/// Counters surfaced at shutdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Ticks that ran the particle passes
    pub ticks: u64,
    /// Ticks whose particle passes were skipped because of an error
    pub skipped_ticks: u64,
    /// Recoverable errors recorded during the run
    pub errors: u64,
    /// Ticks in which at least one particle touched the player
    pub collision_ticks: u64,
}

/// Mutable global state of one run
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current global base speed
    pub base_speed: f32,
    pub dt: f32,
    pub total_time: f32,
    /// Cleared for good when the player dies
    pub active: bool,
    /// Whether the init passes have run
    pub initialized: bool,
    staggering: bool,
    pub stats: RunStats,
}

impl SimulationState {
    pub fn new(initial_base_speed: f32, staggered: bool) -> Self {
        Self {
            base_speed: initial_base_speed,
            dt: 0.0,
            total_time: 0.0,
            active: true,
            initialized: false,
            staggering: staggered,
            stats: RunStats::default(),
        }
    }

    /// Whether some particles are still waiting for their stagger slot
    pub fn is_staggering(&self) -> bool {
        self.staggering
    }

    /// Take this tick's timing and step the speed ramp
    ///
    /// The ramp stays frozen until the largest kind has fully staggered in.
    pub fn advance(&mut self, frame: FrameTime, tuning: &Tuning, layout: &KindLayout) {
        self.dt = frame.dt;
        self.total_time = frame.total;

        if self.staggering && self.total_time * tuning.spawn_rate_per_second > layout.largest() as f32 {
            self.staggering = false;
            log::debug!("Stagger-in complete at {:.2}s", self.total_time);
        }

        if !self.staggering {
            self.base_speed += tuning.ramp_per_second * self.dt;
        }
    }

    pub fn context<'a>(&self, target: TargetSnapshot, tuning: &'a Tuning) -> TickContext<'a> {
        TickContext {
            dt: self.dt,
            total_time: self.total_time,
            base_speed: self.base_speed,
            target,
            tuning,
        }
    }
}

/// Stagger gate. Time only moves forward, so once open it stays open.
#[inline]
pub fn released(staggered: bool, kind: ParticleKind, index: usize, total_time: f32, spawn_rate: f32) -> bool {
    !staggered || !kind.is_staggered() || total_time * spawn_rate > index as f32
}
