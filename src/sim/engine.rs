//! Per-tick orchestration
//!
//! One tick: take timing, step the speed ramp, open the buffer write
//! window, run the init pass (first tick) or the update pass for all three
//! kinds, close the window, then OR the per-kind collision flags and tell
//! the player.

use std::sync::Arc;

use serde::Serialize;

use super::buffer::ParticleBuffer;
use super::clock::{Clock, FrameTime};
use super::executor::{DeathFlags, Executor};
use super::particle::{KindLayout, Particle, ParticleKind};
use super::player::{Player, PlayerInput, PlayerTarget};
use super::state::{RunStats, SimulationState, released};
use super::{cruiser, seeker, wanderer};
use crate::error::Result;
use crate::settings::{BackendKind, SimConfig};

/// What a call to [`Engine::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// First tick: every particle was placed
    Initialized,
    /// Particles were updated
    Updated { collided: bool },
    /// The buffer was unavailable; particles keep last tick's state
    Skipped,
    /// The player is dead and the simulation has stopped
    Inactive,
}

/// Final report of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub backend: BackendKind,
    pub particles: usize,
    pub stats: RunStats,
    pub total_time: f32,
    pub final_base_speed: f32,
    pub active: bool,
}

/// The simulation core
pub struct Engine {
    config: SimConfig,
    layout: KindLayout,
    buffer: Arc<ParticleBuffer>,
    executor: Executor,
    state: SimulationState,
}

impl Engine {
    /// Build an engine for `config`
    ///
    /// Fails if the configuration is unusable or the backend cannot get
    /// its resources; there is no fallback backend.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let layout = KindLayout::new(config.seekers, config.cruisers, config.wanderers);
        let backend = config.backend();
        let executor = Executor::new(backend, layout, config.seed, config.worker_threads).inspect_err(|e| {
            log::error!("Failed to start {} backend: {e}", backend.as_str());
        })?;

        log::info!(
            "Engine ready: {} seekers, {} cruisers, {} wanderers on the {} backend",
            layout.seekers,
            layout.cruisers,
            layout.wanderers,
            backend.as_str()
        );

        let state = SimulationState::new(config.tuning.initial_base_speed, config.staggered_start);
        Ok(Self {
            layout,
            buffer: Arc::new(ParticleBuffer::new(layout)),
            executor,
            state,
            config,
        })
    }

    /// Handle for the drawing side
    pub fn buffer(&self) -> Arc<ParticleBuffer> {
        Arc::clone(&self.buffer)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn layout(&self) -> KindLayout {
        self.layout
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn stats(&self) -> RunStats {
        self.state.stats
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn backend(&self) -> BackendKind {
        self.executor.backend()
    }

    /// Run one frame in the required order: player first, then particles
    pub fn step(&mut self, clock: &mut dyn Clock, player: &mut Player, input: &PlayerInput) -> Result<TickOutcome> {
        let frame = clock.next_frame();
        player.update(frame.dt, input, self.config.tuning.player_speed);
        self.tick(frame, player)
    }

    /// Advance the particles by one tick
    ///
    /// The player must already be in its final position for this frame;
    /// it is read once and stays frozen for every particle.
    pub fn tick(&mut self, frame: FrameTime, player: &mut dyn PlayerTarget) -> Result<TickOutcome> {
        if !self.state.active {
            return Ok(TickOutcome::Inactive);
        }

        self.state.advance(frame, &self.config.tuning, &self.layout);

        let mut window = match self.buffer.acquire() {
            Ok(window) => window,
            Err(err) if err.is_buffer_contention() && self.executor.backend() == BackendKind::Sequential => {
                log::warn!("Skipping tick at {:.3}s: {err}", self.state.total_time);
                self.state.stats.errors += 1;
                self.state.stats.skipped_ticks += 1;
                return Ok(TickOutcome::Skipped);
            }
            Err(err) => {
                log::error!("Aborting run: {err}");
                return Err(err);
            }
        };

        let ctx = self.state.context(player.snapshot(), &self.config.tuning);

        if !self.state.initialized {
            self.executor.run(window.kinds_mut(), |kind, _, p, rng| match kind {
                ParticleKind::Seeker => seeker::init(p, rng, &ctx),
                ParticleKind::Cruiser => cruiser::init(p, rng, &ctx),
                ParticleKind::Wanderer => wanderer::init_scatter(p, rng, &ctx),
            });
            window.release();

            self.state.initialized = true;
            self.state.stats.ticks += 1;
            log::debug!("Placed {} particles", self.layout.total());
            return Ok(TickOutcome::Initialized);
        }

        let flags = DeathFlags::default();
        let staggered = self.config.staggered_start;
        let spawn_rate = self.config.tuning.spawn_rate_per_second;
        let wander_std_dev = wanderer::step_std_dev(ctx.dt);

        let [seekers, cruisers, wanderers] = window.kinds_mut();
        let wanderers: &mut [Particle] = match wander_std_dev {
            Some(_) => wanderers,
            None => {
                log::debug!("Degenerate step (dt = {}), wanderer pass skipped", ctx.dt);
                &mut []
            }
        };

        self.executor.run([seekers, cruisers, wanderers], |kind, i, p, rng| {
            if !released(staggered, kind, i, ctx.total_time, spawn_rate) {
                return;
            }
            let hit = match kind {
                ParticleKind::Seeker => seeker::update(p, rng, &ctx),
                ParticleKind::Cruiser => cruiser::update(p, rng, &ctx),
                ParticleKind::Wanderer => {
                    wander_std_dev.is_some_and(|std_dev| wanderer::update(p, rng, &ctx, std_dev))
                }
            };
            if hit {
                flags.raise(kind);
            }
        });
        window.release();

        self.state.stats.ticks += 1;
        let collided = flags.any();
        if collided {
            self.state.stats.collision_ticks += 1;
            if player.kill() {
                self.state.active = false;
                log::info!("Player died at {:.2}s; simulation stopped", self.state.total_time);
            }
        }

        Ok(TickOutcome::Updated { collided })
    }

    /// Finish the run and report
    pub fn shutdown(self) -> RunSummary {
        let summary = RunSummary {
            backend: self.executor.backend(),
            particles: self.layout.total(),
            stats: self.state.stats,
            total_time: self.state.total_time,
            final_base_speed: self.state.base_speed,
            active: self.state.active,
        };

        log::info!(
            "Run finished after {:.2}s: {} ticks, {} skipped, {} errors",
            summary.total_time,
            summary.stats.ticks,
            summary.stats.skipped_ticks,
            summary.stats.errors
        );
        if summary.stats.errors > 0 {
            log::warn!("{} recoverable errors during the run", summary.stats.errors);
        }

        summary
    }
}
