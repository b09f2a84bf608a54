//! Swarmfield headless runner
//!
//! Usage: `swarmfield [config.json] [ticks]`
//!
//! Runs the simulation at a fixed step with a scripted player circling the
//! middle of the screen, hands each frame to a counting renderer and logs
//! the run summary.

use std::process::ExitCode;

use swarmfield::consts::RUNNER_DT;
use swarmfield::render::{PointBatch, Renderer, present};
use swarmfield::sim::{FixedClock, TickOutcome};
use swarmfield::{Engine, Player, PlayerInput, SimConfig};

const DEFAULT_TICKS: u64 = 600;

/// Seconds per lap of the scripted player
const LAP_SECS: f32 = 4.0;

/// Stands in for a real drawing backend
#[derive(Default)]
struct FrameCounter {
    frames: u64,
    bytes: usize,
}

impl Renderer for FrameCounter {
    fn draw(&mut self, records: &[u8], batches: &[PointBatch]) -> swarmfield::Result<()> {
        self.frames += 1;
        self.bytes = records.len();
        if self.frames % 60 == 0 {
            let points: usize = batches.iter().map(|b| b.records.len()).sum();
            log::debug!("Frame {}: {} points in {} batches", self.frames, points, batches.len());
        }
        Ok(())
    }
}

/// Hold the keys that walk the player around a circle
fn circling_input(total: f32) -> PlayerInput {
    let angle = total / LAP_SECS * std::f32::consts::TAU;
    let (dx, dy) = (-angle.sin(), angle.cos());
    PlayerInput {
        up: dy > 0.3,
        down: dy < -0.3,
        left: dx < -0.3,
        right: dx > 0.3,
    }
}

/// Tick count from the command line, falling back to the default
fn tick_count(arg: Option<&str>) -> u64 {
    match arg {
        Some(arg) => arg.parse().unwrap_or_else(|e| {
            log::warn!("Ignoring tick count {arg:?} ({e}), running {DEFAULT_TICKS}");
            DEFAULT_TICKS
        }),
        None => DEFAULT_TICKS,
    }
}

fn run(config: SimConfig, ticks: u64) -> swarmfield::Result<()> {
    let tuning = config.tuning.clone();
    let mut player = Player::new(tuning.player_size, config.player_can_die);
    let mut engine = Engine::new(config)?;
    let buffer = engine.buffer();
    let mut clock = FixedClock::new(RUNNER_DT);
    let mut renderer = FrameCounter::default();

    for _ in 0..ticks {
        let input = circling_input(engine.state().total_time);
        match engine.step(&mut clock, &mut player, &input)? {
            TickOutcome::Inactive => break,
            TickOutcome::Skipped => continue,
            TickOutcome::Initialized | TickOutcome::Updated { .. } => {}
        }
        present(&buffer, &tuning, &mut renderer)?;
    }

    log::info!("Presented {} frames of {} bytes", renderer.frames, renderer.bytes);
    let summary = engine.shutdown();
    if !summary.active {
        log::info!("Player was caught after {:.2}s", summary.total_time);
    }
    match serde_json::to_string(&summary) {
        Ok(json) => log::info!("Summary: {json}"),
        Err(e) => log::warn!("Could not encode summary: {e}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    log::info!("Swarmfield starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Could not load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };
    let ticks = tick_count(args.next().as_deref());

    match run(config, ticks) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Run aborted: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_count_argument() {
        assert_eq!(tick_count(None), DEFAULT_TICKS);
        assert_eq!(tick_count(Some("42")), 42);
        assert_eq!(tick_count(Some("lots")), DEFAULT_TICKS);
        assert_eq!(tick_count(Some("-5")), DEFAULT_TICKS);
    }
}
