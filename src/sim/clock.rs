//! Frame timing sources

use std::time::Instant;

/// Timing for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the previous tick
    pub dt: f32,
    /// Seconds since the run started
    pub total: f32,
}

/// Supplies one [`FrameTime`] per tick, never going backwards
pub trait Clock {
    fn next_frame(&mut self) -> FrameTime;
}

/// Constant step, for headless runs and tests
#[derive(Debug, Clone)]
pub struct FixedClock {
    dt: f32,
    total: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt: dt.max(0.0),
            total: 0.0,
        }
    }
}

impl Clock for FixedClock {
    fn next_frame(&mut self) -> FrameTime {
        self.total += self.dt;
        FrameTime {
            dt: self.dt,
            total: self.total,
        }
    }
}

/// Real elapsed time
#[derive(Debug, Clone)]
pub struct WallClock {
    start: Instant,
    last: Instant,
}

impl WallClock {
    pub fn start() -> Self {
        let now = Instant::now();
        Self { start: now, last: now }
    }
}

impl Clock for WallClock {
    fn next_frame(&mut self) -> FrameTime {
        // Instant is monotonic, so neither value can shrink
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        FrameTime {
            dt,
            total: now.duration_since(self.start).as_secs_f32(),
        }
    }
}
