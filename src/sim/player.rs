//! The player avatar
//!
//! The particle passes only ever read a frozen [`TargetSnapshot`] of the
//! player and signal deaths through [`PlayerTarget::kill`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Player position and size as seen by every particle during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

/// What the engine needs from the player
pub trait PlayerTarget {
    fn position(&self) -> Vec2;
    fn size(&self) -> Vec2;

    /// Collision sink. Returns true only when this call moved the player
    /// from alive to dead.
    fn kill(&mut self) -> bool;

    fn snapshot(&self) -> TargetSnapshot {
        TargetSnapshot {
            pos: self.position(),
            size: self.size(),
        }
    }
}

/// Life state. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Alive,
    Dead,
}

/// Held movement keys for one frame (polled by the host)
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl PlayerInput {
    /// Unit (or zero) direction of travel
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.down, self.up)).normalize_or_zero()
    }
}

/// Seconds for one full trip around the color wheel
const COLOR_CYCLE_SECS: f32 = 3.0;

/// The avatar the swarm is chasing
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub color: [f32; 3],
    pub state: PlayerState,
    /// Whether collisions are allowed to kill
    pub can_die: bool,
    color_phase: f32,
}

impl Player {
    pub fn new(size: f32, can_die: bool) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: Vec2::splat(size),
            color: [1.0, 1.0, 1.0],
            state: PlayerState::Alive,
            can_die,
            color_phase: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state == PlayerState::Alive
    }

    /// Move from held keys and advance the color animation
    ///
    /// Runs before the particle passes each frame. A dead player stays put
    /// but keeps cycling colors.
    pub fn update(&mut self, dt: f32, input: &PlayerInput, speed: f32) {
        self.color_phase = (self.color_phase + dt / COLOR_CYCLE_SECS).fract();
        self.color = cycle_color(self.color_phase);

        if !self.is_alive() {
            self.vel = Vec2::ZERO;
            return;
        }

        self.vel = input.direction() * speed;
        let half = self.size / 2.0;
        self.pos = (self.pos + self.vel * dt).clamp(-Vec2::ONE + half, Vec2::ONE - half);
    }
}

impl PlayerTarget for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn kill(&mut self) -> bool {
        if !self.can_die || self.state == PlayerState::Dead {
            return false;
        }
        log::info!("Player killed at ({:.3}, {:.3})", self.pos.x, self.pos.y);
        self.state = PlayerState::Dead;
        true
    }
}

/// Smooth RGB cycle for a phase in `[0, 1)`
fn cycle_color(phase: f32) -> [f32; 3] {
    use std::f32::consts::TAU;
    let angle = phase * TAU;
    [
        0.5 + 0.5 * angle.cos(),
        0.5 + 0.5 * (angle - TAU / 3.0).cos(),
        0.5 + 0.5 * (angle + TAU / 3.0).cos(),
    ]
}
