//! Edge spawning shared by every kind
//!
//! Particles (re)enter from a ring just outside the visible region: at
//! least one particle-size beyond an edge, at most `spawn_margin` beyond it,
//! anywhere along that edge.

use glam::Vec2;

use super::random::RandomSource;
use crate::consts::HALF_EXTENT;

/// Edge of the visible region a particle enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top];

    /// Edge for a draw in `0..=3`
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => Edge::Left,
            1 => Edge::Right,
            2 => Edge::Bottom,
            _ => Edge::Top,
        }
    }

    /// Unit vector pointing from this edge into the visible region
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
            Edge::Bottom => Vec2::Y,
            Edge::Top => Vec2::NEG_Y,
        }
    }
}

/// Pick a random edge and a point on the spawn ring behind it
pub fn spawn_on_edge(rng: &mut dyn RandomSource, size: f32, spawn_margin: f32) -> (Vec2, Edge) {
    let edge = Edge::from_index(rng.uniform_int(0, 3));
    let depth = HALF_EXTENT + rng.uniform_float(size, spawn_margin);
    let along = rng.uniform_float(-HALF_EXTENT, HALF_EXTENT);

    let pos = match edge {
        Edge::Left => Vec2::new(-depth, along),
        Edge::Right => Vec2::new(depth, along),
        Edge::Bottom => Vec2::new(along, -depth),
        Edge::Top => Vec2::new(along, depth),
    };
    (pos, edge)
}
