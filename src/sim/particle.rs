//! Particle record and kind layout
//!
//! All three kinds share one flat record so a single contiguous buffer can
//! hold them without type tags. The kind of a record is implied by which
//! index range it sits in.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One particle slot, 9 consecutive `f32`s (36 bytes)
///
/// `attr` is kind-specific: acceleration for Seekers, distance since the
/// last turn check for Cruisers (in `attr[0]`), unused for Wanderers.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    pub pos: [f32; 2],
    pub color: [f32; 3],
    pub vel: [f32; 2],
    pub attr: [f32; 2],
}

impl Particle {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.pos)
    }

    #[inline]
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos.to_array();
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_array(self.vel)
    }

    #[inline]
    pub fn set_velocity(&mut self, vel: Vec2) {
        self.vel = vel.to_array();
    }

    /// Both generic attributes read as a vector (Seeker acceleration)
    #[inline]
    pub fn attr_vec(&self) -> Vec2 {
        Vec2::from_array(self.attr)
    }

    #[inline]
    pub fn set_attr_vec(&mut self, v: Vec2) {
        self.attr = v.to_array();
    }
}

/// The three particle kinds, in buffer order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    Seeker,
    Cruiser,
    Wanderer,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 3] = [
        ParticleKind::Seeker,
        ParticleKind::Cruiser,
        ParticleKind::Wanderer,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParticleKind::Seeker => "seeker",
            ParticleKind::Cruiser => "cruiser",
            ParticleKind::Wanderer => "wanderer",
        }
    }

    /// Wanderers start on screen and are never held back by staggering
    #[inline]
    pub fn is_staggered(self) -> bool {
        !matches!(self, ParticleKind::Wanderer)
    }
}

/// Fixed per-kind particle counts for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindLayout {
    pub seekers: usize,
    pub cruisers: usize,
    pub wanderers: usize,
}

impl KindLayout {
    pub fn new(seekers: usize, cruisers: usize, wanderers: usize) -> Self {
        Self {
            seekers,
            cruisers,
            wanderers,
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.seekers + self.cruisers + self.wanderers
    }

    /// Largest count among the three kinds
    pub fn largest(&self) -> usize {
        self.seekers.max(self.cruisers).max(self.wanderers)
    }

    /// Absolute buffer range occupied by `kind`
    pub fn range(&self, kind: ParticleKind) -> Range<usize> {
        let seekers_end = self.seekers;
        let cruisers_end = seekers_end + self.cruisers;
        match kind {
            ParticleKind::Seeker => 0..seekers_end,
            ParticleKind::Cruiser => seekers_end..cruisers_end,
            ParticleKind::Wanderer => cruisers_end..self.total(),
        }
    }

    /// Kind owning absolute buffer index `index`
    pub fn kind_of(&self, index: usize) -> Option<ParticleKind> {
        ParticleKind::ALL
            .into_iter()
            .find(|&kind| self.range(kind).contains(&index))
    }

    /// Split a buffer-shaped slice into the three disjoint kind slices
    ///
    /// Works for any per-particle array laid out like the buffer (records,
    /// random streams).
    pub fn split_mut<'a, T>(&self, items: &'a mut [T]) -> [&'a mut [T]; 3] {
        debug_assert_eq!(items.len(), self.total());
        let (seekers, rest) = items.split_at_mut(self.seekers);
        let (cruisers, wanderers) = rest.split_at_mut(self.cruisers);
        [seekers, cruisers, wanderers]
    }
}
