//! Data-driven simulation balance
//!
//! Every numeric knob the particle kinds and the engine read lives here so a
//! run can be retuned from a config file without touching the updaters.

use serde::{Deserialize, Serialize};

/// Tuning constants shared by all particle kinds
///
/// Distances are in normalized device coordinates (the visible region is
/// `[-1, 1]` on both axes), times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Geometry ===
    /// Side length of a Seeker/Cruiser bounding square
    pub particle_size: f32,
    /// Outer edge of the spawn ring beyond the visible region
    pub spawn_margin: f32,
    /// Distance beyond the visible region at which a particle is recycled
    pub cull_margin: f32,

    // === Global speed ramp ===
    /// Base speed at the start of a run
    pub initial_base_speed: f32,
    /// Base speed gained per second once staggering is over
    pub ramp_per_second: f32,
    /// Particles activated per second per kind while staggering
    pub spawn_rate_per_second: f32,

    // === Seeker ===
    /// Acceleration as a fraction of the spawn velocity
    pub seeker_acceleration: f32,
    /// Speed ratio (relative to the initial base speed) at which the green channel reaches 1
    pub seeker_hotter_ratio: f32,

    // === Cruiser ===
    /// Speed multiplier over the base speed
    pub cruiser_faster: f32,
    /// Distance travelled between turn checks
    pub cruiser_check_distance: f32,
    /// Integer scale applied to the coordinate before the turn test
    pub cruiser_turn_scale: f32,
    /// Turn when the scaled coordinate is divisible by this
    pub cruiser_turn_modulus: i32,

    // === Wanderer ===
    /// Diffusion scale as a multiple of the base speed
    pub wanderer_diffusion: f32,
    /// Rendered and collision footprint relative to `particle_size`
    pub wanderer_bigger: f32,
    /// Initial scatter keeps this far from the center on each axis
    pub wanderer_exclusion: f32,
    /// Initial scatter may reach this far past the visible edge
    pub wanderer_overshoot: f32,

    // === Player ===
    /// Player movement speed
    pub player_speed: f32,
    /// Player box side length
    pub player_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            particle_size: 0.01,
            spawn_margin: 0.1,
            cull_margin: 0.3,

            initial_base_speed: 0.15,
            ramp_per_second: 0.004,
            spawn_rate_per_second: 200.0,

            seeker_acceleration: 0.4,
            seeker_hotter_ratio: 4.0,

            cruiser_faster: 1.6,
            cruiser_check_distance: 0.05,
            cruiser_turn_scale: 1000.0,
            cruiser_turn_modulus: 7,

            wanderer_diffusion: 0.4,
            wanderer_bigger: 4.0,
            wanderer_exclusion: 0.25,
            wanderer_overshoot: 0.1,

            player_speed: 0.9,
            player_size: 0.05,
        }
    }
}

impl Tuning {
    /// Footprint used for Wanderer drawing, collision and culling
    #[inline]
    pub fn wanderer_size(&self) -> f32 {
        self.particle_size * self.wanderer_bigger
    }

    /// Returns the name of the first field that is not a usable value
    pub fn first_invalid(&self) -> Option<&'static str> {
        let positive = [
            ("particle_size", self.particle_size),
            ("spawn_margin", self.spawn_margin),
            ("initial_base_speed", self.initial_base_speed),
            ("spawn_rate_per_second", self.spawn_rate_per_second),
            ("seeker_hotter_ratio", self.seeker_hotter_ratio),
            ("cruiser_faster", self.cruiser_faster),
            ("cruiser_check_distance", self.cruiser_check_distance),
            ("cruiser_turn_scale", self.cruiser_turn_scale),
            ("wanderer_diffusion", self.wanderer_diffusion),
            ("wanderer_bigger", self.wanderer_bigger),
            ("player_size", self.player_size),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Some(name);
        }

        let non_negative = [
            ("ramp_per_second", self.ramp_per_second),
            ("seeker_acceleration", self.seeker_acceleration),
            ("wanderer_exclusion", self.wanderer_exclusion),
            ("wanderer_overshoot", self.wanderer_overshoot),
            ("player_speed", self.player_speed),
        ];
        if let Some((name, _)) = non_negative.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
            return Some(name);
        }

        if self.cruiser_turn_modulus <= 0 {
            return Some("cruiser_turn_modulus");
        }

        // Spawned particles must start inside the cull band or they recycle forever.
        let widest_spawn = self.spawn_margin + self.wanderer_size();
        if !(self.cull_margin.is_finite() && self.cull_margin > widest_spawn) {
            return Some("cull_margin");
        }
        if self.wanderer_overshoot + self.wanderer_size() >= self.cull_margin {
            return Some("wanderer_overshoot");
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Tuning::default().first_invalid(), None);
    }

    #[test]
    fn test_cull_margin_must_clear_spawn_ring() {
        let tuning = Tuning {
            cull_margin: 0.05,
            ..Default::default()
        };
        assert_eq!(tuning.first_invalid(), Some("cull_margin"));
    }

    #[test]
    fn test_rejects_nan() {
        let tuning = Tuning {
            particle_size: f32::NAN,
            ..Default::default()
        };
        assert_eq!(tuning.first_invalid(), Some("particle_size"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "cruiser_turn_modulus": 11 }"#).unwrap();
        assert_eq!(tuning.cruiser_turn_modulus, 11);
        assert_eq!(tuning.particle_size, Tuning::default().particle_size);
    }
}
