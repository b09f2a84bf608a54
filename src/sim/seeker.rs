//! Seekers: aim at the player once, then accelerate in a straight line
//!
//! The target is sampled at spawn time only. Acceleration is a fixed
//! multiple of the spawn velocity, so direction never changes while speed
//! grows linearly with time.

use glam::Vec2;

use super::collision::{collides_with_target, is_off_screen};
use super::particle::Particle;
use super::random::RandomSource;
use super::spawn::spawn_on_edge;
use super::state::TickContext;

pub const SEEKER_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// Spawn on the edge ring, heading for where the player is right now
pub fn init(p: &mut Particle, rng: &mut dyn RandomSource, ctx: &TickContext<'_>) {
    let tuning = ctx.tuning;
    let (pos, _) = spawn_on_edge(rng, tuning.particle_size, tuning.spawn_margin);

    let heading = (ctx.target.pos - pos).normalize_or_zero();
    let vel = heading * ctx.base_speed;

    p.set_position(pos);
    p.set_velocity(vel);
    p.set_attr_vec(vel * tuning.seeker_acceleration);
    p.color = SEEKER_COLOR;
}

/// Integrate one tick. Returns whether the seeker hit the player.
pub fn update(p: &mut Particle, rng: &mut dyn RandomSource, ctx: &TickContext<'_>) -> bool {
    let tuning = ctx.tuning;

    let vel = p.velocity() + p.attr_vec() * ctx.dt;
    let pos = p.position() + vel * ctx.dt;
    p.set_velocity(vel);
    p.set_position(pos);

    // Intentionally unclamped: values above 1 mark very fast seekers.
    p.color[1] = heat(vel, tuning.initial_base_speed, tuning.seeker_hotter_ratio);

    let size = tuning.particle_size;
    let hit = collides_with_target(
        pos.x,
        pos.y,
        size,
        ctx.target.pos.x,
        ctx.target.pos.y,
        ctx.target.size.x,
        ctx.target.size.y,
    );

    if is_off_screen(pos.x, pos.y, size, tuning.cull_margin) {
        init(p, rng, ctx);
    }

    hit
}

/// Green channel for a seeker moving at `vel`
#[inline]
pub fn heat(vel: Vec2, initial_base_speed: f32, hotter_ratio: f32) -> f32 {
    vel.length() / (initial_base_speed * hotter_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::TargetSnapshot;
    use crate::sim::random::RandomStreams;
    use crate::tuning::Tuning;

    fn ctx(tuning: &Tuning, target: Vec2, base_speed: f32, dt: f32) -> TickContext<'_> {
        TickContext {
            dt,
            total_time: 0.0,
            base_speed,
            target: TargetSnapshot {
                pos: target,
                size: Vec2::splat(0.05),
            },
            tuning,
        }
    }

    #[test]
    fn test_init_aims_at_player() {
        let tuning = Tuning::default();
        let mut streams = RandomStreams::new(3, 1);
        let target = Vec2::new(0.3, -0.2);

        for _ in 0..50 {
            let mut p = Particle::default();
            init(&mut p, streams.stream(0), &ctx(&tuning, target, 0.5, 0.0));

            let to_target = target - p.position();
            assert_eq!(p.vel[0].signum(), to_target.x.signum());
            assert_eq!(p.vel[1].signum(), to_target.y.signum());
            assert!((p.velocity().length() - 0.5).abs() < 1e-5);
            assert_eq!(p.attr_vec(), p.velocity() * tuning.seeker_acceleration);
            assert_eq!(p.color, SEEKER_COLOR);
        }
    }

    #[test]
    fn test_heading_stays_frozen_when_player_moves() {
        let tuning = Tuning::default();
        let mut streams = RandomStreams::new(11, 1);
        let mut p = Particle::default();
        init(&mut p, streams.stream(0), &ctx(&tuning, Vec2::ZERO, 0.2, 0.0));
        let heading = p.velocity().normalize();

        // Player jumps elsewhere; the seeker does not re-aim
        let moved = ctx(&tuning, Vec2::new(0.9, 0.9), 0.2, 0.01);
        for _ in 0..10 {
            update(&mut p, streams.stream(0), &moved);
            assert!(p.velocity().normalize().abs_diff_eq(heading, 1e-5));
        }
    }

    #[test]
    fn test_integration_order() {
        let tuning = Tuning::default();
        let mut streams = RandomStreams::new(0, 1);
        let mut p = Particle {
            pos: [-1.05, 0.0],
            color: SEEKER_COLOR,
            vel: [1.0, 0.0],
            attr: [0.4, 0.0],
        };
        let hit = update(&mut p, streams.stream(0), &ctx(&tuning, Vec2::new(0.5, 0.5), 1.0, 0.1));
        assert!(!hit);
        // vel += accel * dt first, then pos += vel * dt
        let vel_x = 1.0f32 + 0.4f32 * 0.1f32;
        assert_eq!(p.vel, [vel_x, 0.0]);
        assert_eq!(p.pos, [-1.05f32 + vel_x * 0.1f32, 0.0]);
    }

    #[test]
    fn test_heat_is_not_clamped() {
        let tuning = Tuning::default();
        let fast = Vec2::new(tuning.initial_base_speed * tuning.seeker_hotter_ratio * 3.0, 0.0);
        let green = heat(fast, tuning.initial_base_speed, tuning.seeker_hotter_ratio);
        assert!((green - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_hit_is_reported() {
        let tuning = Tuning::default();
        let mut streams = RandomStreams::new(0, 1);
        let mut p = Particle {
            pos: [0.0, 0.0],
            color: SEEKER_COLOR,
            vel: [0.1, 0.0],
            attr: [0.0, 0.0],
        };
        assert!(update(&mut p, streams.stream(0), &ctx(&tuning, Vec2::ZERO, 0.1, 0.01)));
    }

    #[test]
    fn test_leaving_the_screen_respawns() {
        let tuning = Tuning::default();
        let mut streams = RandomStreams::new(8, 1);
        let mut p = Particle {
            pos: [1.5, 0.0],
            color: [1.0, 2.0, 0.0],
            vel: [1.0, 0.0],
            attr: [1.0, 0.0],
        };
        update(&mut p, streams.stream(0), &ctx(&tuning, Vec2::ZERO, 0.25, 0.1));
        assert!(crate::sim::collision::is_off_screen(p.pos[0], p.pos[1], tuning.particle_size, 0.0));
        assert!((p.velocity().length() - 0.25).abs() < 1e-5);
        assert_eq!(p.color, SEEKER_COLOR);
    }
}
