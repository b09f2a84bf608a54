//! Cruisers: axis-aligned movers that turn at pseudo-random spots
//!
//! Turning is driven by the digits of the cruiser's own position rather
//! than by the random source. Identical trajectories therefore turn at
//! identical places on every backend and at every frame rate.

use glam::Vec2;

use super::collision::{collides_with_target, is_off_screen};
use super::particle::Particle;
use super::random::RandomSource;
use super::spawn::spawn_on_edge;
use super::state::TickContext;

/// Color while moving horizontally
pub const CRUISER_GREEN: [f32; 3] = [0.0, 1.0, 0.0];
/// Color while moving vertically
pub const CRUISER_VIOLET: [f32; 3] = [0.6, 0.0, 1.0];

/// `attr` slot holding the distance travelled since the last turn check
const DISTANCE: usize = 0;

#[inline]
fn color_for(vel: Vec2) -> [f32; 3] {
    if vel.x != 0.0 {
        CRUISER_GREEN
    } else {
        CRUISER_VIOLET
    }
}

pub fn init(p: &mut Particle, rng: &mut dyn RandomSource, ctx: &TickContext<'_>) {
    let tuning = ctx.tuning;
    let (pos, edge) = spawn_on_edge(rng, tuning.particle_size, tuning.spawn_margin);
    let vel = edge.inward() * (ctx.base_speed * tuning.cruiser_faster);

    p.set_position(pos);
    p.set_velocity(vel);
    p.attr = [0.0, 0.0];
    p.color = color_for(vel);
}

/// Turn decision for a cruiser whose active-axis coordinate is `coordinate`
///
/// Returns the sign of the new heading on the other axis, or `None` to
/// keep going straight.
pub fn turn_sign(coordinate: f32, scale: f32, modulus: i32) -> Option<f32> {
    let digits = (coordinate * scale) as i32;
    if digits % modulus != 0 {
        return None;
    }
    if (digits / 10) % 2 == 0 { Some(1.0) } else { Some(-1.0) }
}

/// Integrate one tick. Returns whether the cruiser hit the player.
pub fn update(p: &mut Particle, rng: &mut dyn RandomSource, ctx: &TickContext<'_>) -> bool {
    let tuning = ctx.tuning;
    let vel = p.velocity();
    let horizontal = vel.x != 0.0;

    let mut pos = p.position();
    let step = if horizontal { vel.x * ctx.dt } else { vel.y * ctx.dt };
    if horizontal {
        pos.x += step;
    } else {
        pos.y += step;
    }
    p.set_position(pos);
    p.attr[DISTANCE] += step.abs();

    if p.attr[DISTANCE] > tuning.cruiser_check_distance {
        p.attr[DISTANCE] = 0.0;

        let coordinate = if horizontal { pos.x } else { pos.y };
        if let Some(sign) = turn_sign(coordinate, tuning.cruiser_turn_scale, tuning.cruiser_turn_modulus) {
            let speed = vel.length();
            let turned = if horizontal {
                Vec2::new(0.0, sign * speed)
            } else {
                Vec2::new(sign * speed, 0.0)
            };
            p.set_velocity(turned);
            p.color = color_for(turned);
        }
    }

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
