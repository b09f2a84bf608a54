//! Wanderers: Brownian drifters
//!
//! Each axis takes an independent Wiener step per tick, `N(0, sqrt(dt))`
//! scaled by the velocity component. The velocity is a diffusion scale, not
//! a heading, and there is no drift term.

use glam::Vec2;

use super::collision::{collides_with_target, is_off_screen};
use super::particle::Particle;
use super::random::RandomSource;
use super::spawn::spawn_on_edge;
use super::state::TickContext;

pub const WANDERER_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

/// Standard deviation of one Wiener step, `None` when `dt` gives nothing usable
#[inline]
pub fn step_std_dev(dt: f32) -> Option<f32> {
    let std_dev = dt.sqrt();
    if std_dev > 0.0 { Some(std_dev) } else { None }
}

fn reset_motion(p: &mut Particle, ctx: &TickContext<'_>) {
    let scale = ctx.base_speed * ctx.tuning.wanderer_diffusion;
    p.set_velocity(Vec2::splat(scale));
    p.attr = [0.0, 0.0];
    p.color = WANDERER_COLOR;
}

/// Start-of-run placement: scattered over the screen, away from the center
pub fn init_scatter(p: &mut Particle, rng: &mut dyn RandomSource, ctx: &TickContext<'_>) {
    let tuning = ctx.tuning;
    let reach = 1.0 + tuning.wanderer_overshoot;
    let mut axis = || {
        let sign = if rng.uniform_int(0, 1) == 0 { -1.0 } else { 1.0 };
        sign * rng.uniform_float(tuning.wanderer_exclusion, reach)
    };
    let x = axis();
    let y = axis();

    p.set_position(Vec2::new(x, y));
    reset_motion(p, ctx);
}

/// Re-entry placement after leaving the screen
pub fn init_respawn(p: &mut Particle, rng: &mut dyn RandomSource, ctx: &TickContext<'_>) {
    let tuning = ctx.tuning;
    let (pos, _) = spawn_on_edge(rng, tuning.wanderer_size(), tuning.spawn_margin);

    p.set_position(pos);
    reset_motion(p, ctx);
}

/// Take one Wiener step. Returns whether the wanderer hit the player.
pub fn update(p: &mut Particle, rng: &mut dyn RandomSource, ctx: &TickContext<'_>, std_dev: f32) -> bool {
    let tuning = ctx.tuning;
    let scale = p.velocity();

    let dx = rng.normal(std_dev) * scale.x;
    let dy = rng.normal(std_dev) * scale.y;
    let pos = p.position() + Vec2::new(dx, dy);
    p.set_position(pos);

    let size = tuning.wanderer_size();
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
        init_respawn(p, rng, ctx);
    }

    hit
}
