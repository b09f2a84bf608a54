//! Collision and bounds tests
//!
//! Both predicates are pure and use strict comparisons throughout: boxes
//! that merely touch do not collide, and a particle sitting exactly on the
//! bounds is still visible.

use crate::consts::HALF_EXTENT;

/// Whether a particle square (side `size`, centered on `px, py`) overlaps a
/// target rectangle centered on `tx, ty` with width `tw` and height `th`
#[inline]
pub fn collides_with_target(px: f32, py: f32, size: f32, tx: f32, ty: f32, tw: f32, th: f32) -> bool {
    let half = size / 2.0;
    let (half_w, half_h) = (tw / 2.0, th / 2.0);

    px - half < tx + half_w
        && px + half > tx - half_w
        && py - half < ty + half_h
        && py + half > ty - half_h
}

/// Whether a particle square lies entirely outside `[-1 - margin, 1 + margin]`
/// on either axis
#[inline]
pub fn is_off_screen(px: f32, py: f32, size: f32, margin: f32) -> bool {
    let half = size / 2.0;
    let limit = HALF_EXTENT + margin;

    px + half < -limit || px - half > limit || py + half < -limit || py - half > limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_concentric_boxes_collide() {
        assert!(collides_with_target(0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_distant_boxes_miss() {
        assert!(!collides_with_target(10.0, 10.0, 1.0, 0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // Particle spans [0.5, 1.5], target spans [-0.5, 0.5]
        assert!(!collides_with_target(1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0));
        assert!(!collides_with_target(0.0, -1.0, 1.0, 0.0, 0.0, 1.0, 1.0));
        assert!(collides_with_target(0.99, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_uses_target_width_and_height_separately() {
        // Wide, flat target
        assert!(collides_with_target(1.5, 0.0, 0.2, 0.0, 0.0, 4.0, 0.1));
        assert!(!collides_with_target(0.0, 1.5, 0.2, 0.0, 0.0, 4.0, 0.1));
    }

    #[test]
    fn test_boundary_particle_is_visible() {
        assert!(!is_off_screen(-1.0, 0.0, 0.01, 0.1));
        assert!(!is_off_screen(1.0, 1.0, 0.01, 0.1));
    }

    #[test]
    fn test_fully_outside_is_off_screen() {
        assert!(is_off_screen(-1.5, 0.0, 0.01, 0.1));
        assert!(is_off_screen(0.0, 1.2, 0.01, 0.1));
        assert!(!is_off_screen(-1.1, 0.0, 0.01, 0.1));
    }

    #[test]
    fn test_exactly_touching_limit_is_not_off_screen() {
        // Right edge exactly on -1 - margin
        assert!(!is_off_screen(-1.5, 0.0, 1.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric_for_squares(
            ax in -2.0f32..2.0, ay in -2.0f32..2.0,
            bx in -2.0f32..2.0, by in -2.0f32..2.0,
            size in 0.01f32..1.0,
        ) {
            prop_assert_eq!(
                collides_with_target(ax, ay, size, bx, by, size, size),
                collides_with_target(bx, by, size, ax, ay, size, size)
            );
        }

        #[test]
        fn prop_inside_visible_region_is_never_off_screen(
            x in -1.0f32..=1.0, y in -1.0f32..=1.0,
            size in 0.0f32..0.5, margin in 0.0f32..0.5,
        ) {
            prop_assert!(!is_off_screen(x, y, size, margin));
        }

        #[test]
        fn prop_off_screen_particles_cannot_hit_on_screen_targets(
            x in 1.7f32..5.0, y in -5.0f32..5.0,
            tx in -1.0f32..1.0, ty in -1.0f32..1.0,
        ) {
            prop_assert!(is_off_screen(x, y, 0.1, 0.5));
            prop_assert!(!collides_with_target(x, y, 0.1, tx, ty, 0.1, 0.1));
        }
    }
}
