//! Random draws for the particle kinds
//!
//! Updaters only see the [`RandomSource`] capability. Two backings exist:
//! - [`RandomStreams`]: one PCG stream per particle index, derived from a
//!   base seed, so every particle draws independently and reproducibly no
//!   matter which worker runs it.
//! - [`SharedRng`]: one generator seeded from OS entropy and handed to each
//!   particle in turn. Runs on this backing are not reproducible.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_pcg::Pcg32;

/// Draws one particle needs during init or update
pub trait RandomSource {
    /// Uniform integer in `[a, b]`
    fn uniform_int(&mut self, a: i32, b: i32) -> i32;
    /// Uniform float in `[a, b)`; collapses to `a` when the range is empty
    fn uniform_float(&mut self, a: f32, b: f32) -> f32;
    /// Zero-mean normal draw
    fn normal(&mut self, std_dev: f32) -> f32;
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn uniform_int(&mut self, a: i32, b: i32) -> i32 {
        if b <= a {
            return a;
        }
        self.random_range(a..=b)
    }

    #[inline]
    fn uniform_float(&mut self, a: f32, b: f32) -> f32 {
        if a.partial_cmp(&b) != Some(Ordering::Less) {
            return a;
        }
        self.random_range(a..b)
    }

    #[inline]
    fn normal(&mut self, std_dev: f32) -> f32 {
        let z: f32 = self.sample(StandardNormal);
        z * std_dev
    }
}

/// Independent per-particle generator states
///
/// Stream `i` is `Pcg32::new(seed, i)`: same starting state, distinct
/// increment, so streams never overlap and stay fixed for a given seed.
#[derive(Debug, Clone)]
pub struct RandomStreams {
    seed: u64,
    streams: Vec<Pcg32>,
}

impl RandomStreams {
    pub fn new(seed: u64, count: usize) -> Self {
        let streams = (0..count as u64).map(|i| Pcg32::new(seed, i)).collect();
        Self { seed, streams }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Generator owned by absolute particle index `index`
    pub fn stream(&mut self, index: usize) -> &mut Pcg32 {
        &mut self.streams[index]
    }

    pub fn as_mut_slice(&mut self) -> &mut [Pcg32] {
        &mut self.streams
    }
}

/// Single generator shared by every particle, seeded from OS entropy
#[derive(Debug)]
pub struct SharedRng {
    rng: StdRng,
}

impl SharedRng {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streams_are_reproducible() {
        let mut a = RandomStreams::new(42, 4);
        let mut b = RandomStreams::new(42, 4);
        for i in 0..4 {
            for _ in 0..16 {
                assert_eq!(
                    a.stream(i).uniform_int(0, 1_000_000),
                    b.stream(i).uniform_int(0, 1_000_000)
                );
            }
        }
    }

    #[test]
    fn test_streams_are_independent() {
        let mut streams = RandomStreams::new(7, 2);
        let first: Vec<i32> = (0..8).map(|_| streams.stream(0).uniform_int(0, i32::MAX - 1)).collect();
        let second: Vec<i32> = (0..8).map(|_| streams.stream(1).uniform_int(0, i32::MAX - 1)).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn test_draw_ranges() {
        let mut rng = SharedRng::from_entropy();
        for _ in 0..1000 {
            let i = rng.rng().uniform_int(0, 3);
            assert!((0..=3).contains(&i));
            let f = rng.rng().uniform_float(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_degenerate_ranges_collapse() {
        let mut streams = RandomStreams::new(1, 1);
        assert_eq!(streams.stream(0).uniform_float(0.5, 0.5), 0.5);
        assert_eq!(streams.stream(0).uniform_float(0.5, 0.1), 0.5);
        assert_eq!(streams.stream(0).uniform_int(3, 3), 3);
    }

    #[test]
    fn test_normal_moments() {
        let mut streams = RandomStreams::new(99, 1);
        let n = 20_000;
        let draws: Vec<f32> = (0..n).map(|_| streams.stream(0).normal(2.0)).collect();
        let mean = draws.iter().sum::<f32>() / n as f32;
        let var = draws.iter().map(|d| (d - mean).powi(2)).sum::<f32>() / n as f32;
        assert!(mean.abs() < 0.1, "mean {mean}");
        assert!((var - 4.0).abs() < 0.3, "variance {var}");
    }
}
