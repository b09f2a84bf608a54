//! For-each-particle executors
//!
//! The engine describes one tick as a per-particle task and hands it to an
//! executor together with the three kind slices. The parallel executor runs
//! the kinds as three concurrent task groups, each a parallel loop over its
//! particles with one random stream per particle. The sequential executor
//! walks Seeker, Cruiser, Wanderer in order with one shared generator.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use super::particle::{KindLayout, Particle, ParticleKind};
use super::random::{RandomSource, RandomStreams, SharedRng};
use crate::error::Result;
use crate::settings::BackendKind;

/// One collision flag per kind
///
/// Any number of tasks may raise a flag concurrently; they all write `true`.
#[derive(Debug, Default)]
pub struct DeathFlags([AtomicBool; 3]);

impl DeathFlags {
    #[inline]
    pub fn raise(&self, kind: ParticleKind) {
        self.0[kind.index()].store(true, Ordering::Relaxed);
    }

    pub fn is_raised(&self, kind: ParticleKind) -> bool {
        self.0[kind.index()].load(Ordering::Relaxed)
    }

    /// OR of the three kind flags
    pub fn any(&self) -> bool {
        ParticleKind::ALL.into_iter().any(|kind| self.is_raised(kind))
    }
}

/// Worker pool plus one random stream per particle
pub struct ParallelExecutor {
    pool: rayon::ThreadPool,
    layout: KindLayout,
    streams: RandomStreams,
}

impl ParallelExecutor {
    /// `threads == 0` lets rayon pick one worker per core
    pub fn new(layout: KindLayout, seed: u64, threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("swarm-worker-{i}"))
            .build()?;
        let streams = RandomStreams::new(seed, layout.total());
        log::debug!(
            "Parallel executor: {} workers, {} random streams (seed {})",
            pool.current_num_threads(),
            streams.len(),
            seed
        );
        Ok(Self { pool, layout, streams })
    }

    fn run<F>(&mut self, kinds: [&mut [Particle]; 3], task: &F)
    where
        F: Fn(ParticleKind, usize, &mut Particle, &mut dyn RandomSource) + Sync,
    {
        let streams = self.layout.split_mut(self.streams.as_mut_slice());
        self.pool.scope(|scope| {
            for ((kind, particles), streams) in ParticleKind::ALL.into_iter().zip(kinds).zip(streams) {
                scope.spawn(move |_| {
                    particles
                        .par_iter_mut()
                        .zip(streams.par_iter_mut())
                        .enumerate()
                        .for_each(|(i, (p, rng))| task(kind, i, p, rng));
                });
            }
        });
    }
}

/// Single shared generator, kinds in buffer order
pub struct SequentialExecutor {
    rng: SharedRng,
}

impl SequentialExecutor {
    pub fn new() -> Self {
        Self {
            rng: SharedRng::from_entropy(),
        }
    }

    fn run<F>(&mut self, kinds: [&mut [Particle]; 3], task: &F)
    where
        F: Fn(ParticleKind, usize, &mut Particle, &mut dyn RandomSource),
    {
        for (kind, particles) in ParticleKind::ALL.into_iter().zip(kinds) {
            for (i, p) in particles.iter_mut().enumerate() {
                task(kind, i, p, self.rng.rng());
            }
        }
    }
}

impl Default for SequentialExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend chosen once per run
pub enum Executor {
    Parallel(ParallelExecutor),
    Sequential(SequentialExecutor),
}

impl Executor {
    /// Allocate the backend's resources; any failure here is fatal for the run
    pub fn new(backend: BackendKind, layout: KindLayout, seed: u64, threads: usize) -> Result<Self> {
        match backend {
            BackendKind::Parallel => Ok(Executor::Parallel(ParallelExecutor::new(layout, seed, threads)?)),
            BackendKind::Sequential => Ok(Executor::Sequential(SequentialExecutor::new())),
        }
    }

    pub fn backend(&self) -> BackendKind {
        match self {
            Executor::Parallel(_) => BackendKind::Parallel,
            Executor::Sequential(_) => BackendKind::Sequential,
        }
    }

    /// Run `task` once for every particle in `kinds`
    ///
    /// The task receives the kind, the index within that kind, the record
    /// and the particle's random source. Tasks must only touch their own
    /// record.
    pub fn run<F>(&mut self, kinds: [&mut [Particle]; 3], task: F)
    where
        F: Fn(ParticleKind, usize, &mut Particle, &mut dyn RandomSource) + Sync,
    {
        match self {
            Executor::Parallel(exec) => exec.run(kinds, &task),
            Executor::Sequential(exec) => exec.run(kinds, &task),
        }
    }
}
