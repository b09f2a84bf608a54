//! Shared particle buffer
//!
//! The buffer is handed back and forth between the simulation (write
//! window) and the drawing collaborator (read window). A window is a guard:
//! opening it fails instead of waiting when the other side still holds it,
//! and dropping the guard releases it.

use std::ops::{Deref, DerefMut};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};

use super::particle::{KindLayout, Particle, ParticleKind};
use crate::error::{Result, SimError};

/// Kind-grouped array of particle records with a fixed length
#[derive(Debug)]
pub struct ParticleBuffer {
    layout: KindLayout,
    records: RwLock<Vec<Particle>>,
}

impl ParticleBuffer {
    /// Zeroed buffer sized for `layout`
    pub fn new(layout: KindLayout) -> Self {
        Self {
            layout,
            records: RwLock::new(vec![Particle::default(); layout.total()]),
        }
    }

    pub fn layout(&self) -> KindLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.layout.total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open the exclusive write window
    pub fn acquire(&self) -> Result<WriteWindow<'_>> {
        match self.records.try_write() {
            Ok(guard) => Ok(WriteWindow {
                layout: self.layout,
                guard,
            }),
            Err(TryLockError::WouldBlock) => Err(SimError::BufferBusy { holder: "renderer" }),
            Err(TryLockError::Poisoned(_)) => Err(SimError::BufferPoisoned),
        }
    }

    /// Open a read window for drawing
    pub fn read(&self) -> Result<ReadWindow<'_>> {
        match self.records.try_read() {
            Ok(guard) => Ok(ReadWindow {
                layout: self.layout,
                guard,
            }),
            Err(TryLockError::WouldBlock) => Err(SimError::BufferBusy {
                holder: "simulation",
            }),
            Err(TryLockError::Poisoned(_)) => Err(SimError::BufferPoisoned),
        }
    }
}

/// Exclusive write access held by the simulation
pub struct WriteWindow<'a> {
    layout: KindLayout,
    guard: RwLockWriteGuard<'a, Vec<Particle>>,
}

impl WriteWindow<'_> {
    /// The three disjoint kind slices, Seeker first
    pub fn kinds_mut(&mut self) -> [&mut [Particle]; 3] {
        self.layout.split_mut(self.guard.as_mut_slice())
    }

    /// Hand the buffer back
    pub fn release(self) {}
}

impl Deref for WriteWindow<'_> {
    type Target = [Particle];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl DerefMut for WriteWindow<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

/// Shared read access held by the renderer
pub struct ReadWindow<'a> {
    layout: KindLayout,
    guard: RwLockReadGuard<'a, Vec<Particle>>,
}

impl ReadWindow<'_> {
    pub fn kind(&self, kind: ParticleKind) -> &[Particle] {
        &self.guard[self.layout.range(kind)]
    }

    /// Raw bytes in wire layout, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.guard)
    }

    pub fn release(self) {}
}

impl Deref for ReadWindow<'_> {
    type Target = [Particle];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_window_excludes_reader() {
        let buffer = ParticleBuffer::new(KindLayout::new(2, 1, 1));
        let window = buffer.acquire().unwrap();
        assert!(matches!(
            buffer.read(),
            Err(SimError::BufferBusy {
                holder: "simulation"
            })
        ));
        window.release();
        assert!(buffer.read().is_ok());
    }

    #[test]
    fn test_read_window_excludes_writer() {
        let buffer = ParticleBuffer::new(KindLayout::new(1, 1, 1));
        let view = buffer.read().unwrap();
        let err = buffer.acquire().err().unwrap();
        assert!(err.is_buffer_contention());
        drop(view);
        assert!(buffer.acquire().is_ok());
    }

    #[test]
    fn test_writes_visible_after_release() {
        let buffer = ParticleBuffer::new(KindLayout::new(1, 1, 1));
        {
            let mut window = buffer.acquire().unwrap();
            let [_, cruisers, _] = window.kinds_mut();
            cruisers[0].pos = [0.5, -0.5];
        }
        let view = buffer.read().unwrap();
        assert_eq!(view.kind(ParticleKind::Cruiser)[0].pos, [0.5, -0.5]);
        assert_eq!(view.as_bytes().len(), 3 * 36);
    }
}
