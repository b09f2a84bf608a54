//! Read side of the particle buffer
//!
//! Drawing lives outside this crate. This module describes what a drawing
//! backend gets: the raw record bytes, the vertex layout of a record and
//! the two point batches to issue.

use std::mem::{offset_of, size_of};
use std::ops::Range;

use crate::error::Result;
use crate::sim::{KindLayout, Particle, ParticleBuffer, ParticleKind};
use crate::tuning::Tuning;

/// Position and color; velocity and attributes ride along in the stride
const RECORD_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        offset: offset_of!(Particle, pos) as wgpu::BufferAddress,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x2,
    },
    wgpu::VertexAttribute {
        offset: offset_of!(Particle, color) as wgpu::BufferAddress,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x3,
    },
];

impl Particle {
    /// Vertex buffer layout of one record
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Particle>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &RECORD_ATTRIBUTES,
        }
    }
}

/// One point-list draw call
#[derive(Debug, Clone, PartialEq)]
pub struct PointBatch {
    /// Record range within the buffer
    pub records: Range<usize>,
    /// Point size in clip-space units
    pub point_size: f32,
}

impl PointBatch {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Seekers and Cruisers share the base point size; Wanderers draw bigger
pub fn point_batches(layout: &KindLayout, tuning: &Tuning) -> [PointBatch; 2] {
    let cruisers = layout.range(ParticleKind::Cruiser);
    [
        PointBatch {
            records: layout.range(ParticleKind::Seeker).start..cruisers.end,
            point_size: tuning.particle_size,
        },
        PointBatch {
            records: layout.range(ParticleKind::Wanderer),
            point_size: tuning.wanderer_size(),
        },
    ]
}

/// Drawing collaborator
pub trait Renderer {
    /// Draw one frame from the record bytes. Must not keep `records` past
    /// the call.
    fn draw(&mut self, records: &[u8], batches: &[PointBatch]) -> Result<()>;
}

/// Open a read window, let `renderer` draw, close the window
pub fn present(buffer: &ParticleBuffer, tuning: &Tuning, renderer: &mut dyn Renderer) -> Result<()> {
    let batches = point_batches(&buffer.layout(), tuning);
    let window = buffer.read()?;
    let drawn = renderer.draw(window.as_bytes(), &batches);
    window.release();
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FLOATS_PER_PARTICLE, RECORD_BYTES};
    use crate::error::SimError;

    #[derive(Default)]
    struct Capture {
        frames: usize,
        bytes: usize,
        batches: Vec<PointBatch>,
    }

    impl Renderer for Capture {
        fn draw(&mut self, records: &[u8], batches: &[PointBatch]) -> Result<()> {
            self.frames += 1;
            self.bytes = records.len();
            self.batches = batches.to_vec();
            Ok(())
        }
    }

    #[test]
    fn test_vertex_layout_matches_record() {
        let layout = Particle::vertex_layout();
        assert_eq!(layout.array_stride, RECORD_BYTES as u64);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(RECORD_BYTES, FLOATS_PER_PARTICLE * 4);
    }

    #[test]
    fn test_batches_cover_buffer() {
        let tuning = Tuning::default();
        let [small, big] = point_batches(&KindLayout::new(3, 4, 5), &tuning);
        assert_eq!(small.records, 0..7);
        assert_eq!(big.records, 7..12);
        assert_eq!(small.point_size, tuning.particle_size);
        assert!(big.point_size > small.point_size);

        let [small, big] = point_batches(&KindLayout::new(0, 0, 2), &tuning);
        assert!(small.is_empty());
        assert_eq!(big.records, 0..2);
    }

    #[test]
    fn test_present_hands_over_bytes() {
        let buffer = ParticleBuffer::new(KindLayout::new(2, 2, 1));
        let mut capture = Capture::default();
        present(&buffer, &Tuning::default(), &mut capture).unwrap();
        assert_eq!(capture.frames, 1);
        assert_eq!(capture.bytes, 5 * RECORD_BYTES);
        assert_eq!(capture.batches.len(), 2);

        // Window is closed again
        assert!(buffer.acquire().is_ok());
    }

    #[test]
    fn test_present_refuses_while_simulating() {
        let buffer = ParticleBuffer::new(KindLayout::new(1, 0, 0));
        let _sim = buffer.acquire().unwrap();
        let err = present(&buffer, &Tuning::default(), &mut Capture::default()).unwrap_err();
        assert!(matches!(err, SimError::BufferBusy { holder: "simulation" }));
    }
}
