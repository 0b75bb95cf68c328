//! Frame buffer and render loop
//!
//! The frame owns a flat pixel buffer of linear RGB colors; clearing it is
//! how the orchestration layer invalidates accumulated work after a camera
//! move. Rendering walks every pixel, projects one camera ray per subpixel
//! sample and averages the integrated colors, with rows dispatched across
//! the rayon worker pool. Rays only ever read the octree, so the scene is
//! shared by all workers without locking.
//!
//! Author: Moroya Sakamoto

use crate::integrator::Integrator;
use crate::observer::Observer;
use crate::projection::Projection;
use crate::subsampler::Subsampler;
use crate::svo::VoxelOctree;
use glam::Vec3;
use rayon::prelude::*;

/// A 2D buffer of linear RGB color samples.
#[derive(Debug, Clone)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<Vec3>,
}

impl Frame {
    /// Create a black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Frame {
            width,
            height,
            data: vec![Vec3::ZERO; width * height],
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every pixel to black.
    pub fn clear(&mut self) {
        self.data.fill(Vec3::ZERO);
    }

    /// Color of the pixel at `(x, y)`; `y = 0` is the top row.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Vec3 {
        self.data[y * self.width + x]
    }

    /// The pixel buffer in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Vec3] {
        &self.data
    }
}

/// Render one frame of the scene into the buffer.
///
/// Each pixel averages one integrated camera ray per subsampler offset;
/// normalized screen coordinates run over `[-1, 1]` on both axes, with the
/// aspect ratio folded into the projection.
pub fn render(
    octree: &VoxelOctree,
    observer: &Observer,
    projection: Projection,
    integrator: Integrator,
    subsampler: Subsampler,
    frame: &mut Frame,
) {
    let width = frame.width;
    let height = frame.height;
    let ratio = width as f32 / height as f32;

    let offsets = subsampler.offsets();
    let weight = 1.0 / offsets.len() as f32;

    frame
        .data
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let mut color = Vec3::ZERO;

                for &(dx, dy) in &offsets {
                    let u = ((x as f32 + 0.5 + dx) / width as f32 - 0.5) * 2.0;
                    let v = ((y as f32 + 0.5 + dy) / height as f32 - 0.5) * 2.0;

                    let ray = projection.project(observer, u, v, ratio);
                    color += integrator.shade(octree, &ray);
                }

                *pixel = color * weight;
            }
        });
}
