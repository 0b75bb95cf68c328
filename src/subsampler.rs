//! Subpixel samplers
//!
//! Produces the per-pixel sample offsets used for anti-aliasing. The AA
//! variants draw from a low-discrepancy Halton sequence (bases 2 and 3),
//! centered on the pixel by shifting each coordinate by one half; the
//! trivial sampler returns the single centered sample.
//!
//! Quasirandom sampling reduces noise over n samples at a rate of O(n),
//! instead of the O(sqrt(n)) of pseudorandom sampling.
//!
//! Author: Moroya Sakamoto

use serde::{Deserialize, Serialize};

/// Radical-inverse of `index` in the given base.
fn halton(mut index: usize, base: usize) -> f32 {
    let mut f = 1.0 / base as f32;
    let mut result = 0.0;

    while index > 0 {
        result += f * (index % base) as f32;
        index /= base;
        f /= base as f32;
    }

    result
}

/// Subpixel sampling strategy selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subsampler {
    /// One centered sample per pixel; fast but aliased.
    None,
    /// 2x anti-aliasing.
    Aa2,
    /// 4x anti-aliasing.
    Aa4,
    /// 8x anti-aliasing.
    Aa8,
}

impl Subsampler {
    /// Number of samples per pixel.
    #[inline]
    pub fn order(&self) -> usize {
        match self {
            Subsampler::None => 1,
            Subsampler::Aa2 => 2,
            Subsampler::Aa4 => 4,
            Subsampler::Aa8 => 8,
        }
    }

    /// The sample offsets, in pixel units relative to the pixel center.
    pub fn offsets(&self) -> Vec<(f32, f32)> {
        match self {
            Subsampler::None => vec![(0.0, 0.0)],
            _ => (0..self.order())
                .map(|t| (halton(t, 2) - 0.5, halton(t, 3) - 0.5))
                .collect(),
        }
    }
}
