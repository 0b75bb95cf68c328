//! Leaf word and surface normal codecs
//!
//! Voxel leaves are packed into a single 32-bit word: the high bit marks
//! the word as a leaf, the next 15 bits carry the material id and the low
//! 16 bits a spherical-coordinate normal code. The normal codec is lossy
//! (8 bits per angle); decoding goes through a 65536-entry precomputed
//! table so the traversal hot path never touches trigonometry.
//!
//! Author: Moroya Sakamoto

use crate::types::spherical;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// High-bit marker distinguishing leaf words from interior node offsets.
pub const LEAF_MARKER: u32 = 0x8000_0000;

/// Number of distinct normal codes.
pub const NORMAL_CODES: usize = 1 << 16;

/// Pack a unit normal into a 16-bit spherical-coordinate code.
///
/// The azimuth occupies the high byte, the inclination the low byte.
#[inline]
pub fn encode_normal(normal: Vec3) -> u16 {
    let mut phi = normal.z.atan2(normal.x);
    if phi < 0.0 {
        phi += TAU;
    }
    let theta = normal.y.clamp(-1.0, 1.0).acos();

    let p = (phi / TAU * 255.0) as u16;
    let q = (theta / PI * 255.0) as u16;

    (p << 8) | q
}

/// Unpack a 16-bit normal code back to a unit vector.
///
/// Formula inverse of [`encode_normal`]; [`NormalTable`] gives the same
/// result by lookup.
#[inline]
pub fn decode_normal(code: u16) -> Vec3 {
    let p = (code >> 8) as f32;
    let q = (code & 0xFF) as f32;

    let mut phi = p / 255.0 * TAU;
    let theta = q / 255.0 * PI;

    if phi > PI {
        phi -= TAU;
    }

    spherical(phi, theta)
}

/// Precomputed decode table covering every 16-bit normal code.
///
/// 65536 entries, built once per scene; lookup replaces the two
/// trigonometric evaluations of [`decode_normal`] with one indexed load.
#[derive(Debug, Clone)]
pub struct NormalTable {
    table: Vec<Vec3>,
}

impl NormalTable {
    /// Build the full decode table.
    pub fn new() -> Self {
        let table = (0..NORMAL_CODES)
            .map(|code| decode_normal(code as u16))
            .collect();
        NormalTable { table }
    }

    /// Decode a normal code by table lookup.
    #[inline(always)]
    pub fn decode(&self, code: u16) -> Vec3 {
        self.table[code as usize]
    }
}

impl Default for NormalTable {
    fn default() -> Self {
        NormalTable::new()
    }
}

/// Pack a normal code and material id into a marked 32-bit leaf word.
#[inline]
pub fn encode_leaf(normal: u16, material: u16) -> u32 {
    ((((material & 0x7FFF) as u32) << 16) | normal as u32) | LEAF_MARKER
}

/// Unpack a leaf word into (normal code, material id).
///
/// Assumes the high-bit marker has already been cleared.
#[inline]
pub fn decode_leaf(leaf: u32) -> (u16, u16) {
    ((leaf & 0xFFFF) as u16, (leaf >> 16) as u16)
}
