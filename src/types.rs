//! Core types for ALICE-Voxel
//!
//! Defines the voxel sample, ray, contact and bounding-box types shared by
//! the octree builder, the traversal kernel and the shading layer, plus the
//! small amount of math that `glam` does not provide (spherical directions
//! and view-basis construction).
//!
//! Author: Moroya Sakamoto

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// Material id marking an empty voxel cell.
///
/// Cells carrying this id are skipped by the builder's containment scan and
/// never reach the traversal arena.
pub const EMPTY_MATERIAL: u16 = 0xFFFF;

/// Direction on the unit sphere from azimuth `phi` and inclination `theta`.
///
/// Uses the y-up convention: `theta = 0` points along +Y.
#[inline]
pub fn spherical(phi: f32, theta: f32) -> Vec3 {
    Vec3::new(
        theta.sin() * phi.cos(),
        theta.cos(),
        theta.sin() * phi.sin(),
    )
}

/// Upright orthonormal basis from a forward direction.
///
/// Columns are (right, up, forward). The world up vector is (0, 1, 0), so
/// the forward direction must not be vertical.
#[inline]
pub fn basis(forward: Vec3) -> Mat3 {
    basis_with_up(forward, Vec3::Y)
}

/// Orthonormal basis from a forward direction and a roll angle.
///
/// The up reference is `(-sin roll, cos roll, 0)`, which reduces to the
/// upright basis at `roll = 0`.
#[inline]
pub fn basis_rolled(forward: Vec3, roll: f32) -> Mat3 {
    basis_with_up(forward, Vec3::new(-roll.sin(), roll.cos(), 0.0))
}

#[inline]
fn basis_with_up(forward: Vec3, up: Vec3) -> Mat3 {
    let z = forward.normalize();
    let x = up.cross(z).normalize();
    let y = z.cross(x).normalize();
    Mat3::from_cols(x, y, z)
}

/// One elemental volume sample: a material id and a packed surface normal.
///
/// Immutable once generated; produced during world generation and consumed
/// by the builder's leaf oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voxel {
    /// Packed spherical normal code (see [`crate::codec`]).
    pub normal: u16,
    /// Material id, [`EMPTY_MATERIAL`] for empty cells.
    pub material: u16,
}

impl Voxel {
    /// An empty cell.
    pub const EMPTY: Voxel = Voxel {
        normal: 0,
        material: EMPTY_MATERIAL,
    };

    /// Whether the cell holds geometry.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.material != EMPTY_MATERIAL
    }
}

/// Result record of a ray/voxel intersection.
///
/// Carries the packed normal and the material id exactly as stored in the
/// leaf word; decoding to a world-space normal or an RGB color happens in
/// the shading layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    /// Packed spherical normal code.
    pub normal: u16,
    /// Material id.
    pub material: u16,
}

/// A successful traversal result.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Distance along the ray to the voxel's bounding-box entry point.
    pub distance: f32,
    /// Surface data at the hit.
    pub contact: Contact,
}

/// A ray with origin and normalized direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ray {
    /// Ray origin point.
    pub origin: Vec3,
    /// Ray direction (normalized).
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray; the direction is normalized.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point along the ray at distance `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Child-octant origin offsets, in units of the child extent.
///
/// The octant index is a 3-bit code: bit 2 selects the upper x half,
/// bit 1 the upper y half, bit 0 the upper z half.
pub(crate) const OCTANT_OFFSETS: [Vec3; 8] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Axis-aligned bounding box.
///
/// Node boxes are never stored in the octree arena; traversal derives them
/// on the fly by bisecting the world box along the child index path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB.
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Size along each axis.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The child box for an octant index in 0..8.
    ///
    /// The eight children exactly partition the parent: each axis is split
    /// at the midpoint, with the index bits selecting the half (bit 2 for
    /// x, bit 1 for y, bit 0 for z).
    #[inline]
    pub fn octant(&self, index: usize) -> Aabb {
        let extent = (self.max - self.min) * 0.5;
        let p = self.min + extent * OCTANT_OFFSETS[index];
        Aabb {
            min: p,
            max: p + extent,
        }
    }

    /// Slab test against a ray given as origin and reciprocal direction.
    ///
    /// Returns the entry distance on a hit. Grazing rays (`near == far`)
    /// miss, and boxes entirely behind the origin are rejected; a box
    /// containing the origin reports its (negative) entry distance.
    #[inline(always)]
    pub fn intersect(&self, origin: Vec3, invdir: Vec3) -> Option<f32> {
        let bot = (self.min - origin) * invdir;
        let top = (self.max - origin) * invdir;

        let tmin = bot.min(top);
        let tmax = bot.max(top);

        let near = tmin.max_element();
        let far = tmax.min_element();

        (near < far && far > 0.0).then_some(near)
    }
}
