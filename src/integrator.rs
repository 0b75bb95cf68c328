//! Shading integrators
//!
//! Turns a traversal result into a pixel color. Four interchangeable
//! strategies behind one closed enum: flat material color, unnormalized
//! depth, direct lighting with a single shadow-tested point light, and a
//! pure occlusion mask.
//!
//! Author: Moroya Sakamoto

use crate::svo::VoxelOctree;
use crate::types::Ray;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Ambient light term for the direct lighting integrator.
const AMBIENT: f32 = 0.25;

/// Offset along the surface normal applied to shadow-ray origins, pushing
/// the hit point back outside the voxel it landed on.
const SHADOW_BIAS: f32 = 1e-5;

/// Flat color palette indexed by material id.
///
/// Out-of-range materials shade black.
const PALETTE: [Vec3; 7] = [
    Vec3::new(0.25, 0.75, 0.25),
    Vec3::new(0.55, 0.75, 0.55),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0.25, 0.25, 0.75),
    Vec3::new(0.75, 0.25, 0.25),
    Vec3::new(0.75, 0.75, 0.25),
    Vec3::new(0.25, 0.75, 0.75),
];

/// Flat RGB color of a material id.
///
/// TODO: replace the fixed palette with a material database once shading
/// needs more than a solid color per id.
#[inline]
pub fn decode_material(material: u16) -> Vec3 {
    PALETTE
        .get(material as usize)
        .copied()
        .unwrap_or(Vec3::ZERO)
}

#[inline]
fn saturate(color: Vec3) -> Vec3 {
    color.clamp(Vec3::ZERO, Vec3::ONE)
}

/// Shading strategy selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Integrator {
    /// Material color on hit, black on miss.
    Flat,
    /// Unnormalized depth map: `distance / 2` on hit, black on miss.
    Depth,
    /// Ambient plus shadow-tested diffuse from the scene's point light.
    Direct,
    /// White if anything occludes the ray, black otherwise.
    Occlusion,
}

impl Integrator {
    /// Compute the color for a camera ray.
    pub fn shade(&self, octree: &VoxelOctree, ray: &Ray) -> Vec3 {
        match self {
            Integrator::Flat => match octree.intersects(ray.origin, ray.direction) {
                Some(hit) => decode_material(hit.contact.material),
                None => Vec3::ZERO,
            },
            Integrator::Depth => match octree.intersects(ray.origin, ray.direction) {
                Some(hit) => Vec3::splat(hit.distance / 2.0),
                None => Vec3::ZERO,
            },
            Integrator::Direct => direct(octree, ray),
            Integrator::Occlusion => {
                if octree.occludes(ray.origin, ray.direction, f32::INFINITY) {
                    Vec3::ONE
                } else {
                    Vec3::ZERO
                }
            }
        }
    }
}

/// Direct lighting with a single point light and hard shadows.
fn direct(octree: &VoxelOctree, ray: &Ray) -> Vec3 {
    let Some(hit) = octree.intersects(ray.origin, ray.direction) else {
        return Vec3::ZERO;
    };

    let rgb = decode_material(hit.contact.material);
    let normal = octree.normal_of(&hit.contact);

    // hit point, pushed back outside the voxel a little
    let point = ray.at(hit.distance) + SHADOW_BIAS * normal;

    let to_light = octree.light() - point;
    let distance_to_light = to_light.length();
    let dir_to_light = to_light / distance_to_light;

    if octree.occludes(point, dir_to_light, distance_to_light) {
        return saturate(AMBIENT * rgb);
    }

    let n_dot_l = normal.dot(dir_to_light);
    let falloff = distance_to_light * distance_to_light * 8.5;
    let diffuse = n_dot_l.max(0.0) / falloff;

    saturate((AMBIENT + diffuse) * rgb)
}
