//! SVO ray traversal
//!
//! The hot path of the renderer: an iterative, stack-based descent that
//! visits pending candidates nearest-first. Each popped interior node slab-
//! tests its live children, pushes the survivors and sorts the pushed block
//! so the closest child is popped next; candidates that can no longer beat
//! the best recorded hit are rejected on pop. Occlusion queries share the
//! same loop and return at the first recorded hit.
//!
//! Traversal is read-only: it touches only the immutable arena and a local
//! stack, so rays parallelize freely across threads.
//!
//! Author: Moroya Sakamoto

use crate::codec::{decode_leaf, LEAF_MARKER};
use crate::svo::{TraversalStack, VoxelOctree};
use crate::types::{Contact, Ray, RayHit};
use glam::Vec3;
use rayon::prelude::*;

/// Smallest direction component magnitude fed to the reciprocal.
///
/// Zero components are substituted with this value (keeping their sign) so
/// the slab test sees huge finite distances instead of NaN.
const DIR_EPSILON: f32 = 1e-12;

/// Component-wise reciprocal with degenerate components regularized.
#[inline(always)]
fn safe_invdir(direction: Vec3) -> Vec3 {
    #[inline(always)]
    fn regularize(c: f32) -> f32 {
        if c.abs() < DIR_EPSILON {
            DIR_EPSILON.copysign(c)
        } else {
            c
        }
    }

    Vec3::new(
        1.0 / regularize(direction.x),
        1.0 / regularize(direction.y),
        1.0 / regularize(direction.z),
    )
}

impl VoxelOctree {
    /// Find the nearest voxel hit along an unbounded ray.
    #[inline]
    pub fn intersects(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        self.traverse(origin, direction, f32::INFINITY, false)
    }

    /// Whether any voxel occludes the ray within `range`.
    ///
    /// Any-hit semantics: returns as soon as one hit is recorded, without
    /// scanning the remaining candidates.
    #[inline]
    pub fn occludes(&self, origin: Vec3, direction: Vec3, range: f32) -> bool {
        self.traverse(origin, direction, range, true).is_some()
    }

    /// Cast a batch of rays in parallel.
    pub fn cast_batch(&self, rays: &[Ray], range: f32) -> Vec<Option<RayHit>> {
        rays.par_iter()
            .map(|ray| self.traverse(ray.origin, ray.direction, range, false))
            .collect()
    }

    /// The traversal loop shared by nearest-hit and occlusion queries.
    ///
    /// `nearest` starts at the caller's range, so the bounded query needs
    /// no extra branching: candidates at or beyond the range never survive
    /// the rejection test, and a returned hit is always within range.
    fn traverse(
        &self,
        origin: Vec3,
        direction: Vec3,
        range: f32,
        occlusion: bool,
    ) -> Option<RayHit> {
        let invdir = safe_invdir(direction);
        let mut stack = TraversalStack::new(self.root, self.world());

        let mut nearest = range;
        let mut contact: Option<Contact> = None;

        while !stack.is_empty() {
            let mut s = stack.pop();
            if s.hit >= nearest {
                continue;
            }

            if s.offset & LEAF_MARKER != 0 {
                s.offset &= !LEAF_MARKER;

                // Leaf lookup. The recorded nearest distance (and with it
                // the contact) is only ever overwritten by a strictly
                // closer hit; the rejection test above guarantees that for
                // this candidate.
                let (normal, material) = decode_leaf(s.offset);
                nearest = s.hit;
                contact = Some(Contact { normal, material });

                if occlusion {
                    return Some(RayHit {
                        distance: nearest,
                        contact: Contact { normal, material },
                    });
                }
            } else {
                let last = stack.position();
                let current = self.nodes[s.offset as usize];

                for t in 0..8 {
                    let child = current.child[t];
                    if child == 0 {
                        continue;
                    }

                    let mut item = s.subdivide(child, t);
                    if let Some(near) = item.cube.intersect(origin, invdir) {
                        if near < nearest {
                            item.hit = near;
                            stack.push(item);
                        }
                    }
                }

                // reorder so the closest survivor is popped first
                stack.sort_pushed(last);
            }
        }

        contact.map(|contact| RayHit {
            distance: nearest,
            contact,
        })
    }
}
