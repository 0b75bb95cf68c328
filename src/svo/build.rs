//! SVO construction
//!
//! Recursive top-down build over a pair of oracles: a region-containment
//! predicate that prunes empty octants, and a leaf-data accessor queried
//! once per occupied cell at the bottom of the tree. Interior nodes are
//! bump-allocated from a pre-reserved arena; the root is the first
//! allocation, so offset 0 can double as the empty-child sentinel.
//!
//! Construction is a pure function of the oracles: the same source always
//! produces the same arena, which is what makes the flat layout safe to
//! memory-map or stream later.
//!
//! Author: Moroya Sakamoto

use crate::codec::encode_leaf;
use crate::svo::{Node, VoxelOctree, DEFAULT_NODE_CAPACITY, MAX_DEPTH};
use crate::types::{Aabb, Voxel};
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Oracles the builder queries while subdividing the world.
///
/// Regions are half-open integer boxes `[min, max)` on the voxel grid; a
/// tree of depth `d` spans `1 << d` cells per axis.
pub trait VoxelSource {
    /// Whether any cell in the region holds geometry.
    fn contains_voxels(&self, min: IVec3, max: IVec3) -> bool;

    /// Leaf data for a unit region.
    ///
    /// Only called for regions where [`contains_voxels`] returned true.
    ///
    /// [`contains_voxels`]: VoxelSource::contains_voxels
    fn voxel_data(&self, min: IVec3, max: IVec3) -> Voxel;
}

/// Construction errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// The node arena filled up before the tree was complete.
    #[error("node arena capacity exceeded ({capacity} nodes)")]
    CapacityExceeded {
        /// Configured arena capacity.
        capacity: usize,
    },

    /// The requested depth is zero or above [`MAX_DEPTH`].
    #[error("unsupported octree depth {depth} (supported range 1..={MAX_DEPTH})")]
    UnsupportedDepth {
        /// Requested depth.
        depth: u32,
    },
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Octree depth; the voxel grid spans `1 << depth` cells per axis.
    pub depth: u32,
    /// World-space bounds of the root node.
    pub world_min: Vec3,
    /// World-space bounds of the root node.
    pub world_max: Vec3,
    /// Node arena capacity; exhaustion is a [`BuildError::CapacityExceeded`].
    pub node_capacity: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            depth: 5,
            world_min: Vec3::splat(-1.0),
            world_max: Vec3::splat(1.0),
            node_capacity: DEFAULT_NODE_CAPACITY,
        }
    }
}

/// Child-octant offsets on the integer grid, same index convention as the
/// world-space table in [`crate::types`].
const GRID_OFFSETS: [IVec3; 8] = [
    IVec3::new(0, 0, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 1, 0),
    IVec3::new(0, 1, 1),
    IVec3::new(1, 0, 0),
    IVec3::new(1, 0, 1),
    IVec3::new(1, 1, 0),
    IVec3::new(1, 1, 1),
];

/// Bisect an integer region along each axis.
#[inline]
fn split_grid(min: IVec3, max: IVec3, index: usize) -> (IVec3, IVec3) {
    let extent = (max - min) / 2;
    let p = min + extent * GRID_OFFSETS[index];
    (p, p + extent)
}

/// Bump allocator over the pre-reserved node arena.
struct Arena {
    nodes: Vec<Node>,
    capacity: usize,
}

impl Arena {
    fn with_capacity(capacity: usize) -> Self {
        Arena {
            nodes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn alloc(&mut self) -> Result<u32, BuildError> {
        if self.nodes.len() == self.capacity {
            return Err(BuildError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let offset = self.nodes.len() as u32;
        self.nodes.push(Node::default());
        Ok(offset)
    }
}

/// Build an octree from a voxel source.
///
/// Returns the populated octree; the root node is always arena offset 0.
pub fn build_octree<S: VoxelSource>(
    source: &S,
    config: &BuildConfig,
) -> Result<VoxelOctree, BuildError> {
    if config.depth == 0 || config.depth > MAX_DEPTH {
        return Err(BuildError::UnsupportedDepth {
            depth: config.depth,
        });
    }

    let world = Aabb::new(config.world_min, config.world_max);
    let resolution = 1 << config.depth;

    let mut arena = Arena::with_capacity(config.node_capacity);
    let root = build_node(
        source,
        &mut arena,
        config.depth,
        world,
        IVec3::ZERO,
        IVec3::splat(resolution),
    )?;

    Ok(VoxelOctree::from_arena(
        arena.nodes,
        root,
        world,
        config.depth,
    ))
}

fn build_node<S: VoxelSource>(
    source: &S,
    arena: &mut Arena,
    depth: u32,
    cube: Aabb,
    min: IVec3,
    max: IVec3,
) -> Result<u32, BuildError> {
    if depth == 0 {
        let voxel = source.voxel_data(min, max);
        return Ok(encode_leaf(voxel.normal, voxel.material));
    }

    let offset = arena.alloc()?;

    for t in 0..8 {
        let child_cube = cube.octant(t);
        let (child_min, child_max) = split_grid(min, max, t);

        let child = if !source.contains_voxels(child_min, child_max) {
            0
        } else {
            build_node(source, arena, depth - 1, child_cube, child_min, child_max)?
        };

        arena.nodes[offset as usize].child[t] = child;
    }

    Ok(offset)
}
