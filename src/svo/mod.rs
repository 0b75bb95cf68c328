//! Sparse Voxel Octree
//!
//! Index-addressed octree over a contiguous node arena. Interior nodes are
//! eight 32-bit child slots; a zero slot means the octant holds no geometry
//! and is never traversed, a set high bit marks the slot as a packed leaf
//! word, and anything else is the arena offset of another interior node.
//! Bounding boxes are not stored; they are rederived during traversal by
//! bisecting the world box along the child index path.
//!
//! # Usage
//!
//! ```rust,ignore
//! use alice_voxel::prelude::*;
//!
//! let terrain = TerrainSource::new(5);
//! let octree = VoxelOctree::build(&terrain, &BuildConfig::default())?;
//!
//! let hit = octree.intersects(Vec3::new(-0.15, -0.6, -0.2), Vec3::Z);
//! let shadowed = octree.occludes(Vec3::ZERO, Vec3::Y, 2.0);
//! ```
//!
//! Author: Moroya Sakamoto

pub mod build;
pub mod stack;
pub mod traverse;

pub use build::{BuildConfig, BuildError, VoxelSource};
pub use stack::{StackItem, TraversalStack, STACK_CAPACITY};

use crate::codec::NormalTable;
use crate::types::{Aabb, Contact};
use glam::Vec3;

/// Maximum supported octree depth.
///
/// Bounds the traversal stack capacity; see [`STACK_CAPACITY`].
pub const MAX_DEPTH: u32 = 12;

/// Default node arena capacity, in nodes.
pub const DEFAULT_NODE_CAPACITY: usize = 1 << 20;

/// Default point light position for the built scene.
const DEFAULT_LIGHT: Vec3 = Vec3::new(0.2, -0.35, 0.3);

/// An interior octree node: eight child slots.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Node {
    /// Child slots, one per octant index.
    pub child: [u32; 8],
}

/// A built sparse voxel octree, ready for traversal.
///
/// The arena is immutable after construction; traversal is read-only, so
/// one octree can be shared across any number of worker threads.
pub struct VoxelOctree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: u32,
    world: Aabb,
    depth: u32,
    light: Vec3,
    normals: NormalTable,
}

impl VoxelOctree {
    pub(crate) fn from_arena(nodes: Vec<Node>, root: u32, world: Aabb, depth: u32) -> Self {
        VoxelOctree {
            nodes,
            root,
            world,
            depth,
            light: DEFAULT_LIGHT,
            normals: NormalTable::new(),
        }
    }

    /// Build an octree from a voxel source.
    pub fn build<S: VoxelSource>(source: &S, config: &BuildConfig) -> Result<Self, BuildError> {
        build::build_octree(source, config)
    }

    /// World bounding box.
    #[inline]
    pub fn world(&self) -> Aabb {
        self.world
    }

    /// Tree depth the octree was built with.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of interior nodes in the arena.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Arena size in bytes.
    #[inline]
    pub fn memory_bytes(&self) -> usize {
        self.nodes.len() * std::mem::size_of::<Node>()
    }

    /// Position of the scene's single point light.
    #[inline]
    pub fn light(&self) -> Vec3 {
        self.light
    }

    /// Move the scene light.
    pub fn set_light(&mut self, position: Vec3) {
        self.light = position;
    }

    /// Decode a contact's packed normal to a world-space unit vector.
    ///
    /// Table lookup; agrees with [`crate::codec::decode_normal`] for every
    /// code.
    #[inline]
    pub fn normal_of(&self, contact: &Contact) -> Vec3 {
        self.normals.decode(contact.normal)
    }
}
