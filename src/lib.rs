//! # ALICE-Voxel
//!
//! **A.L.I.C.E. Voxel - Adaptive Lightweight Implicit Compression Engine, voxel edition**
//!
//! A real-time sparse voxel octree renderer: procedurally generated
//! volumetric data is packed into a flat, index-addressed octree arena,
//! then traversed by iterative stack-based ray casting to compute
//! visibility, shading and occlusion.
//!
//! ## Features
//!
//! - **SVO builder**: recursive subdivision over pluggable voxel oracles,
//!   bump-allocated into one contiguous arena
//! - **Traversal**: iterative nearest-first descent with early rejection,
//!   sorted candidate stack and any-hit occlusion queries
//! - **Codec**: 16-bit spherical normal codes and packed 32-bit leaf words
//! - **Shading**: flat, depth, direct lighting and occlusion integrators
//! - **Cameras**: perspective and fisheye projections over an observer pose
//! - **Output**: parallel frame rendering and PPM export
//!
//! ## Example
//!
//! ```rust
//! use alice_voxel::prelude::*;
//!
//! // Generate the procedural terrain and build its octree
//! let terrain = TerrainSource::new(4);
//! let config = BuildConfig { depth: 4, ..BuildConfig::default() };
//! let octree = VoxelOctree::build(&terrain, &config).expect("build");
//!
//! // Cast a primary ray down into the scene
//! let hit = octree.intersects(Vec3::new(0.0, 0.5, 0.0), -Vec3::Y);
//! assert!(hit.is_some());
//! ```
//!
//! ## Author
//!
//! Moroya Sakamoto

#![warn(missing_docs)]

pub mod types;
pub mod codec;
pub mod svo;
pub mod terrain;
pub mod observer;
pub mod projection;
pub mod integrator;
pub mod subsampler;
pub mod render;
pub mod io;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::codec::{
        decode_leaf, decode_normal, encode_leaf, encode_normal, NormalTable, LEAF_MARKER,
    };
    pub use crate::integrator::{decode_material, Integrator};
    pub use crate::io::{save_ppm, IoError};
    pub use crate::observer::Observer;
    pub use crate::projection::Projection;
    pub use crate::render::{render, Frame};
    pub use crate::subsampler::Subsampler;
    pub use crate::svo::{
        BuildConfig, BuildError, Node, VoxelOctree, VoxelSource, MAX_DEPTH, STACK_CAPACITY,
    };
    pub use crate::terrain::TerrainSource;
    pub use crate::types::{
        basis, basis_rolled, spherical, Aabb, Contact, Ray, RayHit, Voxel, EMPTY_MATERIAL,
    };
    pub use glam::{IVec3, Mat3, Vec3};
}

// Re-exports for convenience
pub use render::{render, Frame};
pub use svo::{VoxelOctree, VoxelSource};
pub use types::{Contact, Ray, RayHit, Voxel};
