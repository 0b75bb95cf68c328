//! Common test helpers for ALICE-Voxel integration tests
//!
//! Author: Moroya Sakamoto

#![allow(dead_code)]

use alice_voxel::prelude::*;

// ============================================================================
// Standard test scenes
// ============================================================================

/// Depth-1 world over [-1,1]^3 with an explicit list of solid octants.
///
/// Every solid octant carries the same voxel: material 0, normal +y.
pub struct OctantWorld {
    cells: Vec<IVec3>,
}

impl OctantWorld {
    pub fn new(cells: &[IVec3]) -> Self {
        OctantWorld {
            cells: cells.to_vec(),
        }
    }
}

impl VoxelSource for OctantWorld {
    fn contains_voxels(&self, min: IVec3, max: IVec3) -> bool {
        self.cells
            .iter()
            .any(|c| c.cmpge(min).all() && c.cmplt(max).all())
    }

    fn voxel_data(&self, _min: IVec3, _max: IVec3) -> Voxel {
        Voxel {
            normal: encode_normal(Vec3::Y),
            material: 0,
        }
    }
}

/// Build a depth-1 octree with the listed solid octants.
pub fn octant_octree(cells: &[IVec3]) -> VoxelOctree {
    let config = BuildConfig {
        depth: 1,
        ..BuildConfig::default()
    };
    VoxelOctree::build(&OctantWorld::new(cells), &config).expect("octant octree should build")
}

/// Build the procedural terrain octree at the given depth.
pub fn terrain_octree(depth: u32) -> (TerrainSource, VoxelOctree) {
    let terrain = TerrainSource::new(depth);
    let config = BuildConfig {
        depth,
        ..BuildConfig::default()
    };
    let octree = VoxelOctree::build(&terrain, &config).expect("terrain octree should build");
    (terrain, octree)
}

// ============================================================================
// Brute-force reference intersection
// ============================================================================

/// Bounding boxes of every solid unit cell of a voxel source.
pub fn solid_cell_boxes<S: VoxelSource>(source: &S, depth: u32, world: Aabb) -> Vec<Aabb> {
    let resolution = 1 << depth;
    let cell_size = (world.max - world.min) / resolution as f32;

    let mut boxes = Vec::new();
    for x in 0..resolution {
        for y in 0..resolution {
            for z in 0..resolution {
                let cell = IVec3::new(x, y, z);
                if source.contains_voxels(cell, cell + IVec3::ONE) {
                    let min = world.min + cell.as_vec3() * cell_size;
                    boxes.push(Aabb::new(min, min + cell_size));
                }
            }
        }
    }
    boxes
}

/// Nearest entry distance of a ray over a set of boxes, ignoring boxes the
/// ray misses. Directions must have no zero components.
pub fn brute_force_nearest(boxes: &[Aabb], origin: Vec3, direction: Vec3) -> Option<f32> {
    let invdir = direction.recip();
    boxes
        .iter()
        .filter_map(|cube| cube.intersect(origin, invdir))
        .fold(None, |best, near| {
            Some(best.map_or(near, |b: f32| b.min(near)))
        })
}
