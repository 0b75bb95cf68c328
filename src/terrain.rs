//! Procedural terrain voxel source
//!
//! A sinusoidal heightfield sampled onto a cubic voxel grid, with analytic
//! surface normals and an interior-culling pass that hollows out cells
//! fully surrounded by solid neighbors. The builder only ever sees the
//! crust, which keeps the tree sparse.
//!
//! Author: Moroya Sakamoto

use crate::codec::encode_normal;
use crate::svo::VoxelSource;
use crate::types::Voxel;
use glam::{IVec3, Vec3};

/// The heightfield world as a [`VoxelSource`].
///
/// Grid resolution is `1 << depth`, matching the octree the source is
/// meant to feed. Cell coordinates map to world space over `[-1, 1]^3`.
pub struct TerrainSource {
    resolution: i32,
    cells: Vec<Voxel>,
}

impl TerrainSource {
    /// Generate the terrain grid for an octree of the given depth.
    pub fn new(depth: u32) -> Self {
        let resolution = 1 << depth;
        let mut source = TerrainSource {
            resolution,
            cells: vec![Voxel::EMPTY; (resolution * resolution * resolution) as usize],
        };
        source.generate();
        source.cull_interior();
        source
    }

    /// Grid resolution per axis.
    #[inline]
    pub fn resolution(&self) -> i32 {
        self.resolution
    }

    /// Terrain height at a world-space (x, z) column.
    pub fn heightmap(x: f32, z: f32) -> f32 {
        -0.7 + 0.03 * ((15.0 * z).sin() + (10.0 * x + 1.0).sin())
    }

    /// Analytic surface normal of the heightfield.
    pub fn surface_normal(x: f32, z: f32) -> Vec3 {
        let dx = 0.2 * (10.0 * x + 1.0).cos();
        let dz = 0.3 * (15.0 * z).cos();
        Vec3::new(dx, 1.0, dz).normalize()
    }

    #[inline]
    fn index(&self, cell: IVec3) -> usize {
        let r = self.resolution;
        ((cell.x * r + cell.y) * r + cell.z) as usize
    }

    #[inline]
    fn cell(&self, cell: IVec3) -> Voxel {
        self.cells[self.index(cell)]
    }

    /// World-space position of a cell's low corner.
    #[inline]
    fn world_pos(&self, cell: IVec3) -> Vec3 {
        (cell.as_vec3() / self.resolution as f32 - 0.5) * 2.0
    }

    fn generate(&mut self) {
        for x in 0..self.resolution {
            for y in 0..self.resolution {
                for z in 0..self.resolution {
                    let cell = IVec3::new(x, y, z);
                    let p = self.world_pos(cell);

                    if p.y <= Self::heightmap(p.x, p.z) {
                        let index = self.index(cell);
                        self.cells[index] = Voxel {
                            normal: encode_normal(Self::surface_normal(p.x, p.z)),
                            material: 0,
                        };
                    }
                }
            }
        }
    }

    /// Hollow out cells whose six face neighbors are all solid; such cells
    /// can never be the first intersection of any ray.
    fn cull_interior(&mut self) {
        const NEIGHBORS: [IVec3; 6] = [
            IVec3::new(-1, 0, 0),
            IVec3::new(1, 0, 0),
            IVec3::new(0, -1, 0),
            IVec3::new(0, 1, 0),
            IVec3::new(0, 0, -1),
            IVec3::new(0, 0, 1),
        ];

        let mut buried = Vec::new();
        for x in 1..self.resolution - 1 {
            for y in 1..self.resolution - 1 {
                for z in 1..self.resolution - 1 {
                    let cell = IVec3::new(x, y, z);
                    if !self.cell(cell).is_solid() {
                        continue;
                    }
                    if NEIGHBORS.iter().all(|&n| self.cell(cell + n).is_solid()) {
                        buried.push(self.index(cell));
                    }
                }
            }
        }

        for index in buried {
            self.cells[index] = Voxel::EMPTY;
        }
    }
}

impl VoxelSource for TerrainSource {
    fn contains_voxels(&self, min: IVec3, max: IVec3) -> bool {
        for x in min.x..max.x {
            for y in min.y..max.y {
                for z in min.z..max.z {
                    if self.cell(IVec3::new(x, y, z)).is_solid() {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn voxel_data(&self, min: IVec3, _max: IVec3) -> Voxel {
        self.cell(min)
    }
}
