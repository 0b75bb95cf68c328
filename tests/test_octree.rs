//! Integration tests: Octree construction and traversal
//!
//! Verifies end-to-end build/traverse scenarios, occlusion semantics and
//! traversal agreement with a brute-force reference over every solid cell.
//!
//! Author: Moroya Sakamoto

mod common;

use alice_voxel::prelude::*;
use common::*;

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn single_octant_hit_from_inside() {
    // only octant 0 ([-1,0]^3) is populated; the ray starts inside it
    let octree = octant_octree(&[IVec3::ZERO]);

    let origin = Vec3::new(-0.5, -0.5, -0.5);
    let hit = octree
        .intersects(origin, Vec3::X)
        .expect("ray inside the solid octant should hit it");

    // entry lies at the octant's near face, behind the origin
    assert!(
        (hit.distance - (-0.5)).abs() < 1e-4,
        "distance {} should match the x = -1 face",
        hit.distance
    );
    assert_eq!(hit.contact.material, 0);
}

#[test]
fn ray_away_from_geometry_misses() {
    let octree = octant_octree(&[IVec3::ZERO]);

    let away = Vec3::new(1.0, 1.0, 1.0).normalize();
    assert!(
        octree.intersects(Vec3::new(0.9, 0.9, 0.9), away).is_none(),
        "ray pointed away from all geometry must miss"
    );
}

#[test]
fn occlusion_follows_the_light_position() {
    // octant 4 spans [0,1] x [-1,0] x [-1,0]
    let octree = octant_octree(&[IVec3::new(1, 0, 0)]);
    let point = Vec3::new(-0.5, -0.5, -0.5);

    // light behind the solid octant: blocked
    let blocked = Vec3::new(1.5, -0.5, -0.5);
    let dir = (blocked - point).normalize();
    assert!(octree.occludes(point, dir, (blocked - point).length()));

    // light overhead with nothing in the way: clear
    let clear = Vec3::new(-0.5, 1.5, -0.5);
    let dir = (clear - point).normalize();
    assert!(!octree.occludes(point, dir, (clear - point).length()));
}

#[test]
fn occlusion_range_excludes_distant_geometry() {
    let octree = octant_octree(&[IVec3::ZERO]);
    let origin = Vec3::new(-0.5, -0.5, -2.0);

    // geometry enters at distance 1 along +z
    assert!(octree.occludes(origin, Vec3::Z, 1.5));
    assert!(!octree.occludes(origin, Vec3::Z, 0.5));
}

// ============================================================================
// Leaf payload round trip through a built tree
// ============================================================================

#[test]
fn contact_carries_the_source_voxel() {
    let octree = octant_octree(&[IVec3::ZERO]);

    let hit = octree
        .intersects(Vec3::new(-0.5, 0.5, -0.5), -Vec3::Y)
        .expect("downward ray should hit the octant");

    assert_eq!(hit.contact.material, 0);
    assert_eq!(hit.contact.normal, encode_normal(Vec3::Y));

    let normal = octree.normal_of(&hit.contact);
    assert!(
        normal.dot(Vec3::Y) > 0.999,
        "decoded normal {:?} should point up",
        normal
    );
}

// ============================================================================
// Traversal vs brute force
// ============================================================================

#[test]
fn terrain_traversal_matches_brute_force() {
    let depth = 4;
    let (terrain, octree) = terrain_octree(depth);
    let boxes = solid_cell_boxes(&terrain, depth, octree.world());
    assert!(!boxes.is_empty(), "terrain should contain solid cells");

    // a fan of downward rays from above the terrain
    let mut checked_hits = 0;
    for i in 0..7 {
        for j in 0..7 {
            let origin = Vec3::new(-0.9 + 0.3 * i as f32, 0.8, -0.9 + 0.3 * j as f32);
            for direction in [
                Vec3::new(0.1, -1.0, 0.2).normalize(),
                Vec3::new(-0.4, -1.0, -0.1).normalize(),
                Vec3::new(0.7, -0.2, 0.3).normalize(),
            ] {
                let expected = brute_force_nearest(&boxes, origin, direction);
                let actual = octree.intersects(origin, direction);

                match (expected, actual) {
                    (None, None) => {}
                    (Some(want), Some(hit)) => {
                        assert!(
                            (hit.distance - want).abs() < 1e-4,
                            "origin {:?} dir {:?}: traversal {} vs brute force {}",
                            origin,
                            direction,
                            hit.distance,
                            want
                        );
                        checked_hits += 1;
                    }
                    (want, got) => panic!(
                        "origin {:?} dir {:?}: traversal {:?} vs brute force {:?}",
                        origin,
                        direction,
                        got.map(|h| h.distance),
                        want
                    ),
                }
            }
        }
    }
    assert!(checked_hits > 20, "only {} rays hit", checked_hits);
}

#[test]
fn occlusion_agrees_with_nearest_hit() {
    let depth = 3;
    let (_, octree) = terrain_octree(depth);

    for i in 0..5 {
        let origin = Vec3::new(-0.8 + 0.4 * i as f32, 0.5, 0.3);
        let direction = Vec3::new(0.2, -1.0, 0.1).normalize();

        let nearest = octree.intersects(origin, direction);
        for range in [0.25, 1.0, 4.0] {
            let expected = nearest.map_or(false, |hit| hit.distance < range);
            assert_eq!(
                octree.occludes(origin, direction, range),
                expected,
                "origin {:?} range {}",
                origin,
                range
            );
        }
    }
}

// ============================================================================
// Build errors and determinism
// ============================================================================

#[test]
fn terrain_build_is_deterministic() {
    let (_, a) = terrain_octree(3);
    let (_, b) = terrain_octree(3);

    assert_eq!(a.node_count(), b.node_count());
    assert_eq!(a.memory_bytes(), b.memory_bytes());
}

#[test]
fn tight_arena_reports_capacity_error() {
    let terrain = TerrainSource::new(3);
    let config = BuildConfig {
        depth: 3,
        node_capacity: 2,
        ..BuildConfig::default()
    };

    assert!(matches!(
        VoxelOctree::build(&terrain, &config),
        Err(BuildError::CapacityExceeded { capacity: 2 })
    ));
}

#[test]
fn out_of_range_depth_is_rejected() {
    let world = OctantWorld::new(&[IVec3::ZERO]);

    for depth in [0, MAX_DEPTH + 1] {
        let config = BuildConfig {
            depth,
            ..BuildConfig::default()
        };
        assert!(matches!(
            VoxelOctree::build(&world, &config),
            Err(BuildError::UnsupportedDepth { .. })
        ));
    }
}
