//! Camera projections
//!
//! Maps normalized screen coordinates and an observer pose to world-space
//! camera rays. Two models: a pinhole perspective projection with field of
//! view and aspect-ratio handling, and a fisheye projection meant for a
//! 2:1 image that ignores the ratio.
//!
//! Author: Moroya Sakamoto

use crate::observer::Observer;
use crate::types::{spherical, Ray};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// Projection model selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// Pinhole perspective camera.
    Perspective,
    /// Fisheye projection (aspect ratio ignored).
    Fisheye,
}

impl Projection {
    /// Build the camera ray for normalized screen coordinates.
    ///
    /// `u` and `v` run over `[-1, 1]`, `ratio` is width over height. The
    /// returned direction is normalized.
    pub fn project(&self, observer: &Observer, u: f32, v: f32, ratio: f32) -> Ray {
        let view = observer.basis();

        let direction = match self {
            Projection::Perspective => {
                let z = 1.0 / (observer.fov() * 0.5).tan();
                let camera_space = Vec3::new(ratio * -u, -v, z);
                view * camera_space.normalize()
            }
            Projection::Fisheye => {
                let phi = PI * (0.5 - u);
                let theta = FRAC_PI_2 * (1.0 + v);
                view * spherical(phi, theta)
            }
        };

        Ray {
            origin: observer.position(),
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_observer() -> Observer {
        let mut observer = Observer::default();
        observer.move_to(Vec3::ZERO);
        observer.look_at(Vec3::Z);
        observer.set_fov(90.0);
        observer
    }

    #[test]
    fn test_center_ray_is_forward() {
        let observer = forward_observer();
        for projection in [Projection::Perspective, Projection::Fisheye] {
            let ray = projection.project(&observer, 0.0, 0.0, 1.0);
            assert!(
                (ray.direction - Vec3::Z).length() < 1e-5,
                "{:?} center ray should be forward",
                projection
            );
            assert_eq!(ray.origin, Vec3::ZERO);
        }
    }

    #[test]
    fn test_directions_are_normalized() {
        let observer = forward_observer();
        for projection in [Projection::Perspective, Projection::Fisheye] {
            for (u, v) in [(0.5, -0.3), (-1.0, 1.0), (0.9, 0.9)] {
                let ray = projection.project(&observer, u, v, 16.0 / 9.0);
                assert!((ray.direction.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_perspective_edge_at_fov() {
        // at fov 90 and square aspect, the u = -1 ray should lie 45 degrees
        // off the forward axis, toward camera-space +x
        let observer = forward_observer();
        let ray = Projection::Perspective.project(&observer, -1.0, 0.0, 1.0);
        let off_axis = ray.direction.dot(Vec3::Z).clamp(-1.0, 1.0).acos();
        assert!((off_axis - PI / 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_perspective_aspect_scales_horizontal() {
        let observer = forward_observer();
        let narrow = Projection::Perspective.project(&observer, 0.5, 0.0, 1.0);
        let wide = Projection::Perspective.project(&observer, 0.5, 0.0, 2.0);

        let angle = |ray: Ray| ray.direction.dot(Vec3::Z).clamp(-1.0, 1.0).acos();
        assert!(angle(wide) > angle(narrow));
    }

    #[test]
    fn test_fisheye_ignores_ratio() {
        let observer = forward_observer();
        let a = Projection::Fisheye.project(&observer, 0.4, -0.2, 1.0);
        let b = Projection::Fisheye.project(&observer, 0.4, -0.2, 2.0);
        assert!((a.direction - b.direction).length() < 1e-6);
    }
}
