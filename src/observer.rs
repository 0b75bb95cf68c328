//! Observer (camera pose)
//!
//! An explicit value object owned by the caller; the renderer only ever
//! reads it. Direction and the yaw/pitch pair are kept consistent by the
//! mutators, with pitch clamped away from the poles so the view basis
//! stays well defined.
//!
//! Author: Moroya Sakamoto

use crate::types::{basis_rolled, spherical};
use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Camera pose: position, forward direction and field of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observer {
    position: Vec3,
    direction: Vec3,
    yaw: f32,
    pitch: f32,
    roll: f32,
    fov: f32,
}

impl Default for Observer {
    fn default() -> Self {
        let mut observer = Observer {
            position: Vec3::new(-0.15, -0.60, -0.20),
            direction: Vec3::Z,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            fov: 0.0,
        };
        observer.look_at(Vec3::new(0.0, -0.5, 1.0));
        observer.set_fov(90.0);
        observer
    }
}

impl Observer {
    /// Camera position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Forward direction (normalized).
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Field of view in radians.
    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// View basis from the forward direction and current roll.
    #[inline]
    pub fn basis(&self) -> Mat3 {
        basis_rolled(self.direction, self.roll)
    }

    /// Teleport to a position.
    pub fn move_to(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Face a direction; derives yaw and pitch and resets roll.
    pub fn look_at(&mut self, direction: Vec3) {
        let dir = direction.normalize();
        self.direction = dir;
        self.yaw = dir.z.atan2(dir.x);
        self.pitch = dir.y.clamp(-1.0, 1.0).acos();
        self.roll = 0.0;
    }

    /// Step along the forward direction.
    pub fn forward(&mut self, depth: f32) {
        self.position += self.direction * depth;
    }

    /// Turn horizontally (yaw).
    pub fn turn_h(&mut self, amount: f32) {
        self.yaw += amount;
        self.direction = spherical(self.yaw, self.pitch);
    }

    /// Turn vertically (pitch), clamped away from the poles.
    pub fn turn_v(&mut self, amount: f32) {
        self.pitch = (self.pitch + amount).clamp(0.01, PI - 0.01);
        self.direction = spherical(self.yaw, self.pitch);
    }

    /// Roll around the forward axis.
    pub fn roll(&mut self, amount: f32) {
        self.roll += amount;
    }

    /// Set the field of view, in degrees.
    pub fn set_fov(&mut self, degrees: f32) {
        self.fov = degrees * PI / 180.0;
    }
}
