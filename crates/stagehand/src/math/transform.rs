// math/transform.rs
//
// 2D translation/rotation/scale packed as a value, plus the bare matrix
// helpers. Matrices are glam's; composition is matrix multiplication.

use glam::{Mat3, Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub type Matrix3 = Mat3;
pub type Matrix4 = Mat4;

/// Scale, then rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2 {
    pub translation: Vec2,
    /// Counter-clockwise, radians.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2 {
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: f32) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn with_translation(mut self, translation: Vec2) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_matrix(&self) -> Mat3 {
        Mat3::from_scale_angle_translation(self.scale, self.rotation, self.translation)
    }

    /// Matrix applying `self` first and `next` second.
    pub fn then(&self, next: &Transform2) -> Mat3 {
        next.to_matrix() * self.to_matrix()
    }

    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.to_matrix().transform_point2(point)
    }

    /// Rotate and scale a direction; translation does not apply.
    pub fn apply_vector(&self, v: Vec2) -> Vec2 {
        self.to_matrix().transform_vector2(v)
    }
}

pub fn translation3(v: Vec3) -> Mat4 {
    Mat4::from_translation(v)
}

/// Counter-clockwise rotation about +Z.
pub fn rotation_z3(theta: f32) -> Mat4 {
    Mat4::from_rotation_z(theta)
}
