//! Model-matrix composition.
//!
//! Objects are placed with a scale, three independent axis rotations in
//! degrees, a position and an offset that is added to the position. The offset
//! lets several parts of one object share a common anchor.

use cgmath::{Deg, Matrix4, Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    /// Rotation about X, Y and Z in degrees.
    pub rotation: Vector3<f32>,
    pub position: Vector3<f32>,
    pub offset: Vector3<f32>,
}

impl Transform {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
            offset: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn scaled(x: f32, y: f32, z: f32) -> Self {
        Self {
            scale: Vector3::new(x, y, z),
            ..Self::new()
        }
    }

    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn offset_by(mut self, offset: Vector3<f32>) -> Self {
        self.offset = offset;
        self
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        compute(
            self.scale,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.position,
            self.offset,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Build `translate(position + offset) * rotX * rotY * rotZ * scale`.
///
/// Applied to a vertex this scales first, then rotates about Z, Y and X in
/// that order, and translates last.
pub fn compute(
    scale: Vector3<f32>,
    rot_x: f32,
    rot_y: f32,
    rot_z: f32,
    position: Vector3<f32>,
    offset: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(position + offset)
        * Matrix4::from_angle_x(Deg(rot_x))
        * Matrix4::from_angle_y(Deg(rot_y))
        * Matrix4::from_angle_z(Deg(rot_z))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}
