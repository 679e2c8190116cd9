//! Editable transforms for objects placed in a level.
use glam::{EulerRot, Mat4, Quat, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::transform::compose;

/// The position, rotation, and scale of a placed object.
///
/// The fields are only accessible through methods to guarantee
/// [model_matrix](LevelObject::model_matrix) is recomputed after every change.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "TransformData", into = "TransformData"))]
#[derive(Debug, Clone, PartialEq)]
pub struct LevelObject {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    model_matrix: Mat4,
}

// Only the source values are serialized since the matrix is derived.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize, Clone)]
struct TransformData {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

#[cfg(feature = "serde")]
impl From<TransformData> for LevelObject {
    fn from(t: TransformData) -> Self {
        Self::new(t.position, t.rotation, t.scale)
    }
}

#[cfg(feature = "serde")]
impl From<LevelObject> for TransformData {
    fn from(o: LevelObject) -> Self {
        Self {
            position: o.position,
            rotation: o.rotation,
            scale: o.scale,
        }
    }
}

impl Default for LevelObject {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }
}

impl LevelObject {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            model_matrix: compose(scale, rotation, position),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// The scale factor for each axis.
    pub fn scaling(&self) -> Vec3 {
        self.scale
    }

    /// The combined transform applying scale, rotation, and then translation.
    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    /// Moves the object by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.update_model_matrix();
    }

    pub fn translate_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.translate(Vec3::new(x, y, z));
    }

    /// Applies an additional rotation given as XYZ euler angles in radians.
    /// The new rotation is applied in the object's local space.
    pub fn rotate(&mut self, euler: Vec3) {
        self.rotation *= Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
        self.update_model_matrix();
    }

    pub fn rotate_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.rotate(Vec3::new(x, y, z));
    }

    /// Multiplies the scale of each axis by the corresponding component of `factor`.
    pub fn scale(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.update_model_matrix();
    }

    pub fn scale_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.scale(Vec3::new(x, y, z));
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_model_matrix();
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.update_model_matrix();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.update_model_matrix();
    }

    fn update_model_matrix(&mut self) {
        self.model_matrix = compose(self.scale, self.rotation, self.position);
    }
}
