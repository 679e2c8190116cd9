//! Shared meshes and the placed objects that reference them.
//!
//! A [Model] is loaded once per level and shared by every [ModelObject] with the same model ID.
//! Objects only store the ID, so lookups take the collection of models that owns the data.
use std::io::{Read, Seek};

use glam::{Mat4, Vec3};
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rac_lib::formats::anim::Animation;
use rac_lib::formats::bone::{BoneData, BoneMatrix};
use rac_lib::formats::sound::ModelSound;
use rac_lib::{read_records, ParseError};

use crate::level_object::LevelObject;

/// The number of floats for each vertex in [vertices](struct.Model.html#structfield.vertices).
/// Each vertex stores a position, normal, and texture coordinate.
pub const VERTEX_STRIDE: usize = 8;

/// Mesh and skeleton data shared by all objects using the same model ID.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub id: u16,
    /// A uniform scale applied to the vertex positions.
    pub size: f32,
    /// Interleaved vertex attributes with [VERTEX_STRIDE] floats per vertex.
    pub vertices: Vec<f32>,
    /// Triangle list indices into the vertices.
    pub indices: Vec<u16>,
    pub animations: Vec<Animation>,
    pub bone_matrices: Vec<BoneMatrix>,
    pub bone_data: Vec<BoneData>,
    pub sounds: Vec<ModelSound>,
}

impl Model {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            size: 1.0,
            ..Default::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    /// The model space position of each vertex after applying [size](#structfield.size).
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(VERTEX_STRIDE)
            .map(move |v| Vec3::new(v[0], v[1], v[2]) * self.size)
    }

    /// Returns `true` if every index refers to an existing vertex.
    pub fn indices_in_range(&self) -> bool {
        let count = self.vertex_count();
        self.indices.iter().all(|i| usize::from(*i) < count)
    }

    /// Reads the bone matrices and bone data for `bone_count` bones from `block`.
    pub fn read_skeleton(
        &mut self,
        block: &[u8],
        matrices_offset: usize,
        data_offset: usize,
        bone_count: usize,
    ) -> Result<(), ParseError> {
        self.bone_matrices = read_records(block, matrices_offset, bone_count)?;
        self.bone_data = read_records(block, data_offset, bone_count)?;
        debug!("Read {} bones for model {:#06x}", bone_count, self.id);
        Ok(())
    }

    /// Reads `count` sound cues starting at `offset` in `block`.
    pub fn read_sounds(
        &mut self,
        block: &[u8],
        offset: usize,
        count: usize,
    ) -> Result<(), ParseError> {
        self.sounds = read_records(block, offset, count)?;
        Ok(())
    }

    /// Reads one animation for each entry in `animation_offsets`.
    /// Empty slots with an offset of `0` produce empty animations to preserve the slot indices.
    pub fn read_animations<R: Read + Seek>(
        &mut self,
        reader: &mut R,
        model_offset: u32,
        animation_offsets: &[i32],
    ) -> Result<(), ParseError> {
        self.animations = animation_offsets
            .iter()
            .map(|offset| Animation::read(reader, model_offset, *offset))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(())
    }

    /// The transform of each bone with the translation in the last column.
    pub fn bone_transforms(&self) -> Vec<Mat4> {
        self.bone_matrices.iter().map(bone_transform).collect()
    }
}

/// Converts the row-major bone transform to a [Mat4].
pub fn bone_transform(bone: &BoneMatrix) -> Mat4 {
    Mat4::from_cols_array_2d(&bone.transform.to_rows_array()).transpose()
}

/// A placed object that renders a shared [Model].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelObject {
    /// The [id](struct.Model.html#structfield.id) of the model used for rendering.
    pub model_id: u16,
    pub object: LevelObject,
}

impl ModelObject {
    pub fn new(model_id: u16, object: LevelObject) -> Self {
        Self { model_id, object }
    }

    /// Finds the model with a matching ID in `models`.
    pub fn model<'a>(&self, models: &'a [Model]) -> Option<&'a Model> {
        models.iter().find(|m| m.id == self.model_id)
    }

    pub fn vertices<'a>(&self, models: &'a [Model]) -> Option<&'a [f32]> {
        self.model(models).map(|m| m.vertices.as_slice())
    }

    pub fn indices<'a>(&self, models: &'a [Model]) -> Option<&'a [u16]> {
        self.model(models).map(|m| m.indices.as_slice())
    }

    /// The world space minimum and maximum corners of the transformed model's vertices.
    /// Returns `None` if the model is missing or has no vertices.
    pub fn bounding_box(&self, models: &[Model]) -> Option<(Vec3, Vec3)> {
        let model = self.model(models)?;
        let matrix = self.object.model_matrix();
        model
            .positions()
            .map(|p| matrix.transform_point3(p))
            .fold(None, |bounds, p| match bounds {
                Some((min, max)) => Some((p.min(min), p.max(max))),
                None => Some((p, p)),
            })
    }
}
