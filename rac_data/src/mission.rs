//! Missions group the level data that is loaded together.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{Model, ModelObject};

/// Raw texture data referenced by models.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Texture {
    pub id: u32,
    pub width: u16,
    pub height: u16,
    pub data: Vec<u8>,
}

/// The mobies, models, and textures for a single mission.
/// The collections are independent and aren't checked against each other.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mission {
    pub id: i32,
    pub mobies: Vec<ModelObject>,
    pub models: Vec<Model>,
    pub textures: Vec<Texture>,
}

impl Mission {
    /// Creates a mission with no data.
    pub fn new(id: i32) -> Self {
        Self {
            id,
            mobies: Vec::new(),
            models: Vec::new(),
            textures: Vec::new(),
        }
    }

    /// Finds the model with the given `id`.
    pub fn model(&self, id: u16) -> Option<&Model> {
        self.models.iter().find(|m| m.id == id)
    }

    /// The mobies using the model with the given `model_id`.
    pub fn mobies_with_model(&self, model_id: u16) -> impl Iterator<Item = &ModelObject> {
        self.mobies.iter().filter(move |m| m.model_id == model_id)
    }
}
