//! # rac_data
//!
//! rac_data provides the editable level data built on the binary records in rac_lib.
//!
//! ## Features
//! - Placed objects with a [LevelObject](crate::level_object::LevelObject) transform that always keeps its model matrix up to date
//! - Shared [Model](crate::model::Model) data referenced by ID from [ModelObject](crate::model::ModelObject)
//! - [Mission](crate::mission::Mission) containers for mobies, models, and textures
//! - Model name lists and editor settings loaded once into an [EditorContext](crate::config::EditorContext)
//!
//! ## Getting Started
//! The easiest way to access important items like [LevelObject](crate::level_object::LevelObject) is to import the [prelude].
/*!
```rust
use rac_data::prelude::*;
use glam::Vec3;

let mut mission = Mission::new(0);
mission.models.push(Model::new(0x01a4));

let mut moby = ModelObject::new(0x01a4, LevelObject::default());
moby.object.translate(Vec3::new(1.0, 2.0, 3.0));
mission.mobies.push(moby);

assert_eq!(1, mission.mobies_with_model(0x01a4).count());
```
 */
pub mod config;
pub mod level_object;
pub mod mission;
pub mod model;
pub mod model_names;
pub mod transform;

/// Common imports for top level types.
pub mod prelude {
    pub use crate::config::{EditorConfig, EditorContext};
    pub use crate::level_object::LevelObject;
    pub use crate::mission::{Mission, Texture};
    pub use crate::model::{Model, ModelObject};
    pub use crate::model_names::ModelNames;
    pub use rac_lib::GameType;
}
