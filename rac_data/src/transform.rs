//! Model matrix composition for placed level objects.
use glam::{Mat4, Quat, Vec3};

/// Creates the model matrix that applies `scale`, then `rotation`, then `translation`.
///
/// The matrix uses column vectors, so the individual transforms are multiplied right to left.
/**
```rust
use glam::{Quat, Vec3};
use rac_data::transform::compose;

let m = compose(Vec3::splat(2.0), Quat::IDENTITY, Vec3::new(1.0, 2.0, 3.0));
assert_eq!(Vec3::new(3.0, 4.0, 5.0), m.transform_point3(Vec3::ONE));
```
 */
pub fn compose(scale: Vec3, rotation: Quat, translation: Vec3) -> Mat4 {
    Mat4::from_translation(translation) * Mat4::from_quat(rotation) * Mat4::from_scale(scale)
}
