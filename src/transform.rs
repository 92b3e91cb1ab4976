//! Per-frame view-projection matrix.
//!
//! The composition order is fixed:
//!
//! ```text
//! projection * base_view * rotate_y(angle) * scale(s)
//! ```
//!
//! Scale and spin are applied in the cube's own frame, before the camera
//! placement, so the cube turns about its own vertical axis rather than
//! orbiting the camera.

use glam::{Mat4, Vec3};

use crate::animation::AnimationState;
use crate::camera::CameraState;

/// Computes the matrix handed to the shader for one frame.
///
/// Reads `camera` and `anim` by shared reference and returns a new matrix, so
/// the base view is reusable every frame. Deterministic for identical inputs.
pub fn compute_frame_matrix(camera: &CameraState, anim: &AnimationState) -> Mat4 {
    let model_view = camera.base_view
        * Mat4::from_rotation_y(anim.angle())
        * Mat4::from_scale(Vec3::splat(anim.scale()));
    camera.projection * model_view
}
