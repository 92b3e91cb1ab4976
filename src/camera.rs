use glam::Mat4;
use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};

/// Vertical field of view, in radians.
pub const FOV_Y: f32 = FRAC_PI_4;
/// Near clip plane distance.
pub const Z_NEAR: f32 = 0.1;
/// Far clip plane distance.
pub const Z_FAR: f32 = 100.0;
/// How far the camera sits back from the cube.
pub const CAMERA_DISTANCE: f32 = 8.0;
/// Downward tilt of the view.
pub const TILT_X: f32 = FRAC_PI_6;
/// Initial yaw so a cube edge faces the viewer.
pub const YAW_Y: f32 = FRAC_PI_4;

/// Fixed camera for the cube scene.
///
/// Built once from the viewport aspect ratio and never changed afterwards;
/// per-frame motion is applied on top of [`CameraState::base_view`] by the
/// transform pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Perspective projection (right-handed, depth in `[0, 1]`).
    pub projection: Mat4,
    /// Camera placement: `translate(0, 0, -8) * rotate_x(π/6) * rotate_y(π/4)`.
    pub base_view: Mat4,
}

impl CameraState {
    /// Creates the camera for a viewport with the given width/height ratio.
    pub fn new(aspect: f32) -> Self {
        Self {
            projection: Mat4::perspective_rh(FOV_Y, aspect, Z_NEAR, Z_FAR),
            base_view: Mat4::from_translation(glam::Vec3::new(0.0, 0.0, -CAMERA_DISTANCE))
                * Mat4::from_rotation_x(TILT_X)
                * Mat4::from_rotation_y(YAW_Y),
        }
    }

    /// Creates the camera for a viewport of `width` x `height` pixels.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self::new(width as f32 / height.max(1) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn base_view_places_origin_in_front_of_camera() {
        let camera = CameraState::new(1.0);
        let origin = camera.base_view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(origin.truncate().abs_diff_eq(Vec3::new(0.0, 0.0, -8.0), 1e-6));
    }

    #[test]
    fn base_view_applies_yaw_before_tilt() {
        let camera = CameraState::new(1.0);
        // +X rotated by yaw lands in the XZ plane, tilt then lifts its Z part.
        let x = camera.base_view.transform_vector3(Vec3::X);
        let yawed = Vec3::new(YAW_Y.cos(), 0.0, -YAW_Y.sin());
        let expected = Mat4::from_rotation_x(TILT_X).transform_vector3(yawed);
        assert!(x.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn projection_maps_near_and_far_to_unit_depth() {
        let camera = CameraState::new(1.0);
        assert!((camera.projection.project_point3(Vec3::new(0.0, 0.0, -Z_NEAR)).z).abs() < 1e-5);
        assert!((camera.projection.project_point3(Vec3::new(0.0, 0.0, -Z_FAR)).z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn viewport_aspect_feeds_projection() {
        let square = CameraState::for_viewport(600, 600);
        let wide = CameraState::for_viewport(1200, 600);
        assert_eq!(square.projection, Mat4::perspective_rh(FOV_Y, 1.0, Z_NEAR, Z_FAR));
        assert_eq!(wide.projection, Mat4::perspective_rh(FOV_Y, 2.0, Z_NEAR, Z_FAR));
        assert_eq!(square.base_view, wide.base_view);
    }
}
