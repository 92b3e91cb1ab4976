//! End-to-end checks of the frame pipeline through the public API. None of
//! these need a window or a GPU.

use colorcube::{
    AnimationConfig, AnimationState, CUBE_INDEX_COUNT, CUBE_INDICES, CUBE_VERTICES, CameraState,
    FrameDriver, FrameTarget, Mat4, ProgramError, ProgramInterface, ScaleControl, ScaleKey,
    VERTEX_SHADER, Vec3, compute_frame_matrix,
};
use glam::Vec4;

#[derive(Default)]
struct Recorder {
    clears: usize,
    matrices: Vec<Mat4>,
    draws: Vec<u32>,
}

impl FrameTarget for Recorder {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn set_view_projection(&mut self, matrix: Mat4) {
        self.matrices.push(matrix);
    }

    fn draw_indexed_triangles(&mut self, count: u32) {
        self.draws.push(count);
    }
}

fn square_camera() -> CameraState {
    CameraState::for_viewport(600, 600)
}

#[test]
fn one_render_is_one_clear_one_upload_one_draw() {
    let mut driver = FrameDriver::new(square_camera(), &AnimationConfig::default());
    let mut target = Recorder::default();

    for _ in 0..3 {
        driver.render(&mut target);
    }

    assert_eq!(target.clears, 3);
    assert_eq!(target.matrices.len(), 3);
    assert_eq!(target.draws, vec![36, 36, 36]);
    assert_eq!(CUBE_INDEX_COUNT as usize, CUBE_INDICES.len());
}

#[test]
fn consecutive_frames_differ_by_one_step_of_rotation() {
    let camera = square_camera();
    let mut driver = FrameDriver::new(camera, &AnimationConfig::default());
    let mut target = Recorder::default();

    driver.render(&mut target);
    driver.render(&mut target);

    let first = compute_frame_matrix(&camera, &AnimationState::new(0.01, 1.5));
    let second = compute_frame_matrix(&camera, &AnimationState::new(0.02, 1.5));
    assert!(target.matrices[0].abs_diff_eq(first, 1e-5));
    assert!(target.matrices[1].abs_diff_eq(second, 1e-5));
}

#[test]
fn cube_stays_in_front_of_the_camera_all_the_way_round() {
    let camera = square_camera();
    let mut angle = 0.0;
    while angle < std::f32::consts::TAU {
        let matrix = compute_frame_matrix(&camera, &AnimationState::new(angle, 1.5));
        for vertex in &CUBE_VERTICES {
            let clip = matrix * Vec3::from(vertex.position).extend(1.0);
            assert!(clip.w > 0.0, "vertex behind camera at angle {angle}");
            let ndc = clip / clip.w;
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "clipped at {angle}");
            assert!((0.0..=1.0).contains(&ndc.z));
        }
        angle += 0.1;
    }
}

#[test]
fn rotation_turns_the_cube_about_its_own_center() {
    let camera = square_camera();
    let center = Vec4::new(0.0, 0.0, 0.0, 1.0);
    let a = compute_frame_matrix(&camera, &AnimationState::new(0.0, 1.5)) * center;
    let b = compute_frame_matrix(&camera, &AnimationState::new(1.3, 1.5)) * center;
    assert!(a.abs_diff_eq(b, 1e-5));
}

#[test]
fn keys_resize_the_next_frame() {
    let mut driver = FrameDriver::new(square_camera(), &AnimationConfig::default());
    let control = ScaleControl::default();

    for _ in 0..5 {
        control.apply(ScaleKey::Increase, driver.animation_mut());
    }
    assert!((driver.animation().scale() - 2.0).abs() < 1e-5);

    for _ in 0..40 {
        control.apply(ScaleKey::Decrease, driver.animation_mut());
    }
    assert_eq!(driver.animation().scale(), 0.1);

    let mut target = Recorder::default();
    driver.render(&mut target);
    let expected = compute_frame_matrix(driver.camera(), &AnimationState::new(0.01, 0.1));
    assert!(target.matrices[0].abs_diff_eq(expected, 1e-5));
}

#[test]
fn input_never_touches_the_angle() {
    let mut driver = FrameDriver::new(square_camera(), &AnimationConfig::default());
    driver.tick();
    let angle = driver.animation().angle();

    let control = ScaleControl::default();
    control.apply(ScaleKey::Increase, driver.animation_mut());
    control.apply(ScaleKey::Decrease, driver.animation_mut());

    assert_eq!(driver.animation().angle(), angle);
}

#[test]
fn unwrapped_angle_keeps_growing() {
    let config = AnimationConfig::new().angle_step(1.0).wrap_angle(false);
    let mut driver = FrameDriver::new(square_camera(), &config);
    for _ in 0..10 {
        driver.tick();
    }
    assert!((driver.animation().angle() - 10.0).abs() < 1e-5);
}

#[test]
fn bundled_vertex_shader_exposes_the_named_inputs() {
    let interface = ProgramInterface::resolve(VERTEX_SHADER).unwrap();
    assert_ne!(interface.position, interface.color);
    assert_eq!(interface.view_projection.group, 0);
}

#[test]
fn shader_without_color_input_is_rejected() {
    let source = r#"
        @group(0) @binding(0) var<uniform> u_view_projection: mat4x4<f32>;
        @vertex
        fn vs_main(@location(0) a_position: vec3<f32>) -> @builtin(position) vec4<f32> {
            return u_view_projection * vec4<f32>(a_position, 1.0);
        }
    "#;
    match ProgramInterface::resolve(source) {
        Err(ProgramError::MissingInterface(names)) => assert_eq!(names, vec!["a_color"]),
        other => panic!("expected a missing interface error, got {other:?}"),
    }
}
