//! The per-frame loop body.
//!
//! [`FrameDriver::render`] runs once per redraw: advance the spin angle,
//! clear, compute the view-projection matrix, upload it, draw. The drawing
//! side is abstracted behind [`FrameTarget`] so the sequence can run against
//! the GPU ([`GpuFrame`]) or against a recorder in tests.

use glam::Mat4;

use crate::animation::AnimationState;
use crate::camera::CameraState;
use crate::config::AnimationConfig;
use crate::gpu::GpuContext;
use crate::mesh::{CUBE_INDICES, Mesh};
use crate::program::CubeProgram;
use crate::transform::compute_frame_matrix;

/// Number of indices drawn each frame.
pub const CUBE_INDEX_COUNT: u32 = CUBE_INDICES.len() as u32;

/// Where a frame's draw commands go.
pub trait FrameTarget {
    /// Clears color and depth.
    fn clear(&mut self);
    /// Sets the shader's view-projection uniform.
    fn set_view_projection(&mut self, matrix: Mat4);
    /// Draws `count` indices as a triangle list.
    fn draw_indexed_triangles(&mut self, count: u32);
}

/// Drives the cube animation one logical frame at a time.
///
/// Owns the camera and the animation state. Stepping is purely per frame:
/// the angle advances by the configured step no matter how much wall-clock
/// time has passed.
#[derive(Clone, Debug)]
pub struct FrameDriver {
    camera: CameraState,
    animation: AnimationState,
    angle_step: f32,
    wrap_angle: bool,
    frame_index: u64,
}

impl FrameDriver {
    pub fn new(camera: CameraState, config: &AnimationConfig) -> Self {
        Self {
            camera,
            animation: AnimationState::new(0.0, config.initial_scale),
            angle_step: config.angle_step,
            wrap_angle: config.wrap_angle,
            frame_index: 0,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Mutable access for the input handler, which only changes the scale.
    pub fn animation_mut(&mut self) -> &mut AnimationState {
        &mut self.animation
    }

    /// Frames rendered so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the angle by one step and returns this frame's matrix.
    pub fn tick(&mut self) -> Mat4 {
        self.animation.advance(self.angle_step, self.wrap_angle);
        self.frame_index += 1;
        compute_frame_matrix(&self.camera, &self.animation)
    }

    /// Runs one full frame against `target`.
    pub fn render(&mut self, target: &mut impl FrameTarget) {
        let matrix = self.tick();
        target.clear();
        target.set_view_projection(matrix);
        target.draw_indexed_triangles(CUBE_INDEX_COUNT);

        if self.frame_index % 600 == 0 {
            log::trace!(
                "frame {}: angle {:.3}, scale {:.2}",
                self.frame_index,
                self.animation.angle(),
                self.animation.scale()
            );
        }
    }
}

/// One frame rendered to the window surface.
///
/// Created with [`GpuFrame::begin`], fed through [`FrameDriver::render`], and
/// completed with [`GpuFrame::finish`], which submits and presents.
pub struct GpuFrame<'a> {
    gpu: &'a GpuContext,
    program: &'a CubeProgram,
    mesh: &'a Mesh,
    output: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
    clear_color: wgpu::Color,
    pending_clear: bool,
}

impl<'a> GpuFrame<'a> {
    /// Acquires the next surface texture.
    pub fn begin(
        gpu: &'a GpuContext,
        program: &'a CubeProgram,
        mesh: &'a Mesh,
        clear_color: wgpu::Color,
    ) -> Result<Self, wgpu::SurfaceError> {
        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Cube Frame Encoder"),
            });

        Ok(Self {
            gpu,
            program,
            mesh,
            output,
            view,
            encoder,
            clear_color,
            pending_clear: false,
        })
    }

    /// Submits the recorded work and presents the frame.
    pub fn finish(mut self) {
        if self.pending_clear {
            // Cleared but nothing drawn; an empty pass still runs the load ops.
            self.pass();
        }
        self.gpu.queue.submit(std::iter::once(self.encoder.finish()));
        self.output.present();
    }

    fn pass(&mut self) -> wgpu::RenderPass<'_> {
        let (color_load, depth_load) = if std::mem::take(&mut self.pending_clear) {
            (wgpu::LoadOp::Clear(self.clear_color), wgpu::LoadOp::Clear(1.0))
        } else {
            (wgpu::LoadOp::Load, wgpu::LoadOp::Load)
        };

        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Cube Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: color_load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.program.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }
}

impl FrameTarget for GpuFrame<'_> {
    fn clear(&mut self) {
        self.pending_clear = true;
    }

    fn set_view_projection(&mut self, matrix: Mat4) {
        self.program.set_view_projection(&self.gpu.queue, matrix);
    }

    fn draw_indexed_triangles(&mut self, count: u32) {
        let program = self.program;
        let mesh = self.mesh;
        let mut render_pass = self.pass();
        program.draw_indexed(&mut render_pass, mesh, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        SetViewProjection(Mat4),
        Draw(u32),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl FrameTarget for Recorder {
        fn clear(&mut self) {
            self.0.push(Call::Clear);
        }
        fn set_view_projection(&mut self, matrix: Mat4) {
            self.0.push(Call::SetViewProjection(matrix));
        }
        fn draw_indexed_triangles(&mut self, count: u32) {
            self.0.push(Call::Draw(count));
        }
    }

    fn driver(step: f32) -> FrameDriver {
        FrameDriver::new(CameraState::new(1.0), &AnimationConfig::new().angle_step(step))
    }

    #[test]
    fn frame_clears_uploads_then_draws() {
        let mut driver = driver(0.01);
        let mut target = Recorder::default();
        driver.render(&mut target);

        let expected = compute_frame_matrix(driver.camera(), driver.animation());
        assert_eq!(
            target.0,
            vec![
                Call::Clear,
                Call::SetViewProjection(expected),
                Call::Draw(36)
            ]
        );
    }

    #[test]
    fn each_tick_adds_exactly_one_step() {
        let mut driver = driver(0.01);
        let mut previous = driver.animation().angle();
        for _ in 0..100 {
            driver.tick();
            let angle = driver.animation().angle();
            assert!((angle - previous - 0.01).abs() < 1e-6);
            previous = angle;
        }
        assert_eq!(driver.frame_index(), 100);
    }

    #[test]
    fn stepping_ignores_wall_clock() {
        let mut fast = driver(0.05);
        let mut slow = driver(0.05);
        for _ in 0..10 {
            fast.tick();
        }
        for _ in 0..10 {
            std::thread::sleep(std::time::Duration::from_millis(2));
            slow.tick();
        }
        assert_eq!(fast.animation().angle(), slow.animation().angle());
    }

    #[test]
    fn first_frame_is_already_rotated() {
        let mut driver = driver(0.25);
        driver.tick();
        assert!((driver.animation().angle() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn scale_changes_show_up_next_frame() {
        let mut driver = driver(0.01);
        let before = driver.tick();
        driver.animation_mut().set_scale(3.0);
        let after = driver.tick();
        assert_ne!(before, after);
        assert_eq!(driver.animation().scale(), 3.0);
    }

    #[test]
    fn starts_at_configured_scale() {
        let config = AnimationConfig::new().initial_scale(2.5);
        let driver = FrameDriver::new(CameraState::new(1.0), &config);
        assert_eq!(driver.animation().scale(), 2.5);
        assert_eq!(driver.animation().angle(), 0.0);
    }
}
