//! # Colorcube
//!
//! A single six-colored cube, spinning about its vertical axis, drawn with wgpu.
//! Press `A` to grow it and `D` to shrink it.
//!
//! ```no_run
//! use colorcube::{AppConfig, AnimationConfig, run};
//!
//! fn main() -> Result<(), colorcube::AppError> {
//!     run(AppConfig::new().animation(AnimationConfig::new().angle_step(0.02)))
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`CameraState`]: fixed projection and base view
//! - [`AnimationState`]: spin angle and scale
//! - [`compute_frame_matrix`]: `projection * base_view * rotate_y(angle) * scale`
//! - [`FrameDriver`]: advances the angle each frame and issues the draw through a [`FrameTarget`]
//! - [`ScaleControl`]: turns `A`/`D` presses into scale changes
//! - [`CubeProgram`] / [`Mesh`]: the compiled shader pair and the uploaded cube
//!
//! Everything except [`GpuContext`], [`CubeProgram`], [`Mesh`] and [`run`] works
//! without a window or GPU, which is how the tests drive it.

mod animation;
mod app;
mod camera;
mod config;
mod error;
mod frame;
mod gpu;
mod input;
mod logging;
mod mesh;
mod program;
mod transform;

pub use animation::AnimationState;
pub use app::run;
pub use camera::CameraState;
pub use config::{AnimationConfig, AppConfig};
pub use error::{AppError, GpuError, ProgramError, ShaderStage};
pub use frame::{CUBE_INDEX_COUNT, FrameDriver, FrameTarget, GpuFrame};
pub use gpu::GpuContext;
pub use input::{ScaleControl, ScaleKey};
pub use logging::{LoggingConfig, init_logging};
pub use mesh::{CUBE_INDICES, CUBE_VERTICES, FACE_COLORS, Mesh, Vertex};
pub use program::{
    CubeProgram, FRAGMENT_SHADER, ProgramInterface, UniformSlot, VERTEX_SHADER,
    ViewProjectionUniform,
};
pub use transform::compute_frame_matrix;

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec3};
