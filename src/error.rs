//! Error types for GPU setup, program compilation and the application loop.

use std::fmt;

/// Programmable pipeline stage a shader source belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Failures while building the graphics program.
///
/// None of these are recoverable: the application stops before any buffer is
/// uploaded or any frame is drawn.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// One shader stage failed to parse or validate.
    #[error("{stage} shader failed to compile: {message}")]
    ShaderCompile { stage: ShaderStage, message: String },
    /// The stages compiled but the combined pipeline was rejected.
    #[error("program failed to link: {0}")]
    Link(String),
    /// Named inputs the program must expose were not found.
    #[error("program interface is missing: {}", .0.join(", "))]
    MissingInterface(Vec<String>),
}

/// Failures while acquiring a device and surface.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Top-level error returned by [`run`](crate::run).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error("GPU ran out of memory while presenting")]
    OutOfMemory,
}
