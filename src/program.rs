//! The cube's graphics program: a vertex and a fragment shader linked into one
//! render pipeline, plus the uniform buffer and depth buffer it draws with.
//!
//! # Interface
//!
//! The program talks to the rest of the crate through three named inputs,
//! declared in the vertex stage:
//!
//! | Name                | Kind      | Source                      |
//! |---------------------|-----------|-----------------------------|
//! | `a_position`        | attribute | [`Vertex::position`]        |
//! | `a_color`           | attribute | [`Vertex::color`]           |
//! | `u_view_projection` | uniform   | [`CubeProgram::set_view_projection`] |
//!
//! They are looked up once, by name, when the program is built
//! ([`ProgramInterface::resolve`]); the resolved locations then shape the
//! vertex buffer layout and the bind group. Any name that cannot be found is
//! reported together with the others in a single
//! [`ProgramError::MissingInterface`].
//!
//! # Failure
//!
//! Compilation and linking run inside wgpu validation error scopes, so a bad
//! shader surfaces as a [`ProgramError`] instead of the device's uncaptured
//! error handler.
//!
//! [`Vertex::position`]: crate::Vertex::position
//! [`Vertex::color`]: crate::Vertex::color

use glam::Mat4;
use wgpu::naga;

use crate::error::{ProgramError, ShaderStage};
use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex};

/// Bundled vertex stage.
pub const VERTEX_SHADER: &str = include_str!("shaders/cube.vert.wgsl");
/// Bundled fragment stage.
pub const FRAGMENT_SHADER: &str = include_str!("shaders/cube.frag.wgsl");

pub const POSITION_ATTRIBUTE: &str = "a_position";
pub const COLOR_ATTRIBUTE: &str = "a_color";
pub const VIEW_PROJECTION_UNIFORM: &str = "u_view_projection";

/// Vertex stage entry point.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Fragment stage entry point.
pub const FRAGMENT_ENTRY: &str = "fs_main";

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Uniform block for the vertex stage.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewProjectionUniform {
    /// Column-major view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl From<Mat4> for ViewProjectionUniform {
    fn from(m: Mat4) -> Self {
        Self {
            view_proj: m.to_cols_array_2d(),
        }
    }
}

/// Bind group slot of a uniform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformSlot {
    pub group: u32,
    pub binding: u32,
}

/// Resolved locations of the program's named inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramInterface {
    /// Shader location of `a_position`.
    pub position: u32,
    /// Shader location of `a_color`.
    pub color: u32,
    /// Slot of `u_view_projection`.
    pub view_projection: UniformSlot,
}

impl ProgramInterface {
    /// Looks up the attribute locations and uniform slot declared in a WGSL
    /// vertex source.
    ///
    /// The source is parsed with naga. Attributes are the `@location` inputs
    /// of the `vs_main` entry point, either as plain arguments or as members
    /// of a struct argument; the uniform is the global variable carrying a
    /// `@group(g) @binding(b)` pair. Every missing name is collected before
    /// failing. Source that does not parse is a vertex compile error.
    pub fn resolve(vertex_source: &str) -> Result<Self, ProgramError> {
        let module = naga::front::wgsl::parse_str(vertex_source).map_err(|err| {
            ProgramError::ShaderCompile {
                stage: ShaderStage::Vertex,
                message: err.emit_to_string(vertex_source),
            }
        })?;

        let inputs = vertex_inputs(&module);
        let location_of = |name: &str| {
            inputs
                .iter()
                .find(|(input, _)| *input == name)
                .map(|&(_, location)| location)
        };

        let position = location_of(POSITION_ATTRIBUTE);
        let color = location_of(COLOR_ATTRIBUTE);
        let view_projection = module
            .global_variables
            .iter()
            .find(|(_, var)| var.name.as_deref() == Some(VIEW_PROJECTION_UNIFORM))
            .and_then(|(_, var)| var.binding.as_ref())
            .map(|b| UniformSlot {
                group: b.group,
                binding: b.binding,
            });

        match (position, color, view_projection) {
            (Some(position), Some(color), Some(view_projection)) => Ok(Self {
                position,
                color,
                view_projection,
            }),
            _ => {
                let mut missing = Vec::new();
                if position.is_none() {
                    missing.push(POSITION_ATTRIBUTE.to_string());
                }
                if color.is_none() {
                    missing.push(COLOR_ATTRIBUTE.to_string());
                }
                if view_projection.is_none() {
                    missing.push(VIEW_PROJECTION_UNIFORM.to_string());
                }
                Err(ProgramError::MissingInterface(missing))
            }
        }
    }
}

/// Named `@location` inputs of the vertex entry point, including the
/// members of struct-typed arguments.
fn vertex_inputs(module: &naga::Module) -> Vec<(&str, u32)> {
    let Some(entry) = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga::ShaderStage::Vertex && ep.name == VERTEX_ENTRY)
    else {
        return Vec::new();
    };

    let mut inputs = Vec::new();
    for arg in &entry.function.arguments {
        match (&arg.binding, &module.types[arg.ty].inner) {
            (Some(naga::Binding::Location { location, .. }), _) => {
                if let Some(name) = &arg.name {
                    inputs.push((name.as_str(), *location));
                }
            }
            (None, naga::TypeInner::Struct { members, .. }) => {
                for member in members {
                    if let (Some(name), Some(naga::Binding::Location { location, .. })) =
                        (&member.name, &member.binding)
                    {
                        inputs.push((name.as_str(), *location));
                    }
                }
            }
            _ => {}
        }
    }
    inputs
}

/// Checks that the uniform fits the single bind group the pipeline layout has.
fn check_uniform_slot(slot: UniformSlot, limits: &wgpu::Limits) -> Result<(), ProgramError> {
    if slot.group != 0 {
        return Err(ProgramError::Link(format!(
            "`{}` must be in bind group 0, found group {}",
            VIEW_PROJECTION_UNIFORM, slot.group
        )));
    }
    if slot.binding >= limits.max_bindings_per_bind_group {
        return Err(ProgramError::Link(format!(
            "`{}` binding {} exceeds the device limit of {}",
            VIEW_PROJECTION_UNIFORM, slot.binding, limits.max_bindings_per_bind_group
        )));
    }
    Ok(())
}

/// Compiled and linked cube program.
///
/// Owns the render pipeline, the view-projection uniform buffer and its bind
/// group, and the depth buffer used for depth testing.
pub struct CubeProgram {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
}

impl CubeProgram {
    /// Builds the program from the bundled shaders.
    pub fn bundled(gpu: &GpuContext) -> Result<Self, ProgramError> {
        Self::compile(gpu, VERTEX_SHADER, FRAGMENT_SHADER)
    }

    /// Compiles both stages, resolves the interface and links the pipeline.
    ///
    /// Stops at the first failing step; nothing is left half-built.
    pub fn compile(
        gpu: &GpuContext,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ProgramError> {
        let device = &gpu.device;

        let vertex_module = compile_stage(device, ShaderStage::Vertex, vertex_source)?;
        let fragment_module = compile_stage(device, ShaderStage::Fragment, fragment_source)?;
        let interface = ProgramInterface::resolve(vertex_source)?;
        log::debug!("resolved program interface: {:?}", interface);

        let slot = interface.view_projection;
        check_uniform_slot(slot, &device.limits())?;

        // Everything from here to the pipeline is validated as one unit.
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("View Projection Uniform"),
            size: std::mem::size_of::<ViewProjectionUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("View Projection Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: slot.binding,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("View Projection Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: slot.binding,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let attributes = Vertex::attributes(interface.position, interface.color);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cube Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[Vertex::layout(&attributes)],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        let depth_view = create_depth_view(gpu);

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(ProgramError::Link(err.to_string()));
        }

        log::info!("cube program linked");

        Ok(Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
        })
    }

    /// Depth attachment sized to the surface.
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Uploads the view-projection matrix for the next draw.
    pub fn set_view_projection(&self, queue: &wgpu::Queue, matrix: Mat4) {
        let uniform = ViewProjectionUniform::from(matrix);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Draws the first `count` indices of `mesh` as a triangle list.
    pub fn draw_indexed(&self, render_pass: &mut wgpu::RenderPass<'_>, mesh: &Mesh, count: u32) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        mesh.bind(render_pass);
        render_pass.draw_indexed(0..count.min(mesh.index_count()), 0, 0..1);
    }
}

fn compile_stage(
    device: &wgpu::Device,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule, ProgramError> {
    let label = match stage {
        ShaderStage::Vertex => "Cube Vertex Shader",
        ShaderStage::Fragment => "Cube Fragment Shader",
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(ProgramError::ShaderCompile {
            stage,
            message: err.to_string(),
        }),
        None => Ok(module),
    }
}

fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
    let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: gpu.width(),
            height: gpu.height(),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
