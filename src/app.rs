use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::camera::CameraState;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::frame::{FrameDriver, GpuFrame};
use crate::gpu::GpuContext;
use crate::input::ScaleControl;
use crate::mesh::Mesh;
use crate::program::CubeProgram;

/// Opens the window and runs the spinning cube until the window is closed.
///
/// Setup happens when the event loop first resumes: GPU context, then the
/// program, then the mesh upload, then the frame driver. If any step fails the
/// loop exits and the error is returned; nothing after the failing step is
/// created.
///
/// # Example
/// ```no_run
/// use colorcube::{AppConfig, run};
///
/// run(AppConfig::new().title("Cube").size(800, 800)).unwrap();
/// ```
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = CubeApp::Pending { config };
    event_loop.run_app(&mut app)?;

    match app {
        CubeApp::Failed(err) => Err(err),
        _ => Ok(()),
    }
}

/// Everything that exists once setup succeeded.
struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    program: CubeProgram,
    mesh: Mesh,
    driver: FrameDriver,
    scale_control: ScaleControl,
    clear_color: wgpu::Color,
}

enum CubeApp {
    Pending { config: AppConfig },
    Running(Box<Running>),
    Failed(AppError),
}

impl CubeApp {
    fn start(config: &AppConfig, event_loop: &ActiveEventLoop) -> Result<Running, AppError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;
        let program = CubeProgram::bundled(&gpu)?;
        let mesh = Mesh::cube(&gpu);
        let camera = CameraState::new(gpu.aspect());
        let driver = FrameDriver::new(camera, &config.animation);

        log::info!(
            "viewport {}x{}, press A to grow and D to shrink the cube",
            gpu.width(),
            gpu.height()
        );

        Ok(Running {
            window,
            gpu,
            program,
            mesh,
            driver,
            scale_control: ScaleControl::from_config(&config.animation),
            clear_color: config.clear_color,
        })
    }
}

impl Running {
    fn redraw(&mut self) -> Result<(), AppError> {
        match GpuFrame::begin(&self.gpu, &self.program, &self.mesh, self.clear_color) {
            Ok(mut frame) => {
                self.driver.render(&mut frame);
                frame.finish();
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(AppError::OutOfMemory),
            Err(err) => log::warn!("skipping frame: {}", err),
        }
        Ok(())
    }
}

impl ApplicationHandler for CubeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let CubeApp::Pending { config } = self else {
            return;
        };

        *self = match Self::start(config, event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                CubeApp::Running(Box::new(running))
            }
            Err(err) => {
                log::error!("initialization failed: {}", err);
                event_loop.exit();
                CubeApp::Failed(err)
            }
        };
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let CubeApp::Running(app) = self else {
            return;
        };

        app.scale_control
            .handle_event(&event, app.driver.animation_mut());

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = app.redraw() {
                    log::error!("{}", err);
                    event_loop.exit();
                    *self = CubeApp::Failed(err);
                    return;
                }
                app.window.request_redraw();
            }
            _ => {}
        }
    }
}
