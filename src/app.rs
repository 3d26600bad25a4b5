use std::{sync::Arc, time::Instant};

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::ViewerConfig,
    court::Showcase,
    gfx::{camera::CameraManager, rendering::RenderEngine},
    performance::PerformanceMonitor,
    ui::{courtside_panel, ShowcaseAction, UiManager},
};

/// Longest step fed to the showcase, so a stalled frame does not skip animations
const MAX_FRAME_DT: f32 = 0.1;

/// Installs `env_logger`, defaulting to `info` for this crate and `warn` elsewhere
///
/// `RUST_LOG` overrides the default. Calling this more than once is harmless.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn,courtside=info");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}

/// The viewer: one window showing the court showcase with its control panel
pub struct CourtsideApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

/// Window-bound resources, created once the event loop resumes
struct GpuState {
    window: Arc<Window>,
    render_engine: RenderEngine,
    ui_manager: UiManager,
}

struct AppState {
    config: ViewerConfig,
    gpu: Option<GpuState>,
    camera_manager: CameraManager,
    showcase: Showcase,
    monitor: PerformanceMonitor,
    last_frame: Instant,
    error: Option<anyhow::Error>,
}

impl CourtsideApp {
    /// Validates the configuration and builds the showcase scene
    ///
    /// No window exists until [`CourtsideApp::run`].
    pub fn new(config: ViewerConfig) -> anyhow::Result<Self> {
        init_logging();
        config.validate().context("invalid viewer configuration")?;

        let showcase = Showcase::new().context("failed to build the showcase scene")?;
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        let aspect = config.window.width as f32 / config.window.height as f32;
        let camera_manager = CameraManager::from_config(&config, aspect);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                gpu: None,
                camera_manager,
                showcase,
                monitor: PerformanceMonitor::new(),
                last_frame: Instant::now(),
                error: None,
            },
        })
    }

    /// Run the application (consumes self and starts the event loop)
    ///
    /// # Returns
    /// The first fatal error raised while setting up the window or GPU
    pub fn run(mut self) -> anyhow::Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated abnormally")?;

        match self.app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn create_gpu_state(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<GpuState> {
        let window = &self.config.window;
        let attributes = WindowAttributes::default()
            .with_title(window.title.clone())
            .with_inner_size(LogicalSize::new(window.width, window.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let (width, height) = window.inner_size().into();
        let render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            &self.config.renderer,
            self.config.window.vsync,
            self.showcase.scene().lights(),
        ))
        .context("failed to initialise the renderer")?;

        let ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );

        Ok(GpuState {
            window,
            render_engine,
            ui_manager,
        })
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if self.camera_manager.process_keyboard_event(event) {
            return;
        }
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };

        if key_code == KeyCode::Escape {
            log::info!("Escape pressed, exiting");
            event_loop.exit();
        } else if let Some(action) = ShowcaseAction::from_key(key_code) {
            action.apply(&mut self.showcase);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera_manager.resize(width, height);
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.render_engine.resize(width, height);
            gpu.ui_manager.update_display_size(width, height);
        }
    }

    /// One tick: camera, showcase update, UI, draw
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        self.monitor.begin_frame();

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;

        self.camera_manager.update();
        self.showcase.update(dt);

        let stats = self.showcase.scene().statistics();
        self.monitor
            .update_render_stats(stats.mesh_count as u32, stats.total_vertices as u32);

        let mut clicked = None;
        let (showcase, monitor) = (&self.showcase, &self.monitor);
        gpu.ui_manager.update_logic(&gpu.window, |ui| {
            clicked = courtside_panel(ui, showcase, monitor);
        });
        if let Some(action) = clicked {
            action.apply(&mut self.showcase);
        }

        gpu.render_engine.update(
            &self.camera_manager.camera.uniform,
            self.showcase.scene().lights(),
        );

        let ui_manager = &mut gpu.ui_manager;
        let result = gpu.render_engine.render_frame(
            self.showcase.scene_mut(),
            Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 view: &wgpu::TextureView| {
                    ui_manager.render(device, queue, encoder, view);
                },
            ),
        );

        if result.is_err() {
            // the overlay never reached the encoder; close the ImGui frame anyway
            gpu.ui_manager.discard_frame();
        }
        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                gpu.render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Skipping frame: {}", e),
        }

        self.monitor.end_frame();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.create_gpu_state(event_loop) {
            Ok(gpu) => {
                let PhysicalSize { width, height } = gpu.window.inner_size();
                self.gpu = Some(gpu);
                self.resize(width, height);
                self.last_frame = Instant::now();
                log::info!("Window ready ({}x{})", width, height);
            }
            Err(error) => {
                log::error!("{:#}", error);
                self.error = Some(error);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        // UI gets first look at input
        if gpu.ui_manager.handle_input(&gpu.window, window_id, &event) {
            self.camera_manager.controller.release();
            return;
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Resized(PhysicalSize { width, height }) => self.resize(width, height),
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        // Camera motion is ignored while the UI owns the pointer
        if let Some(gpu) = self.gpu.as_ref() {
            if gpu.ui_manager.wants_input() {
                self.camera_manager.controller.release();
                return;
            }
        }

        self.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = self.gpu.as_ref() {
            gpu.window.request_redraw();
        }
    }
}
