//! WGPU-based rendering engine for the court scene
//!
//! Owns the surface, device, depth buffers and pipelines. Each frame runs a
//! depth-only shadow pass from the key light, then the main Lambert pass
//! (opaque, wireframe, then transparent back to front), then the optional UI
//! overlay.

use std::sync::Arc;

use cgmath::Vector3;
use wgpu::{Device, TextureFormat};

use crate::{
    config::RendererConfig,
    error::CourtsideError,
    gfx::{
        camera::camera_utils::CameraUniform,
        resources::{
            global_bindings::{GlobalBindings, GlobalUBO, GlobalUBOContent, ShadowBindings},
            material::{Material, MaterialBindings},
            texture_resource::TextureResource,
        },
        scene::{Light, Scene},
    },
};

use super::{
    gpu_scene::{plan_draws, DrawGeometry, DrawKind, GpuScene},
    pipeline_manager::{PipelineConfig, PipelineManager},
};

/// Pipeline used for a draw of the given kind
pub fn pipeline_name(kind: DrawKind, mirrored: bool) -> &'static str {
    match (kind, mirrored) {
        (DrawKind::Opaque, false) => "Lambert",
        (DrawKind::Opaque, true) => "LambertMirrored",
        (DrawKind::Transparent, false) => "LambertTransparent",
        (DrawKind::Transparent, true) => "LambertTransparentMirrored",
        (DrawKind::Wireframe, _) => "Wireframe",
    }
}

/// Fifo when vsync is on or immediate presentation is unsupported
pub fn select_present_mode(vsync: bool, supported: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if !vsync && supported.contains(&wgpu::PresentMode::Immediate) {
        wgpu::PresentMode::Immediate
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// Core rendering engine managing GPU resources and draw calls
///
/// The RenderEngine handles all low-level graphics operations including:
/// - Surface and device management
/// - Pipeline creation and management
/// - Depth buffer handling
/// - Shadow mapping from the key light
/// - Camera and light uniform updates
/// - UI overlay rendering
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    material_bindings: MaterialBindings,
    gpu_scene: GpuScene,

    // Shadow mapping resources
    shadow_map: TextureResource,
    shadow_bindings: ShadowBindings,
    shadow_map_size: u32,
    shadows_enabled: bool,

    exposure: f32,
    eye: Vector3<f32>,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// The shadow map takes its size from `renderer.shadow_map_size` when set,
    /// otherwise from the first shadow-casting light in `lights`.
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `renderer` - Exposure and shadow settings
    /// * `vsync` - Initial presentation mode
    /// * `lights` - Scene lights used to size the shadow map
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        renderer: &RendererConfig,
        vsync: bool,
        lights: &[Light],
    ) -> Result<RenderEngine, CourtsideError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(CourtsideError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: select_present_mode(vsync, &surface_capabilities.present_modes),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, config.width, config.height, "depth_texture");

        let requested_shadow = renderer
            .shadow_map_size
            .or_else(|| lights.iter().find_map(|l| l.shadow().map(|s| s.map_size)));
        let shadows_enabled = lights.iter().any(|l| l.shadow().is_some());
        let shadow_map_size = requested_shadow
            .unwrap_or(1)
            .clamp(1, device.limits().max_texture_dimension_2d);
        let shadow_map = TextureResource::create_shadow_map(&device, shadow_map_size);
        log::debug!(
            "Shadow map {}x{} ({})",
            shadow_map_size,
            shadow_map_size,
            if shadows_enabled { "enabled" } else { "disabled" }
        );

        let global_ubo = GlobalUBO::new_with_data(
            &device,
            &GlobalUBOContent::new(&CameraUniform::default(), lights, renderer.exposure),
        );
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let shadow_bindings = ShadowBindings::new(&device, &shadow_map);
        let material_bindings = MaterialBindings::new(&device);
        let gpu_scene = GpuScene::new(&device);

        let globals_layout = global_bindings.bind_group_layouts().clone();
        let transform_layout = gpu_scene.transform_bindings().bind_group_layouts().clone();
        let material_layout = material_bindings.bind_group_layouts().clone();
        let shadow_layout = shadow_bindings.bind_group_layouts().clone();

        // Wrap device and queue in Arc for pipeline manager
        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("lambert", include_str!("lambert.wgsl"));
        pipeline_manager.load_shader("shadow", include_str!("shadow_pass.wgsl"));

        // no culling in the shadow pass so open shells still cast shadows
        pipeline_manager.register_pipeline(
            "Shadow",
            PipelineConfig::default()
                .with_label("SHADOW")
                .with_shader("shadow")
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_cull_mode(None)
                .with_vertex_only()
                .with_bind_group_layouts(vec![globals_layout.clone(), transform_layout.clone()])
                .with_color_targets(vec![]),
        );

        let main_layouts = vec![globals_layout, transform_layout, material_layout, shadow_layout];
        let opaque_target = vec![Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })];
        let blended_target = vec![Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        })];
        let lambert = PipelineConfig::default()
            .with_shader("lambert")
            .with_depth_format(TextureResource::DEPTH_FORMAT)
            .with_bind_group_layouts(main_layouts);

        for (kind, mirrored) in [
            (DrawKind::Opaque, false),
            (DrawKind::Opaque, true),
            (DrawKind::Transparent, false),
            (DrawKind::Transparent, true),
        ] {
            let name = pipeline_name(kind, mirrored);
            let mut config = lambert.clone().with_label(name);
            if mirrored {
                config = config.with_front_face(wgpu::FrontFace::Cw);
            }
            config = if kind == DrawKind::Transparent {
                config
                    .without_depth_write()
                    .with_color_targets(blended_target.clone())
            } else {
                config.with_color_targets(opaque_target.clone())
            };
            pipeline_manager.register_pipeline(name, config);
        }

        // blended so translucent materials stay translucent in wireframe mode
        pipeline_manager.register_pipeline(
            "Wireframe",
            lambert
                .with_label("Wireframe")
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None)
                .with_color_targets(blended_target),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in errors {
                log::error!("{}", error);
            }
        }
        log::debug!("{:?}", pipeline_manager.get_stats());

        Ok(RenderEngine {
            device: device_handle,
            config,
            format,
            surface,
            queue: queue_handle,
            depth_texture,
            pipeline_manager,
            global_bindings,
            global_ubo,
            material_bindings,
            gpu_scene,
            shadow_map,
            shadow_bindings,
            shadow_map_size,
            shadows_enabled,
            exposure: renderer.exposure,
            eye: Vector3::new(0.0, 0.0, 0.0),
        })
    }

    /// Updates camera and light uniform buffers
    ///
    /// Should be called each frame after the camera update.
    ///
    /// # Arguments
    /// * `camera_uniform` - Updated camera uniform data
    /// * `lights` - Current scene lights
    pub fn update(&mut self, camera_uniform: &CameraUniform, lights: &[Light]) {
        let mut content = GlobalUBOContent::new(camera_uniform, lights, self.exposure);
        content.params[2] = if self.shadows_enabled && content.params[2] > 0.0 {
            self.shadow_map_size as f32
        } else {
            0.0
        };
        self.global_ubo.update_content(&self.queue, content);

        let [x, y, z, _] = camera_uniform.view_position;
        self.eye = Vector3::new(x, y, z);
    }

    /// Renders a frame with an optional UI overlay
    ///
    /// Uploads new geometry, material edits and world transforms first, so
    /// the scene is borrowed mutably.
    ///
    /// # Arguments
    /// * `scene` - Scene to draw
    /// * `ui_callback` - Optional function that renders UI elements
    ///
    /// # Returns
    /// The surface error when no frame could be acquired
    pub fn render_frame<F>(
        &mut self,
        scene: &mut Scene,
        ui_callback: Option<F>,
    ) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        scene
            .material_manager
            .update_all_gpu_resources(&self.device, &self.queue, &self.material_bindings);
        self.gpu_scene.sync(&self.device, &self.queue, scene);
        let scene: &Scene = scene;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // PASS 1: Shadow depth from the key light
        if self.shadows_enabled {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Depth Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = self.pipeline_manager.pipeline("Shadow") {
                shadow_pass.set_pipeline(pipeline);
                shadow_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);

                for mesh in self.gpu_scene.meshes() {
                    if !(mesh.visible && mesh.cast_shadow) {
                        continue;
                    }
                    if let Some(geometry) = self.gpu_scene.geometry(mesh.geometry) {
                        shadow_pass.set_bind_group(1, mesh.bind_group(), &[]);
                        shadow_pass.draw_geometry(geometry);
                    }
                }
            }
        }

        // PASS 2: Main rendering with shadows
        {
            let [r, g, b] = scene.background.to_linear();
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let draws = plan_draws(self.gpu_scene.draw_entries(scene, self.eye));
            let mut current: Option<&str> = None;

            for draw in draws {
                let mesh = &self.gpu_scene.meshes()[draw.mesh];
                let Some(material_bind_group) =
                    scene.material(mesh.material).and_then(Material::bind_group)
                else {
                    log::trace!("Skipping mesh without material GPU resources");
                    continue;
                };
                let Some(geometry) = self.gpu_scene.geometry(mesh.geometry) else {
                    continue;
                };

                let name = pipeline_name(draw.kind, draw.mirrored);
                if current != Some(name) {
                    let Some(pipeline) = self.pipeline_manager.pipeline(name) else {
                        continue;
                    };
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);
                    render_pass.set_bind_group(3, self.shadow_bindings.bind_groups(), &[]);
                    current = Some(name);
                }

                render_pass.set_bind_group(1, mesh.bind_group(), &[]);
                render_pass.set_bind_group(2, material_bind_group, &[]);
                if draw.kind == DrawKind::Wireframe {
                    render_pass.draw_geometry_lines(geometry);
                } else {
                    render_pass.draw_geometry(geometry);
                }
            }
        }

        // PASS 3: UI overlay (if provided)
        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Resizes the render engine surface and recreates depth buffer
    ///
    /// Zero sizes (minimised windows) are ignored. The shadow map keeps its
    /// fixed resolution.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, width, height, "depth_texture");
    }

    /// Configures the surface again after it was lost or became outdated
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Returns reference to the wgpu device
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns reference to the wgpu command queue
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    ///
    /// Used for creating compatible render targets and UI systems.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
