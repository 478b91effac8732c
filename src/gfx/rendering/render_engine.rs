//! WGPU-based forward renderer
//!
//! Owns the surface, device and the three shader programs, and turns a
//! [`Scene`] seen through an [`FpsCamera`] into one render pass per frame:
//! objects with the program of the current [`ShadingMode`], then light
//! markers with the emissive light program, then an optional UI overlay.

use wgpu::TextureFormat;

use crate::{
    assets::AssetPaths,
    gfx::{
        camera::FpsCamera,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
            object_bindings::ObjectBindings,
            texture_resource::TextureResource,
        },
        scene::{DrawObject, Scene},
    },
};

use super::{
    pipeline_manager::{PipelineConfig, PipelineManager},
    shader_program::{ShaderError, ShaderProgram},
    shading::{frame_plan, DrawTarget, ProgramKind, ShadingMode},
};

#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("failed to create window surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("render pipeline '{0}' is not available")]
    MissingPipeline(&'static str),
    #[error("failed to acquire frame: {0}")]
    Frame(#[from] wgpu::SurfaceError),
}

/// Draw totals of the last rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub triangles: usize,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    object_bindings: ObjectBindings,
    default_texture: TextureResource,
    shading_mode: ShadingMode,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Initializes wgpu, configures the surface and depth buffer, and compiles
    /// the flat, Phong and light-marker programs from `assets`.
    ///
    /// # Errors
    /// Fails when no adapter or device is available or when any shader file
    /// cannot be read or compiled.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        assets: &AssetPaths,
        vsync: bool,
    ) -> Result<RenderEngine, RendererError> {
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
        log::info!("Using adapter: {}", adapter.get_info().name);

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
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RendererError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync),
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
            TextureResource::create_depth_texture(&device, &config, "depth_texture");
        TextureResource::log_max_texture_slots(&device);

        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        let object_bindings = ObjectBindings::new(&device);
        let default_texture = TextureResource::create_default_white(&device, &queue);

        let mut pipeline_manager = PipelineManager::new(device.clone());
        for kind in ProgramKind::ALL {
            let program = ShaderProgram::from_files(&device, kind.label(), &assets.program_sources(kind))?;
            pipeline_manager.add_program(program);
            pipeline_manager.register_pipeline(
                kind.label(),
                PipelineConfig::default_with_program(kind.label())
                    .with_label(&format!("{} Pipeline", kind.label()))
                    .with_bind_group_layouts(vec![
                        global_bindings.bind_group_layout().clone(),
                        object_bindings.bind_group_layout().clone(),
                    ])
                    .with_color_format(format),
            );
        }
        pipeline_manager.create_all_pipelines()?;
        let pipeline_stats = pipeline_manager.get_stats();
        log::info!(
            "Shaders loaded from {} ({} programs, {} pipelines)",
            assets.shader_dir().display(),
            pipeline_stats.loaded_programs,
            pipeline_stats.total_pipelines
        );

        log::info!(
            "Renderer initialised ({}x{}, {:?}, vsync {})",
            config.width,
            config.height,
            format,
            vsync
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            object_bindings,
            default_texture,
            shading_mode: ShadingMode::default(),
            clear_color: wgpu::Color {
                r: 0.9,
                g: 0.9,
                b: 0.9,
                a: 1.0,
            },
        })
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.shading_mode
    }

    pub fn set_shading_mode(&mut self, mode: ShadingMode) {
        if mode != self.shading_mode {
            log::info!("Shading mode: {}", mode.label());
        }
        self.shading_mode = mode;
    }

    pub fn toggle_shading_mode(&mut self) -> ShadingMode {
        self.set_shading_mode(self.shading_mode.toggled());
        self.shading_mode
    }

    pub fn set_clear_color(&mut self, color: [f32; 3]) {
        self.clear_color = wgpu::Color {
            r: color[0] as f64,
            g: color[1] as f64,
            b: color[2] as f64,
            a: 1.0,
        };
    }

    /// Renders one frame with an optional UI overlay
    ///
    /// Frame-global uniforms are uploaded once, objects are drawn in
    /// insertion order with the program of the current shading mode, light
    /// markers follow with the light program, then the UI callback records
    /// its pass into the same encoder before submission.
    ///
    /// # Errors
    /// A lost or outdated surface is reconfigured and the frame skipped;
    /// other surface failures are returned.
    pub fn render_scene<F>(
        &mut self,
        scene: &mut Scene,
        camera: &FpsCamera,
        ui_callback: Option<F>,
    ) -> Result<FrameStats, RendererError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameStats::default());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring the next frame");
                return Ok(FrameStats::default());
            }
            Err(error) => return Err(error.into()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        update_global_ubo(&mut self.global_ubo, &self.queue, camera, scene);
        scene.prepare_gpu(
            &self.device,
            &self.queue,
            &self.object_bindings,
            &self.default_texture,
        );
        let scene: &Scene = scene;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let mut stats = FrameStats::default();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
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

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            let mut bound: Option<ProgramKind> = None;
            for command in frame_plan(scene, self.shading_mode) {
                if bound != Some(command.program) {
                    let label = command.program.label();
                    let pipeline = self
                        .pipeline_manager
                        .get_pipeline(label)
                        .ok_or(RendererError::MissingPipeline(label))?;
                    render_pass.set_pipeline(pipeline);
                    bound = Some(command.program);
                }

                let object = match command.target {
                    DrawTarget::Object(handle) => scene.object(handle),
                    DrawTarget::Light(handle) => scene.light(handle).map(|light| &light.marker),
                };
                if let Some(object) = object {
                    if render_pass.draw_object(object) {
                        stats.draw_calls += 1;
                        stats.triangles += object.mesh().triangle_count();
                    }
                }
            }
        }

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

        Ok(stats)
    }

    /// Convenience method for rendering without UI
    pub fn render_scene_simple(
        &mut self,
        scene: &mut Scene,
        camera: &FpsCamera,
    ) -> Result<FrameStats, RendererError> {
        self.render_scene(
            scene,
            camera,
            None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
        )
    }

    /// Resizes the surface and depth buffer
    ///
    /// Zero-sized requests (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }

        self.config.width = width;
        self.config.height = height;

        // Reconfigure surface with new dimensions
        self.surface.configure(&self.device, &self.config);

        // Recreate depth texture to match new surface size
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    ///
    /// Used for creating compatible render targets and UI systems.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Loads an image texture for sharing between objects
    pub fn load_texture(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<TextureResource, crate::gfx::resources::TextureError> {
        TextureResource::from_image_path(&self.device, &self.queue, path)
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}
