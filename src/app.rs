use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    assets::AssetPaths,
    config::DemoConfig,
    demo::DemoScene,
    gfx::{
        camera::{CameraController, FpsCamera},
        rendering::RenderEngine,
    },
    input::InputState,
    performance::{FrameClock, PerformanceMonitor},
    ui::{overlay_panel, OverlayInfo, UiManager},
};

// UI callback type
pub type UiCallback = Box<dyn FnMut(&imgui::Ui)>;

/// The demo application: window, renderer, scene and frame loop
pub struct RuyaApp {
    config: DemoConfig,
    ui_callback: Option<UiCallback>,
}

/// Everything that needs a live window
struct Runtime {
    window: Arc<Window>,
    renderer: RenderEngine,
    ui: UiManager,
    demo: DemoScene,
}

struct AppState {
    config: DemoConfig,
    runtime: Option<Runtime>,
    camera: FpsCamera,
    controller: CameraController,
    input: InputState,
    clock: FrameClock,
    monitor: PerformanceMonitor,
    help: Vec<String>,
    cursor_captured: bool,
    ui_callback: Option<UiCallback>,
    error: Option<anyhow::Error>,
}

impl RuyaApp {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            config,
            ui_callback: None,
        }
    }

    /// Adds a UI callback drawn after the default overlay panel
    pub fn set_ui<F>(&mut self, ui_fn: F)
    where
        F: FnMut(&imgui::Ui) + 'static,
    {
        self.ui_callback = Some(Box::new(ui_fn));
    }

    /// Runs the event loop until the window closes
    ///
    /// # Errors
    /// Startup failures (missing assets, no GPU, shader or texture errors) and
    /// unrecoverable frame errors end the loop and are returned here.
    pub fn run(self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState::new(self.config, self.ui_callback);
        event_loop
            .run_app(&mut state)
            .context("event loop terminated abnormally")?;

        match state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for RuyaApp {
    fn default() -> Self {
        Self::new(DemoConfig::default())
    }
}

impl AppState {
    fn new(config: DemoConfig, ui_callback: Option<UiCallback>) -> Self {
        let camera = FpsCamera::new(config.camera_position, config.aspect_ratio());
        let controller = CameraController::new(config.move_speed, config.turn_speed)
            .with_bindings(config.key_bindings.clone());
        let monitor = PerformanceMonitor::new(config.report_interval);
        let help = config.key_bindings.help_lines();

        Self {
            config,
            runtime: None,
            camera,
            controller,
            input: InputState::new(),
            clock: FrameClock::new(),
            monitor,
            help,
            cursor_captured: false,
            ui_callback,
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<Runtime> {
        let assets = AssetPaths::resolve().context("failed to locate shaders and resources")?;

        let (width, height) = self.config.window_size;
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(width, height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let mut renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            size.width,
            size.height,
            &assets,
            self.config.vsync,
        ))
        .context("failed to initialise the renderer")?;
        renderer.set_clear_color(self.config.background);
        self.camera.set_aspect(size.width, size.height);

        let mut ui = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );
        ui.update_display_size(size.width, size.height);

        let demo = DemoScene::load(&renderer, &assets)?;

        Ok(Runtime {
            window,
            renderer,
            ui,
            demo,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.error = Some(error);
        event_loop.exit();
    }

    fn set_cursor_capture(&mut self, captured: bool) {
        let Some(runtime) = self.runtime.as_ref() else {
            return;
        };

        apply_cursor_capture(&runtime.window, captured);
        self.cursor_captured = captured;
        self.controller.set_mouse_look(captured);
    }

    /// One frame: input, animation, render, statistics
    fn redraw(&mut self) -> anyhow::Result<()> {
        let dt = self.clock.tick();
        let actions = self
            .controller
            .update_camera(&self.input, &mut self.camera, dt);

        if actions.toggle_cursor_capture {
            self.set_cursor_capture(!self.cursor_captured);
        }

        let Some(runtime) = self.runtime.as_mut() else {
            return Ok(());
        };

        if actions.toggle_shading {
            runtime.renderer.toggle_shading_mode();
        }
        runtime.demo.animate(self.clock.elapsed_secs());

        let mut shading_mode = runtime.renderer.shading_mode();
        let mut mode_changed = false;
        let info = OverlayInfo {
            camera: &self.camera,
            scene: runtime.demo.scene.stats(),
            performance: &self.monitor,
            help: &self.help,
            cursor_captured: self.cursor_captured,
        };
        let window = &runtime.window;
        let ui = &mut runtime.ui;
        let user_ui = &mut self.ui_callback;

        let stats = runtime
            .renderer
            .render_scene(
                &mut runtime.demo.scene,
                &self.camera,
                Some(
                    |device: &wgpu::Device,
                     queue: &wgpu::Queue,
                     encoder: &mut wgpu::CommandEncoder,
                     color_attachment: &wgpu::TextureView| {
                        ui.draw(device, queue, encoder, window, color_attachment, |frame| {
                            mode_changed = overlay_panel(frame, &info, &mut shading_mode);
                            if let Some(callback) = user_ui.as_mut() {
                                callback(frame);
                            }
                        });
                    },
                ),
            )
            .context("failed to render frame")?;

        if mode_changed {
            runtime.renderer.set_shading_mode(shading_mode);
        }

        self.monitor
            .update_render_stats(stats.draw_calls, stats.triangles);
        if let Some(report) = self
            .monitor
            .record_frame(Duration::from_secs_f32(dt), Instant::now())
        {
            let (cursor_x, cursor_y) = self.input.cursor();
            log::info!(
                "FPS: {:.1} ({} frames), elapsed {:.1}s, cursor ({:.0}, {:.0})",
                report.fps,
                report.frames,
                self.clock.elapsed_secs(),
                cursor_x,
                cursor_y
            );
        }

        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.runtime.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(runtime) => {
                self.runtime = Some(runtime);
                self.set_cursor_capture(true);
                self.clock = FrameClock::new();
            }
            Err(error) => self.fail(event_loop, error),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(runtime) = self.runtime.as_mut() else {
            return;
        };

        // The overlay only sees input while the cursor is released
        let ui_wants_input = !self.cursor_captured
            && runtime
                .ui
                .handle_input(&runtime.window, window_id, &event);

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                    && key_event.state.is_pressed()
                {
                    event_loop.exit();
                    return;
                }
                // Releases always go through so no key stays held
                if !ui_wants_input || !key_event.state.is_pressed() {
                    self.input.process_keyboard_event(&key_event);
                }
            }
            WindowEvent::Focused(false) => {
                self.input.clear_keys();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if width > 0 && height > 0 {
                    self.camera.set_aspect(width, height);
                    runtime.ui.update_display_size(width, height);
                }
                runtime.renderer.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(error) = self.redraw() {
                    self.fail(event_loop, error);
                }
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if !self.cursor_captured {
            return;
        }

        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_motion(delta);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(runtime) = self.runtime.as_ref() {
            runtime.window.request_redraw();
        }
    }
}

fn apply_cursor_capture(window: &Window, captured: bool) {
    let result = if captured {
        window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };

    if let Err(error) = result {
        log::warn!("Cursor grab change failed: {}", error);
    }
    window.set_cursor_visible(!captured);
}
