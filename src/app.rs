//! Windowed host for a show.
//!
//! Controls:
//!
//! | Input | Action |
//! |-------|--------|
//! | Left click | launch a burst |
//! | Left drag | orbit the camera |
//! | Wheel | zoom |
//! | Space | pause / resume |
//! | C | clear every burst |
//! | Escape | quit |

use std::sync::Arc;

use glam::Vec2;
use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::config::ShowConfig;
use crate::error::AppError;
use crate::gpu::{Camera, GpuBackend};
use crate::show::FireworkShow;
use crate::textures::TexturePalette;
use crate::time::{Clock, Time};
use crate::trigger::Trigger;
use crate::uniforms;

/// Pointer travel, in pixels, beyond which a press counts as a drag.
const CLICK_SLOP: f64 = 4.0;
const ORBIT_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.3;

/// Left-button state, telling clicks apart from orbit drags.
#[derive(Debug, Default)]
struct Pointer {
    pressed: bool,
    dragged: bool,
    press_pos: Option<(f64, f64)>,
    last_pos: Option<(f64, f64)>,
}

impl Pointer {
    fn press(&mut self) {
        self.pressed = true;
        self.dragged = false;
        self.press_pos = self.last_pos;
    }

    /// Returns `true` when the press ended without dragging.
    fn release(&mut self) -> bool {
        let click = self.pressed && !self.dragged;
        self.pressed = false;
        self.press_pos = None;
        click
    }

    /// Returns the pointer travel to orbit by, if the button is held.
    fn moved(&mut self, x: f64, y: f64) -> Option<(f32, f32)> {
        let previous = self.last_pos.replace((x, y));
        if !self.pressed {
            return None;
        }
        // No position was known at press time; anchor on the first move.
        let (px, py) = *self.press_pos.get_or_insert((x, y));
        if (x - px).hypot(y - py) > CLICK_SLOP {
            self.dragged = true;
        }
        previous.map(|(last_x, last_y)| ((x - last_x) as f32, (y - last_y) as f32))
    }
}

struct App {
    config: ShowConfig,
    palette: TexturePalette,
    window: Option<Arc<Window>>,
    gpu: Option<GpuBackend>,
    show: Option<FireworkShow<GpuBackend>>,
    camera: Camera,
    time: Time,
    pointer: Pointer,
    error: Option<AppError>,
}

impl App {
    fn new(config: ShowConfig, palette: TexturePalette) -> Self {
        let camera = Camera::from_config(&config.view);
        let mut time = Time::new();
        time.set_time_scale(config.time_scale);
        Self {
            config,
            palette,
            window: None,
            gpu: None,
            show: None,
            camera,
            time,
            pointer: Pointer::default(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.view.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.view.width,
                self.config.view.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuBackend::new(window.clone(), &self.palette))?;
        let show = FireworkShow::new(&self.config, self.palette.len(), resolution_of(&window));

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.show = Some(show);
        self.time.reset();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!(error = %err, "fatal");
        self.error = Some(err);
        event_loop.exit();
    }

    fn on_pointer_button(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => self.pointer.press(),
            ElementState::Released => {
                if self.pointer.release() {
                    if let Some(show) = &mut self.show {
                        show.trigger(Trigger::Click);
                    }
                }
            }
        }
    }

    fn on_pointer_moved(&mut self, x: f64, y: f64) {
        if let Some((dx, dy)) = self.pointer.moved(x, y) {
            self.camera.rotate(-dx * ORBIT_SPEED, dy * ORBIT_SPEED);
        }
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.logical_key {
            Key::Named(NamedKey::Escape) => event_loop.exit(),
            Key::Named(NamedKey::Space) => {
                self.time.toggle_pause();
                info!(paused = self.time.is_paused(), "toggled pause");
            }
            Key::Character(c) if c.eq_ignore_ascii_case("c") => {
                if let (Some(show), Some(gpu)) = (&mut self.show, &mut self.gpu) {
                    show.shutdown(gpu);
                }
            }
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.time.tick();
        self.camera.update();

        let (Some(show), Some(gpu)) = (&mut self.show, &mut self.gpu) else {
            return;
        };
        show.tick(frame.delta, gpu);

        match gpu.render(show.scene(), show.manager(), &self.camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => warn!(error = %e, "render error"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if let (Some(show), Some(gpu), Some(window)) =
                    (&mut self.show, &mut self.gpu, &self.window)
                {
                    show.resize(resolution_of(window), gpu);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.on_pointer_button(state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_pointer_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.camera.zoom(scroll * ZOOM_SPEED);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.on_key(event_loop, event);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let (Some(show), Some(gpu)) = (&mut self.show, &mut self.gpu) {
            show.shutdown(gpu);
        }
    }
}

/// Shading resolution for the window's current size and scale factor.
fn resolution_of(window: &Window) -> Vec2 {
    let scale = window.scale_factor();
    let logical = window.inner_size().to_logical::<f32>(scale);
    uniforms::resolution(Vec2::new(logical.width, logical.height), scale as f32)
}

/// Open a window and run the show until it is closed.
pub fn run(config: ShowConfig) -> Result<(), AppError> {
    let palette = match &config.textures {
        Some(dir) => TexturePalette::load_dir(dir)?,
        None => TexturePalette::procedural(),
    };
    info!(sprites = palette.len(), "sprite palette ready");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, palette);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
