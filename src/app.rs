//! Native window host for the backdrop.
//!
//! Opens a window, drives one backdrop frame per redraw and presents the
//! software canvas through wgpu. Resizes are forwarded to the backdrop;
//! closing the window (or pressing Escape) tears it down.
//!
//! | Key | Action |
//! |-----|--------|
//! | `S` | Save a PNG snapshot to the working directory |
//! | `Escape` | Close |

use std::sync::Arc;

use tracing::{debug, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::backdrop::Backdrop;
use crate::capture;
use crate::config::BackdropConfig;
use crate::error::AppError;
use crate::gpu::Presenter;
use crate::surface::PixelCanvas;
use crate::time::FrameClock;

const WINDOW_TITLE: &str = "Chaos Backdrop";
const WINDOW_SIZE: (u32, u32) = (1280, 720);

/// Open the window and run until it is closed.
pub fn run(config: BackdropConfig) -> Result<(), AppError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    config: BackdropConfig,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    backdrop: Option<Backdrop<PixelCanvas>>,
    clock: FrameClock,
    error: Option<AppError>,
}

impl App {
    fn new(config: BackdropConfig) -> Self {
        Self {
            config,
            window: None,
            presenter: None,
            backdrop: None,
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(backdrop) = &mut self.backdrop {
            backdrop.teardown();
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(backdrop) = &mut self.backdrop else {
            return;
        };
        if !backdrop.on_frame_tick() {
            return;
        }

        let mut out_of_memory = false;
        if let (Some(presenter), Some(canvas)) = (&mut self.presenter, backdrop.surface()) {
            match presenter.present(canvas) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    presenter.reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => out_of_memory = true,
                Err(e) => warn!(error = %e, "frame not presented"),
            }
        }
        if out_of_memory {
            warn!("GPU out of memory, closing");
            self.close(event_loop);
            return;
        }

        if let Some(fps) = self.clock.tick() {
            debug!(
                fps,
                frame = self.clock.frame(),
                uptime = self.clock.elapsed(),
                "frame rate"
            );
        }
    }

    fn snapshot(&self) {
        let Some(canvas) = self.backdrop.as_ref().and_then(|b| b.surface()) else {
            return;
        };
        let path = capture::snapshot_path(".");
        match capture::save_png(canvas, &path) {
            Ok(()) => info!(path = %path.display(), "snapshot saved"),
            Err(e) => warn!(error = %e, "snapshot failed"),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.logical_key {
            Key::Named(NamedKey::Escape) => self.close(event_loop),
            Key::Character(c) if c.as_str().eq_ignore_ascii_case("s") => self.snapshot(),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.backdrop = Some(Backdrop::new(
            self.config.clone(),
            PixelCanvas::new(size.width, size.height),
        ));

        match pollster::block_on(Presenter::new(window.clone())) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(e) => warn!(error = %e, "GPU unavailable, frames will not be shown"),
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.close(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    if presenter.size() != (size.width, size.height) {
                        presenter.resize(size.width, size.height);
                    }
                }
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.on_resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, event),
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                let running = self.backdrop.as_ref().is_some_and(|b| b.is_running());
                if let Some(window) = self.window.as_ref().filter(|_| running) {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
