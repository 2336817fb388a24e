//! The animation-loop controller.
//!
//! [`Backdrop`] exclusively owns the particle store, the morph controller,
//! the RNG and the drawing surface. The host drives it through two inbound
//! calls:
//!
//! - [`on_frame_tick`](Backdrop::on_frame_tick) once per display frame,
//! - [`on_resize`](Backdrop::on_resize) whenever the surface changes size,
//!
//! and ends it with [`teardown`](Backdrop::teardown). After teardown neither
//! call has any effect, so a host callback that fires late is harmless.
//!
//! A backdrop whose surface could not be created, or whose config does not
//! validate, is *disabled*: it logs a warning once, holds no particles, and
//! every tick is a silent no-op.

use crate::config::{BackdropConfig, ResizePolicy};
use crate::error::SurfaceError;
use crate::morph::MorphController;
use crate::particles::ParticleStore;
use crate::renderer::{FrameStats, Renderer};
use crate::surface::DrawSurface;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cancellation token for a running backdrop.
///
/// Clones share one flag. Stopping any clone stops the backdrop at its next
/// frame; the flag never resets.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// A handle that has not been stopped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the backdrop to stop.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Whether a stop was requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Animated particle backdrop bound to a drawing surface.
pub struct Backdrop<S: DrawSurface> {
    config: BackdropConfig,
    particles: ParticleStore,
    morph: MorphController,
    renderer: Renderer,
    rng: SmallRng,
    surface: Option<S>,
    center: Vec2,
    stop: StopHandle,
    resize_listening: bool,
    last_frame: FrameStats,
}

impl<S: DrawSurface> Backdrop<S> {
    /// Mount the backdrop on `surface`.
    ///
    /// If the surface failed to materialize, or `config` does not validate,
    /// the backdrop starts disabled and never draws.
    pub fn new(config: BackdropConfig, surface: Result<S, SurfaceError>) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let surface = match (surface, config.validate()) {
            (Ok(surface), Ok(())) => Some(surface),
            (Err(e), _) => {
                warn!(error = %e, "drawing surface unavailable, backdrop disabled");
                None
            }
            (_, Err(e)) => {
                warn!(error = %e, "invalid backdrop config, backdrop disabled");
                None
            }
        };

        // A disabled backdrop never draws, and an invalid spawn rule must not be sampled
        let count = if surface.is_some() {
            config.particle_count
        } else {
            0
        };
        let mut particles = ParticleStore::initialize(count, config.spawn, &mut rng);
        let morph = MorphController::new(&config, &mut rng);
        morph.paint(&mut particles, &mut rng);

        let center = surface
            .as_ref()
            .map(|s| surface_center(s.width(), s.height()))
            .unwrap_or(Vec2::ZERO);

        if let Some(s) = &surface {
            info!(
                particles = particles.len(),
                kind = %morph.current(),
                width = s.width(),
                height = s.height(),
                "backdrop mounted"
            );
        }

        let resize_listening = surface.is_some();
        Self {
            renderer: Renderer::new(&config),
            config,
            particles,
            morph,
            rng,
            surface,
            center,
            stop: StopHandle::new(),
            resize_listening,
            last_frame: FrameStats::default(),
        }
    }

    /// Advance and draw one frame.
    ///
    /// Returns `false` without touching anything when the backdrop is
    /// disabled or stopped.
    pub fn on_frame_tick(&mut self) -> bool {
        if self.stop.is_stopped() {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        self.morph.tick(&mut self.particles, &mut self.rng);
        self.last_frame = self.renderer.render(
            surface,
            &mut self.particles,
            &self.morph,
            self.center,
            &mut self.rng,
        );
        true
    }

    /// Adopt new surface dimensions.
    ///
    /// Zero-area sizes and repeats of the current size are ignored, as is
    /// any call after teardown.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if !self.resize_listening || self.stop.is_stopped() {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if width == 0 || height == 0 {
            debug!(width, height, "ignoring zero-area resize");
            return;
        }
        if surface.width() == width && surface.height() == height {
            return;
        }

        surface.resize(width, height);
        if surface.width() != width || surface.height() != height {
            warn!(
                width,
                height,
                kept_width = surface.width(),
                kept_height = surface.height(),
                "surface refused resize"
            );
            return;
        }
        self.center = surface_center(width, height);
        if self.config.resize_policy == ResizePolicy::Reseed {
            self.particles.reseed(self.config.spawn, &mut self.rng);
        }
        debug!(width, height, "backdrop resized");
    }

    /// Stop the animation and detach from resize notifications.
    ///
    /// Idempotent.
    pub fn teardown(&mut self) {
        if !self.stop.is_stopped() || self.resize_listening {
            debug!(time = self.morph.time(), "backdrop torn down");
        }
        self.stop.stop();
        self.resize_listening = false;
    }

    /// Run up to `frames` ticks, stopping early if the backdrop stops.
    /// Returns the number of frames drawn.
    pub fn run_frames(&mut self, frames: u64) -> u64 {
        let mut drawn = 0;
        for _ in 0..frames {
            if !self.on_frame_tick() {
                break;
            }
            drawn += 1;
        }
        drawn
    }

    /// A token that stops this backdrop from anywhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Whether the backdrop can still draw.
    pub fn is_running(&self) -> bool {
        self.surface.is_some() && !self.stop.is_stopped()
    }

    /// Whether the backdrop was mounted without a usable surface.
    pub fn is_disabled(&self) -> bool {
        self.surface.is_none()
    }

    /// Whether resize notifications are still accepted.
    pub fn is_listening_for_resize(&self) -> bool {
        self.resize_listening && !self.stop.is_stopped()
    }

    /// Projection center in surface pixels.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// The particles.
    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    /// The morph state machine.
    pub fn morph(&self) -> &MorphController {
        &self.morph
    }

    /// The drawing surface, unless disabled.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Counters from the last drawn frame.
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    /// The configuration in use.
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }
}

fn surface_center(width: u32, height: u32) -> Vec2 {
    Vec2::new(width as f32 / 2.0, height as f32 / 2.0)
}
