//! Per-frame integration, projection and drawing.
//!
//! A frame is drawn in two passes over the surface:
//!
//! 1. A low-alpha wash of the background color. Previous frames fade
//!    instead of being cleared, which leaves the glowing trails.
//! 2. For every particle: step it along the (possibly blended) field,
//!    respawn it if it escaped, project it through the orbit camera and
//!    draw a small square.

use crate::config::BackdropConfig;
use crate::equations::EquationKind;
use crate::morph::MorphController;
use crate::particles::ParticleStore;
use crate::surface::DrawSurface;
use crate::theme::Rgb;
use glam::{Vec2, Vec3};
use rand::Rng;

/// Counters for one drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Particles that produced a visible square.
    pub drawn: usize,
    /// Particles behind the eye or too faint to draw.
    pub culled: usize,
    /// Particles that escaped the bound radius (or went non-finite).
    pub respawned: usize,
    /// Off-screen particles pulled back in for a drifting field.
    pub reseeded: usize,
}

/// Advance one particle by `velocity`.
///
/// The step is `velocity * step_multiplier`, clamped per axis when a speed
/// limit is set. A result that is non-finite or farther than the bound
/// radius is replaced with a fresh sample of the respawn rule. Returns the
/// new position and whether it was respawned.
pub fn step_particle<R: Rng + ?Sized>(
    position: Vec3,
    velocity: Vec3,
    config: &BackdropConfig,
    rng: &mut R,
) -> (Vec3, bool) {
    let mut step = velocity * config.step_multiplier;
    if let Some(limit) = config.speed_limit {
        step = step.clamp(Vec3::splat(-limit), Vec3::splat(limit));
    }
    let next = position + step;

    let bound = config.bound_radius;
    if !next.is_finite() || next.length_squared() > bound * bound {
        (config.respawn.sample(rng), true)
    } else {
        (next, false)
    }
}

/// Convert a stored 8-bit color to the surface's float RGB.
#[inline]
pub fn color_to_vec3(color: Rgb) -> Vec3 {
    Vec3::new(color[0] as f32, color[1] as f32, color[2] as f32) / 255.0
}

/// Draws the particle cloud onto a [`DrawSurface`].
#[derive(Debug, Clone)]
pub struct Renderer {
    config: BackdropConfig,
}

impl Renderer {
    /// Create a renderer for `config`.
    pub fn new(config: &BackdropConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Draw one frame and advance every particle in place.
    ///
    /// `center` is the projection origin in surface pixels. The morph
    /// controller must already have been ticked for this frame.
    pub fn render<S, R>(
        &self,
        surface: &mut S,
        particles: &mut ParticleStore,
        morph: &MorphController,
        center: Vec2,
        rng: &mut R,
    ) -> FrameStats
    where
        S: DrawSurface + ?Sized,
        R: Rng + ?Sized,
    {
        let config = &self.config;
        surface.wash(config.background, config.trail_alpha);

        let time = morph.time() as f64;
        let kind = morph.current();
        let scale = kind.display_scale();
        let reseed_drift = self.drift_reseed_due(kind, morph.time());
        let (width, height) = (surface.width() as f32, surface.height() as f32);

        let mut stats = FrameStats::default();
        let (positions, colors) = particles.split_mut();

        for (position, color) in positions.iter_mut().zip(colors.iter()) {
            let velocity = morph.velocity(*position);
            let (next, respawned) = step_particle(*position, velocity, config, rng);
            *position = next;
            if respawned {
                stats.respawned += 1;
            }

            let mut projection = config.camera.project(*position, time, center, scale);

            if reseed_drift && !on_screen(projection.map(|p| p.screen), width, height) {
                *position = config.spawn.sample(rng);
                projection = config.camera.project(*position, time, center, scale);
                stats.reseeded += 1;
            }

            let Some(projection) = projection else {
                stats.culled += 1;
                continue;
            };
            let alpha = projection.alpha();
            if alpha <= 0.0 {
                stats.culled += 1;
                continue;
            }

            surface.fill_rect(
                projection.screen.x,
                projection.screen.y,
                config.particle_size,
                config.particle_size,
                color_to_vec3(*color),
                alpha,
                config.composite,
            );
            stats.drawn += 1;
        }

        stats
    }

    fn drift_reseed_due(&self, kind: EquationKind, time: u64) -> bool {
        kind.drifts() && time % u64::from(self.config.drift_reseed_interval.max(1)) == 0
    }
}

fn on_screen(screen: Option<Vec2>, width: f32, height: f32) -> bool {
    match screen {
        Some(s) => s.x >= 0.0 && s.x <= width && s.y >= 0.0 && s.y <= height,
        None => false,
    }
}
