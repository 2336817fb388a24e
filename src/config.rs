//! Backdrop configuration.
//!
//! All knobs are compiled-in defaults that reproduce the neon attractor
//! backdrop. Override them with the builder methods:
//!
//! ```ignore
//! let config = BackdropConfig::default()
//!     .with_particle_count(1500)
//!     .with_transition_frames(180)
//!     .with_seed(42);
//! config.validate()?;
//! ```

use crate::camera::OrbitCamera;
use crate::equations::EquationKind;
use crate::error::ConfigError;
use crate::spawn::SpawnRule;
use crate::surface::Composite;
use crate::theme::ThemeMode;
use glam::Vec3;

/// What happens to the particles when the surface is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Only the surface dimensions and projection center change.
    #[default]
    KeepParticles,
    /// Every particle is re-placed with the initial spawn rule.
    Reseed,
}

/// Every tunable of the backdrop.
#[derive(Debug, Clone)]
pub struct BackdropConfig {
    /// Number of particles.
    pub particle_count: usize,
    /// Initial placement of particles.
    pub spawn: SpawnRule,
    /// Placement of particles that left the bound radius.
    pub respawn: SpawnRule,
    /// Particles farther than this from the origin are respawned.
    pub bound_radius: f32,
    /// Frame-level multiplier applied to every velocity before integration.
    pub step_multiplier: f32,
    /// Optional per-axis cap on the integrated step.
    pub speed_limit: Option<f32>,
    /// Field shown on the first frame.
    pub initial_kind: EquationKind,
    /// Frames a morph between two fields takes.
    pub transition_frames: u32,
    /// Steady frames before the first morph.
    pub initial_cycle_frames: u32,
    /// Shortest steady cycle, re-rolled per cycle.
    pub cycle_min_frames: u32,
    /// Longest steady cycle, re-rolled per cycle.
    pub cycle_max_frames: u32,
    /// How the next color theme is picked.
    pub theme_mode: ThemeMode,
    /// During a morph, color migration runs every this many frames.
    pub migration_interval: u32,
    /// Chance per particle per migration pass of adopting the new theme.
    pub migration_chance: f32,
    /// Chance a migrating particle is also thrown back near the origin.
    pub migration_respawn_chance: f32,
    /// Where migrating particles are thrown to.
    pub migration_spawn: SpawnRule,
    /// For drifting fields, off-screen particles are reseeded every this many frames.
    pub drift_reseed_interval: u32,
    /// Projection camera.
    pub camera: OrbitCamera,
    /// Trail wash color (RGB, 0.0-1.0).
    pub background: Vec3,
    /// Opacity of the per-frame trail wash. Lower = longer trails.
    pub trail_alpha: f32,
    /// Edge length of each drawn particle, in pixels.
    pub particle_size: f32,
    /// How particles combine with what is already on the surface.
    pub composite: Composite,
    /// What a resize does to the particles.
    pub resize_policy: ResizePolicy,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            particle_count: 3000,
            spawn: SpawnRule::Cube { half_extent: 25.0 },
            respawn: SpawnRule::Sphere { radius: 6.0 },
            bound_radius: 100.0,
            step_multiplier: 10.0,
            speed_limit: None,
            initial_kind: EquationKind::Galaxy,
            transition_frames: 120,
            initial_cycle_frames: 400,
            cycle_min_frames: 300,
            cycle_max_frames: 500,
            theme_mode: ThemeMode::Procedural,
            migration_interval: 5,
            migration_chance: 0.05,
            migration_respawn_chance: 0.1,
            migration_spawn: SpawnRule::Cube { half_extent: 10.0 },
            drift_reseed_interval: 60,
            camera: OrbitCamera::default(),
            background: Vec3::ZERO,
            trail_alpha: 0.12,
            particle_size: 1.6,
            composite: Composite::Lighter,
            resize_policy: ResizePolicy::KeepParticles,
            seed: None,
        }
    }
}

impl BackdropConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the initial spawn rule.
    pub fn with_spawn(mut self, spawn: SpawnRule) -> Self {
        self.spawn = spawn;
        self
    }

    /// Set the respawn rule used for out-of-bounds particles.
    pub fn with_respawn(mut self, respawn: SpawnRule) -> Self {
        self.respawn = respawn;
        self
    }

    /// Set where migrating particles land when a color bleed respawns them.
    pub fn with_migration_spawn(mut self, spawn: SpawnRule) -> Self {
        self.migration_spawn = spawn;
        self
    }

    /// Set the bound radius.
    pub fn with_bound_radius(mut self, radius: f32) -> Self {
        self.bound_radius = radius;
        self
    }

    /// Set the frame-level step multiplier.
    pub fn with_step_multiplier(mut self, multiplier: f32) -> Self {
        self.step_multiplier = multiplier;
        self
    }

    /// Cap each axis of the integrated step.
    pub fn with_speed_limit(mut self, limit: f32) -> Self {
        self.speed_limit = Some(limit);
        self
    }

    /// Set the field shown first.
    pub fn with_initial_kind(mut self, kind: EquationKind) -> Self {
        self.initial_kind = kind;
        self
    }

    /// Set the morph duration in frames.
    pub fn with_transition_frames(mut self, frames: u32) -> Self {
        self.transition_frames = frames;
        self
    }

    /// Set the first steady cycle and the range later cycles are drawn from.
    pub fn with_cycle_frames(mut self, initial: u32, min: u32, max: u32) -> Self {
        self.initial_cycle_frames = initial;
        self.cycle_min_frames = min;
        self.cycle_max_frames = max;
        self
    }

    /// Set how color themes are picked.
    pub fn with_theme_mode(mut self, mode: ThemeMode) -> Self {
        self.theme_mode = mode;
        self
    }

    /// Set the color migration cadence and probabilities.
    pub fn with_migration(mut self, interval: u32, chance: f32, respawn_chance: f32) -> Self {
        self.migration_interval = interval;
        self.migration_chance = chance;
        self.migration_respawn_chance = respawn_chance;
        self
    }

    /// Set the projection camera.
    pub fn with_camera(mut self, camera: OrbitCamera) -> Self {
        self.camera = camera;
        self
    }

    /// Set the trail wash color and opacity.
    pub fn with_trail(mut self, background: Vec3, alpha: f32) -> Self {
        self.background = background;
        self.trail_alpha = alpha;
        self
    }

    /// Set the drawn particle size in pixels.
    pub fn with_particle_size(mut self, size: f32) -> Self {
        self.particle_size = size;
        self
    }

    /// Set the particle composite operation.
    pub fn with_composite(mut self, composite: Composite) -> Self {
        self.composite = composite;
        self
    }

    /// Set the resize policy.
    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }

    /// Seed the RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        for (name, frames) in [
            ("transition_frames", self.transition_frames),
            ("migration_interval", self.migration_interval),
            ("drift_reseed_interval", self.drift_reseed_interval),
        ] {
            if frames == 0 {
                return Err(ConfigError::ZeroFrames(name));
            }
        }
        if self.cycle_min_frames > self.cycle_max_frames {
            return Err(ConfigError::EmptyCycleRange {
                min: self.cycle_min_frames,
                max: self.cycle_max_frames,
            });
        }
        let mut positive = vec![
            ("bound_radius", self.bound_radius),
            ("step_multiplier", self.step_multiplier),
            ("particle_size", self.particle_size),
            ("camera.fov", self.camera.fov),
        ];
        if let Some(limit) = self.speed_limit {
            positive.push(("speed_limit", limit));
        }
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive(name, value));
            }
        }
        for (name, value) in [
            ("migration_chance", self.migration_chance),
            ("migration_respawn_chance", self.migration_respawn_chance),
            ("trail_alpha", self.trail_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotProbability(name, value));
            }
        }
        for (rule, spawn) in [
            ("spawn", self.spawn),
            ("respawn", self.respawn),
            ("migration_spawn", self.migration_spawn),
        ] {
            let reach = spawn.max_distance();
            // Written negated so NaN is rejected too
            if !(reach >= 0.0 && reach <= self.bound_radius) {
                return Err(ConfigError::SpawnOutOfBound {
                    rule,
                    reach,
                    bound: self.bound_radius,
                });
            }
        }
        Ok(())
    }
}
