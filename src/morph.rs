//! State machine that morphs between velocity fields.
//!
//! The controller alternates between two phases:
//!
//! - **Steady**: one field drives every particle. A cycle timer counts frames;
//!   once it exceeds the (randomized) cycle duration a morph begins.
//! - **Transitioning**: velocities from the current and next field are
//!   blended by [`ease`]`(progress)`. Every few frames a small random share
//!   of particles adopts the next color theme, so the palette bleeds over
//!   gradually instead of snapping. When progress reaches 1 the next field
//!   becomes current and any remaining particles are recolored.
//!
//! ```text
//!  Steady(k0) --timer > cycle--> Transitioning(k0 -> k1, p) --p >= 1--> Steady(k1)
//! ```

use crate::config::BackdropConfig;
use crate::equations::EquationKind;
use crate::particles::ParticleStore;
use crate::spawn::SpawnRule;
use crate::theme::{HueTheme, ThemeMode};
use glam::Vec3;
use rand::Rng;
use tracing::debug;

/// Smoothstep-like ease: `2t²` below one half, `1 - 2(1-t)²` above.
///
/// Input is clamped to `[0, 1]`; `ease(0) == 0` and `ease(1) == 1` exactly.
pub fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 1.0 - t;
        1.0 - 2.0 * u * u
    }
}

/// Velocity of `from` and `to` at `position`, blended by `ease(progress)`.
///
/// At progress 0 this is exactly `from`'s velocity, at progress 1 exactly
/// `to`'s.
pub fn blend_velocity(
    from: EquationKind,
    to: EquationKind,
    position: Vec3,
    time: f64,
    progress: f32,
) -> Vec3 {
    let w = ease(progress);
    let a = from.velocity(position, time);
    let b = to.velocity(position, time);
    a * (1.0 - w) + b * w
}

/// Observable phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// A single field is active.
    Steady(EquationKind),
    /// Morphing between two fields.
    Transitioning {
        /// Field being left.
        from: EquationKind,
        /// Field being entered.
        to: EquationKind,
        /// Linear progress in `[0, 1]`.
        progress: f32,
    },
}

/// Something the controller did this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MorphEvent {
    /// A morph began.
    Started {
        /// Field being left.
        from: EquationKind,
        /// Field being entered.
        to: EquationKind,
    },
    /// A morph finished and `kind` is now current.
    Committed {
        /// The newly current field.
        kind: EquationKind,
    },
}

/// Color migration settings, copied out of the config.
#[derive(Debug, Clone, Copy)]
struct Migration {
    interval: u32,
    chance: f32,
    respawn_chance: f32,
    spawn: SpawnRule,
}

/// Owns the field/theme state and the cycle and transition timers.
#[derive(Debug, Clone)]
pub struct MorphController {
    current: EquationKind,
    next: EquationKind,
    current_theme: HueTheme,
    next_theme: HueTheme,
    theme_mode: ThemeMode,
    transitioning: bool,
    transition_frame: u32,
    transition_frames: u32,
    cycle_timer: u32,
    cycle_duration: u32,
    cycle_min: u32,
    cycle_max: u32,
    migration: Migration,
    time: u64,
}

impl MorphController {
    /// Start in `Steady(config.initial_kind)`.
    pub fn new<R: Rng + ?Sized>(config: &BackdropConfig, rng: &mut R) -> Self {
        let current = config.initial_kind;
        let current_theme = match config.theme_mode {
            ThemeMode::Procedural => HueTheme::random(rng),
            ThemeMode::Signature => HueTheme::new(current.signature_hue()),
        };
        Self {
            current,
            next: rotate(current),
            current_theme,
            next_theme: current_theme,
            theme_mode: config.theme_mode,
            transitioning: false,
            transition_frame: 0,
            transition_frames: config.transition_frames.max(1),
            cycle_timer: 0,
            cycle_duration: config.initial_cycle_frames,
            cycle_min: config.cycle_min_frames,
            cycle_max: config.cycle_max_frames.max(config.cycle_min_frames),
            migration: Migration {
                interval: config.migration_interval.max(1),
                chance: config.migration_chance,
                respawn_chance: config.migration_respawn_chance,
                spawn: config.migration_spawn,
            },
            time: 0,
        }
    }

    /// Advance one frame.
    ///
    /// Updates timers, starts or commits a morph, and migrates particle
    /// colors while morphing. Returns what changed, if anything.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        particles: &mut ParticleStore,
        rng: &mut R,
    ) -> Option<MorphEvent> {
        self.time += 1;
        self.cycle_timer = self.cycle_timer.saturating_add(1);

        let mut event = None;
        if !self.transitioning && self.cycle_timer > self.cycle_duration {
            self.begin_transition(rng);
            event = Some(MorphEvent::Started {
                from: self.current,
                to: self.next,
            });
        }

        if self.transitioning {
            self.transition_frame += 1;

            if self.time % u64::from(self.migration.interval) == 0 {
                self.migrate_colors(particles, rng);
            }

            if self.transition_frame >= self.transition_frames {
                self.commit(particles, rng);
                event = Some(MorphEvent::Committed { kind: self.current });
            }
        }

        event
    }

    fn begin_transition<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut index = rng.gen_range(0..EquationKind::ALL.len());
        if EquationKind::ALL[index] == self.current {
            index = (index + 1) % EquationKind::ALL.len();
        }
        self.next = EquationKind::ALL[index];
        self.next_theme = match self.theme_mode {
            ThemeMode::Procedural => self.current_theme.shifted(rng),
            ThemeMode::Signature => HueTheme::new(self.next.signature_hue()),
        };
        self.transitioning = true;
        self.transition_frame = 0;
        self.cycle_duration = rng.gen_range(self.cycle_min..=self.cycle_max);

        debug!(
            from = %self.current,
            to = %self.next,
            hue = self.next_theme.hue,
            next_cycle = self.cycle_duration,
            "morph started"
        );
    }

    fn migrate_colors<R: Rng + ?Sized>(&self, particles: &mut ParticleStore, rng: &mut R) {
        for i in 0..particles.len() {
            if rng.gen::<f32>() < self.migration.chance {
                particles.set_color(i, self.next_theme.sample(rng));
                if rng.gen::<f32>() < self.migration.respawn_chance {
                    particles.set(i, self.migration.spawn.sample(rng));
                }
            }
        }
    }

    fn commit<R: Rng + ?Sized>(&mut self, particles: &mut ParticleStore, rng: &mut R) {
        self.current = self.next;
        self.current_theme = self.next_theme;
        self.next = rotate(self.current);
        self.transitioning = false;
        self.transition_frame = 0;
        self.cycle_timer = 0;

        let theme = self.current_theme;
        particles.paint_all(|| theme.sample(rng));

        debug!(kind = %self.current, "morph committed");
    }

    /// Color every particle from the current theme.
    pub fn paint<R: Rng + ?Sized>(&self, particles: &mut ParticleStore, rng: &mut R) {
        let theme = self.current_theme;
        particles.paint_all(|| theme.sample(rng));
    }

    /// Velocity at `position` this frame, blended while morphing.
    pub fn velocity(&self, position: Vec3) -> Vec3 {
        let time = self.time as f64;
        if self.transitioning {
            blend_velocity(self.current, self.next, position, time, self.progress())
        } else {
            self.current.velocity(position, time)
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        if self.transitioning {
            Phase::Transitioning {
                from: self.current,
                to: self.next,
                progress: self.progress(),
            }
        } else {
            Phase::Steady(self.current)
        }
    }

    /// Linear transition progress; 0 while steady.
    pub fn progress(&self) -> f32 {
        if self.transitioning {
            (self.transition_frame as f32 / self.transition_frames as f32).min(1.0)
        } else {
            0.0
        }
    }

    /// Whether a morph is in progress.
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Field currently in charge.
    pub fn current(&self) -> EquationKind {
        self.current
    }

    /// Field being morphed into (meaningful while transitioning).
    pub fn next(&self) -> EquationKind {
        self.next
    }

    /// Theme of the current field.
    pub fn current_theme(&self) -> HueTheme {
        self.current_theme
    }

    /// Theme particles migrate to while transitioning.
    pub fn next_theme(&self) -> HueTheme {
        self.next_theme
    }

    /// Frames since the last commit (or since start).
    pub fn cycle_timer(&self) -> u32 {
        self.cycle_timer
    }

    /// Steady frames required before the next morph.
    pub fn cycle_duration(&self) -> u32 {
        self.cycle_duration
    }

    /// Global frame counter.
    pub fn time(&self) -> u64 {
        self.time
    }
}

/// The kind after `kind` in catalog order.
fn rotate(kind: EquationKind) -> EquationKind {
    EquationKind::ALL[(kind.index() + 1) % EquationKind::ALL.len()]
}
