//! # Chaos Backdrop
//!
//! An animated particle backdrop: a few thousand particles follow a strange
//! attractor, and every few seconds the field morphs into another one while
//! the palette bleeds into a new hue. Particles are projected through a
//! slowly orbiting camera and drawn additively over a fading trail wash.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chaos_backdrop::prelude::*;
//!
//! let config = BackdropConfig::default().with_seed(7);
//! let mut backdrop = Backdrop::new(config, PixelCanvas::new(800, 600));
//!
//! // once per display frame
//! backdrop.on_frame_tick();
//!
//! // when the host surface changes size
//! backdrop.on_resize(1024, 768);
//!
//! // when the host goes away
//! backdrop.teardown();
//! ```
//!
//! ## Frame Anatomy
//!
//! Each [`Backdrop::on_frame_tick`] runs, in order:
//!
//! 1. [`MorphController::tick`]: advances the frame counter, starts or
//!    finishes a morph, migrates particle colors while morphing.
//! 2. [`Renderer::render`]: washes the surface, steps every particle along
//!    the (blended) field, respawns escapees, projects and draws.
//!
//! ## Fields
//!
//! | Kind | Character |
//! |------|-----------|
//! | [`EquationKind::Lorenz`] | Butterfly |
//! | [`EquationKind::Aizawa`] | Sphere and tube |
//! | [`EquationKind::Chen`] | Double scroll |
//! | [`EquationKind::Halvorsen`] | Three rings |
//! | [`EquationKind::FlowField`] | Drifting waves |
//! | [`EquationKind::Galaxy`] | Spiral swirl |
//!
//! ## Surfaces
//!
//! The engine draws through the [`DrawSurface`] trait. [`PixelCanvas`] is
//! the bundled software implementation; the `chaos-backdrop` binary shows
//! it in a window through wgpu (see [`app`]).

pub mod app;
pub mod backdrop;
pub mod camera;
pub mod capture;
pub mod config;
pub mod equations;
pub mod error;
pub mod gpu;
pub mod morph;
pub mod particles;
pub mod renderer;
pub mod spawn;
pub mod surface;
pub mod theme;
pub mod time;

pub use backdrop::{Backdrop, StopHandle};
pub use camera::{OrbitCamera, Projection};
pub use config::{BackdropConfig, ResizePolicy};
pub use equations::EquationKind;
pub use error::{AppError, CaptureError, ConfigError, GpuError, SurfaceError};
pub use glam::{Vec2, Vec3};
pub use morph::{MorphController, MorphEvent, Phase};
pub use particles::ParticleStore;
pub use renderer::{FrameStats, Renderer};
pub use spawn::SpawnRule;
pub use surface::{Composite, DrawSurface, PixelCanvas};
pub use theme::{HueTheme, Rgb, ThemeMode};

/// Convenient imports for hosting a backdrop.
///
/// ```ignore
/// use chaos_backdrop::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backdrop::{Backdrop, StopHandle};
    pub use crate::config::{BackdropConfig, ResizePolicy};
    pub use crate::equations::EquationKind;
    pub use crate::spawn::SpawnRule;
    pub use crate::surface::{Composite, DrawSurface, PixelCanvas};
    pub use crate::theme::ThemeMode;
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3};
}
