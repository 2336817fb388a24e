//! Velocity fields that drive the particles.
//!
//! Each [`EquationKind`] is a closed-form vector field: four strange
//! attractors, a time-varying sinusoidal flow, and a galaxy swirl. The
//! fields are pure functions of position and the global frame counter.
//!
//! | Kind | Shape | Display scale |
//! |------|-------|---------------|
//! | [`Lorenz`](EquationKind::Lorenz) | Two-lobed butterfly | 18 |
//! | [`Aizawa`](EquationKind::Aizawa) | Sphere with a tube through the axis | 300 |
//! | [`Chen`](EquationKind::Chen) | Tight double scroll | 18 |
//! | [`Halvorsen`](EquationKind::Halvorsen) | Three interlocked rings | 18 |
//! | [`FlowField`](EquationKind::FlowField) | Drifting sine waves | 4 |
//! | [`Galaxy`](EquationKind::Galaxy) | Flattened spiral | 18 |
//!
//! The attractors live at very different natural magnitudes (Aizawa spans
//! about ±1.5, the flow field hundreds of units), which is why the display
//! scale is per kind.

use glam::Vec3;
use std::f64::consts::TAU;

/// Integration step folded into every returned velocity.
pub const DT: f32 = 0.008;

/// Inputs are clamped to this magnitude per axis before substitution.
///
/// The cubic terms stay far from `f32::MAX` inside this box, so the result is
/// finite for every finite input. Particles that far out are respawned by the
/// renderer anyway.
pub const EVAL_LIMIT: f32 = 1.0e4;

/// `time * rate` reduced to a single turn.
///
/// The frame counter outgrows `f32` precision after about 2^24 frames, so the
/// product is taken in `f64` and only the wrapped angle is narrowed.
#[inline]
pub fn phase(time: f64, rate: f64) -> f32 {
    (time * rate).rem_euclid(TAU) as f32
}

/// A vector field the particles can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationKind {
    /// Lorenz system, σ = 10, ρ = 28, β = 8/3.
    Lorenz,
    /// Aizawa attractor, a = 0.95, b = 0.7, c = 0.6, d = 3.5, e = 0.25, f = 0.1.
    Aizawa,
    /// Chen system, a = 40, b = 3, c = 28.
    Chen,
    /// Halvorsen attractor, a = 1.89.
    Halvorsen,
    /// Sinusoidal flow over the XY plane with a global Z pulse.
    FlowField,
    /// Orbital swirl around the Z axis with inward damping.
    Galaxy,
}

impl EquationKind {
    /// Every kind, in selection order.
    pub const ALL: [EquationKind; 6] = [
        EquationKind::Lorenz,
        EquationKind::Aizawa,
        EquationKind::FlowField,
        EquationKind::Halvorsen,
        EquationKind::Chen,
        EquationKind::Galaxy,
    ];

    /// Velocity at `position` on frame `time`, already multiplied by [`DT`].
    ///
    /// Pure and total: any finite input gives a finite output.
    pub fn velocity(self, position: Vec3, time: f64) -> Vec3 {
        let p = position.clamp(Vec3::splat(-EVAL_LIMIT), Vec3::splat(EVAL_LIMIT));
        let raw = self.raw_velocity(p.x, p.y, p.z, time);
        finite_or_zero(raw * DT)
    }

    fn raw_velocity(self, x: f32, y: f32, z: f32, time: f64) -> Vec3 {
        match self {
            EquationKind::Lorenz => {
                let (sigma, rho, beta) = (10.0, 28.0, 8.0 / 3.0);
                Vec3::new(sigma * (y - x), x * (rho - z) - y, x * y - beta * z)
            }
            EquationKind::Chen => {
                let (a, b, c) = (40.0, 3.0, 28.0);
                Vec3::new(a * (y - x), (c - a) * x - x * z + c * y, x * y - b * z)
            }
            EquationKind::Halvorsen => {
                let a = 1.89;
                Vec3::new(
                    -a * x - 4.0 * y - 4.0 * z - y * y,
                    -a * y - 4.0 * z - 4.0 * x - z * z,
                    -a * z - 4.0 * x - 4.0 * y - x * x,
                )
            }
            EquationKind::Aizawa => {
                let (a, b, c, d, e, f) = (0.95, 0.7, 0.6, 3.5, 0.25, 0.1);
                Vec3::new(
                    (z - b) * x - d * y,
                    d * x + (z - b) * y,
                    c + a * z - (z * z * z) / 3.0 - (x * x + y * y) * (1.0 + e * z)
                        + f * z * x * x * x,
                )
            }
            EquationKind::Galaxy => {
                let r = (x * x + y * y).sqrt();
                let theta = y.atan2(x);
                let force = 50.0 / (r + 0.1);
                Vec3::new(
                    -theta.sin() * force * r - x * 0.1,
                    theta.cos() * force * r - y * 0.1,
                    -z * 0.1,
                )
            }
            EquationKind::FlowField => {
                let drift = phase(time, 0.005);
                Vec3::new(
                    (y * 0.05 + drift).sin() * 50.0,
                    (x * 0.05 + drift).cos() * 50.0,
                    phase(time, 0.02).sin() * 20.0,
                )
            }
        }
    }

    /// Screen pixels per simulation unit at unit perspective.
    pub fn display_scale(self) -> f32 {
        match self {
            EquationKind::Aizawa => 300.0,
            EquationKind::FlowField => 4.0,
            _ => 18.0,
        }
    }

    /// Hue, in degrees, that this kind wears in signature theme mode.
    pub fn signature_hue(self) -> f32 {
        match self {
            EquationKind::Lorenz => 300.0,
            EquationKind::Aizawa => 120.0,
            EquationKind::Chen => 190.0,
            EquationKind::Halvorsen => 40.0,
            EquationKind::FlowField => 280.0,
            EquationKind::Galaxy => 220.0,
        }
    }

    /// Whether the field drifts particles off-screen without diverging.
    ///
    /// Such fields have no fixed point to settle on, so particles leave the
    /// view in straight lines long before they reach the bound radius.
    pub fn drifts(self) -> bool {
        matches!(self, EquationKind::FlowField)
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            EquationKind::Lorenz => "lorenz",
            EquationKind::Aizawa => "aizawa",
            EquationKind::Chen => "chen",
            EquationKind::Halvorsen => "halvorsen",
            EquationKind::FlowField => "flow-field",
            EquationKind::Galaxy => "galaxy",
        }
    }

    /// Position of this kind in [`EquationKind::ALL`].
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|k| *k == self)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for EquationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn finite_or_zero(v: Vec3) -> Vec3 {
    Vec3::new(
        if v.x.is_finite() { v.x } else { 0.0 },
        if v.y.is_finite() { v.y } else { 0.0 },
        if v.z.is_finite() { v.z } else { 0.0 },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).abs().max_element() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_lorenz_at_unit_point() {
        let v = EquationKind::Lorenz.velocity(Vec3::ONE, 0.0);
        assert_close(v, Vec3::new(0.0, 26.0, -5.0 / 3.0) * DT);
    }

    #[test]
    fn test_chen_at_unit_point() {
        // (40*0, -12 - 1 + 28, 1 - 3)
        let v = EquationKind::Chen.velocity(Vec3::ONE, 0.0);
        assert_close(v, Vec3::new(0.0, 15.0, -2.0) * DT);
    }

    #[test]
    fn test_halvorsen_is_cyclic() {
        // The system is symmetric under (x, y, z) -> (y, z, x)
        let p = Vec3::new(0.3, -1.2, 2.0);
        let v = EquationKind::Halvorsen.velocity(p, 0.0);
        let w = EquationKind::Halvorsen.velocity(Vec3::new(p.y, p.z, p.x), 0.0);
        assert_close(w, Vec3::new(v.y, v.z, v.x));
    }

    #[test]
    fn test_galaxy_rotates_counterclockwise() {
        let v = EquationKind::Galaxy.velocity(Vec3::new(10.0, 0.0, 4.0), 0.0);
        assert!(v.y > 0.0);
        assert!(v.x < 0.0, "inward damping should pull x back");
        assert!(v.z < 0.0, "z should flatten toward the plane");
    }

    #[test]
    fn test_galaxy_at_origin_is_finite() {
        let v = EquationKind::Galaxy.velocity(Vec3::ZERO, 0.0);
        assert!(v.is_finite());
    }

    #[test]
    fn test_flow_field_depends_on_time() {
        let p = Vec3::new(3.0, 4.0, 0.0);
        let a = EquationKind::FlowField.velocity(p, 0.0);
        let b = EquationKind::FlowField.velocity(p, 100.0);
        assert_ne!(a, b);
        assert_eq!(a.z, 0.0);
    }

    #[test]
    fn test_flow_field_keeps_moving_after_days() {
        // 2^25 frames is past the point where f32 can count single frames
        let p = Vec3::new(3.0, 4.0, 0.0);
        let late = 33_554_432.0;
        let a = EquationKind::FlowField.velocity(p, late);
        let b = EquationKind::FlowField.velocity(p, late + 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_phase_wraps_to_one_turn() {
        assert_eq!(phase(0.0, 0.5), 0.0);
        assert!((phase(1.0, 0.5) - 0.5).abs() < 1e-7);
        let p = phase(1.0e12, 0.002);
        assert!((0.0..=std::f32::consts::TAU).contains(&p));
        assert!(phase(-3.0, 1.0) >= 0.0);
    }

    #[test]
    fn test_attractors_ignore_time() {
        let p = Vec3::new(0.5, -0.2, 0.1);
        let attractors = [
            EquationKind::Lorenz,
            EquationKind::Aizawa,
            EquationKind::Chen,
            EquationKind::Halvorsen,
        ];
        for kind in attractors {
            assert_eq!(kind.velocity(p, 0.0), kind.velocity(p, 1234.0));
        }
    }

    #[test]
    fn test_finite_for_extreme_inputs() {
        let samples = [
            Vec3::ZERO,
            Vec3::splat(1.0e6),
            Vec3::splat(-1.0e30),
            Vec3::new(f32::MAX, -f32::MAX, f32::MAX),
            Vec3::new(1.0e-30, 5.0e20, -7.0),
        ];
        for kind in EquationKind::ALL {
            for p in samples {
                for t in [0.0, 1.0e9, -3.0] {
                    assert!(kind.velocity(p, t).is_finite(), "{} at {:?} t={}", kind, p, t);
                }
            }
        }
    }

    #[test]
    fn test_aizawa_scale_is_largest() {
        let aizawa = EquationKind::Aizawa.display_scale();
        for kind in EquationKind::ALL {
            assert!(kind.display_scale() <= aizawa);
        }
        assert!(EquationKind::FlowField.display_scale() < EquationKind::Lorenz.display_scale());
    }

    #[test]
    fn test_only_flow_field_drifts() {
        let drifting: Vec<_> = EquationKind::ALL.iter().filter(|k| k.drifts()).collect();
        assert_eq!(drifting, vec![&EquationKind::FlowField]);
    }

    #[test]
    fn test_index_matches_catalog() {
        for (i, kind) in EquationKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
