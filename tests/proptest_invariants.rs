//! Property-based invariant tests for the backdrop engine.
//!
//! Verifies:
//! 1. Every field returns a finite velocity for every finite input
//! 2. Blending reproduces each field exactly at progress 0 and 1
//! 3. A stepped particle is always finite and inside the bound radius
//! 4. Projection never yields non-finite screen coordinates
//! 5. The ease curve is monotonic and stays in [0, 1]
//! 6. Theme colors are bright

use chaos_backdrop::morph::{blend_velocity, ease};
use chaos_backdrop::prelude::*;
use chaos_backdrop::renderer::step_particle;
use chaos_backdrop::{HueTheme, OrbitCamera};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_kind() -> impl Strategy<Value = EquationKind> {
    (0..EquationKind::ALL.len()).prop_map(|i| EquationKind::ALL[i])
}

fn arb_coord() -> impl Strategy<Value = f32> {
    prop_oneof![
        -200.0f32..200.0,
        -1.0e6f32..1.0e6,
        any::<f32>().prop_filter("finite", |v| v.is_finite()),
    ]
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (arb_coord(), arb_coord(), arb_coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Field totality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn velocity_is_finite(kind in arb_kind(), p in arb_vec3(), t in 0.0f64..1.0e12) {
        let v = kind.velocity(p, t);
        prop_assert!(v.is_finite(), "{} at {:?} t={} gave {:?}", kind, p, t, v);
    }

    #[test]
    fn blended_velocity_is_finite(
        from in arb_kind(),
        to in arb_kind(),
        p in arb_vec3(),
        progress in 0.0f32..=1.0,
    ) {
        prop_assert!(blend_velocity(from, to, p, 10.0, progress).is_finite());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Blend endpoints
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn blend_endpoints_match_fields(from in arb_kind(), to in arb_kind(), p in arb_vec3()) {
        prop_assert_eq!(blend_velocity(from, to, p, 5.0, 0.0), from.velocity(p, 5.0));
        prop_assert_eq!(blend_velocity(from, to, p, 5.0, 1.0), to.velocity(p, 5.0));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Respawn invariant
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stepped_particle_stays_bounded(
        kind in arb_kind(),
        p in arb_vec3(),
        seed in any::<u64>(),
    ) {
        let config = BackdropConfig::default();
        let mut rng = SmallRng::seed_from_u64(seed);
        let (next, _) = step_particle(p, kind.velocity(p, 0.0), &config, &mut rng);
        prop_assert!(next.is_finite());
        prop_assert!(next.length_squared() <= config.bound_radius * config.bound_radius);
    }

    #[test]
    fn backdrop_particles_stay_bounded(seed in any::<u64>(), frames in 1u64..120) {
        let config = BackdropConfig::default()
            .with_particle_count(64)
            .with_cycle_frames(10, 5, 20)
            .with_transition_frames(15)
            .with_seed(seed);
        let mut backdrop = Backdrop::new(config, PixelCanvas::new(48, 32));
        backdrop.run_frames(frames);
        for p in backdrop.particles().positions() {
            prop_assert!(p.is_finite() && p.length_squared() <= 100.0 * 100.0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Projection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn projection_is_finite_or_culled(
        p in arb_vec3(),
        t in 0.0f64..1.0e12,
        scale in 1.0f32..300.0,
    ) {
        let camera = OrbitCamera::default();
        if let Some(proj) = camera.project(p, t, Vec2::new(640.0, 360.0), scale) {
            prop_assert!(proj.screen.is_finite());
            prop_assert!(proj.depth_scale >= 0.0);
            prop_assert!(proj.alpha() <= 1.0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Ease curve
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ease_is_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ease(lo) <= ease(hi));
        prop_assert!((0.0..=1.0).contains(&ease(a)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Theme colors
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn theme_colors_are_bright(hue in 0.0f32..360.0, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let [r, g, b] = HueTheme::new(hue).sample(&mut rng);
        let max = r.max(g).max(b);
        // lightness >= 50% with saturation >= 80% keeps the top channel high
        prop_assert!(max >= 200, "{:?}", [r, g, b]);
    }
}
