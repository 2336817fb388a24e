//! Spawn rules for placing particles.
//!
//! Every helper draws from a caller-supplied RNG so a seeded generator
//! reproduces the same cloud:
//!
//! ```ignore
//! let mut rng = SmallRng::seed_from_u64(7);
//! let p = SpawnRule::Cube { half_extent: 25.0 }.sample(&mut rng);
//! ```

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Where a freshly spawned (or respawned) particle may land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRule {
    /// Uniform inside an axis-aligned cube centered at the origin.
    Cube {
        /// Half the cube's edge length.
        half_extent: f32,
    },
    /// Uniform inside a ball centered at the origin.
    Sphere {
        /// Ball radius.
        radius: f32,
    },
}

impl SpawnRule {
    /// Draw one position from this rule.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match *self {
            SpawnRule::Cube { half_extent } => random_in_cube(rng, half_extent),
            SpawnRule::Sphere { radius } => random_in_sphere(rng, radius),
        }
    }

    /// Largest distance from the origin a sample can have.
    pub fn max_distance(&self) -> f32 {
        match *self {
            SpawnRule::Cube { half_extent } => half_extent * 3.0_f32.sqrt(),
            SpawnRule::Sphere { radius } => radius,
        }
    }
}

/// Random point inside a cube of given half-size, centered at origin.
///
/// Degenerate (zero) extents collapse to the origin.
pub fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> Vec3 {
    Vec3::new(
        symmetric(rng, half_extent),
        symmetric(rng, half_extent),
        symmetric(rng, half_extent),
    )
}

/// Random point inside a sphere of given radius, centered at origin.
///
/// Distribution is uniform throughout the volume.
pub fn random_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    // Uniform in cos(phi) rather than phi, otherwise the poles bunch up
    let cos_phi: f32 = rng.gen_range(-1.0..=1.0);
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
    // Cube root for uniform volume distribution
    let r = radius * rng.gen::<f32>().cbrt();

    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * cos_phi,
    )
}

/// Uniform sample in `[-half, half)`; zero when `half` is zero.
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_cube_stays_inside() {
        let mut rng = SmallRng::seed_from_u64(1);
        let rule = SpawnRule::Cube { half_extent: 25.0 };
        for _ in 0..1000 {
            let p = rule.sample(&mut rng);
            assert!(p.x.abs() <= 25.0 && p.y.abs() <= 25.0 && p.z.abs() <= 25.0);
        }
    }

    #[test]
    fn test_sphere_stays_inside() {
        let mut rng = SmallRng::seed_from_u64(2);
        let rule = SpawnRule::Sphere { radius: 6.0 };
        for _ in 0..1000 {
            let p = rule.sample(&mut rng);
            assert!(p.length() <= 6.0 + 1e-4, "sample {:?} escaped the ball", p);
        }
    }

    #[test]
    fn test_zero_extent_is_origin() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(SpawnRule::Cube { half_extent: 0.0 }.sample(&mut rng), Vec3::ZERO);
    }

    #[test]
    fn test_seeded_samples_repeat() {
        let rule = SpawnRule::Cube { half_extent: 10.0 };
        let a = rule.sample(&mut SmallRng::seed_from_u64(99));
        let b = rule.sample(&mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_max_distance() {
        assert_eq!(SpawnRule::Sphere { radius: 6.0 }.max_distance(), 6.0);
        let cube = SpawnRule::Cube { half_extent: 1.0 }.max_distance();
        assert!((cube - 3.0_f32.sqrt()).abs() < 1e-6);
    }
}
