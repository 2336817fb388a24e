//! Fixed-size particle storage.
//!
//! Positions and colors live in two parallel flat buffers indexed by slot.
//! A slot always refers to the same particle across frames; respawning only
//! rewrites the slot's position.

use crate::spawn::SpawnRule;
use crate::theme::Rgb;
use glam::Vec3;
use rand::Rng;

/// Flat buffers of particle positions and colors.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    positions: Vec<Vec3>,
    colors: Vec<Rgb>,
}

impl ParticleStore {
    /// Create `count` particles placed by `spawn`, all colored white.
    pub fn initialize<R: Rng + ?Sized>(count: usize, spawn: SpawnRule, rng: &mut R) -> Self {
        let positions = (0..count).map(|_| spawn.sample(rng)).collect();
        Self {
            positions,
            colors: vec![[255, 255, 255]; count],
        }
    }

    /// Re-place every particle with `spawn`, keeping the count and colors.
    pub fn reseed<R: Rng + ?Sized>(&mut self, spawn: SpawnRule, rng: &mut R) {
        for position in &mut self.positions {
            *position = spawn.sample(rng);
        }
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the store holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of particle `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[inline]
    pub fn get(&self, i: usize) -> Vec3 {
        self.positions[i]
    }

    /// Overwrite the position of particle `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[inline]
    pub fn set(&mut self, i: usize, position: Vec3) {
        self.positions[i] = position;
    }

    /// Color of particle `i`.
    #[inline]
    pub fn color(&self, i: usize) -> Rgb {
        self.colors[i]
    }

    /// Overwrite the color of particle `i`.
    #[inline]
    pub fn set_color(&mut self, i: usize, color: Rgb) {
        self.colors[i] = color;
    }

    /// All positions, in slot order.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// All colors, in slot order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Mutable positions and colors together, for the per-frame update.
    pub(crate) fn split_mut(&mut self) -> (&mut [Vec3], &mut [Rgb]) {
        (&mut self.positions, &mut self.colors)
    }

    /// Recolor every particle with `paint`.
    pub fn paint_all<F>(&mut self, mut paint: F)
    where
        F: FnMut() -> Rgb,
    {
        for color in &mut self.colors {
            *color = paint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_initialize_count_and_bounds() {
        let mut rng = SmallRng::seed_from_u64(11);
        let store = ParticleStore::initialize(500, SpawnRule::Cube { half_extent: 25.0 }, &mut rng);
        assert_eq!(store.len(), 500);
        assert_eq!(store.colors().len(), 500);
        assert!(store
            .positions()
            .iter()
            .all(|p| p.abs().max_element() <= 25.0));
    }

    #[test]
    fn test_seeded_initialize_is_reproducible() {
        let spawn = SpawnRule::Cube { half_extent: 25.0 };
        let a = ParticleStore::initialize(4, spawn, &mut SmallRng::seed_from_u64(5));
        let b = ParticleStore::initialize(4, spawn, &mut SmallRng::seed_from_u64(5));
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn test_get_set_roundtrip_by_slot() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut store = ParticleStore::initialize(3, SpawnRule::Sphere { radius: 1.0 }, &mut rng);
        let before = store.get(0);
        store.set(1, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(store.get(1), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(store.get(0), before);
    }

    #[test]
    fn test_reseed_keeps_colors() {
        let mut rng = SmallRng::seed_from_u64(8);
        let spawn = SpawnRule::Cube { half_extent: 1.0 };
        let mut store = ParticleStore::initialize(10, spawn, &mut rng);
        store.set_color(3, [1, 2, 3]);
        store.reseed(SpawnRule::Cube { half_extent: 50.0 }, &mut rng);
        assert_eq!(store.len(), 10);
        assert_eq!(store.color(3), [1, 2, 3]);
    }

    #[test]
    fn test_paint_all() {
        let mut rng = SmallRng::seed_from_u64(8);
        let spawn = SpawnRule::Cube { half_extent: 1.0 };
        let mut store = ParticleStore::initialize(6, spawn, &mut rng);
        store.paint_all(|| [10, 20, 30]);
        assert!(store.colors().iter().all(|c| *c == [10, 20, 30]));
    }
}
