//! Neon color themes.
//!
//! A theme is a single dominant hue. Particles sample colors scattered around
//! it (hue ± 30°, high saturation, bright lightness) so one state reads as one
//! color with a rich gradient instead of a flat fill.

use rand::Rng;

/// 8-bit RGB color.
pub type Rgb = [u8; 3];

/// Hue spread either side of the theme hue, in degrees.
pub const HUE_VARIANCE: f32 = 30.0;

/// Minimum angular distance between consecutive procedural hues.
pub const MIN_HUE_SHIFT: f32 = 60.0;

/// How the next theme is chosen when a transition starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Random neon hue, at least [`MIN_HUE_SHIFT`] away from the current one.
    #[default]
    Procedural,
    /// The signature hue of the equation being morphed into.
    Signature,
}

/// A hue-centred neon gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueTheme {
    /// Dominant hue in degrees, `[0, 360)`.
    pub hue: f32,
}

impl HueTheme {
    /// Theme around `hue` degrees (wrapped into `[0, 360)`).
    pub fn new(hue: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
        }
    }

    /// Theme with a uniformly random hue.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(0.0..360.0))
    }

    /// Procedural successor: shifted by 60° plus up to 240° more, so it never
    /// lands within 60° of this hue.
    pub fn shifted<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self::new(self.hue + MIN_HUE_SHIFT + rng.gen_range(0.0..240.0))
    }

    /// Sample one particle color from this theme.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        let hue = self.hue + rng.gen_range(-HUE_VARIANCE..HUE_VARIANCE);
        let saturation = rng.gen_range(0.8..1.0);
        let lightness = rng.gen_range(0.5..0.8);
        hsl_to_rgb(hue.rem_euclid(360.0) / 360.0, saturation, lightness)
    }
}

/// Shortest angular distance between two hues, in degrees.
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Convert HSL (each component in `[0, 1]`) to 8-bit RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    if s == 0.0 {
        let v = to_byte(l);
        return [v, v, v];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    ]
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [255, 0, 0]);
        assert_eq!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0, 255, 0]);
        assert_eq!(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0, 0, 255]);
    }

    #[test]
    fn test_hsl_achromatic() {
        assert_eq!(hsl_to_rgb(0.3, 0.0, 0.5), [128, 128, 128]);
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), [255, 255, 255]);
    }

    #[test]
    fn test_shifted_hue_keeps_distance() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut theme = HueTheme::random(&mut rng);
        for _ in 0..500 {
            let next = theme.shifted(&mut rng);
            assert!(
                hue_distance(theme.hue, next.hue) >= MIN_HUE_SHIFT - 1e-3,
                "{} -> {} is too close",
                theme.hue,
                next.hue
            );
            assert!((0.0..360.0).contains(&next.hue));
            theme = next;
        }
    }

    #[test]
    fn test_samples_are_bright() {
        let mut rng = SmallRng::seed_from_u64(4);
        let theme = HueTheme::new(300.0);
        for _ in 0..200 {
            let [r, g, b] = theme.sample(&mut rng);
            // Lightness >= 50% with saturation >= 80% keeps the top channel high
            assert!(r.max(g).max(b) >= 200);
        }
    }

    #[test]
    fn test_hue_distance_wraps() {
        assert_eq!(hue_distance(350.0, 10.0), 20.0);
        assert_eq!(hue_distance(10.0, 350.0), 20.0);
        assert_eq!(hue_distance(0.0, 180.0), 180.0);
    }
}
