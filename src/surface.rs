//! 2D drawing surfaces.
//!
//! The backdrop draws through [`DrawSurface`], a minimal canvas-like API:
//! a full-surface wash and filled rectangles with a composite operation.
//! [`PixelCanvas`] is the software implementation used by the window host,
//! snapshots, tests and benchmarks.

use crate::error::SurfaceError;
use glam::Vec3;

/// Largest surface edge accepted by [`PixelCanvas`], in pixels.
pub const MAX_EDGE: u32 = 16_384;

/// How a drawn color combines with the surface underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composite {
    /// Standard alpha blending.
    SourceOver,
    /// Additive blending: overlapping particles glow brighter.
    #[default]
    Lighter,
}

impl Composite {
    /// Blend `src` at opacity `alpha` onto `dst`.
    #[inline]
    pub fn apply(self, dst: Vec3, src: Vec3, alpha: f32) -> Vec3 {
        match self {
            Composite::SourceOver => dst * (1.0 - alpha) + src * alpha,
            Composite::Lighter => (dst + src * alpha).min(Vec3::ONE),
        }
    }
}

/// A drawable 2D surface of known pixel dimensions.
///
/// Colors are RGB in `[0, 1]`; coordinates are pixels with the origin at the
/// top-left corner.
pub trait DrawSurface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Change the pixel dimensions. Contents are cleared to black.
    ///
    /// A surface may refuse a size it cannot hold; callers compare
    /// [`width`](Self::width) and [`height`](Self::height) afterwards.
    fn resize(&mut self, width: u32, height: u32);

    /// Paint `color` at opacity `alpha` over the whole surface (source-over).
    fn wash(&mut self, color: Vec3, alpha: f32);

    /// Fill an axis-aligned rectangle; partially covered pixels receive a
    /// proportional share of `alpha`.
    #[allow(clippy::too_many_arguments)]
    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Vec3,
        alpha: f32,
        composite: Composite,
    );
}

/// Software RGB canvas.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl PixelCanvas {
    /// Allocate a black canvas.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        check_size(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; width as usize * height as usize],
        })
    }

    /// Color of the pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec3> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    /// Set every pixel to `color`.
    pub fn clear(&mut self, color: Vec3) {
        self.pixels.fill(color);
    }

    /// Encode the canvas as opaque 8-bit RGBA, row-major.
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        self.pixels
            .iter()
            .map(|c| {
                let c = (c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
                [c.x as u8, c.y as u8, c.z as u8, 255]
            })
            .collect()
    }

    /// Mean brightness over all pixels, `[0, 1]`.
    pub fn mean_luma(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .pixels
            .iter()
            .map(|c| c.dot(Vec3::new(0.2126, 0.7152, 0.0722)))
            .sum();
        sum / self.pixels.len() as f32
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl DrawSurface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        if check_size(width, height).is_err() {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, Vec3::ZERO);
    }

    fn wash(&mut self, color: Vec3, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha >= 1.0 {
            self.clear(color);
            return;
        }
        for pixel in &mut self.pixels {
            *pixel = Composite::SourceOver.apply(*pixel, color, alpha);
        }
    }

    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Vec3,
        alpha: f32,
        composite: Composite,
    ) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        let (x0, y0, x1, y1) = (x, y, x + width, y + height);
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return;
        }

        let col_start = x0.floor().max(0.0) as u32;
        let col_end = (x1.ceil().min(self.width as f32)).max(0.0) as u32;
        let row_start = y0.floor().max(0.0) as u32;
        let row_end = (y1.ceil().min(self.height as f32)).max(0.0) as u32;

        for row in row_start..row_end {
            let cover_y = y1.min(row as f32 + 1.0) - y0.max(row as f32);
            if cover_y <= 0.0 {
                continue;
            }
            for col in col_start..col_end {
                let cover_x = x1.min(col as f32 + 1.0) - x0.max(col as f32);
                if cover_x <= 0.0 {
                    continue;
                }
                let i = self.index(col, row);
                self.pixels[i] = composite.apply(self.pixels[i], color, alpha * cover_x * cover_y);
            }
        }
    }
}

fn check_size(width: u32, height: u32) -> Result<(), SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::ZeroSize { width, height });
    }
    if width > MAX_EDGE || height > MAX_EDGE {
        return Err(SurfaceError::TooLarge { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert_eq!(
            PixelCanvas::new(0, 10).unwrap_err(),
            SurfaceError::ZeroSize { width: 0, height: 10 }
        );
        assert!(matches!(
            PixelCanvas::new(MAX_EDGE + 1, 1),
            Err(SurfaceError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_wash_fades_toward_background() {
        let mut canvas = PixelCanvas::new(2, 2).unwrap();
        canvas.clear(Vec3::ONE);
        canvas.wash(Vec3::ZERO, 0.12);
        assert!(close(canvas.pixel(0, 0).unwrap(), Vec3::splat(0.88)));
        canvas.wash(Vec3::ZERO, 0.12);
        assert!(close(canvas.pixel(1, 1).unwrap(), Vec3::splat(0.88 * 0.88)));
    }

    #[test]
    fn test_lighter_accumulates_and_saturates() {
        let mut canvas = PixelCanvas::new(4, 4).unwrap();
        let red = Vec3::new(1.0, 0.0, 0.0);
        canvas.fill_rect(1.0, 1.0, 1.0, 1.0, red, 0.6, Composite::Lighter);
        assert!(close(canvas.pixel(1, 1).unwrap(), Vec3::new(0.6, 0.0, 0.0)));
        canvas.fill_rect(1.0, 1.0, 1.0, 1.0, red, 0.6, Composite::Lighter);
        assert!(close(canvas.pixel(1, 1).unwrap(), Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(canvas.pixel(0, 0).unwrap(), Vec3::ZERO);
    }

    #[test]
    fn test_source_over_replaces_at_full_alpha() {
        let mut canvas = PixelCanvas::new(3, 3).unwrap();
        canvas.clear(Vec3::splat(0.5));
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0, Vec3::new(0.0, 1.0, 0.0), 1.0, Composite::SourceOver);
        assert!(close(canvas.pixel(0, 0).unwrap(), Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_fractional_rect_splits_coverage() {
        let mut canvas = PixelCanvas::new(4, 4).unwrap();
        // 1.6 px square starting half way into pixel 1
        canvas.fill_rect(1.5, 1.0, 1.6, 1.0, Vec3::ONE, 1.0, Composite::Lighter);
        let left = canvas.pixel(1, 1).unwrap().x;
        let middle = canvas.pixel(2, 1).unwrap().x;
        let right = canvas.pixel(3, 1).unwrap().x;
        assert!((left - 0.5).abs() < 1e-5);
        assert!((middle - 1.0).abs() < 1e-5);
        assert!((right - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_offscreen_rects_are_clipped() {
        let mut canvas = PixelCanvas::new(4, 4).unwrap();
        canvas.fill_rect(-10.0, -10.0, 2.0, 2.0, Vec3::ONE, 1.0, Composite::Lighter);
        canvas.fill_rect(100.0, 2.0, 2.0, 2.0, Vec3::ONE, 1.0, Composite::Lighter);
        canvas.fill_rect(f32::NAN, 2.0, 2.0, 2.0, Vec3::ONE, 1.0, Composite::Lighter);
        canvas.fill_rect(3.5, 3.5, 2.0, 2.0, Vec3::ONE, 1.0, Composite::Lighter);
        assert!((canvas.pixel(3, 3).unwrap().x - 0.25).abs() < 1e-5);
        let lit = canvas.pixels().iter().filter(|p| **p != Vec3::ZERO).count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut canvas = PixelCanvas::new(4, 4).unwrap();
        canvas.clear(Vec3::ONE);
        canvas.resize(8, 2);
        assert_eq!((canvas.width(), canvas.height()), (8, 2));
        assert_eq!(canvas.pixels().len(), 16);
        assert!(canvas.pixels().iter().all(|p| *p == Vec3::ZERO));
        canvas.resize(0, 5);
        assert_eq!((canvas.width(), canvas.height()), (8, 2));
    }

    #[test]
    fn test_rgba8_encoding() {
        let mut canvas = PixelCanvas::new(1, 1).unwrap();
        canvas.clear(Vec3::new(1.0, 0.5, 2.0));
        assert_eq!(canvas.to_rgba8(), vec![[255, 128, 255, 255]]);
    }
}
