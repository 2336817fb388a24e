//! PNG snapshots of the software canvas.

use crate::error::CaptureError;
use crate::surface::{DrawSurface, PixelCanvas};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Write `canvas` to `path` as an opaque RGBA PNG.
pub fn save_png(canvas: &PixelCanvas, path: impl AsRef<Path>) -> Result<(), CaptureError> {
    let pixels = canvas.to_rgba8();
    let bytes: &[u8] = bytemuck::cast_slice(&pixels);
    let expected = canvas.width() as usize * canvas.height() as usize * 4;

    let image = image::RgbaImage::from_raw(canvas.width(), canvas.height(), bytes.to_vec())
        .ok_or(CaptureError::BufferSize {
            expected,
            actual: bytes.len(),
        })?;
    image.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
    Ok(())
}

/// A fresh snapshot file name in `dir`, stamped with the current time.
pub fn snapshot_path(dir: impl AsRef<Path>) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    dir.as_ref().join(format!("chaos-backdrop-{}.png", millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Composite;
    use glam::Vec3;

    #[test]
    fn test_png_round_trip() {
        let mut canvas = PixelCanvas::new(5, 3).unwrap();
        canvas.fill_rect(1.0, 1.0, 1.0, 1.0, Vec3::new(1.0, 0.0, 0.0), 1.0, Composite::Lighter);

        let name = format!("chaos-backdrop-test-{}.png", std::process::id());
        let path = std::env::temp_dir().join(name);
        save_png(&canvas, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.dimensions(), (5, 3));
        assert_eq!(loaded.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(loaded.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_snapshot_path_is_png() {
        let path = snapshot_path("/tmp");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert!(path.starts_with("/tmp"));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let canvas = PixelCanvas::new(1, 1).unwrap();
        let result = save_png(&canvas, "/nonexistent-dir/for/sure/shot.png");
        assert!(matches!(result, Err(CaptureError::Encode(_))));
    }
}
