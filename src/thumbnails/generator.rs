//! Square thumbnail extraction using the image crate.
//!
//! Thumbnails are always exactly `size` x `size`. Sources large enough are
//! scaled to cover the square and center-cropped; smaller sources are never
//! upscaled and instead sit centered on a transparent canvas.

use std::path::Path;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};
use tracing::debug;

use crate::error::ThumbnailError;
use crate::image_loader::open_image;

/// Default edge length of grid thumbnails in pixels.
pub const DEFAULT_THUMB_SIZE: u32 = 148;

/// Largest edge length accepted from configuration.
pub const MAX_THUMB_SIZE: u32 = 1024;

/// A decoded RGBA thumbnail. Clones share the pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    image: Arc<RgbaImage>,
}

impl Thumbnail {
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Bytes per row of the RGBA buffer.
    pub fn stride(&self) -> usize {
        self.image.width() as usize * 4
    }

    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    #[cfg(test)]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

pub struct ThumbnailGenerator;

impl ThumbnailGenerator {
    /// Decode `src` and extract a `size` x `size` thumbnail from it.
    pub fn generate(src: &Path, size: u32) -> Result<Thumbnail, ThumbnailError> {
        let img = open_image(src)?;
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ThumbnailError::ZeroSize(src.to_path_buf()));
        }

        debug!(?src, width, height, size, "Extracting thumbnail");
        Ok(Thumbnail::from_image(Self::extract(&img, size)))
    }

    /// Extract a square thumbnail from an already decoded image.
    pub fn extract(img: &DynamicImage, size: u32) -> RgbaImage {
        let (width, height) = img.dimensions();

        if width >= size && height >= size {
            // CatmullRom gives a good quality/speed balance for downscaling
            return img.resize_to_fill(size, size, FilterType::CatmullRom).to_rgba8();
        }

        let crop_w = width.min(size);
        let crop_h = height.min(size);
        let region = img
            .crop_imm((width - crop_w) / 2, (height - crop_h) / 2, crop_w, crop_h)
            .to_rgba8();

        let mut canvas = RgbaImage::new(size, size);
        imageops::replace(
            &mut canvas,
            &region,
            ((size - crop_w) / 2) as i64,
            ((size - crop_h) / 2) as i64,
        );
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn test_landscape_is_cropped_to_square() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1920, 1080, RED));
        let thumb = ThumbnailGenerator::extract(&img, 148);
        assert_eq!(thumb.dimensions(), (148, 148));
        assert_eq!(*thumb.get_pixel(74, 74), RED);
    }

    #[test]
    fn test_center_crop_keeps_the_middle() {
        // Left and right thirds are blue, the middle third red.
        let mut src = RgbaImage::from_pixel(300, 100, BLUE);
        for x in 100..200 {
            for y in 0..100 {
                src.put_pixel(x, y, RED);
            }
        }
        let thumb = ThumbnailGenerator::extract(&DynamicImage::ImageRgba8(src), 100);
        assert_eq!(thumb.dimensions(), (100, 100));
        assert_eq!(*thumb.get_pixel(50, 50), RED);
        assert_eq!(*thumb.get_pixel(5, 50), RED);
        assert_eq!(*thumb.get_pixel(94, 50), RED);
    }

    #[test]
    fn test_small_source_is_padded_not_upscaled() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 20, RED));
        let thumb = ThumbnailGenerator::extract(&img, 40);
        assert_eq!(thumb.dimensions(), (40, 40));

        // Source occupies x 15..25, y 10..30.
        assert_eq!(*thumb.get_pixel(15, 10), RED);
        assert_eq!(*thumb.get_pixel(24, 29), RED);
        assert_eq!(thumb.get_pixel(14, 10)[3], 0);
        assert_eq!(thumb.get_pixel(15, 30)[3], 0);
    }

    #[test]
    fn test_narrow_source_crops_long_edge() {
        // Taller than the target but narrower: height is cropped, width padded.
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 500, BLUE));
        let thumb = ThumbnailGenerator::extract(&img, 32);
        assert_eq!(thumb.dimensions(), (32, 32));
        assert_eq!(*thumb.get_pixel(12, 0), BLUE);
        assert_eq!(*thumb.get_pixel(19, 31), BLUE);
        assert_eq!(thumb.get_pixel(11, 0)[3], 0);
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.png");
        RgbaImage::from_pixel(600, 400, BLUE).save(&path).unwrap();

        let thumb = ThumbnailGenerator::generate(&path, DEFAULT_THUMB_SIZE).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (148, 148));
        assert_eq!(thumb.stride(), 148 * 4);
        assert_eq!(thumb.pixels().len(), 148 * 148 * 4);
    }

    #[test]
    fn test_generate_corrupt_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0, 0, 0]).unwrap();

        assert!(ThumbnailGenerator::generate(&path, 148).is_err());
    }
}
