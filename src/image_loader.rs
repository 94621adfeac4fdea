use std::io::Cursor;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use image::{DynamicImage, ImageFormat};

use crate::error::ThumbnailError;

/// Decode the file at `path`. Animated GIFs yield their first frame.
pub fn open_image(path: &Path) -> Result<DynamicImage, ThumbnailError> {
    let bytes = std::fs::read(path).map_err(|source| ThumbnailError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let decode_err = |source: image::ImageError| ThumbnailError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let format = image::guess_format(&bytes).ok();

    if format == Some(ImageFormat::Gif) {
        let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(decode_err)?;
        return match decoder.into_frames().next() {
            Some(frame) => Ok(DynamicImage::ImageRgba8(
                frame.map_err(decode_err)?.into_buffer(),
            )),
            None => Err(ThumbnailError::EmptyAnimation(path.to_path_buf())),
        };
    }

    let decoded = match format {
        Some(fmt) => image::load_from_memory_with_format(&bytes, fmt),
        None => image::load_from_memory(&bytes),
    };
    decoded.map_err(decode_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_open_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("red.png");
        RgbaImage::from_pixel(4, 3, Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let img = open_image(&path).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[test]
    fn test_open_gif_first_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("still.gif");
        RgbaImage::from_pixel(5, 2, Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();

        let img = open_image(&path).unwrap();
        assert_eq!((img.width(), img.height()), (5, 2));
    }

    #[test]
    fn test_open_animated_gif_returns_first_frame() {
        use image::codecs::gif::GifEncoder;
        use image::Frame;

        let dir = tempdir().unwrap();
        let path = dir.path().join("blink.gif");
        {
            let file = std::fs::File::create(&path).unwrap();
            let mut encoder = GifEncoder::new(file);
            encoder
                .encode_frames(vec![
                    Frame::new(RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]))),
                    Frame::new(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]))),
                ])
                .unwrap();
        }

        let img = open_image(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(3, 3), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let err = open_image(&dir.path().join("nope.jpg")).unwrap_err();
        assert!(matches!(err, ThumbnailError::Read { .. }));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = open_image(&path).unwrap_err();
        assert!(matches!(err, ThumbnailError::Decode { .. }));
    }
}
