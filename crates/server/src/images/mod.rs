//! Product image processing.
//!
//! Every uploaded image is cut down to the largest square centered in the
//! original and resampled to [`IMAGE_SIZE`] x [`IMAGE_SIZE`] pixels. The file
//! is overwritten in place, keeping the format it was decoded from.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{ImageFormat, ImageReader};
use thiserror::Error;

/// Side length of processed product images, in pixels.
pub const IMAGE_SIZE: u32 = 600;

/// Errors that can occur while cropping an image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The file could not be opened or read.
    #[error("image I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents are not a decodable image.
    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The decoded image could not be written back.
    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// The format could not be determined from the file contents.
    #[error("unrecognized image format")]
    UnknownFormat,

    /// The image has zero width or height.
    #[error("image has no pixels")]
    Empty,
}

impl ImageError {
    /// Whether the error is caused by the uploaded content rather than the server.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::UnknownFormat | Self::Empty)
    }
}

/// A square region inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareRegion {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Side length.
    pub side: u32,
}

/// Compute the largest square centered in a `width` x `height` image.
///
/// Offsets are rounded down, so an odd leftover puts the extra pixel on the
/// right or bottom.
///
/// ```
/// use vitrine_server::images::{SquareRegion, centered_square};
///
/// assert_eq!(centered_square(800, 600), SquareRegion { x: 100, y: 0, side: 600 });
/// assert_eq!(centered_square(5, 8), SquareRegion { x: 0, y: 1, side: 5 });
/// ```
#[must_use]
pub const fn centered_square(width: u32, height: u32) -> SquareRegion {
    let side = if width < height { width } else { height };
    SquareRegion {
        x: (width - side) / 2,
        y: (height - side) / 2,
        side,
    }
}

/// Crop the image at `path` to a centered square and resize it to
/// [`IMAGE_SIZE`], overwriting the file.
///
/// This does blocking file and CPU work; async callers should use
/// [`crop_to_square_blocking`].
///
/// # Errors
///
/// Returns `ImageError::Io` if the file cannot be read,
/// `ImageError::UnknownFormat` or `ImageError::Decode` if it is not an image,
/// `ImageError::Empty` for a zero-sized image, and `ImageError::Encode` if the
/// result cannot be saved.
pub fn crop_to_square(path: &Path) -> Result<(), ImageError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format: ImageFormat = reader.format().ok_or(ImageError::UnknownFormat)?;
    let img = reader.decode().map_err(ImageError::Decode)?;

    if img.width() == 0 || img.height() == 0 {
        return Err(ImageError::Empty);
    }

    let region = centered_square(img.width(), img.height());
    let resized = img
        .crop_imm(region.x, region.y, region.side, region.side)
        .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Lanczos3);

    resized
        .save_with_format(path, format)
        .map_err(ImageError::Encode)?;

    tracing::debug!(
        path = %path.display(),
        original_width = img.width(),
        original_height = img.height(),
        ?format,
        "Cropped image to square"
    );

    Ok(())
}

/// Run [`crop_to_square`] on the blocking thread pool.
///
/// # Errors
///
/// Same as [`crop_to_square`]; a panicked worker is reported as `ImageError::Io`.
pub async fn crop_to_square_blocking(path: PathBuf) -> Result<(), ImageError> {
    tokio::task::spawn_blocking(move || crop_to_square(&path))
        .await
        .map_err(|e| ImageError::Io(std::io::Error::other(e)))?
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::{ImageBuffer, Rgb, RgbImage};

    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    /// A `width` x `height` image whose centered square is red and the rest blue.
    fn two_tone(width: u32, height: u32) -> RgbImage {
        let region = centered_square(width, height);
        ImageBuffer::from_fn(width, height, |x, y| {
            let inside = x >= region.x
                && x < region.x + region.side
                && y >= region.y
                && y < region.y + region.side;
            if inside { RED } else { BLUE }
        })
    }

    #[test]
    fn test_centered_square_landscape() {
        assert_eq!(
            centered_square(1000, 600),
            SquareRegion {
                x: 200,
                y: 0,
                side: 600
            }
        );
    }

    #[test]
    fn test_centered_square_portrait_odd_leftover() {
        assert_eq!(
            centered_square(300, 401),
            SquareRegion {
                x: 0,
                y: 50,
                side: 300
            }
        );
    }

    #[test]
    fn test_centered_square_square_input() {
        assert_eq!(
            centered_square(450, 450),
            SquareRegion {
                x: 0,
                y: 0,
                side: 450
            }
        );
    }

    #[test]
    fn test_crop_landscape_keeps_center() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        two_tone(900, 300).save(&path).unwrap();

        crop_to_square(&path).unwrap();

        let out = image::open(&path).unwrap().to_rgb8();
        assert_eq!(out.dimensions(), (IMAGE_SIZE, IMAGE_SIZE));
        for (x, y) in [(0, 0), (599, 0), (0, 599), (599, 599), (300, 300)] {
            assert_eq!(*out.get_pixel(x, y), RED, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn test_crop_portrait_keeps_center() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tall.png");
        two_tone(200, 700).save(&path).unwrap();

        crop_to_square(&path).unwrap();

        let out = image::open(&path).unwrap().to_rgb8();
        assert_eq!(out.dimensions(), (IMAGE_SIZE, IMAGE_SIZE));
        assert_eq!(*out.get_pixel(0, 0), RED);
        assert_eq!(*out.get_pixel(599, 599), RED);
    }

    #[test]
    fn test_square_input_is_only_resampled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.png");
        RgbImage::from_pixel(600, 600, BLUE).save(&path).unwrap();

        crop_to_square(&path).unwrap();

        let out = image::open(&path).unwrap().to_rgb8();
        assert_eq!(out.dimensions(), (IMAGE_SIZE, IMAGE_SIZE));
        assert!(out.pixels().all(|p| *p == BLUE));
    }

    #[test]
    fn test_format_is_guessed_from_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.bin");
        two_tone(40, 20)
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        crop_to_square(&path).unwrap();

        let reader = ImageReader::open(&path)
            .unwrap()
            .with_guessed_format()
            .unwrap();
        assert_eq!(reader.format(), Some(ImageFormat::Png));
    }

    #[test]
    fn test_garbage_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = crop_to_square(&path).unwrap_err();
        assert!(err.is_invalid_input(), "unexpected error: {err}");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = crop_to_square(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, ImageError::Io(_)));
        assert!(!err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_blocking_wrapper() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        two_tone(120, 60).save(&path).unwrap();

        crop_to_square_blocking(path.clone()).await.unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (IMAGE_SIZE, IMAGE_SIZE));
    }
}
