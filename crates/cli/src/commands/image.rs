//! Image maintenance commands.
//!
//! # Usage
//!
//! ```bash
//! vitrine-cli image crop static/uploads/shoe.png
//! ```

use std::path::PathBuf;

use vitrine_server::images::{self, IMAGE_SIZE, ImageError};

/// Crop the image at `path` to a centered square of [`IMAGE_SIZE`] pixels.
///
/// # Errors
///
/// Returns `ImageError` if the file cannot be read, decoded, or written.
pub async fn crop(path: PathBuf) -> Result<(), ImageError> {
    tracing::info!(path = %path.display(), "Cropping image...");
    images::crop_to_square_blocking(path).await?;
    tracing::info!("Image cropped to {IMAGE_SIZE}x{IMAGE_SIZE}");
    Ok(())
}
