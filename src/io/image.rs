//! Source image decoding and PNG export

use crate::io::error::{QuadError, Result, invalid_parameter};
use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Decoded source image with 16-bit RGBA samples
pub type SourceImage = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Load a source image from disk in any format the `image` crate decodes
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image has no pixels
/// - `max_dimension` is zero
pub fn load_source(path: &Path, max_dimension: Option<u32>) -> Result<SourceImage> {
    let img = image::open(path).map_err(|e| QuadError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    prepare_source(img, max_dimension)
}

/// Scale a decoded image to fit `max_dimension` and widen it to 16 bits
///
/// The aspect ratio is preserved. Images already within the limit are not
/// resampled.
///
/// # Errors
///
/// Returns an error if the image has no pixels or `max_dimension` is zero
pub fn prepare_source(img: DynamicImage, max_dimension: Option<u32>) -> Result<SourceImage> {
    if img.width() == 0 || img.height() == 0 {
        return Err(QuadError::InvalidSourceData {
            reason: format!(
                "image has no pixels ({}x{})",
                img.width(),
                img.height()
            ),
        });
    }

    let img = match max_dimension {
        Some(0) => {
            return Err(invalid_parameter(
                "max_dimension",
                &0,
                &"maximum dimension must be at least 1",
            ));
        }
        Some(max) if img.width().max(img.height()) > max => {
            img.resize(max, max, FilterType::Triangle)
        }
        _ => img,
    };

    Ok(img.to_rgba16())
}

/// Save an 8-bit RGBA raster as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be encoded and written
pub fn save_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| QuadError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| QuadError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
