//! # Image Export
//!
//! Writes a field grid's color buffer as an RGB PNG, one pixel per sample.
//! Row 0 of the grid (most negative z) is the top of the image.

use image::{ImageEncoder, Rgb, RgbImage};
use std::path::Path;

use crate::error::UndulateError;
use crate::field::FieldGrid;

/// Convert the grid's color buffer to an 8-bit RGB image.
pub fn to_rgb_image(grid: &FieldGrid) -> RgbImage {
    let side = grid.layout().side() as u32;
    let mut img = RgbImage::new(side, side);
    for (i, &color) in grid.colors().iter().enumerate() {
        let x = i as u32 % side;
        let y = i as u32 / side;
        img.put_pixel(x, y, Rgb(color.map(to_u8)));
    }
    img
}

#[inline]
fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Encode the grid as PNG bytes.
pub fn encode_png(grid: &FieldGrid) -> Result<Vec<u8>, UndulateError> {
    let img = to_rgb_image(grid);
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e: image::ImageError| UndulateError::Image(e.to_string()))?;
    Ok(png_bytes)
}

/// Save the grid as a PNG file.
pub fn save_png(grid: &FieldGrid, path: &Path) -> Result<(), UndulateError> {
    to_rgb_image(grid)
        .save(path)
        .map_err(|e| UndulateError::Image(format!("Failed to save PNG: {}", e)))?;
    tracing::info!(path = %path.display(), side = grid.layout().side(), "saved field image");
    Ok(())
}
