//! Generic raster decode adapter using the image crate.
//!
//! Covers JPEG, GIF (first frame), WebP, BMP, TIFF and ICO (largest entry).

use std::io::Cursor;

use imgref::ImgVec;
use rgb::Rgba;

use crate::{FaviconError, ImageFormat, Limits, Result, SourceImage};

/// Decode any raster format the image crate handles into straight RGBA8.
pub(crate) fn decode(data: &[u8], format: ImageFormat, limits: &Limits) -> Result<SourceImage> {
    let image_format = format
        .to_image_crate()
        .ok_or(FaviconError::UnsupportedFormat(format))?;

    // Header-only pass so oversized sources fail before any pixel allocation.
    let (width, height) = reader(data, image_format)
        .into_dimensions()
        .map_err(|e| FaviconError::from_codec(format, e))?;
    limits.check_dimensions(width, height)?;

    let decoded = reader(data, image_format)
        .decode()
        .map_err(|e| FaviconError::from_codec(format, e))?;

    let rgba = decoded.into_rgba8();
    let (w, h) = rgba.dimensions();
    let pixels: Vec<Rgba<u8>> = rgba
        .into_raw()
        .chunks_exact(4)
        .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
        .collect();

    Ok(SourceImage::new(ImgVec::new(pixels, w as usize, h as usize)))
}

fn reader(data: &[u8], format: image::ImageFormat) -> image::ImageReader<Cursor<&[u8]>> {
    let mut reader = image::ImageReader::new(Cursor::new(data));
    reader.set_format(format);
    reader
}
