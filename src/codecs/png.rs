//! PNG codec adapter using the png crate.

use std::io::Cursor;

use imgref::{ImgRef, ImgVec};
use rgb::Rgba;

use crate::config::EncoderConfig;
use crate::encode::EncodeOutput;
use crate::{FaviconError, ImageFormat, Limits, OutputFormat, Result, SourceImage};

/// Decode PNG to straight RGBA8.
///
/// Palette and 16-bit images are normalized to 8-bit; grayscale and RGB are
/// expanded with an opaque alpha channel (or the tRNS-derived one).
pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<SourceImage> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder
        .read_info()
        .map_err(|e| FaviconError::from_codec(ImageFormat::Png, e))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    limits.check_dimensions(width, height)?;

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| FaviconError::InvalidInput("cannot determine PNG output buffer size".into()))?;
    let mut raw_pixels = vec![0u8; buffer_size];

    let output_info = reader
        .next_frame(&mut raw_pixels)
        .map_err(|e| FaviconError::from_codec(ImageFormat::Png, e))?;
    raw_pixels.truncate(output_info.buffer_size());

    let (color_type, _bit_depth) = reader.output_color_type();
    let w = width as usize;
    let h = height as usize;

    let rgba: Vec<Rgba<u8>> = match color_type {
        png::ColorType::Rgba => bytemuck::cast_slice(&raw_pixels).to_vec(),
        png::ColorType::Rgb => raw_pixels
            .chunks_exact(3)
            .map(|c| Rgba::new(c[0], c[1], c[2], 255))
            .collect(),
        png::ColorType::GrayscaleAlpha => raw_pixels
            .chunks_exact(2)
            .map(|ga| Rgba::new(ga[0], ga[0], ga[0], ga[1]))
            .collect(),
        png::ColorType::Grayscale => raw_pixels
            .iter()
            .map(|&g| Rgba::new(g, g, g, 255))
            .collect(),
        // normalize_to_color8 expands palettes before we see them
        png::ColorType::Indexed => {
            return Err(FaviconError::InvalidInput(
                "PNG palette was not expanded".into(),
            ));
        }
    };

    if rgba.len() != w * h {
        return Err(FaviconError::InvalidInput(format!(
            "PNG frame holds {} pixels, expected {w}x{h}",
            rgba.len()
        )));
    }

    Ok(SourceImage::new(ImgVec::new(rgba, w, h)))
}

/// Encode RGBA8 pixels to PNG.
pub(crate) fn encode_rgba8(
    img: ImgRef<'_, Rgba<u8>>,
    config: &EncoderConfig,
) -> Result<EncodeOutput> {
    let width = img.width() as u32;
    let height = img.height() as u32;
    let (buf, _, _) = img.to_contiguous_buf();
    let bytes: &[u8] = bytemuck::cast_slice(buf.as_ref());

    let mut output = Vec::new();
    let mut encoder = png::Encoder::new(&mut output, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(config.png_compression);

    let mut writer = encoder
        .write_header()
        .map_err(|e| FaviconError::encode_failed(OutputFormat::Png, e))?;

    writer
        .write_image_data(bytes)
        .map_err(|e| FaviconError::encode_failed(OutputFormat::Png, e))?;

    writer
        .finish()
        .map_err(|e| FaviconError::encode_failed(OutputFormat::Png, e))?;

    Ok(EncodeOutput::new(output, OutputFormat::Png))
}
