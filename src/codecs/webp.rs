//! WebP encode adapter using the image crate's lossless VP8L encoder.

use imgref::ImgRef;
use rgb::Rgba;

use crate::encode::EncodeOutput;
use crate::{FaviconError, OutputFormat, Result};

/// Encode RGBA8 pixels to lossless WebP.
pub(crate) fn encode_rgba8(img: ImgRef<'_, Rgba<u8>>) -> Result<EncodeOutput> {
    let width = img.width() as u32;
    let height = img.height() as u32;
    let (buf, _, _) = img.to_contiguous_buf();
    let bytes: &[u8] = bytemuck::cast_slice(buf.as_ref());

    let mut output = Vec::new();
    image::codecs::webp::WebPEncoder::new_lossless(&mut output)
        .encode(bytes, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| FaviconError::encode_failed(OutputFormat::WebP, e))?;

    Ok(EncodeOutput::new(output, OutputFormat::WebP))
}
