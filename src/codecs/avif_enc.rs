//! AVIF encode adapter using ravif.

use imgref::ImgRef;
use rgb::Rgba;

use crate::config::EncoderConfig;
use crate::encode::EncodeOutput;
use crate::{FaviconError, OutputFormat, Result};

/// Encode RGBA8 pixels to AVIF.
pub(crate) fn encode_rgba8(
    img: ImgRef<'_, Rgba<u8>>,
    config: &EncoderConfig,
) -> Result<EncodeOutput> {
    let encoder = build_ravif_encoder(config);

    let result = encoder
        .encode_rgba(img)
        .map_err(|e| FaviconError::encode_failed(OutputFormat::Avif, e))?;

    Ok(EncodeOutput::new(result.avif_file, OutputFormat::Avif))
}

/// Build a ravif Encoder, clamping values ravif would assert on.
fn build_ravif_encoder(config: &EncoderConfig) -> ravif::Encoder {
    let quality = f32::from(config.avif_quality.clamp(1, 100));
    let speed = config.avif_speed.clamp(1, 10);
    let threads = config.avif_threads.filter(|&n| n > 0);

    ravif::Encoder::new()
        .with_quality(quality)
        .with_speed(speed)
        .with_num_threads(threads)
}
