//! Bitmap encoding to the output formats.

use imgref::ImgRef;
use rgb::Rgba;

use crate::config::EncoderConfig;
use crate::{FaviconError, OutputFormat, Result};

/// Encoded image output.
#[derive(Clone, Debug)]
pub struct EncodeOutput {
    /// Encoded image data.
    pub data: Vec<u8>,
    /// Format used for encoding.
    pub format: OutputFormat,
}

impl EncodeOutput {
    pub(crate) fn new(data: Vec<u8>, format: OutputFormat) -> Self {
        Self { data, format }
    }
}

/// Image encode request builder.
///
/// # Example
///
/// ```
/// use zenfavicon::{EncodeRequest, OutputFormat};
/// use imgref::ImgVec;
/// use rgb::Rgba;
///
/// let pixels = ImgVec::new(vec![Rgba::new(0u8, 0, 0, 255); 16 * 16], 16, 16);
/// let output = EncodeRequest::new(OutputFormat::Png).encode_rgba8(pixels.as_ref())?;
/// assert_eq!(output.format, OutputFormat::Png);
/// # Ok::<(), zenfavicon::FaviconError>(())
/// ```
pub struct EncodeRequest<'a> {
    format: OutputFormat,
    config: Option<&'a EncoderConfig>,
}

impl<'a> EncodeRequest<'a> {
    /// Encode to a specific format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            config: None,
        }
    }

    /// Set format-specific encoder configuration.
    pub fn with_config(mut self, config: &'a EncoderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Encode RGBA8 pixels.
    ///
    /// Fails with [`FaviconError::UnsupportedOutput`] when the format's
    /// encoder is not compiled in.
    pub fn encode_rgba8(self, img: ImgRef<'_, Rgba<u8>>) -> Result<EncodeOutput> {
        if img.width() == 0 || img.height() == 0 {
            return Err(FaviconError::InvalidInput(format!(
                "cannot encode empty {}x{} bitmap",
                img.width(),
                img.height()
            )));
        }
        let default_config = EncoderConfig::default();
        let config = self.config.unwrap_or(&default_config);
        self.encode_format_rgba8(img, config)
    }

    #[allow(unused_variables)]
    fn encode_format_rgba8(
        &self,
        img: ImgRef<'_, Rgba<u8>>,
        config: &EncoderConfig,
    ) -> Result<EncodeOutput> {
        match self.format {
            OutputFormat::Png => crate::codecs::png::encode_rgba8(img, config),

            #[cfg(feature = "webp")]
            OutputFormat::WebP => crate::codecs::webp::encode_rgba8(img),
            #[cfg(not(feature = "webp"))]
            OutputFormat::WebP => Err(FaviconError::UnsupportedOutput(self.format)),

            #[cfg(feature = "avif")]
            OutputFormat::Avif => crate::codecs::avif_enc::encode_rgba8(img, config),
            #[cfg(not(feature = "avif"))]
            OutputFormat::Avif => Err(FaviconError::UnsupportedOutput(self.format)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgref::ImgVec;

    #[test]
    fn builder_pattern() {
        let config = EncoderConfig::default().with_avif_quality(50);
        let request = EncodeRequest::new(OutputFormat::Avif).with_config(&config);
        assert_eq!(request.format, OutputFormat::Avif);
        assert_eq!(request.config.map(|c| c.avif_quality), Some(50));
    }

    #[test]
    fn empty_bitmap_rejected() {
        let img: ImgVec<Rgba<u8>> = ImgVec::new(vec![], 4, 0);
        let result = EncodeRequest::new(OutputFormat::Png).encode_rgba8(img.as_ref());
        assert!(matches!(result, Err(FaviconError::InvalidInput(_))));
    }

    #[test]
    fn availability_matches_dispatch() {
        let img = ImgVec::new(vec![Rgba::new(1, 2, 3, 255); 16 * 16], 16, 16);
        for format in OutputFormat::ALL {
            let result = EncodeRequest::new(format).encode_rgba8(img.as_ref());
            if format.is_available() {
                assert_eq!(result.unwrap().format, format);
            } else {
                assert!(matches!(result, Err(FaviconError::UnsupportedOutput(f)) if f == format));
            }
        }
    }
}
