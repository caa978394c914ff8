//! Encoder configuration and re-exports.
//!
//! [`EncoderConfig`] bundles the per-format knobs into a single value that
//! the emitter hands to every encode request.

/// PNG configuration types from the png crate.
pub mod png_codec {
    pub use png::Compression;
}

/// Default AVIF quality (1-100).
pub const DEFAULT_AVIF_QUALITY: u8 = 80;

/// Default AVIF speed (1-10, lower = slower/better).
pub const DEFAULT_AVIF_SPEED: u8 = 6;

/// Format-specific encoder settings.
///
/// WebP is always encoded lossless, so it has no knobs here.
///
/// # Example
///
/// ```
/// use zenfavicon::EncoderConfig;
/// use zenfavicon::config::png_codec::Compression;
///
/// let config = EncoderConfig::default()
///     .with_png_compression(Compression::High)
///     .with_avif_quality(60);
/// assert_eq!(config.avif_quality, 60);
/// ```
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct EncoderConfig {
    /// PNG deflate effort.
    pub png_compression: png::Compression,

    /// AVIF quality, clamped to 1-100 at encode time.
    pub avif_quality: u8,

    /// AVIF encode speed, clamped to 1-10 at encode time.
    pub avif_speed: u8,

    /// Worker threads for the AVIF encoder. `None` lets ravif decide.
    pub avif_threads: Option<usize>,
}

impl EncoderConfig {
    /// Set PNG compression level.
    pub fn with_png_compression(mut self, compression: png::Compression) -> Self {
        self.png_compression = compression;
        self
    }

    /// Set AVIF encode quality (1-100).
    pub fn with_avif_quality(mut self, quality: u8) -> Self {
        self.avif_quality = quality;
        self
    }

    /// Set AVIF encode speed (1-10, lower = slower/better).
    pub fn with_avif_speed(mut self, speed: u8) -> Self {
        self.avif_speed = speed;
        self
    }

    /// Cap the AVIF encoder's thread count.
    pub fn with_avif_threads(mut self, threads: Option<usize>) -> Self {
        self.avif_threads = threads;
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            png_compression: png::Compression::Balanced,
            avif_quality: DEFAULT_AVIF_QUALITY,
            avif_speed: DEFAULT_AVIF_SPEED,
            avif_threads: None,
        }
    }
}
