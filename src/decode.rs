//! Source image loading.
//!
//! Raster sources are identified by content (magic bytes); vector sources
//! purely by file extension. Whatever the input, the result is a
//! straight-alpha RGBA8 [`SourceImage`].

use std::path::Path;

use crate::{FaviconError, ImageFormat, Limits, Result, SourceImage};

/// Image decode request builder.
///
/// # Example
///
/// ```no_run
/// use zenfavicon::{DecodeRequest, Limits};
///
/// let data = std::fs::read("logo.png")?;
/// let limits = Limits::default();
/// let source = DecodeRequest::new(&data).with_limits(&limits).decode()?;
/// println!("{}x{}", source.width(), source.height());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    format: Option<ImageFormat>,
    limits: Option<&'a Limits>,
    resources_dir: Option<&'a Path>,
}

impl<'a> DecodeRequest<'a> {
    /// Create a new decode request.
    ///
    /// Format will be auto-detected from magic bytes. SVG is never sniffed;
    /// pass it explicitly with [`with_format`](Self::with_format).
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            format: None,
            limits: None,
            resources_dir: None,
        }
    }

    /// Override format auto-detection.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set resource limits. Defaults to [`Limits::default`].
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Directory that relative references inside an SVG resolve against.
    pub fn with_resources_dir(mut self, dir: &'a Path) -> Self {
        self.resources_dir = Some(dir);
        self
    }

    /// Decode the image to RGBA8.
    pub fn decode(self) -> Result<SourceImage> {
        let format = match self.format {
            Some(f) => f,
            None => sniff(self.data)?,
        };
        let default_limits = Limits::default();
        let limits = self.limits.unwrap_or(&default_limits);

        let source = self.decode_format(format, limits)?;
        log::debug!(
            "decoded {format:?} source: {}x{}",
            source.width(),
            source.height()
        );
        Ok(source)
    }

    /// Dispatch to format-specific decoder.
    fn decode_format(&self, format: ImageFormat, limits: &Limits) -> Result<SourceImage> {
        match format {
            ImageFormat::Png => crate::codecs::png::decode(self.data, limits),

            #[cfg(feature = "svg")]
            ImageFormat::Svg => crate::codecs::svg::decode(self.data, self.resources_dir, limits),
            #[cfg(not(feature = "svg"))]
            ImageFormat::Svg => Err(FaviconError::UnsupportedFormat(format)),

            ImageFormat::Avif => Err(FaviconError::UnsupportedFormat(format)),

            ImageFormat::Jpeg
            | ImageFormat::Gif
            | ImageFormat::WebP
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::Ico => crate::codecs::raster::decode(self.data, format, limits),
        }
    }
}

/// Magic bytes first, then the image crate's own guessing.
fn sniff(data: &[u8]) -> Result<ImageFormat> {
    if let Some(format) = ImageFormat::detect(data) {
        return Ok(format);
    }
    image::guess_format(data)
        .ok()
        .and_then(ImageFormat::from_image_crate)
        .ok_or(FaviconError::UnrecognizedFormat)
}

/// Load a source image from disk with default limits.
pub fn load(path: &Path) -> Result<SourceImage> {
    load_with_limits(path, &Limits::default())
}

/// Load a source image from disk.
///
/// A vector extension (`.svg`, `.svgz`) routes to the rasterizer; anything
/// else is identified by its content, so a mislabelled PNG still loads.
pub fn load_with_limits(path: &Path, limits: &Limits) -> Result<SourceImage> {
    let data = std::fs::read(path).map_err(|e| FaviconError::io(path, e))?;

    let mut request = DecodeRequest::new(&data).with_limits(limits);
    if let Some(format) = ImageFormat::from_path(path).filter(|f| f.is_vector()) {
        request = request.with_format(format);
        if let Some(dir) = path.parent() {
            request = request.with_resources_dir(dir);
        }
    }

    log::debug!("loading {}", path.display());
    request.decode()
}
