//! Normalized in-memory bitmaps: the loaded source and the rendered icons.

use imgref::{ImgRef, ImgVec};
use rgb::Rgba;

use crate::iconset::SizeSpec;
use crate::{FaviconError, Result};

/// A straight-alpha RGBA8 bitmap produced by the loader.
///
/// Always four channels, whatever the source had. Immutable once built.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: ImgVec<Rgba<u8>>,
}

impl SourceImage {
    /// Wrap an RGBA pixel buffer.
    pub fn new(pixels: ImgVec<Rgba<u8>>) -> Self {
        Self { pixels }
    }

    /// Build from tightly packed RGBA bytes (row-major, 4 bytes per pixel).
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || bytes.len() != expected {
            return Err(FaviconError::InvalidInput(format!(
                "RGBA buffer of {} bytes does not match {width}x{height}",
                bytes.len()
            )));
        }
        let rgba: &[Rgba<u8>] = bytemuck::cast_slice(bytes);
        Ok(Self::new(ImgVec::new(
            rgba.to_vec(),
            width as usize,
            height as usize,
        )))
    }

    /// A solid-color bitmap, handy for tests and placeholders.
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        let len = width as usize * height as usize;
        Self::new(ImgVec::new(vec![color; len], width as usize, height as usize))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.height() as u32
    }

    /// Channel count of the pixel buffer; always 4.
    pub fn channels(&self) -> u8 {
        4
    }

    /// Borrow the pixel grid.
    pub fn pixels(&self) -> ImgRef<'_, Rgba<u8>> {
        self.pixels.as_ref()
    }

    /// Contiguous RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels.buf().as_slice())
    }
}

/// A source bitmap resized to one [`SizeSpec`], tagged with its file name.
#[derive(Clone, Debug)]
pub struct RenderedIcon {
    spec: SizeSpec,
    pixels: ImgVec<Rgba<u8>>,
}

impl RenderedIcon {
    pub(crate) fn new(spec: SizeSpec, pixels: ImgVec<Rgba<u8>>) -> Self {
        Self { spec, pixels }
    }

    pub fn spec(&self) -> &SizeSpec {
        &self.spec
    }

    /// Configured edge length (the icon is always `edge` × `edge`).
    pub fn edge(&self) -> u32 {
        self.spec.edge
    }

    pub fn filename(&self) -> &str {
        &self.spec.filename
    }

    pub fn width(&self) -> u32 {
        self.pixels.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.height() as u32
    }

    pub fn pixels(&self) -> ImgRef<'_, Rgba<u8>> {
        self.pixels.as_ref()
    }

    /// Contiguous RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels.buf().as_slice())
    }
}
