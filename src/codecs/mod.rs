//! Codec adapters for format-specific implementations.
//!
//! Each module is a thin adapter between zenfavicon's bitmap types and the
//! format-specific crate doing the real work.

pub(crate) mod ico;
pub(crate) mod png;
pub(crate) mod raster;

#[cfg(feature = "svg")]
pub(crate) mod svg;

#[cfg(feature = "webp")]
pub(crate) mod webp;

#[cfg(feature = "avif")]
pub(crate) mod avif_enc;
