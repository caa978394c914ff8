//! Resource limits for source images and cancellation for long-running work.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::{FaviconError, Result};

/// Resource limits applied when loading a source image.
///
/// Guards against decompression bombs and SVGs declaring absurd intrinsic sizes.
#[derive(Clone, Debug)]
pub struct Limits {
    /// Maximum image width in pixels.
    pub max_width: Option<u32>,
    /// Maximum image height in pixels.
    pub max_height: Option<u32>,
    /// Maximum total pixels (width × height).
    pub max_pixels: Option<u64>,
}

impl Limits {
    /// No restrictions at all.
    pub fn none() -> Self {
        Self {
            max_width: None,
            max_height: None,
            max_pixels: None,
        }
    }

    /// Check if dimensions are within limits.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if let Some(max_width) = self.max_width {
            if width > max_width {
                return Err(FaviconError::LimitExceeded(format!(
                    "width {width} exceeds {max_width}"
                )));
            }
        }

        if let Some(max_height) = self.max_height {
            if height > max_height {
                return Err(FaviconError::LimitExceeded(format!(
                    "height {height} exceeds {max_height}"
                )));
            }
        }

        if let Some(max_pixels) = self.max_pixels {
            let pixels = u64::from(width).saturating_mul(u64::from(height));
            if pixels > max_pixels {
                return Err(FaviconError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds {max_pixels}"
                )));
            }
        }

        Ok(())
    }
}

impl Default for Limits {
    /// 16384×16384, far above any sensible icon source.
    fn default() -> Self {
        Self {
            max_width: Some(16_384),
            max_height: Some(16_384),
            max_pixels: Some(16_384 * 16_384),
        }
    }
}

/// Cancellation token for long-running operations.
///
/// Blocking work (the external optimizer) checks `should_stop()` while it
/// waits and returns [`FaviconError::Cancelled`] once it returns true.
pub trait Stop: Send + Sync {
    /// Whether the operation should be cancelled.
    fn should_stop(&self) -> bool;
}

/// A token that never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unstoppable;

impl Stop for Unstoppable {
    fn should_stop(&self) -> bool {
        false
    }
}

impl Stop for AtomicBool {
    fn should_stop(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}
