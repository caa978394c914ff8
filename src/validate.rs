//! Pre-flight checks on the source bitmap. Advisory only; never blocks generation.

use core::fmt;

use crate::SourceImage;

/// Smallest edge length considered good enough for the largest icons.
pub const MIN_RECOMMENDED_EDGE: u32 = 512;

/// One non-fatal finding about the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advisory {
    /// Width and height differ; the renderer stretches to square.
    NonSquare { width: u32, height: u32 },
    /// At least one side is below [`MIN_RECOMMENDED_EDGE`].
    BelowMinimum { width: u32, height: u32, min: u32 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Advisory::NonSquare { width, height } => write!(
                f,
                "source is not square ({width}x{height}); icons may look distorted"
            ),
            Advisory::BelowMinimum { width, height, min } => write!(
                f,
                "source resolution {width}x{height} is below {min}x{min}; icon quality may suffer"
            ),
        }
    }
}

/// Verdict of [`validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    advisories: Vec<Advisory>,
}

impl Validation {
    /// True iff no advisory fired.
    pub fn is_valid(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// All advisory messages, one per line.
    pub fn message(&self) -> String {
        self.advisories
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Check aspect ratio and minimum resolution.
pub fn validate(source: &SourceImage) -> Validation {
    validate_dimensions(source.width(), source.height())
}

/// Same rules as [`validate`], on bare dimensions.
pub fn validate_dimensions(width: u32, height: u32) -> Validation {
    let mut advisories = Vec::new();
    if width != height {
        advisories.push(Advisory::NonSquare { width, height });
    }
    if width < MIN_RECOMMENDED_EDGE || height < MIN_RECOMMENDED_EDGE {
        advisories.push(Advisory::BelowMinimum {
            width,
            height,
            min: MIN_RECOMMENDED_EDGE,
        });
    }
    Validation { advisories }
}
