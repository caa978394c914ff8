//! The icon set: which square sizes to render, what to call them, and which
//! of them go into the multi-resolution `.ico` container.

use std::collections::HashSet;

use crate::{FaviconError, Result};

/// Largest edge the ICO directory can describe.
pub const MAX_ICO_EDGE: u32 = 256;

/// One icon variant: a square edge length and the PNG file name it is written to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeSpec {
    pub edge: u32,
    pub filename: String,
}

impl SizeSpec {
    pub fn new(edge: u32, filename: impl Into<String>) -> Self {
        Self {
            edge,
            filename: filename.into(),
        }
    }

    /// File name with its extension stripped (`favicon-16x16.png` -> `favicon-16x16`).
    pub fn stem(&self) -> &str {
        match self.filename.rfind('.') {
            Some(dot) if dot > 0 => &self.filename[..dot],
            _ => &self.filename,
        }
    }
}

/// Ordered size table plus the ICO whitelist.
///
/// Changing the generated icon set means editing this one value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconSet {
    sizes: Vec<SizeSpec>,
    ico_sizes: Vec<u32>,
    ico_filename: String,
}

impl IconSet {
    /// Build a custom icon set, checking its invariants.
    ///
    /// - every edge is positive
    /// - file names are non-empty and unique
    /// - ICO sizes fit in an ICO directory entry
    pub fn new(sizes: Vec<SizeSpec>, ico_sizes: Vec<u32>) -> Result<Self> {
        let mut names = HashSet::new();
        for spec in &sizes {
            if spec.edge == 0 {
                return Err(FaviconError::InvalidInput(format!(
                    "{}: edge length must be positive",
                    spec.filename
                )));
            }
            if spec.filename.is_empty() {
                return Err(FaviconError::InvalidInput(format!(
                    "{}px entry has an empty file name",
                    spec.edge
                )));
            }
            if !names.insert(spec.filename.as_str()) {
                return Err(FaviconError::InvalidInput(format!(
                    "duplicate file name in icon set: {}",
                    spec.filename
                )));
            }
        }

        if let Some(&edge) = ico_sizes.iter().find(|&&e| e == 0 || e > MAX_ICO_EDGE) {
            return Err(FaviconError::InvalidInput(format!(
                "ICO frame size {edge} outside 1..={MAX_ICO_EDGE}"
            )));
        }

        Ok(Self {
            sizes,
            ico_sizes,
            ico_filename: "favicon.ico".to_string(),
        })
    }

    /// The conventional favicon/app-icon set.
    ///
    /// | Edge | File                         |
    /// |------|------------------------------|
    /// | 16   | `favicon-16x16.png`          |
    /// | 32   | `favicon-32x32.png`          |
    /// | 48   | `favicon-48x48.png`          |
    /// | 96   | `favicon-96x96.png`          |
    /// | 180  | `apple-touch-icon.png`       |
    /// | 192  | `android-chrome-192x192.png` |
    /// | 512  | `android-chrome-512x512.png` |
    ///
    /// 16, 32 and 48 are packed into `favicon.ico`.
    pub fn standard() -> Self {
        Self {
            sizes: vec![
                SizeSpec::new(16, "favicon-16x16.png"),
                SizeSpec::new(32, "favicon-32x32.png"),
                SizeSpec::new(48, "favicon-48x48.png"),
                SizeSpec::new(96, "favicon-96x96.png"),
                SizeSpec::new(180, "apple-touch-icon.png"),
                SizeSpec::new(192, "android-chrome-192x192.png"),
                SizeSpec::new(512, "android-chrome-512x512.png"),
            ],
            ico_sizes: vec![16, 32, 48],
            ico_filename: "favicon.ico".to_string(),
        }
    }

    /// Rename the ICO container (default `favicon.ico`).
    pub fn with_ico_filename(mut self, name: impl Into<String>) -> Self {
        self.ico_filename = name.into();
        self
    }

    pub fn sizes(&self) -> &[SizeSpec] {
        &self.sizes
    }

    pub fn ico_sizes(&self) -> &[u32] {
        &self.ico_sizes
    }

    pub fn ico_filename(&self) -> &str {
        &self.ico_filename
    }

    /// Whether an icon of this edge length goes into the ICO container.
    pub fn is_ico_eligible(&self, edge: u32) -> bool {
        self.ico_sizes.contains(&edge)
    }

    /// Whether any size is ICO-eligible, i.e. whether the container gets written.
    pub fn packs_ico(&self) -> bool {
        self.sizes.iter().any(|s| self.is_ico_eligible(s.edge))
    }

    /// First entry with the given edge length.
    pub fn find(&self, edge: u32) -> Option<&SizeSpec> {
        self.sizes.iter().find(|s| s.edge == edge)
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::standard()
    }
}
