//! # zenfavicon
//!
//! Turn one source image into the conventional favicon and app-icon set:
//! square PNGs at every standard size, optional WebP/AVIF twins, a
//! multi-resolution `favicon.ico`, a web app manifest, and the HTML tags
//! that reference them.
//!
//! Codecs are feature-gated:
//!
//! ```toml
//! [dependencies]
//! zenfavicon = { version = "0.2", features = ["svg", "webp", "avif"] }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use zenfavicon::{FormatSet, OutputDir, Pipeline, ThemeColors, WebManifest};
//!
//! let source = zenfavicon::load(Path::new("logo.png"))?;
//! for advisory in zenfavicon::validate(&source).advisories() {
//!     eprintln!("warning: {advisory}");
//! }
//!
//! let out = OutputDir::new("favicons");
//! let pipeline = Pipeline::new(out.clone()).with_formats(FormatSet::new(true, true));
//! let result = pipeline.execute(&source)?;
//!
//! WebManifest::new(&out, pipeline.icon_set(), "My App").write(&out)?;
//! zenfavicon::write_html_metadata(&out, pipeline.icon_set(), true, &ThemeColors::default())?;
//! # Ok::<(), zenfavicon::FaviconError>(())
//! ```

#![forbid(unsafe_code)]

mod codecs;
pub mod config;
mod decode;
mod emit;
mod encode;
mod error;
mod format;
mod html;
mod iconset;
mod limits;
mod manifest;
mod optimize;
mod output;
mod package;
mod pipeline;
mod policy;
mod resize;
mod source;
mod validate;

pub use config::EncoderConfig;
pub use decode::{DecodeRequest, load, load_with_limits};
pub use emit::{Emitter, SkippedOutput};
pub use encode::{EncodeOutput, EncodeRequest};
pub use error::{BoxError, FaviconError, Result};
pub use format::ImageFormat;
pub use html::{HTML_FILENAME, html_metadata, write_html_metadata};
pub use iconset::{IconSet, MAX_ICO_EDGE, SizeSpec};
pub use limits::{Limits, Stop, Unstoppable};
pub use manifest::{MANIFEST_FILENAME, ManifestIcon, ThemeColors, WebManifest};
pub use optimize::{OptimizeReport, Optimizer, OptimizerConfig};
pub use output::{OutputDir, ensure_output_dir, url_prefix};
pub use package::{IcoPackage, pack_ico, write_ico};
pub use pipeline::{GenerateOutput, Pipeline, generate};
pub use policy::{FormatPolicy, FormatSet, OutputFormat, Policy};
pub use resize::{render, render_size};
pub use source::{RenderedIcon, SourceImage};
pub use validate::{Advisory, MIN_RECOMMENDED_EDGE, Validation, validate, validate_dimensions};
