//! The asset-generation pipeline: render, emit, package.

use std::path::{Path, PathBuf};

use crate::config::EncoderConfig;
use crate::emit::{Emitter, SkippedOutput};
use crate::iconset::IconSet;
use crate::output::OutputDir;
use crate::policy::{FormatPolicy, FormatSet};
use crate::{Result, SourceImage};

/// Everything one run wrote, plus the best-effort outputs it skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateOutput {
    /// Per size: PNG, WebP, AVIF; then the ICO container.
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedOutput>,
}

/// Pipeline builder.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use zenfavicon::{FormatSet, OutputDir, Pipeline};
///
/// let source = zenfavicon::load(Path::new("logo.svg"))?;
/// let output = Pipeline::new(OutputDir::new("favicons"))
///     .with_formats(FormatSet::new(true, false))
///     .execute(&source)?;
/// println!("wrote {} files", output.written.len());
/// # Ok::<(), zenfavicon::FaviconError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Pipeline {
    out: OutputDir,
    icons: IconSet,
    formats: FormatSet,
    policy: FormatPolicy,
    config: EncoderConfig,
}

impl Pipeline {
    /// Standard icon set, PNG only, default policy and encoder settings.
    pub fn new(out: OutputDir) -> Self {
        Self {
            out,
            icons: IconSet::standard(),
            formats: FormatSet::default(),
            policy: FormatPolicy::default(),
            config: EncoderConfig::default(),
        }
    }

    pub fn with_icon_set(mut self, icons: IconSet) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_formats(mut self, formats: FormatSet) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_policy(mut self, policy: FormatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_encoder_config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn output_dir(&self) -> &OutputDir {
        &self.out
    }

    pub fn icon_set(&self) -> &IconSet {
        &self.icons
    }

    /// Render every size, write each requested format, then pack the ICO.
    ///
    /// Existing files of the same names are overwritten.
    pub fn execute(&self, source: &SourceImage) -> Result<GenerateOutput> {
        self.out.ensure()?;

        let rendered = crate::resize::render(source, &self.icons)?;

        let mut output = GenerateOutput::default();
        let emitter = Emitter::new(&self.out, self.formats, self.policy, &self.config);
        for icon in &rendered {
            emitter.emit(icon, &mut output)?;
        }

        if let Some(path) = crate::package::write_ico(&rendered, &self.icons, &self.out)? {
            output.written.push(path);
        }

        log::debug!(
            "generated {} files ({} skipped) in {}",
            output.written.len(),
            output.skipped.len(),
            self.out.path().display()
        );
        Ok(output)
    }
}

/// Load `source` and run the default pipeline into `out_dir`.
pub fn generate(source: &Path, out_dir: &Path) -> Result<GenerateOutput> {
    let image = crate::decode::load(source)?;
    Pipeline::new(OutputDir::new(out_dir)).execute(&image)
}
