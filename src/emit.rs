//! Format emitter: encode each rendered icon once per requested format and
//! write `<stem>.<ext>` into the output directory.

use std::path::PathBuf;

use crate::config::EncoderConfig;
use crate::output::OutputDir;
use crate::pipeline::GenerateOutput;
use crate::policy::{FormatPolicy, FormatSet, Policy};
use crate::{EncodeRequest, OutputFormat, RenderedIcon, Result};

/// A best-effort output that was not produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedOutput {
    /// Where the file would have been written.
    pub path: PathBuf,
    pub format: OutputFormat,
    /// Error text of the failure.
    pub reason: String,
}

/// Writes every requested format for one icon, consulting the policy table
/// on failure.
pub struct Emitter<'a> {
    formats: FormatSet,
    policy: FormatPolicy,
    config: &'a EncoderConfig,
    out: &'a OutputDir,
}

impl<'a> Emitter<'a> {
    pub fn new(
        out: &'a OutputDir,
        formats: FormatSet,
        policy: FormatPolicy,
        config: &'a EncoderConfig,
    ) -> Self {
        Self {
            formats,
            policy,
            config,
            out,
        }
    }

    /// Emit `icon` in every requested format, in PNG, WebP, AVIF order.
    ///
    /// Written paths and skipped best-effort outputs are appended to `report`.
    /// A failure of a required format is returned as the error.
    pub fn emit(&self, icon: &RenderedIcon, report: &mut GenerateOutput) -> Result<()> {
        let stem = icon.spec().stem();
        for format in self.formats.iter() {
            let filename = format!("{stem}.{}", format.extension());
            match self.emit_one(icon, format, &filename) {
                Ok(path) => report.written.push(path),
                Err(e) => match self.policy.policy(format) {
                    Policy::Required => return Err(e),
                    Policy::BestEffort => {
                        log::warn!("skipping {filename}: {e}");
                        report.skipped.push(SkippedOutput {
                            path: self.out.join(&filename),
                            format,
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }
        Ok(())
    }

    fn emit_one(&self, icon: &RenderedIcon, format: OutputFormat, filename: &str) -> Result<PathBuf> {
        let encoded = EncodeRequest::new(format)
            .with_config(self.config)
            .encode_rgba8(icon.pixels())?;
        self.out.write(filename, &encoded.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iconset::SizeSpec;
    use crate::{FaviconError, SourceImage};

    fn icon(edge: u32, name: &str) -> RenderedIcon {
        let src = SourceImage::filled(64, 64, rgb::Rgba::new(40, 80, 120, 255));
        crate::resize::render_size(&src, &SizeSpec::new(edge, name)).unwrap()
    }

    #[test]
    fn png_only_writes_canonical_name() {
        let tmp = tempfile::tempdir().unwrap();
        let out = OutputDir::new(tmp.path());
        let config = EncoderConfig::default();
        let emitter = Emitter::new(&out, FormatSet::png_only(), FormatPolicy::default(), &config);

        let mut report = GenerateOutput::default();
        emitter.emit(&icon(16, "favicon-16x16.png"), &mut report).unwrap();
        assert_eq!(report.written, vec![tmp.path().join("favicon-16x16.png")]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn unavailable_best_effort_format_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let out = OutputDir::new(tmp.path());
        let config = EncoderConfig::default();
        // Either format may be compiled out; neither may abort the run.
        let policy = FormatPolicy::default()
            .with(OutputFormat::WebP, Policy::BestEffort)
            .with(OutputFormat::Avif, Policy::BestEffort);
        let emitter = Emitter::new(&out, FormatSet::new(true, true), policy, &config);

        let mut report = GenerateOutput::default();
        emitter.emit(&icon(32, "favicon-32x32.png"), &mut report).unwrap();

        assert!(tmp.path().join("favicon-32x32.png").is_file());
        let produced = report.written.len() + report.skipped.len();
        assert_eq!(produced, 3);
        for skipped in &report.skipped {
            assert!(!skipped.format.is_available());
            assert!(!skipped.path.exists());
        }
    }

    #[test]
    fn required_failure_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        // Writing into a path that is a file, not a directory, fails for PNG.
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let out = OutputDir::new(&blocker);
        let config = EncoderConfig::default();
        let emitter = Emitter::new(&out, FormatSet::png_only(), FormatPolicy::default(), &config);

        let mut report = GenerateOutput::default();
        let err = emitter
            .emit(&icon(16, "favicon-16x16.png"), &mut report)
            .unwrap_err();
        assert!(matches!(err, FaviconError::Io { .. }));
    }
}
