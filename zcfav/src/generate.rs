//! The `generate` command: load, validate, render, write metadata, optimize.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use zenfavicon::{
    EncoderConfig, FaviconError, FormatSet, Optimizer, OptimizerConfig, OutputDir, Pipeline,
    ThemeColors, Unstoppable, WebManifest,
};

use crate::GenerateArgs;
use crate::report::Summary;

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let summary = execute(&args)?;

    if args.json {
        summary.print_json()?;
    } else {
        summary.print_table();
        eprintln!(
            "tip: add the contents of {} to your page's <head>",
            summary.output_dir.join(zenfavicon::HTML_FILENAME).display()
        );
    }
    Ok(())
}

/// Generate everything `args` asks for.
///
/// Load and render failures are errors. Manifest, HTML and optimizer
/// failures only add warnings to the returned summary.
pub fn execute(args: &GenerateArgs) -> anyhow::Result<Summary> {
    eprintln!("zcfav {}: favicon generator", env!("CARGO_PKG_VERSION"));

    let mut out = OutputDir::new(args.output.clone());
    if let Some(prefix) = &args.url_prefix {
        out = out.with_url_prefix(prefix);
    }

    let source = zenfavicon::load(&args.image)
        .with_context(|| format!("failed to load {}", args.image.display()))?;

    let mut summary = Summary::new(&args.image, out.path(), source.width(), source.height());
    for advisory in zenfavicon::validate(&source).advisories() {
        eprintln!("warning: {advisory}");
        summary.advisories.push(advisory.to_string());
    }
    eprintln!("loaded {}x{}", source.width(), source.height());

    let config = EncoderConfig::default()
        .with_avif_quality(args.avif_quality)
        .with_avif_speed(args.avif_speed);
    let pipeline = Pipeline::new(out.clone())
        .with_formats(FormatSet::new(args.webp, args.avif))
        .with_encoder_config(config);

    let jobs = args.jobs.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    log::debug!("rendering with {jobs} threads");
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let generated = pool
        .install(|| pipeline.execute(&source))
        .context("favicon generation failed")?;
    eprintln!("generated {} files", generated.written.len());

    let mut written = generated.written;
    for skipped in &generated.skipped {
        eprintln!(
            "warning: skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        );
    }
    summary.add_skipped(&generated.skipped);

    let colors = ThemeColors {
        theme: args.theme_color.clone(),
        background: args.background_color.clone(),
    };

    let mut manifest_written = false;
    if args.manifest {
        let short_name = args
            .app_short_name
            .clone()
            .unwrap_or_else(|| args.app_name.clone());
        let manifest = WebManifest::new(&out, pipeline.icon_set(), &args.app_name)
            .with_short_name(short_name)
            .with_colors(&colors);
        match manifest.write(&out) {
            Ok(path) => {
                manifest_written = true;
                written.push(path);
            }
            Err(e) => warn(&mut summary, format!("could not write web manifest: {e}")),
        }
    }

    match zenfavicon::write_html_metadata(&out, pipeline.icon_set(), manifest_written, &colors) {
        Ok(path) => written.push(path),
        Err(e) => warn(&mut summary, format!("could not write HTML metadata: {e}")),
    }

    if args.optimize {
        optimize(args, out.path(), &mut summary);
    }

    eprintln!("generation complete");
    summary.add_files(&written);
    Ok(summary)
}

fn optimize(args: &GenerateArgs, dir: &Path, summary: &mut Summary) {
    let optimizer = Optimizer::new(
        OptimizerConfig::default()
            .with_program(args.optimizer.clone())
            .with_level(args.optimize_level)
            .with_timeout(Duration::from_secs(args.optimize_timeout)),
    );

    let total = match Optimizer::find_pngs(dir) {
        Ok(files) => files.len(),
        Err(e) => {
            warn(summary, format!("optimization skipped: {e}"));
            return;
        }
    };

    let pb = ProgressBar::new(total as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("=>-"));
    }

    let result = optimizer.optimize_dir_with(dir, &Unstoppable, |path, result| {
        if let Err(e) = result {
            pb.println(format!("error: {}: {e}", path.display()));
        }
        pb.inc(1);
    });
    pb.finish_and_clear();

    match result {
        Ok(report) => {
            eprintln!(
                "optimized {} of {} PNG files",
                report.optimized.len(),
                report.optimized.len() + report.failed.len()
            );
            for (path, reason) in report.failed {
                summary
                    .warnings
                    .push(format!("optimizer failed on {}: {reason}", path.display()));
            }
        }
        Err(FaviconError::ToolNotFound(program)) => warn(
            summary,
            format!("{program} not found. Install with: npm install -g @squoosh/cli"),
        ),
        Err(e) => warn(summary, format!("optimization failed: {e}")),
    }
}

fn warn(summary: &mut Summary, message: String) {
    eprintln!("warning: {message}");
    summary.warnings.push(message);
}
