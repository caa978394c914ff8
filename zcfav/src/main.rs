//! zcfav: favicon and app-icon generator.
//!
//! Load one source image (raster or SVG), render the standard icon sizes,
//! pack `favicon.ico`, and write the web manifest and HTML tags.

mod generate;
mod report;

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path to the source image (PNG, JPG, SVG, ...).
    pub image: PathBuf,

    // --- Output ---
    /// Output directory for generated files.
    #[arg(short, long, default_value = "favicons", env = "ZCFAV_OUTPUT")]
    pub output: PathBuf,

    /// URL path the files are served under (default: /<output>).
    #[arg(long)]
    pub url_prefix: Option<String>,

    /// Print the summary as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    // --- Formats ---
    /// Also write WebP versions of every icon.
    #[arg(long)]
    pub webp: bool,

    /// Also write AVIF versions of every icon (skipped with a warning on failure).
    #[arg(long)]
    pub avif: bool,

    /// AVIF quality (1-100).
    #[arg(long, default_value_t = 80)]
    pub avif_quality: u8,

    /// AVIF speed (1-10, lower = slower/better).
    #[arg(long, default_value_t = 6)]
    pub avif_speed: u8,

    // --- Manifest ---
    /// Skip the web app manifest (site.webmanifest).
    #[arg(long = "no-manifest", action = clap::ArgAction::SetFalse)]
    pub manifest: bool,

    /// Application name for the web manifest.
    #[arg(long, default_value = "My App")]
    pub app_name: String,

    /// Short application name (defaults to --app-name).
    #[arg(long)]
    pub app_short_name: Option<String>,

    /// Theme color for the manifest and HTML tags.
    #[arg(long, default_value = "#ffffff")]
    pub theme_color: String,

    /// Background color for the manifest and HTML tags.
    #[arg(long, default_value = "#ffffff")]
    pub background_color: String,

    // --- Optimizer ---
    /// Optimize PNG files with an external tool (squoosh-cli by default).
    #[arg(long)]
    pub optimize: bool,

    /// Optimizer executable.
    #[arg(long, default_value = "squoosh-cli", env = "ZCFAV_OPTIMIZER")]
    pub optimizer: String,

    /// oxipng level passed to the optimizer.
    #[arg(long, default_value_t = 4)]
    pub optimize_level: u8,

    /// Seconds before the optimizer is killed on a single file.
    #[arg(long, default_value_t = 60)]
    pub optimize_timeout: u64,

    // --- Runtime ---
    /// Number of rendering threads (default: CPU count).
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Log debug output (same as RUST_LOG=debug).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Dispatch CLI arguments.
///
/// Uses a two-pass strategy: a known subcommand is parsed as such, anything
/// else is treated as `generate` arguments (bare image path default).
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let first_arg = args.get(1).map(|s| s.as_str());
    match first_arg {
        Some("generate") => {
            let cmd = GenerateArgs::parse_from(&args[1..]);
            run_generate(cmd)
        }
        Some("version" | "--version" | "-V") => {
            println!("zcfav {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some("help" | "--help" | "-h") | None => {
            print_help();
            Ok(())
        }
        Some(_) => {
            let cmd = GenerateArgs::parse_from(
                std::iter::once("generate".to_string()).chain(args[1..].iter().cloned()),
            );
            run_generate(cmd)
        }
    }
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    init_logging(args.verbose);
    generate::run(args)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn print_help() {
    eprintln!(
        "\
zcfav {}: favicon and app-icon generator

USAGE:
    zcfav [COMMAND] [OPTIONS] <IMAGE>

COMMANDS:
    generate   Generate favicons, manifest and HTML tags (default)
    version    Show version information

A bare image path defaults to `generate`.

EXAMPLES:
    zcfav logo.svg                              Write the icon set to ./favicons
    zcfav logo.png -o public/icons --webp --avif
    zcfav generate logo.png --no-manifest --json
    zcfav logo.png --optimize --optimizer ~/bin/squoosh-cli

Run `zcfav generate --help` for full options.",
        env!("CARGO_PKG_VERSION")
    );
}
