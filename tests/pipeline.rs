//! End-to-end generation into a scratch directory.

use std::io::Cursor;
use std::path::Path;

use imgref::ImgVec;
use rgb::Rgba;
use zenfavicon::{
    FormatPolicy, FormatSet, IconSet, OutputDir, OutputFormat, Pipeline, Policy, SourceImage,
    ThemeColors, WebManifest,
};

fn gradient(width: u32, height: u32) -> SourceImage {
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push(Rgba::new(
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                128,
                if (x / 8 + y / 8) % 2 == 0 { 255 } else { 96 },
            ));
        }
    }
    SourceImage::new(ImgVec::new(pixels, width as usize, height as usize))
}

fn png_dimensions(path: &Path) -> (u32, u32) {
    let data = std::fs::read(path).unwrap();
    let decoder = png::Decoder::new(Cursor::new(data.as_slice()));
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    (info.width, info.height)
}

fn single_size() -> IconSet {
    IconSet::new(
        vec![zenfavicon::SizeSpec::new(16, "favicon-16x16.png")],
        vec![16],
    )
    .unwrap()
}

#[test]
fn every_size_is_written_at_its_exact_edge() {
    let tmp = tempfile::tempdir().unwrap();
    let output = Pipeline::new(OutputDir::new(tmp.path()))
        .execute(&gradient(600, 600))
        .unwrap();

    for spec in IconSet::standard().sizes() {
        let path = tmp.path().join(&spec.filename);
        assert!(output.written.contains(&path), "{}", spec.filename);
        assert_eq!(png_dimensions(&path), (spec.edge, spec.edge), "{}", spec.filename);
    }
}

#[test]
fn ico_holds_the_three_small_frames() {
    let tmp = tempfile::tempdir().unwrap();
    Pipeline::new(OutputDir::new(tmp.path()))
        .execute(&gradient(256, 256))
        .unwrap();

    let file = std::fs::File::open(tmp.path().join("favicon.ico")).unwrap();
    let dir = ico::IconDir::read(file).unwrap();
    let dims: Vec<(u32, u32)> = dir
        .entries()
        .iter()
        .map(|e| (e.width(), e.height()))
        .collect();
    assert_eq!(dims, vec![(16, 16), (32, 32), (48, 48)]);

    for entry in dir.entries() {
        let image = entry.decode().unwrap();
        assert_eq!((image.width(), image.height()), (entry.width(), entry.height()));
    }
}

#[test]
fn rerun_is_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(OutputDir::new(tmp.path()))
        .with_formats(FormatSet::new(true, false));
    let source = gradient(300, 200);

    let first = pipeline.execute(&source).unwrap();
    let snapshot: Vec<Vec<u8>> = first
        .written
        .iter()
        .map(|p| std::fs::read(p).unwrap())
        .collect();

    let second = pipeline.execute(&source).unwrap();
    assert_eq!(first.written, second.written);
    for (path, before) in second.written.iter().zip(&snapshot) {
        assert_eq!(&std::fs::read(path).unwrap(), before, "{}", path.display());
    }
}

#[test]
fn manifest_icons_point_at_written_files() {
    let tmp = tempfile::tempdir().unwrap();
    let out = OutputDir::new(tmp.path().join("favicons")).with_url_prefix("favicons");
    let pipeline = Pipeline::new(out.clone());
    pipeline.execute(&gradient(512, 512)).unwrap();

    let path = WebManifest::new(&out, pipeline.icon_set(), "Test App")
        .with_colors(&ThemeColors::default())
        .write(&out)
        .unwrap();
    let manifest: serde_json::Value =
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();

    let icons = manifest["icons"].as_array().unwrap();
    assert_eq!(icons.len(), 2);
    for icon in icons {
        let src = icon["src"].as_str().unwrap();
        let file = src.strip_prefix("/favicons/").unwrap();
        assert!(out.join(file).is_file(), "{src} missing");
    }
}

#[test]
fn avif_request_never_fails_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let output = Pipeline::new(OutputDir::new(tmp.path()))
        .with_icon_set(single_size())
        .with_formats(FormatSet::new(true, true))
        .execute(&gradient(64, 64))
        .unwrap();

    assert!(tmp.path().join("favicon-16x16.png").is_file());
    if OutputFormat::WebP.is_available() {
        assert!(tmp.path().join("favicon-16x16.webp").is_file());
    }
    if OutputFormat::Avif.is_available() {
        assert!(tmp.path().join("favicon-16x16.avif").is_file());
    } else {
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].format, OutputFormat::Avif);
        assert!(!tmp.path().join("favicon-16x16.avif").exists());
    }
}

#[test]
fn required_webp_failure_aborts_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    // A directory squatting on the output name makes the write fail.
    std::fs::create_dir(tmp.path().join("favicon-16x16.webp")).unwrap();

    let result = Pipeline::new(OutputDir::new(tmp.path()))
        .with_icon_set(single_size())
        .with_formats(FormatSet::new(true, false))
        .with_policy(FormatPolicy::default().with(OutputFormat::WebP, Policy::Required))
        .execute(&gradient(64, 64));
    assert!(result.is_err());
    assert!(!tmp.path().join("favicon.ico").exists());
}

#[test]
fn best_effort_webp_failure_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir(tmp.path().join("favicon-16x16.webp")).unwrap();

    let output = Pipeline::new(OutputDir::new(tmp.path()))
        .with_icon_set(single_size())
        .with_formats(FormatSet::new(true, false))
        .with_policy(FormatPolicy::default().with(OutputFormat::WebP, Policy::BestEffort))
        .execute(&gradient(64, 64))
        .unwrap();
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].format, OutputFormat::WebP);
    assert!(tmp.path().join("favicon.ico").is_file());
}

#[test]
fn load_validate_generate_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let source_path = tmp.path().join("logo.png");
    let img = image::RgbImage::from_pixel(300, 150, image::Rgb([30, 60, 90]));
    img.save(&source_path).unwrap();

    let source = zenfavicon::load(&source_path).unwrap();
    assert_eq!(source.channels(), 4);

    let verdict = zenfavicon::validate(&source);
    assert!(!verdict.is_valid());
    assert_eq!(verdict.advisories().len(), 2);

    let out_dir = tmp.path().join("out");
    let output = zenfavicon::generate(&source_path, &out_dir).unwrap();
    assert_eq!(output.written.len(), IconSet::standard().sizes().len() + 1);
    assert_eq!(png_dimensions(&out_dir.join("favicon-48x48.png")), (48, 48));
}
