//! SVG rasterizer adapter using resvg.

use std::path::Path;
use std::sync::Arc;

use imgref::ImgVec;
use resvg::{tiny_skia, usvg};
use rgb::Rgba;

use crate::{FaviconError, ImageFormat, Limits, Result, SourceImage};

/// Rasterize an SVG (or gzip-compressed SVGZ) document at its intrinsic size.
///
/// `resources_dir` resolves relative `<image href>` references; system fonts
/// are loaded so `<text>` renders.
pub(crate) fn decode(
    data: &[u8],
    resources_dir: Option<&Path>,
    limits: &Limits,
) -> Result<SourceImage> {
    let mut opt = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        ..usvg::Options::default()
    };
    Arc::make_mut(&mut opt.fontdb).load_system_fonts();

    let tree =
        usvg::Tree::from_data(data, &opt).map_err(|e| FaviconError::from_codec(ImageFormat::Svg, e))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    limits.check_dimensions(width, height)?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        FaviconError::InvalidInput(format!("cannot allocate {width}x{height} SVG canvas"))
    })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let pixels: Vec<Rgba<u8>> = pixmap
        .pixels()
        .iter()
        .map(|p| {
            let c = p.demultiply();
            Rgba::new(c.red(), c.green(), c.blue(), c.alpha())
        })
        .collect();

    log::debug!("rasterized SVG at intrinsic size {width}x{height}");
    Ok(SourceImage::new(ImgVec::new(
        pixels,
        width as usize,
        height as usize,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64">
        <rect width="64" height="64" fill="#ff0000"/>
    </svg>"##;

    #[test]
    fn renders_at_intrinsic_size() {
        let img = decode(SQUARE.as_bytes(), None, &Limits::default()).unwrap();
        assert_eq!((img.width(), img.height()), (64, 64));
        assert_eq!(img.channels(), 4);
        let center = img.pixels()[(32usize, 32usize)];
        assert_eq!(center, Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn transparent_background_is_straight_alpha() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <rect width="10" height="10" fill="#0000ff" fill-opacity="0.5"/>
        </svg>"##;
        let img = decode(svg.as_bytes(), None, &Limits::default()).unwrap();
        let p = img.pixels()[(5usize, 5usize)];
        assert!(p.b >= 250, "{p:?}");
        assert!((120..=135).contains(&p.a), "{p:?}");
    }

    #[test]
    fn huge_intrinsic_size_hits_limits() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100000" height="100000"/>"#;
        assert!(matches!(
            decode(svg.as_bytes(), None, &Limits::default()),
            Err(FaviconError::LimitExceeded(_))
        ));
    }

    #[test]
    fn malformed_markup_is_decode_error() {
        assert!(matches!(
            decode(b"<svg", None, &Limits::default()),
            Err(FaviconError::Decode {
                format: ImageFormat::Svg,
                ..
            })
        ));
    }
}
