//! Multi-size renderer: one Lanczos3-resampled square bitmap per icon size.

use fast_image_resize as fr;
use imgref::ImgVec;
use rgb::Rgba;

use crate::iconset::{IconSet, SizeSpec};
use crate::{FaviconError, RenderedIcon, Result, SourceImage};

/// Resize `source` to every entry of `icons`, in table order.
///
/// Non-square sources are stretched to fill the square. With the `parallel`
/// feature sizes are rendered on the rayon pool; output is identical.
pub fn render(source: &SourceImage, icons: &IconSet) -> Result<Vec<RenderedIcon>> {
    let src_image = source_view(source)?;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        icons
            .sizes()
            .par_iter()
            .map(|spec| render_one(&src_image, spec))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        icons
            .sizes()
            .iter()
            .map(|spec| render_one(&src_image, spec))
            .collect()
    }
}

/// Resize to a single `edge` × `edge` square.
pub fn render_size(source: &SourceImage, spec: &SizeSpec) -> Result<RenderedIcon> {
    render_one(&source_view(source)?, spec)
}

/// Borrow the source pixels as a resizer input without copying.
fn source_view(source: &SourceImage) -> Result<fr::images::ImageRef<'_>> {
    fr::images::ImageRef::new(
        source.width(),
        source.height(),
        source.as_bytes(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| FaviconError::InvalidInput(format!("cannot wrap source bitmap: {e}")))
}

fn render_one(src_image: &fr::images::ImageRef<'_>, spec: &SizeSpec) -> Result<RenderedIcon> {
    let edge = spec.edge;
    let mut dst_image = fr::images::Image::new(edge, edge, fr::PixelType::U8x4);

    // Alpha is premultiplied for the convolution and divided back afterwards.
    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3));

    resizer
        .resize(src_image, &mut dst_image, Some(&options))
        .map_err(|e| FaviconError::InvalidInput(format!("resize to {edge}x{edge} failed: {e}")))?;

    let pixels: Vec<Rgba<u8>> = bytemuck::cast_slice(dst_image.buffer()).to_vec();

    log::debug!("rendered {} ({edge}x{edge})", spec.filename);
    Ok(RenderedIcon::new(
        spec.clone(),
        ImgVec::new(pixels, edge as usize, edge as usize),
    ))
}
