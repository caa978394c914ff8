//! ICO container writer using the ico crate.

use imgref::ImgRef;
use rgb::Rgba;

use crate::iconset::MAX_ICO_EDGE;
use crate::{FaviconError, Result};

/// Pack RGBA frames into one ICO file, in the order given.
///
/// Frames must be 1..=256 pixels on each side; the ico crate panics on
/// anything else, so this is checked up front.
pub(crate) fn encode_frames(frames: &[ImgRef<'_, Rgba<u8>>]) -> Result<Vec<u8>> {
    let mut icon_dir = ico::IconDir::new(ico::ResourceType::Icon);

    for frame in frames {
        let width = frame.width() as u32;
        let height = frame.height() as u32;
        if width == 0 || height == 0 || width > MAX_ICO_EDGE || height > MAX_ICO_EDGE {
            return Err(FaviconError::InvalidInput(format!(
                "{width}x{height} frame cannot be stored in an ICO container"
            )));
        }

        let (buf, _, _) = frame.to_contiguous_buf();
        let rgba: Vec<u8> = bytemuck::cast_slice(buf.as_ref()).to_vec();
        let image = ico::IconImage::from_rgba_data(width, height, rgba);
        let entry =
            ico::IconDirEntry::encode(&image).map_err(|e| FaviconError::Package(Box::new(e)))?;
        icon_dir.add_entry(entry);
    }

    let mut output = Vec::new();
    icon_dir
        .write(&mut output)
        .map_err(|e| FaviconError::Package(Box::new(e)))?;
    Ok(output)
}
