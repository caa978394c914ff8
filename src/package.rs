//! ICO packager: pack the whitelisted small icons into one multi-resolution container.

use std::path::PathBuf;

use imgref::ImgRef;
use rgb::Rgba;

use crate::iconset::IconSet;
use crate::output::OutputDir;
use crate::{RenderedIcon, Result};

/// An encoded ICO file plus the frame list it declares.
#[derive(Clone, Debug)]
pub struct IcoPackage {
    pub data: Vec<u8>,
    /// `(width, height)` of every packed frame, in container order.
    pub frames: Vec<(u32, u32)>,
}

/// Pack every icon whose edge is ICO-eligible, in rendering order.
///
/// Returns `Ok(None)` when nothing matches the whitelist
/// (see [`IconSet::packs_ico`]).
pub fn pack_ico(icons: &[RenderedIcon], set: &IconSet) -> Result<Option<IcoPackage>> {
    let selected: Vec<&RenderedIcon> = icons
        .iter()
        .filter(|icon| set.is_ico_eligible(icon.edge()))
        .collect();
    if selected.is_empty() {
        return Ok(None);
    }

    let frames: Vec<ImgRef<'_, Rgba<u8>>> = selected.iter().map(|icon| icon.pixels()).collect();
    let data = crate::codecs::ico::encode_frames(&frames)?;

    Ok(Some(IcoPackage {
        data,
        frames: selected.iter().map(|i| (i.width(), i.height())).collect(),
    }))
}

/// Pack and write `set.ico_filename()` into `out`. `Ok(None)` if nothing was eligible.
pub fn write_ico(icons: &[RenderedIcon], set: &IconSet, out: &OutputDir) -> Result<Option<PathBuf>> {
    match pack_ico(icons, set)? {
        Some(package) => {
            let path = out.write(set.ico_filename(), &package.data)?;
            log::debug!("packed {} frames into {}", package.frames.len(), path.display());
            Ok(Some(path))
        }
        None => {
            log::debug!("no ICO-eligible sizes; {} not written", set.ico_filename());
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceImage;
    use crate::iconset::SizeSpec;

    fn rendered(set: &IconSet) -> Vec<RenderedIcon> {
        let src = SourceImage::filled(64, 64, Rgba::new(0, 120, 240, 255));
        crate::resize::render(&src, set).unwrap()
    }

    #[test]
    fn standard_set_packs_three_frames() {
        let set = IconSet::standard();
        let package = pack_ico(&rendered(&set), &set).unwrap().unwrap();
        assert_eq!(package.frames, vec![(16, 16), (32, 32), (48, 48)]);

        let dir = ico::IconDir::read(std::io::Cursor::new(&package.data)).unwrap();
        let dims: Vec<(u32, u32)> = dir.entries().iter().map(|e| (e.width(), e.height())).collect();
        assert_eq!(dims, package.frames);
    }

    #[test]
    fn no_eligible_sizes_is_a_no_op() {
        let set = IconSet::new(vec![SizeSpec::new(96, "big.png")], vec![16, 32, 48]).unwrap();
        assert!(pack_ico(&rendered(&set), &set).unwrap().is_none());

        let tmp = tempfile::tempdir().unwrap();
        let out = OutputDir::new(tmp.path());
        assert_eq!(write_ico(&rendered(&set), &set, &out).unwrap(), None);
        assert!(!tmp.path().join("favicon.ico").exists());
    }

    #[test]
    fn custom_whitelist_and_name() {
        let set = IconSet::new(
            vec![SizeSpec::new(24, "a.png"), SizeSpec::new(64, "b.png")],
            vec![64, 24],
        )
        .unwrap()
        .with_ico_filename("app.ico");

        let tmp = tempfile::tempdir().unwrap();
        let out = OutputDir::new(tmp.path());
        let path = write_ico(&rendered(&set), &set, &out).unwrap().unwrap();
        assert_eq!(path, tmp.path().join("app.ico"));

        // Frame order follows the size table, not the whitelist.
        let dir = ico::IconDir::read(std::fs::File::open(path).unwrap()).unwrap();
        let dims: Vec<u32> = dir.entries().iter().map(|e| e.width()).collect();
        assert_eq!(dims, vec![24, 64]);
    }
}
