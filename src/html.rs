//! HTML `<link>`/`<meta>` snippet for embedding the generated icons.

use std::path::PathBuf;

use crate::iconset::IconSet;
use crate::manifest::{MANIFEST_FILENAME, ThemeColors};
use crate::output::OutputDir;
use crate::Result;

/// File name of the snippet inside the output directory.
pub const HTML_FILENAME: &str = "metadata.html";

/// Edges that get an `<link rel="icon" type="image/png">` tag, in tag order.
const PNG_LINK_EDGES: [u32; 2] = [32, 16];

/// Edge referenced by the `apple-touch-icon` tag.
const APPLE_TOUCH_EDGE: u32 = 180;

/// The tag sequence, one tag per line, no trailing newline.
///
/// File names come from `set`; a tag whose size is not in the set is left
/// out, and the ICO link only appears when the set packs a container. The
/// manifest link is included only when `manifest_written` is true.
pub fn html_metadata(
    out: &OutputDir,
    set: &IconSet,
    manifest_written: bool,
    colors: &ThemeColors,
) -> String {
    let mut parts = vec!["<!-- Favicon metadata -->".to_string()];

    if let Some(spec) = set.find(APPLE_TOUCH_EDGE) {
        parts.push(format!(
            r#"<link rel="apple-touch-icon" sizes="{0}x{0}" href="{1}">"#,
            spec.edge,
            out.url_for(&spec.filename)
        ));
    }
    for spec in PNG_LINK_EDGES.iter().filter_map(|&edge| set.find(edge)) {
        parts.push(format!(
            r#"<link rel="icon" type="image/png" sizes="{0}x{0}" href="{1}">"#,
            spec.edge,
            out.url_for(&spec.filename)
        ));
    }
    if set.packs_ico() {
        parts.push(format!(
            r#"<link rel="icon" href="{}" type="image/x-icon">"#,
            out.url_for(set.ico_filename())
        ));
    }

    if manifest_written {
        parts.push(format!(
            r#"<link rel="manifest" href="{}">"#,
            out.url_for(MANIFEST_FILENAME)
        ));
    }

    parts.push(format!(
        r#"<meta name="msapplication-TileColor" content="{}">"#,
        colors.background
    ));
    parts.push(format!(
        r#"<meta name="theme-color" content="{}">"#,
        colors.theme
    ));

    parts.join("\n")
}

/// Write [`html_metadata`] to [`HTML_FILENAME`] in `out`.
pub fn write_html_metadata(
    out: &OutputDir,
    set: &IconSet,
    manifest_written: bool,
    colors: &ThemeColors,
) -> Result<PathBuf> {
    let html = html_metadata(out, set, manifest_written, colors);
    out.write(HTML_FILENAME, html.as_bytes())
}
