//! Web app manifest (`site.webmanifest`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::iconset::IconSet;
use crate::output::OutputDir;
use crate::{FaviconError, Result};

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILENAME: &str = "site.webmanifest";

/// Edge lengths listed in the manifest's `icons` array.
pub const MANIFEST_ICON_EDGES: [u32; 2] = [192, 512];

/// Colors shared by the manifest and the HTML meta tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeColors {
    pub theme: String,
    pub background: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            theme: "#ffffff".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

/// One entry of the manifest's `icons` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// A web app manifest. Field order matches the serialized document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub icons: Vec<ManifestIcon>,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
}

impl WebManifest {
    /// Manifest for `name` with icons from `set` served under `out`'s URL prefix.
    ///
    /// `short_name` defaults to `name`, `start_url` to `/`, and both colors
    /// to `#ffffff`. Only the 192 and 512 entries present in `set` are listed.
    pub fn new(out: &OutputDir, set: &IconSet, name: impl Into<String>) -> Self {
        let name = name.into();
        let colors = ThemeColors::default();
        let icons = MANIFEST_ICON_EDGES
            .iter()
            .filter_map(|&edge| set.find(edge))
            .map(|spec| ManifestIcon {
                src: out.url_for(&spec.filename),
                sizes: format!("{0}x{0}", spec.edge),
                mime_type: "image/png".to_string(),
            })
            .collect();

        Self {
            short_name: name.clone(),
            name,
            icons,
            start_url: "/".to_string(),
            display: "standalone".to_string(),
            background_color: colors.background,
            theme_color: colors.theme,
        }
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    pub fn with_colors(mut self, colors: &ThemeColors) -> Self {
        self.theme_color = colors.theme.clone();
        self.background_color = colors.background.clone();
        self
    }

    pub fn with_start_url(mut self, start_url: impl Into<String>) -> Self {
        self.start_url = start_url.into();
        self
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FaviconError::InvalidInput(format!("manifest serialization failed: {e}")))
    }

    /// Write [`MANIFEST_FILENAME`] into `out`.
    pub fn write(&self, out: &OutputDir) -> Result<PathBuf> {
        let json = self.to_json()?;
        out.write(MANIFEST_FILENAME, json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shape() {
        let out = OutputDir::new("favicons");
        let manifest = WebManifest::new(&out, &IconSet::standard(), "My App");
        let value: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();

        assert_eq!(value["name"], "My App");
        assert_eq!(value["short_name"], "My App");
        assert_eq!(value["start_url"], "/");
        assert_eq!(value["display"], "standalone");
        assert_eq!(value["background_color"], "#ffffff");
        assert_eq!(value["theme_color"], "#ffffff");
        assert_eq!(
            value["icons"][0]["src"],
            "/favicons/android-chrome-192x192.png"
        );
        assert_eq!(value["icons"][0]["sizes"], "192x192");
        assert_eq!(value["icons"][0]["type"], "image/png");
        assert_eq!(value["icons"][1]["sizes"], "512x512");
        assert_eq!(value["icons"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn key_order_and_indent() {
        let out = OutputDir::new("icons");
        let json = WebManifest::new(&out, &IconSet::standard(), "A")
            .to_json()
            .unwrap();
        let keys = [
            "\"name\"",
            "\"short_name\"",
            "\"icons\"",
            "\"start_url\"",
            "\"display\"",
            "\"background_color\"",
            "\"theme_color\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert!(json.starts_with("{\n  \"name\""), "{json}");
    }

    #[test]
    fn overrides() {
        let out = OutputDir::new("favicons");
        let colors = ThemeColors {
            theme: "#123456".into(),
            background: "#000000".into(),
        };
        let manifest = WebManifest::new(&out, &IconSet::standard(), "Long Name")
            .with_short_name("LN")
            .with_colors(&colors)
            .with_start_url("/app/");
        assert_eq!(manifest.short_name, "LN");
        assert_eq!(manifest.theme_color, "#123456");
        assert_eq!(manifest.background_color, "#000000");
        assert_eq!(manifest.start_url, "/app/");
    }

    #[test]
    fn write_to_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let out = OutputDir::new(tmp.path());
        let path = WebManifest::new(&out, &IconSet::standard(), "App")
            .write(&out)
            .unwrap();
        assert_eq!(path, tmp.path().join(MANIFEST_FILENAME));
        let parsed: WebManifest = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed.name, "App");
    }
}
