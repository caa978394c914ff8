//! Output directory handling and the public URL prefix derived from it.

use std::path::{Path, PathBuf};

use crate::{FaviconError, Result};

/// Where generated assets go, and the URL path they are served under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
    url_prefix: String,
}

impl OutputDir {
    /// Use `root` for files and `/<root>` as the URL prefix.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let url_prefix = url_prefix(&root);
        Self { root, url_prefix }
    }

    /// Serve the assets under a different URL prefix than the directory name.
    pub fn with_url_prefix(mut self, prefix: &str) -> Self {
        self.url_prefix = normalize_prefix(prefix);
        self
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// URL prefix without a trailing slash; empty for the site root.
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Absolute URL path of a generated file.
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{filename}", self.url_prefix)
    }

    /// Filesystem path of a generated file.
    pub fn join(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Create the directory tree if it does not exist yet.
    pub fn ensure(&self) -> Result<()> {
        ensure_output_dir(&self.root)
    }

    /// Write one asset, replacing any previous file of the same name.
    pub(crate) fn write(&self, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.join(filename);
        std::fs::write(&path, data).map_err(|e| FaviconError::io(&path, e))?;
        log::debug!("wrote {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }
}

/// Create `dir` and its parents. Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| FaviconError::io(dir, e))
}

/// `/<dir>` with separators normalized to `/`, empty and `.` segments
/// dropped, and no trailing slash.
pub fn url_prefix(dir: &Path) -> String {
    normalize_prefix(&dir.to_string_lossy())
}

fn normalize_prefix(raw: &str) -> String {
    let segments: Vec<&str> = raw
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_from_directory() {
        assert_eq!(url_prefix(Path::new("favicons")), "/favicons");
        assert_eq!(url_prefix(Path::new("./public/icons/")), "/public/icons");
        assert_eq!(url_prefix(Path::new("static\\icons")), "/static/icons");
        assert_eq!(url_prefix(Path::new(".")), "");
    }

    #[test]
    fn url_for_file() {
        let out = OutputDir::new("favicons");
        assert_eq!(out.url_for("favicon.ico"), "/favicons/favicon.ico");

        let root = OutputDir::new("build").with_url_prefix("/");
        assert_eq!(root.url_for("favicon.ico"), "/favicon.ico");
    }

    #[test]
    fn ensure_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let out = OutputDir::new(tmp.path().join("a/b/c"));
        out.ensure().unwrap();
        out.ensure().unwrap();
        assert!(out.path().is_dir());
    }

    #[test]
    fn write_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let out = OutputDir::new(tmp.path());
        out.write("x.bin", b"first").unwrap();
        let path = out.write("x.bin", b"2nd").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"2nd");
    }
}
