//! Summary of a generation run: console table or JSON.

use std::path::{Path, PathBuf};

use serde::Serialize;
use zenfavicon::SkippedOutput;

/// One generated file as reported to the user.
#[derive(Debug, Serialize)]
pub struct FileEntry {
    /// Path relative to the output directory.
    pub file: String,
    pub bytes: u64,
}

/// A best-effort output that was not produced.
#[derive(Debug, Serialize)]
pub struct SkippedEntry {
    pub file: String,
    pub format: String,
    pub reason: String,
}

/// Everything the run produced.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub output_dir: PathBuf,
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
    pub advisories: Vec<String>,
    pub files: Vec<FileEntry>,
    pub skipped: Vec<SkippedEntry>,
    pub warnings: Vec<String>,
}

impl Summary {
    pub fn new(source: &Path, output_dir: &Path, width: u32, height: u32) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            source: source.to_path_buf(),
            width,
            height,
            advisories: Vec::new(),
            files: Vec::new(),
            skipped: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record written files, sorted by name; unreadable entries become warnings.
    pub fn add_files(&mut self, paths: &[PathBuf]) {
        for path in paths {
            match std::fs::metadata(path) {
                Ok(meta) => self.files.push(FileEntry {
                    file: relative(path, &self.output_dir),
                    bytes: meta.len(),
                }),
                Err(e) => self
                    .warnings
                    .push(format!("could not get info for {}: {e}", path.display())),
            }
        }
        self.files.sort_by(|a, b| a.file.cmp(&b.file));
    }

    pub fn add_skipped(&mut self, skipped: &[SkippedOutput]) {
        for s in skipped {
            self.skipped.push(SkippedEntry {
                file: relative(&s.path, &self.output_dir),
                format: s.format.to_string(),
                reason: s.reason.clone(),
            });
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }

    pub fn print_table(&self) {
        if self.files.is_empty() {
            println!("No files generated.");
            return;
        }

        println!("{:<40} {:>10}", "File", "Size");
        println!("{}", "-".repeat(51));

        for f in &self.files {
            println!("{:<40} {:>10}", shorten(&f.file, 38), format_size(f.bytes));
        }

        println!("{}", "-".repeat(51));
        println!(
            "{:<40} {:>10}",
            format!("{} files", self.files.len()),
            format_size(self.total_bytes())
        );

        for s in &self.skipped {
            println!("skipped {} ({}): {}", s.file, s.format, s.reason);
        }
    }

    pub fn print_json(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// Keep the tail of `name` so it fits in `max` characters.
fn shorten(name: &str, max: usize) -> String {
    let count = name.chars().count();
    if count <= max {
        return name.to_string();
    }
    let tail: String = name.chars().skip(count - (max - 2)).collect();
    format!("..{tail}")
}

fn relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn long_names_keep_their_tail() {
        assert_eq!(shorten("favicon-16x16.png", 38), "favicon-16x16.png");

        let long = format!("{}-icône-192x192.png", "é".repeat(40));
        let short = shorten(&long, 38);
        assert_eq!(short.chars().count(), 38);
        assert!(short.starts_with(".."));
        assert!(short.ends_with("-icône-192x192.png"));
    }

    #[test]
    fn files_are_relative_and_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let b = tmp.path().join("b.png");
        let a = tmp.path().join("a.png");
        std::fs::write(&b, [0u8; 10]).unwrap();
        std::fs::write(&a, [0u8; 4]).unwrap();

        let mut summary = Summary::new(Path::new("logo.png"), tmp.path(), 1, 1);
        summary.add_files(&[b, a, tmp.path().join("missing.png")]);

        let names: Vec<&str> = summary.files.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png"]);
        assert_eq!(summary.total_bytes(), 14);
        assert_eq!(summary.warnings.len(), 1);
    }

    #[test]
    fn json_shape() {
        let summary = Summary::new(Path::new("logo.png"), Path::new("favicons"), 512, 512);
        let value: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["width"], 512);
        assert_eq!(value["output_dir"], "favicons");
        assert!(value["files"].as_array().unwrap().is_empty());
    }
}
