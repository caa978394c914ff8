//! External PNG optimizer (squoosh-cli's oxipng pass), run as a bounded,
//! cancellable subprocess per file.

use std::ffi::OsString;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::{FaviconError, Result, Stop};

const POLL_INTERVAL: Duration = Duration::from_millis(25);
/// Minimum wait for stderr after the tool exits near its deadline.
const STDERR_GRACE: Duration = Duration::from_millis(100);

/// How to invoke the optimizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Executable name or path.
    pub program: String,
    /// oxipng level passed as `--oxipng <level>`.
    pub level: u8,
    /// Wall-clock budget per file.
    pub timeout: Duration,
}

impl OptimizerConfig {
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            program: "squoosh-cli".to_string(),
            level: 4,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Outcome of [`Optimizer::optimize_dir`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptimizeReport {
    pub optimized: Vec<PathBuf>,
    /// Files the tool failed or timed out on, with the error text.
    pub failed: Vec<(PathBuf, String)>,
}

impl OptimizeReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs the external optimizer over generated PNGs.
#[derive(Clone, Debug, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// `*.png` files directly inside `dir`, sorted.
    pub fn find_pngs(dir: &Path) -> Result<Vec<PathBuf>> {
        let dir_str = dir.to_str().ok_or_else(|| {
            FaviconError::InvalidInput(format!("non-UTF-8 directory: {}", dir.display()))
        })?;
        let pattern = format!("{}/*.png", glob::Pattern::escape(dir_str));

        let entries = glob::glob(&pattern)
            .map_err(|e| FaviconError::InvalidInput(format!("bad glob pattern {pattern}: {e}")))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                FaviconError::io(path, e.into())
            })?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Argument list for one file: `--oxipng <level> --output-dir <dir> <file>`.
    pub fn command_args(&self, file: &Path) -> Vec<OsString> {
        let out_dir = file.parent().unwrap_or(Path::new("."));
        vec![
            "--oxipng".into(),
            self.config.level.to_string().into(),
            "--output-dir".into(),
            out_dir.as_os_str().to_owned(),
            file.as_os_str().to_owned(),
        ]
    }

    /// Optimize one PNG in place.
    ///
    /// The child is killed once the configured timeout elapses or `stop` fires.
    pub fn optimize_file(&self, path: &Path, stop: &dyn Stop) -> Result<()> {
        let program = &self.config.program;
        let mut child = Command::new(program)
            .args(self.command_args(path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => FaviconError::ToolNotFound(program.clone()),
                _ => FaviconError::io(path, e),
            })?;

        // Drain stderr on a side thread so a chatty tool cannot fill the pipe and stall.
        let stderr_rx = child.stderr.take().map(|mut pipe| {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let mut buf = String::new();
                let _ = pipe.read_to_string(&mut buf);
                let _ = tx.send(buf);
            });
            rx
        });

        let deadline = Instant::now() + self.config.timeout;
        let status = self.wait_bounded(&mut child, path, stop, deadline)?;

        // A background process left behind by the tool can hold the pipe open
        // past its exit; the reader is abandoned once the deadline passes.
        let wait = deadline.saturating_duration_since(Instant::now()).max(STDERR_GRACE);
        let stderr = match stderr_rx.map(|rx| rx.recv_timeout(wait)) {
            Some(Ok(text)) => text,
            Some(Err(_)) => {
                log::debug!("stderr of {program} still open after exit, not waiting for it");
                String::new()
            }
            None => String::new(),
        };

        if status.success() {
            log::debug!("optimized {}", path.display());
            Ok(())
        } else {
            Err(FaviconError::ToolFailed {
                program: program.clone(),
                path: path.to_path_buf(),
                status: describe_status(status),
                stderr: stderr.trim().to_string(),
            })
        }
    }

    fn wait_bounded(
        &self,
        child: &mut Child,
        path: &Path,
        stop: &dyn Stop,
        deadline: Instant,
    ) -> Result<ExitStatus> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {}
                Err(e) => {
                    kill(child);
                    return Err(FaviconError::io(path, e));
                }
            }

            if stop.should_stop() {
                kill(child);
                return Err(FaviconError::Cancelled);
            }
            if Instant::now() >= deadline {
                kill(child);
                return Err(FaviconError::Timeout {
                    program: self.config.program.clone(),
                    path: path.to_path_buf(),
                    after: self.config.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Optimize every PNG in `dir`.
    pub fn optimize_dir(&self, dir: &Path, stop: &dyn Stop) -> Result<OptimizeReport> {
        self.optimize_dir_with(dir, stop, |_, _| {})
    }

    /// Like [`optimize_dir`](Self::optimize_dir), calling `on_file` after each file.
    ///
    /// Per-file failures are collected and the batch continues. A missing
    /// tool or a cancellation aborts the batch.
    pub fn optimize_dir_with<F>(&self, dir: &Path, stop: &dyn Stop, mut on_file: F) -> Result<OptimizeReport>
    where
        F: FnMut(&Path, &Result<()>),
    {
        let files = Self::find_pngs(dir)?;
        let mut report = OptimizeReport::default();

        for file in files {
            let result = self.optimize_file(&file, stop);
            on_file(&file, &result);
            match result {
                Ok(()) => report.optimized.push(file),
                Err(e @ (FaviconError::ToolNotFound(_) | FaviconError::Cancelled)) => return Err(e),
                Err(e) => {
                    log::warn!("optimizer failed on {}: {e}", file.display());
                    report.failed.push((file, e.to_string()));
                }
            }
        }
        Ok(report)
    }
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Unstoppable;

    #[test]
    fn default_config() {
        let config = OptimizerConfig::default();
        assert_eq!(config.program, "squoosh-cli");
        assert_eq!(config.level, 4);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn argument_list() {
        let optimizer = Optimizer::new(OptimizerConfig::default().with_level(2));
        let args = optimizer.command_args(Path::new("favicons/favicon-16x16.png"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "--oxipng",
                "2",
                "--output-dir",
                "favicons",
                "favicons/favicon-16x16.png"
            ]
        );
    }

    #[test]
    fn find_pngs_sorted_and_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "c.webp", "favicon.ico"] {
            std::fs::write(tmp.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(tmp.path().join("dir.png")).unwrap();

        let files = Optimizer::find_pngs(tmp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.png", "b.png"]);
    }

    #[test]
    fn missing_tool_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.png");
        std::fs::write(&file, b"").unwrap();

        let optimizer = Optimizer::new(
            OptimizerConfig::default().with_program("zenfavicon-no-such-optimizer"),
        );
        assert!(matches!(
            optimizer.optimize_file(&file, &Unstoppable),
            Err(FaviconError::ToolNotFound(_))
        ));
        assert!(matches!(
            optimizer.optimize_dir(tmp.path(), &Unstoppable),
            Err(FaviconError::ToolNotFound(_))
        ));
    }

    #[test]
    fn empty_dir_is_clean() {
        let tmp = tempfile::tempdir().unwrap();
        let optimizer = Optimizer::new(
            OptimizerConfig::default().with_program("zenfavicon-no-such-optimizer"),
        );
        let report = optimizer.optimize_dir(tmp.path(), &Unstoppable).unwrap();
        assert!(report.is_clean());
        assert!(report.optimized.is_empty());
    }
}
