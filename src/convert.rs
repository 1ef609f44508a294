//! FIT-to-TCX conversion via an external tool.
//!
//! The converter is the `fittotcx` binary: invoked with the input path, it
//! writes TCX text to standard output, which is captured straight into the
//! output file. The [`Converter`] trait is the seam that lets the pipeline
//! run against a stub in tests.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::ConverterConfig;

/// Errors from converting one recording.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("converter `{0}` not found in PATH")]
    NotAvailable(String),

    #[error("input file does not exist: {path}")]
    MissingInput { path: PathBuf },

    #[error("output directory does not exist: {path}")]
    MissingOutputDir { path: PathBuf },

    #[error("converter exited with code {code}: {stderr}")]
    ExitCode { code: i32, stderr: String },

    #[error("converter timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Converts one recording file into a TCX document file.
pub trait Converter {
    /// Check if the converter can run. Should be fast.
    fn is_available(&self) -> bool;

    /// Convert `fit_path` into `tcx_path`.
    fn convert(&self, fit_path: &Path, tcx_path: &Path) -> Result<(), ConvertError>;
}

/// The external `fittotcx` tool.
#[derive(Debug, Clone)]
pub struct FitToTcx {
    command: String,
    timeout: Duration,
}

impl FitToTcx {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.command.as_str(), Duration::from_secs(config.timeout_secs))
    }
}

impl Converter for FitToTcx {
    fn is_available(&self) -> bool {
        command_exists(&self.command)
    }

    fn convert(&self, fit_path: &Path, tcx_path: &Path) -> Result<(), ConvertError> {
        if !fit_path.is_file() {
            return Err(ConvertError::MissingInput {
                path: fit_path.to_path_buf(),
            });
        }
        if let Some(dir) = tcx_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                return Err(ConvertError::MissingOutputDir {
                    path: dir.to_path_buf(),
                });
            }
        }

        debug!(
            "converting {} -> {}",
            fit_path.display(),
            tcx_path.display()
        );
        let output_file = File::create(tcx_path)?;
        let spawned = Command::new(&self.command)
            .arg(fit_path)
            .stdin(Stdio::null())
            .stdout(Stdio::from(output_file))
            .stderr(Stdio::piped())
            .spawn();

        let result = match spawned {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ConvertError::NotAvailable(self.command.clone()))
            }
            Err(err) => Err(err.into()),
            Ok(mut child) => match wait_with_timeout(&mut child, self.timeout) {
                Ok((status, _)) if status.success() => Ok(()),
                Ok((status, stderr)) => Err(ConvertError::ExitCode {
                    code: status.code().unwrap_or(-1),
                    stderr: stderr.trim().to_string(),
                }),
                Err(_) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    Err(ConvertError::Timeout(self.timeout))
                }
            },
        };
        if result.is_err() {
            // Don't leave a truncated document behind.
            let _ = std::fs::remove_file(tcx_path);
        }
        result
    }
}

/// Check whether a command can be spawned at all.
pub fn command_exists(command: &str) -> bool {
    Command::new(command)
        .arg("--help")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Wait for a child process with a timeout, returning its exit status and
/// captured stderr.
///
/// Uses a polling approach since std::process doesn't have native timeout
/// support.
fn wait_with_timeout(
    child: &mut std::process::Child,
    timeout: Duration,
) -> std::io::Result<(std::process::ExitStatus, String)> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(100);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stderr = child
                    .stderr
                    .take()
                    .map(|mut s| {
                        let mut buf = String::new();
                        s.read_to_string(&mut buf).ok();
                        buf
                    })
                    .unwrap_or_default();
                return Ok((status, stderr));
            }
            Ok(None) => {
                if start.elapsed() >= timeout {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "converter timed out",
                    ));
                }
                std::thread::sleep(poll_interval);
            }
            Err(err) => return Err(err),
        }
    }
}
