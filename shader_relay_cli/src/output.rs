//! Artifact writer - lays compiled shaders out in the output directory
//!
//! For a job named `<name>`:
//! - `<name>.bin.ctrl`: control block as written by the compiler
//! - `<name>.bin.code`: code blob as written by the compiler
//! - `<name>.bin.code.<format>`: one file per emitted derived format

use shader_relay::relay::{BatchOutput, Derived, DerivedFormat, Error, Result, SkipReason};
use shader_relay::relay_err;
use std::fs;
use std::path::PathBuf;

/// Files written for one job, and the formats that produced none
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<(DerivedFormat, SkipReason)>,
}

pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the output directory if needed
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            relay_err!("shader_relay::Output", Error::OutputWriteFailed {
                path: self.dir.clone(),
                reason: e.to_string(),
            })
        })
    }

    pub fn control_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.bin.ctrl", name))
    }

    pub fn code_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.bin.code", name))
    }

    pub fn derived_path(&self, name: &str, format: DerivedFormat) -> PathBuf {
        self.dir.join(format!("{}.bin.code.{}", name, format.name()))
    }

    /// Write every artifact of one job
    pub fn write(&self, output: &BatchOutput) -> Result<WriteReport> {
        let name = &output.shader.name;
        let mut report = WriteReport::default();

        report.written.push(self.write_file(self.control_path(name), &output.shader.control_bytes)?);
        report.written.push(self.write_file(self.code_path(name), &output.shader.code)?);

        for derived in &output.derived {
            match derived {
                Derived::Emitted { format, bytes, .. } => {
                    report.written.push(self.write_file(self.derived_path(name, *format), bytes)?);
                }
                Derived::Skipped { format, reason } => {
                    report.skipped.push((*format, *reason));
                }
            }
        }
        Ok(report)
    }

    fn write_file(&self, path: PathBuf, bytes: &[u8]) -> Result<PathBuf> {
        match fs::write(&path, bytes) {
            Ok(()) => {
                shader_relay::relay_debug!("shader_relay::Output",
                    "Wrote {} ({} bytes)", path.display(), bytes.len());
                Ok(path)
            }
            Err(e) => Err(relay_err!("shader_relay::Output", Error::OutputWriteFailed {
                path,
                reason: e.to_string(),
            })),
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
