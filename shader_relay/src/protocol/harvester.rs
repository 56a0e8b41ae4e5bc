//! Result harvester - reads results back and removes every batch artifact
//!
//! A batch's request and result files are owned by a [`BatchArtifacts`]
//! guard from before publication until harvest. Releasing the guard deletes
//! all of them; dropping it unreleased (early return, panic) does the same.
//! Deleting a file that is already gone counts as success.

use std::fs;
use std::io;
use std::path::Path;
use crate::codec::{split_combined, ControlBlock};
use crate::error::{CleanupFailure, Error, Result};
use crate::relay_err;
use super::job::{JobArtifacts, ResultPaths};

/// Harvested result of one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledShader {
    /// Job name
    pub name: String,
    /// Control block as written by the compiler
    pub control_bytes: Vec<u8>,
    /// Decoded control block fields
    pub control: ControlBlock,
    /// Code blob as written by the compiler
    pub code: Vec<u8>,
}

/// Scoped ownership of one batch's request and result files
pub struct BatchArtifacts {
    jobs: Vec<JobArtifacts>,
    released: bool,
}

impl BatchArtifacts {
    pub fn new(jobs: Vec<JobArtifacts>) -> Self {
        Self { jobs, released: false }
    }

    pub fn jobs(&self) -> &[JobArtifacts] {
        &self.jobs
    }

    /// Delete every request and result file of the batch
    ///
    /// Every file is attempted; returns the ones that could not be removed.
    pub fn release(mut self) -> Vec<CleanupFailure> {
        self.released = true;
        remove_all(&self.jobs)
    }
}

impl Drop for BatchArtifacts {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        for failure in remove_all(&self.jobs) {
            crate::relay_error!("shader_relay::Harvester",
                "Could not remove {} during unwind: {}", failure.path.display(), failure.reason);
        }
    }
}

/// Remove `path`, treating an already absent file as success
pub fn remove_if_present(path: &Path) -> std::result::Result<(), CleanupFailure> {
    match fs::remove_file(path) {
        Ok(()) => {
            crate::relay_trace!("shader_relay::Harvester", "Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CleanupFailure {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

fn remove_all(jobs: &[JobArtifacts]) -> Vec<CleanupFailure> {
    jobs.iter()
        .flat_map(|job| job.files())
        .filter_map(|path| remove_if_present(path).err())
        .collect()
}

fn read_result(job: &str, path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| relay_err!("shader_relay::Harvester", Error::ResultMissing {
        job: job.to_string(),
        path: path.to_path_buf(),
        reason: e.to_string(),
    }))
}

fn read_job(job: &JobArtifacts) -> Result<CompiledShader> {
    let (control_bytes, code) = match &job.results {
        ResultPaths::Split { control, code } => {
            let control_bytes = read_result(&job.name, control)?;
            let code = read_result(&job.name, code)?;
            (control_bytes, code)
        }
        ResultPaths::Combined { bin } => {
            let bytes = read_result(&job.name, bin)?;
            let (control, code) = split_combined(&bytes);
            (control.to_vec(), code.to_vec())
        }
    };

    let control = ControlBlock::decode(&control_bytes)
        .map_err(|e| relay_err!("shader_relay::Harvester", e))?;

    crate::relay_debug!("shader_relay::Harvester",
        "Harvested '{}': control {} bytes, code {} bytes, shader_size {:#x}",
        job.name, control_bytes.len(), code.len(), control.shader_size);

    Ok(CompiledShader {
        name: job.name.clone(),
        control_bytes,
        control,
        code,
    })
}

/// Reads every job's results, then releases the batch
pub struct Harvester;

impl Harvester {
    /// Read all results of the batch, then delete all of its artifacts
    ///
    /// All-or-nothing: the first failed read fails the whole batch and no
    /// partial results are returned. Cleanup runs on every path.
    ///
    /// # Errors
    ///
    /// - `ResultMissing` / `MalformedControlBlock` for the first failed job,
    ///   wrapped in `CleanupAfterFailure` if deletions also failed
    /// - `CleanupError` if every read succeeded but some deletions failed
    pub fn harvest(&self, artifacts: BatchArtifacts) -> Result<Vec<CompiledShader>> {
        let reads: Result<Vec<CompiledShader>> = artifacts.jobs().iter().map(read_job).collect();
        let cleanup = artifacts.release();

        for failure in &cleanup {
            crate::relay_error!("shader_relay::Harvester",
                "Could not remove {}: {}", failure.path.display(), failure.reason);
        }

        match reads {
            Ok(shaders) if cleanup.is_empty() => Ok(shaders),
            Ok(_) => Err(Error::CleanupError(cleanup)),
            Err(primary) => Err(primary.with_cleanup(cleanup)),
        }
    }
}

#[cfg(test)]
#[path = "harvester_tests.rs"]
mod tests;
