//! Job publisher - writes request files into the compiler's drop directory

use std::fs;
use crate::config::RelayConfig;
use crate::error::{Error, Result};
use crate::relay_bail;
use super::job::{JobArtifacts, JobSet};

/// Writes each job's source to `<request_dir>/<name>`
///
/// Existing files of the same name are overwritten. Batches from several
/// callers must not share names: there is no locking.
pub struct Publisher<'a> {
    config: &'a RelayConfig,
}

impl<'a> Publisher<'a> {
    pub fn new(config: &'a RelayConfig) -> Self {
        Self { config }
    }

    /// Publish every job of the set, in order
    ///
    /// Returns the artifacts of the published jobs.
    ///
    /// # Errors
    ///
    /// Returns `PublishFailed` on the first request that cannot be written.
    /// Requests written before the failure stay on disk; the caller's
    /// cleanup guard is responsible for them.
    pub fn publish(&self, jobs: &JobSet) -> Result<Vec<JobArtifacts>> {
        let mut published = Vec::with_capacity(jobs.len());
        for job in jobs {
            let artifacts = JobArtifacts::for_job(self.config, &job.name);

            if job.stage().is_none() {
                crate::relay_warn!("shader_relay::Publisher",
                    "'{}' has no recognized shader stage extension; the compiler may never pick it up",
                    job.name);
            }
            for stale in artifacts.results.files().into_iter().filter(|p| p.exists()) {
                crate::relay_warn!("shader_relay::Publisher",
                    "Stale result {} already present for '{}'", stale.display(), job.name);
            }

            if let Err(e) = fs::write(&artifacts.request, &job.source) {
                relay_bail!("shader_relay::Publisher", Error::PublishFailed {
                    job: job.name.clone(),
                    path: artifacts.request.clone(),
                    reason: e.to_string(),
                });
            }
            crate::relay_debug!("shader_relay::Publisher",
                "Published '{}' ({} bytes) to {}",
                job.name, job.source.len(), artifacts.request.display());

            published.push(artifacts);
        }
        Ok(published)
    }
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;
