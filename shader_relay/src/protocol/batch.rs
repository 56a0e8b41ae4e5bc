//! Batch coordinator - drives one batch through the whole file-drop protocol
//!
//! Publisher → Watcher → Harvester → Codec. A single job is a batch of one.

use std::time::Instant;
use crate::codec::{derive, Derived, OutputFormats};
use crate::config::RelayConfig;
use crate::error::{Error, Result};
use super::harvester::{BatchArtifacts, CompiledShader, Harvester};
use super::job::{Job, JobArtifacts, JobSet};
use super::publisher::Publisher;
use super::watcher::{WatchOutcome, Watcher};

/// Final output for one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    /// Base control and code artifacts
    pub shader: CompiledShader,
    /// Requested derived formats, in output order
    pub derived: Vec<Derived>,
}

/// Coordinates publication, waiting, harvesting and decoding
///
/// # Example
///
/// ```no_run
/// use shader_relay::relay::{BatchCoordinator, Job, OutputFormats, RelayConfig};
///
/// let relay = BatchCoordinator::new(RelayConfig::new("/path/to/ryujinx"))?;
/// let outputs = relay.compile(
///     vec![Job::new("water.frag", std::fs::read("water.frag").unwrap())],
///     OutputFormats::NV | OutputFormats::CONSTBUF,
/// )?;
/// # Ok::<(), shader_relay::relay::Error>(())
/// ```
pub struct BatchCoordinator {
    config: RelayConfig,
}

impl BatchCoordinator {
    /// Create a coordinator for the given configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn new(config: RelayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Compile a batch of jobs
    ///
    /// Jobs are deduplicated by name (first one wins). On success there is
    /// exactly one output per surviving job, in first-seen order. Any failure
    /// fails the whole batch; request and result files are removed either way.
    pub fn compile<I>(&self, jobs: I, formats: OutputFormats) -> Result<Vec<BatchOutput>>
    where
        I: IntoIterator<Item = Job>,
    {
        let jobs: JobSet = jobs.into_iter().collect();
        if jobs.is_empty() {
            crate::relay_debug!("shader_relay::Batch", "Empty batch, nothing to compile");
            return Ok(Vec::new());
        }

        let start = Instant::now();
        crate::relay_info!("shader_relay::Batch",
            "Compiling {} shader(s): {}", jobs.len(), jobs.names().join(", "));

        // Take ownership of every path before the first write so that a
        // failed publish still removes what was written.
        let guard = BatchArtifacts::new(
            jobs.iter()
                .map(|job| JobArtifacts::for_job(&self.config, &job.name))
                .collect(),
        );

        if let Err(e) = Publisher::new(&self.config).publish(&jobs) {
            return Err(e.with_cleanup(guard.release()));
        }

        if let WatchOutcome::TimedOut { missing, elapsed } = Watcher::new(&self.config).wait(guard.jobs()) {
            crate::relay_warn!("shader_relay::Batch",
                "Timed out after {:?} with {} result file(s) missing; harvesting anyway",
                elapsed, missing.len());
        }

        let shaders = Harvester.harvest(guard)?;

        let outputs: Vec<BatchOutput> = shaders
            .into_iter()
            .map(|shader| {
                let derived = derive(&shader.code, &shader.control, formats);
                for d in derived.iter().filter(|d| d.is_truncated()) {
                    crate::relay_warn!("shader_relay::Batch",
                        "'{}': {} slice is shorter than the control block announces",
                        shader.name, d.format().name());
                }
                BatchOutput { shader, derived }
            })
            .collect();

        crate::relay_info!("shader_relay::Batch",
            "Compiled {} shader(s) in {:?}", outputs.len(), start.elapsed());
        Ok(outputs)
    }

    /// Compile a single shader (a batch of one)
    pub fn compile_one(&self, job: Job, formats: OutputFormats) -> Result<BatchOutput> {
        let name = job.name.clone();
        self.compile(std::iter::once(job), formats)?
            .pop()
            .ok_or_else(|| Error::ResultMissing {
                path: self.config.request_path(&name),
                job: name,
                reason: "no result harvested".to_string(),
            })
    }
}
