//! Jobs and the filesystem artifacts derived from them

use std::path::{Path, PathBuf};
use rustc_hash::FxHashMap;
use crate::config::RelayConfig;
use crate::stage::ShaderStage;

/// One shader source to compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Request file name, used verbatim for request and result paths
    pub name: String,
    /// Raw shader source bytes
    pub source: Vec<u8>,
}

impl Job {
    pub fn new(name: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Stage the external compiler will infer from the name
    pub fn stage(&self) -> Option<ShaderStage> {
        ShaderStage::from_name(&self.name)
    }
}

/// Jobs with unique names
///
/// The first job seen under a name wins; later duplicates are dropped.
/// Iteration follows first-seen order.
#[derive(Debug, Clone, Default)]
pub struct JobSet {
    jobs: Vec<Job>,
    index: FxHashMap<String, usize>,
}

impl JobSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job unless its name is already present
    ///
    /// Returns `false` when the job was dropped as a duplicate.
    pub fn insert(&mut self, job: Job) -> bool {
        if let Some(&existing) = self.index.get(&job.name) {
            if self.jobs[existing].source != job.source {
                crate::relay_warn!("shader_relay::JobSet",
                    "Duplicate job '{}' with different source ignored; keeping the first", job.name);
            } else {
                crate::relay_debug!("shader_relay::JobSet", "Duplicate job '{}' ignored", job.name);
            }
            return false;
        }
        self.index.insert(job.name.clone(), self.jobs.len());
        self.jobs.push(job);
        true
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.jobs.iter().map(|job| job.name.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[Job] {
        &self.jobs
    }
}

impl FromIterator<Job> for JobSet {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        let mut set = JobSet::new();
        for job in iter {
            set.insert(job);
        }
        set
    }
}

impl<'a> IntoIterator for &'a JobSet {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

/// Result files expected for one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPaths {
    /// `<name>.control` + `<name>.code`
    Split { control: PathBuf, code: PathBuf },
    /// `<name>.bin`
    Combined { bin: PathBuf },
}

impl ResultPaths {
    /// Every file of this result
    pub fn files(&self) -> Vec<&Path> {
        match self {
            ResultPaths::Split { control, code } => vec![control.as_path(), code.as_path()],
            ResultPaths::Combined { bin } => vec![bin.as_path()],
        }
    }

    /// Files of this result not yet on disk
    pub fn missing(&self) -> Vec<&Path> {
        self.files().into_iter().filter(|path| !path.exists()).collect()
    }

    pub fn all_exist(&self) -> bool {
        self.files().iter().all(|path| path.exists())
    }
}

/// Request and result paths of one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobArtifacts {
    pub name: String,
    pub request: PathBuf,
    pub results: ResultPaths,
}

impl JobArtifacts {
    pub fn for_job(config: &RelayConfig, name: &str) -> Self {
        Self {
            name: name.to_string(),
            request: config.request_path(name),
            results: config.result_paths(name),
        }
    }

    /// Request file followed by every result file
    pub fn files(&self) -> Vec<&Path> {
        let mut files = vec![self.request.as_path()];
        files.extend(self.results.files());
        files
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
