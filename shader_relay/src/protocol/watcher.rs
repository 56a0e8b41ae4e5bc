//! Completion watcher - waits for the compiler's result files
//!
//! The compiler gives no completion signal other than the result files
//! appearing. The watcher polls for all of them, bounded by the configured
//! timeout, then sleeps the settle delay so the writer can finish flushing.
//!
//! The timeout is advisory: `TimedOut` is returned as an outcome, not an
//! error, and callers are expected to go on to harvest. Missing files then
//! surface as `ResultMissing` from the harvester.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use crate::config::RelayConfig;
use super::job::JobArtifacts;
use super::poll::{poll_until, PollOutcome};

/// How the wait ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Every expected result file appeared before the deadline
    Completed { elapsed: Duration },
    /// The deadline elapsed; `missing` lists files still absent after settling
    TimedOut { missing: Vec<PathBuf>, elapsed: Duration },
}

impl WatchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, WatchOutcome::Completed { .. })
    }
}

pub struct Watcher<'a> {
    config: &'a RelayConfig,
}

impl<'a> Watcher<'a> {
    pub fn new(config: &'a RelayConfig) -> Self {
        Self { config }
    }

    /// Block until all result files of `expected` exist or the timeout elapses
    ///
    /// Always sleeps the settle delay before returning, on both outcomes.
    pub fn wait(&self, expected: &[JobArtifacts]) -> WatchOutcome {
        crate::relay_debug!("shader_relay::Watcher",
            "Waiting up to {:?} for {} result(s)", self.config.timeout, expected.len());

        let poll = poll_until(
            || expected.iter().all(|job| job.results.all_exist()),
            self.config.timeout,
            self.config.poll_interval,
        );

        if !self.config.settle_delay.is_zero() {
            thread::sleep(self.config.settle_delay);
        }

        match poll {
            PollOutcome::Satisfied { checks, elapsed } => {
                crate::relay_trace!("shader_relay::Watcher",
                    "All results present after {:?} ({} checks)", elapsed, checks);
                WatchOutcome::Completed { elapsed }
            }
            PollOutcome::TimedOut { checks, elapsed } => {
                let missing: Vec<PathBuf> = expected
                    .iter()
                    .flat_map(|job| job.results.missing())
                    .map(|path| path.to_path_buf())
                    .collect();
                crate::relay_trace!("shader_relay::Watcher",
                    "Gave up after {} checks, {} file(s) missing", checks, missing.len());
                WatchOutcome::TimedOut { missing, elapsed }
            }
        }
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
