//! Bounded polling primitive
//!
//! Repeats a check until it holds or a wall-clock deadline elapses, sleeping
//! `interval` between checks. A zero interval polls in a tight loop.

use std::thread;
use std::time::{Duration, Instant};

/// How a poll ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The predicate held after `checks` evaluations
    Satisfied { checks: u64, elapsed: Duration },
    /// The deadline elapsed first
    TimedOut { checks: u64, elapsed: Duration },
}

impl PollOutcome {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, PollOutcome::Satisfied { .. })
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            PollOutcome::Satisfied { elapsed, .. } | PollOutcome::TimedOut { elapsed, .. } => *elapsed,
        }
    }
}

/// Poll `predicate` until it returns true or `timeout` elapses
///
/// The predicate is always evaluated at least once, even with a zero timeout.
pub fn poll_until<F>(mut predicate: F, timeout: Duration, interval: Duration) -> PollOutcome
where
    F: FnMut() -> bool,
{
    let start = Instant::now();
    let mut checks = 0u64;
    loop {
        checks += 1;
        if predicate() {
            return PollOutcome::Satisfied { checks, elapsed: start.elapsed() };
        }
        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return PollOutcome::TimedOut { checks, elapsed };
        }
        if !interval.is_zero() {
            thread::sleep(interval.min(timeout - elapsed));
        }
    }
}
