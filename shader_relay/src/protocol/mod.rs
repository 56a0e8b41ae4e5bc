//! File-drop request/response protocol
//!
//! The external compiler is driven only through two directories: requests
//! are dropped into one, results appear in the other.

pub mod poll;
pub mod job;
pub mod publisher;
pub mod watcher;
pub mod harvester;
pub mod batch;

pub use poll::{poll_until, PollOutcome};
pub use job::{Job, JobSet, JobArtifacts, ResultPaths};
pub use publisher::Publisher;
pub use watcher::{Watcher, WatchOutcome};
pub use harvester::{Harvester, BatchArtifacts, CompiledShader, remove_if_present};
pub use batch::{BatchCoordinator, BatchOutput};
