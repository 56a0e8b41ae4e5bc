/*!
# Shader Relay

Drives an external NVN shader compiler that only talks through the filesystem.

The compiler watches a request directory and writes its results to an output
directory. This crate publishes shader sources as request files, waits for the
result files to appear, harvests them while guaranteeing removal of every
artifact, and decodes the control block to slice the code blob into derived
formats.

## Architecture

- **codec**: control block decoding and code blob slicing
- **protocol**: Publisher, Watcher, Harvester and the BatchCoordinator composing them
- **config**: explicit directory layout and wait bounds
- **stage**: shader stage detection from request names
*/

// Internal modules
mod error;
mod config;
pub mod log;
pub mod codec;
pub mod protocol;
pub mod stage;

// Main relay namespace module
pub mod relay {
    // Error types
    pub use crate::error::{Error, ErrorKind, CleanupFailure, Result};

    // Configuration
    pub use crate::config::{
        RelayConfig, ResultLayout,
        DEFAULT_INPUT_SUBPATH, DEFAULT_OUTPUT_SUBPATH,
        DEFAULT_TIMEOUT, DEFAULT_SETTLE_DELAY, DEFAULT_POLL_INTERVAL,
    };

    // Entry points
    pub use crate::protocol::{BatchCoordinator, BatchOutput, CompiledShader, Job};
    pub use crate::codec::{ControlBlock, Derived, DerivedFormat, OutputFormats, SkipReason};
    pub use crate::stage::ShaderStage;

    // Logging sub-module (types and global logger control)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity, format_entry,
        };
    }

    // Protocol components
    pub mod protocol {
        pub use crate::protocol::*;
    }

    // Codec sub-module
    pub mod codec {
        pub use crate::codec::*;
    }
}
