//! Relay configuration
//!
//! Everything the protocol components need to locate the external compiler's
//! watched directories and to bound the completion wait. A `RelayConfig` is
//! passed explicitly to every component; there is no process-wide path state.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::error::{Error, Result};
use crate::protocol::ResultPaths;

/// Request directory, relative to the root
pub const DEFAULT_INPUT_SUBPATH: &str = "sdcard/shaders";
/// Result directory, relative to the root
pub const DEFAULT_OUTPUT_SUBPATH: &str = "sdcard/output";
/// Completion wait deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Pause after the expected results have appeared
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);
/// Delay between two existence checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Extension of the control half of a split result
pub const CONTROL_EXTENSION: &str = "control";
/// Extension of the code half of a split result
pub const CODE_EXTENSION: &str = "code";
/// Extension of a combined result
pub const COMBINED_EXTENSION: &str = "bin";

/// How the external compiler packs its results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultLayout {
    /// `<name>.control` and `<name>.code`
    #[default]
    Split,
    /// A single `<name>.bin` holding the control section followed by the code
    Combined,
}

/// Relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Root directory of the external compiler (contains the sdcard tree)
    pub root: PathBuf,
    /// Request directory relative to `root`
    pub input_subpath: PathBuf,
    /// Result directory relative to `root`
    pub output_subpath: PathBuf,
    /// Advisory deadline for the completion wait
    pub timeout: Duration,
    /// Fixed pause once the wait ends
    pub settle_delay: Duration,
    /// Delay between existence checks (zero polls in a tight loop)
    pub poll_interval: Duration,
    /// Result file layout
    pub layout: ResultLayout,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            input_subpath: PathBuf::from(DEFAULT_INPUT_SUBPATH),
            output_subpath: PathBuf::from(DEFAULT_OUTPUT_SUBPATH),
            timeout: DEFAULT_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            layout: ResultLayout::Split,
        }
    }
}

impl RelayConfig {
    /// Configuration rooted at `root` with every other field at its default
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// `$APPDATA/ryujinx` when APPDATA is set, `ryujinx` otherwise
    pub fn default_root() -> PathBuf {
        match env::var_os("APPDATA") {
            Some(appdata) if !appdata.is_empty() => PathBuf::from(appdata).join("ryujinx"),
            _ => PathBuf::from("ryujinx"),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_layout(mut self, layout: ResultLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Check that the directory layout is usable
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the root is empty or a sub-path is empty or absolute.
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("root directory is empty".to_string()));
        }
        for (label, subpath) in [
            ("input sub-path", &self.input_subpath),
            ("output sub-path", &self.output_subpath),
        ] {
            if subpath.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(format!("{} is empty", label)));
            }
            if subpath.is_absolute() {
                return Err(Error::InvalidConfig(format!(
                    "{} must be relative to the root, got {}",
                    label,
                    subpath.display()
                )));
            }
        }
        Ok(())
    }

    /// Directory the external compiler watches for requests
    pub fn request_dir(&self) -> PathBuf {
        self.root.join(&self.input_subpath)
    }

    /// Directory the external compiler writes results to
    pub fn result_dir(&self) -> PathBuf {
        self.root.join(&self.output_subpath)
    }

    /// `<request_dir>/<name>`
    pub fn request_path(&self, name: &str) -> PathBuf {
        self.request_dir().join(name)
    }

    /// Result files the compiler will write for `name` under the configured layout
    pub fn result_paths(&self, name: &str) -> ResultPaths {
        let dir = self.result_dir();
        match self.layout {
            ResultLayout::Split => ResultPaths::Split {
                control: suffixed(&dir, name, CONTROL_EXTENSION),
                code: suffixed(&dir, name, CODE_EXTENSION),
            },
            ResultLayout::Combined => ResultPaths::Combined {
                bin: suffixed(&dir, name, COMBINED_EXTENSION),
            },
        }
    }
}

/// `<dir>/<name>.<extension>`, keeping any dots already in `name`
fn suffixed(dir: &Path, name: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, extension))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
