//! Command-line arguments

use clap::{ArgAction, Parser, ValueEnum};
use shader_relay::relay::log::LogSeverity;
use shader_relay::relay::{DerivedFormat, OutputFormats, RelayConfig, ResultLayout};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "shader-relay",
    author,
    version,
    long_about = None,
    after_help = "Exit status: 0 success, 2 input not found, \
                  3 result missing, 4 malformed control block, 5 cleanup failed, \
                  6 publish failed, 7 output write failed, 8 invalid configuration, \
                  64 usage error"
)]
/// Compile shaders through an external compiler watching a request directory
pub struct Args {
    /// Shader source files to compile
    #[arg(short, long, value_name = "PATH", num_args = 1.., required = true)]
    pub input: Vec<PathBuf>,

    /// Directory the compiled artifacts are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Compiler root containing the watched sdcard directories.
    /// Defaults to $APPDATA/ryujinx, or ./ryujinx without APPDATA.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Derived formats to write (repeatable or comma-separated)
    #[arg(short, long = "format", value_enum, value_delimiter = ',', default_values_t = [FormatArg::Nv])]
    pub formats: Vec<FormatArg>,

    /// Completion wait deadline in seconds
    #[arg(long, value_name = "SECS", default_value = "10", value_parser = parse_seconds)]
    pub timeout: Duration,

    /// Pause after the results appear, in milliseconds
    #[arg(long = "settle-delay", value_name = "MS", default_value_t = 100)]
    pub settle_delay: u64,

    /// Delay between existence checks, in milliseconds
    #[arg(long = "poll-interval", value_name = "MS", default_value_t = 1)]
    pub poll_interval: u64,

    /// How the compiler packs its results
    #[arg(long, value_enum, default_value_t = LayoutArg::Split)]
    pub layout: LayoutArg,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// Code with its NV header
    Nv,
    /// Code without the NV header
    Raw,
    /// Constant buffer region
    Constbuf,
}

impl From<FormatArg> for DerivedFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Nv => DerivedFormat::Nv,
            FormatArg::Raw => DerivedFormat::Raw,
            FormatArg::Constbuf => DerivedFormat::ConstBuf,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutArg {
    /// `<name>.control` and `<name>.code`
    Split,
    /// A single `<name>.bin`
    Combined,
}

impl From<LayoutArg> for ResultLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Split => ResultLayout::Split,
            LayoutArg::Combined => ResultLayout::Combined,
        }
    }
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout '{}': {}", value, e))
}

impl Args {
    pub fn relay_config(&self) -> RelayConfig {
        let root = self.root.clone().unwrap_or_else(RelayConfig::default_root);
        RelayConfig::new(root)
            .with_timeout(self.timeout)
            .with_settle_delay(Duration::from_millis(self.settle_delay))
            .with_poll_interval(Duration::from_millis(self.poll_interval))
            .with_layout(self.layout.into())
    }

    pub fn output_formats(&self) -> OutputFormats {
        self.formats.iter().map(|&f| DerivedFormat::from(f)).collect()
    }

    pub fn log_severity(&self) -> LogSeverity {
        if self.quiet {
            return LogSeverity::Warn;
        }
        match self.verbose {
            0 => LogSeverity::Info,
            1 => LogSeverity::Debug,
            _ => LogSeverity::Trace,
        }
    }
}
