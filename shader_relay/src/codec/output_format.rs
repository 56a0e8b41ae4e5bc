//! Derived output format selection

use bitflags::bitflags;

bitflags! {
    /// Set of derived formats requested by the caller
    ///
    /// The empty set yields only the base control and code artifacts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OutputFormats: u8 {
        /// Code with the NV header kept (`[0x30, 0x30 + shader_size)`)
        const NV = 1 << 0;
        /// Code with the header stripped (`[0x80, 0x30 + shader_size)`)
        const RAW = 1 << 1;
        /// Constant buffer region
        const CONSTBUF = 1 << 2;
    }
}

/// A single derived format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedFormat {
    Nv,
    Raw,
    ConstBuf,
}

impl DerivedFormat {
    /// Every derived format, in output order
    pub const ALL: [DerivedFormat; 3] = [DerivedFormat::Nv, DerivedFormat::Raw, DerivedFormat::ConstBuf];

    /// Option name, also used as the output file suffix
    pub fn name(self) -> &'static str {
        match self {
            DerivedFormat::Nv => "nv",
            DerivedFormat::Raw => "raw",
            DerivedFormat::ConstBuf => "constbuf",
        }
    }

    /// Parse an option name (`nv`, `raw`, `constbuf`)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.name() == name)
    }

    /// The flag selecting this format
    pub fn flag(self) -> OutputFormats {
        match self {
            DerivedFormat::Nv => OutputFormats::NV,
            DerivedFormat::Raw => OutputFormats::RAW,
            DerivedFormat::ConstBuf => OutputFormats::CONSTBUF,
        }
    }
}

impl OutputFormats {
    /// Selected formats, in output order
    pub fn selected(self) -> impl Iterator<Item = DerivedFormat> {
        DerivedFormat::ALL
            .into_iter()
            .filter(move |format| self.contains(format.flag()))
    }
}

impl FromIterator<DerivedFormat> for OutputFormats {
    fn from_iter<I: IntoIterator<Item = DerivedFormat>>(iter: I) -> Self {
        iter.into_iter()
            .fold(OutputFormats::empty(), |acc, format| acc | format.flag())
    }
}
