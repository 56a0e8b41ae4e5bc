//! Code blob slicing
//!
//! Slices are computed from control block fields and clamped to the blob.
//! A truncated blob produces a shorter slice rather than an error; use
//! [`Derived::is_truncated`] to detect it.

use std::ops::Range;
use super::control_block::ControlBlock;
use super::output_format::{DerivedFormat, OutputFormats};

/// Start of the NV-formatted code (end of the header region)
pub const NV_CODE_OFFSET: usize = 0x30;
/// Start of the raw instruction stream
pub const RAW_CODE_OFFSET: usize = 0x80;

/// Why a requested format produced no artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `constbuf_size` is zero
    NoConstantBuffer,
}

/// Outcome of deriving one requested format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derived {
    /// Slice taken from the code blob
    Emitted {
        format: DerivedFormat,
        bytes: Vec<u8>,
        /// Length the control block announces for this slice
        expected_len: usize,
    },
    /// Requested but intentionally not produced
    Skipped {
        format: DerivedFormat,
        reason: SkipReason,
    },
}

impl Derived {
    pub fn format(&self) -> DerivedFormat {
        match self {
            Derived::Emitted { format, .. } | Derived::Skipped { format, .. } => *format,
        }
    }

    /// Emitted bytes, `None` for a skip
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Derived::Emitted { bytes, .. } => Some(bytes),
            Derived::Skipped { .. } => None,
        }
    }

    /// Whether the slice came out shorter than announced
    pub fn is_truncated(&self) -> bool {
        match self {
            Derived::Emitted { bytes, expected_len, .. } => bytes.len() < *expected_len,
            Derived::Skipped { .. } => false,
        }
    }
}

/// `[start, end)` clamped to `len`, empty when `end <= start`
fn clamp(start: usize, end: usize, len: usize) -> Range<usize> {
    let end = end.min(len);
    let start = start.min(end);
    start..end
}

fn nv_range(control: &ControlBlock, len: usize) -> Range<usize> {
    let end = NV_CODE_OFFSET.saturating_add(control.shader_size as usize);
    clamp(NV_CODE_OFFSET, end, len)
}

fn raw_range(control: &ControlBlock, len: usize) -> Range<usize> {
    let end = NV_CODE_OFFSET.saturating_add(control.shader_size as usize);
    clamp(RAW_CODE_OFFSET, end, len)
}

fn constbuf_range(control: &ControlBlock, len: usize) -> Range<usize> {
    let start = control.constbuf_offset as usize;
    clamp(start, start.saturating_add(control.constbuf_size as usize), len)
}

/// Code with its NV header, `[0x30, 0x30 + shader_size)`
pub fn nv_code<'a>(code: &'a [u8], control: &ControlBlock) -> &'a [u8] {
    &code[nv_range(control, code.len())]
}

/// Code with the header stripped, `[0x80, 0x30 + shader_size)`
pub fn raw_code<'a>(code: &'a [u8], control: &ControlBlock) -> &'a [u8] {
    &code[raw_range(control, code.len())]
}

/// Constant buffer region, `None` when the shader has none
pub fn constant_buffer<'a>(code: &'a [u8], control: &ControlBlock) -> Option<&'a [u8]> {
    if !control.has_constbuf() {
        return None;
    }
    Some(&code[constbuf_range(control, code.len())])
}

fn expected_len(format: DerivedFormat, control: &ControlBlock) -> usize {
    let shader_end = NV_CODE_OFFSET.saturating_add(control.shader_size as usize);
    match format {
        DerivedFormat::Nv => control.shader_size as usize,
        DerivedFormat::Raw => shader_end.saturating_sub(RAW_CODE_OFFSET),
        DerivedFormat::ConstBuf => control.constbuf_size as usize,
    }
}

/// Derive one format from the code blob
pub fn derive_format(code: &[u8], control: &ControlBlock, format: DerivedFormat) -> Derived {
    let bytes = match format {
        DerivedFormat::Nv => nv_code(code, control),
        DerivedFormat::Raw => raw_code(code, control),
        DerivedFormat::ConstBuf => match constant_buffer(code, control) {
            Some(bytes) => bytes,
            None => {
                return Derived::Skipped {
                    format,
                    reason: SkipReason::NoConstantBuffer,
                }
            }
        },
    };
    Derived::Emitted {
        format,
        bytes: bytes.to_vec(),
        expected_len: expected_len(format, control),
    }
}

/// Derive every selected format, in output order
pub fn derive(code: &[u8], control: &ControlBlock, formats: OutputFormats) -> Vec<Derived> {
    formats
        .selected()
        .map(|format| derive_format(code, control, format))
        .collect()
}

#[cfg(test)]
#[path = "code_blob_tests.rs"]
mod tests;
