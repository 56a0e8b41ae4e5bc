//! Control block decoding
//!
//! The control block is the fixed-layout header the compiler emits next to
//! the code blob. Only three little-endian `u32` fields are read; the rest
//! of the block is carried through untouched.

use crate::error::{Error, Result};

/// Offset of `shader_size`
pub const SHADER_SIZE_OFFSET: usize = 0x6F8;
/// Offset of `constbuf_size`
pub const CONSTBUF_SIZE_OFFSET: usize = 0x6FC;
/// Offset of `constbuf_offset`
pub const CONSTBUF_OFFSET_OFFSET: usize = 0x700;
/// Smallest control block that holds all three fields
pub const CONTROL_BLOCK_MIN_LEN: usize = CONSTBUF_OFFSET_OFFSET + 4;
/// Size of the control section at the head of a combined `.bin` result
pub const COMBINED_CONTROL_LEN: usize = 0x880;

/// Decoded control block fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlBlock {
    /// Size of the NV-formatted code, counted from code offset 0x30
    pub shader_size: u32,
    /// Size of the constant buffer (0 when the shader has none)
    pub constbuf_size: u32,
    /// Offset of the constant buffer inside the code blob
    pub constbuf_offset: u32,
}

impl ControlBlock {
    /// Decode the three fields from a raw control block
    ///
    /// # Errors
    ///
    /// Returns `MalformedControlBlock` if `bytes` is shorter than
    /// [`CONTROL_BLOCK_MIN_LEN`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        check_len(bytes.len())?;
        Ok(Self {
            shader_size: read_u32_le(bytes, SHADER_SIZE_OFFSET),
            constbuf_size: read_u32_le(bytes, CONSTBUF_SIZE_OFFSET),
            constbuf_offset: read_u32_le(bytes, CONSTBUF_OFFSET_OFFSET),
        })
    }

    /// Write the three fields back at their fixed offsets
    ///
    /// Bytes outside the three fields are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `MalformedControlBlock` if `bytes` is too short.
    pub fn encode_into(&self, bytes: &mut [u8]) -> Result<()> {
        check_len(bytes.len())?;
        write_u32_le(bytes, SHADER_SIZE_OFFSET, self.shader_size);
        write_u32_le(bytes, CONSTBUF_SIZE_OFFSET, self.constbuf_size);
        write_u32_le(bytes, CONSTBUF_OFFSET_OFFSET, self.constbuf_offset);
        Ok(())
    }

    /// A zeroed control block of minimum length holding these fields
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; CONTROL_BLOCK_MIN_LEN];
        write_u32_le(&mut bytes, SHADER_SIZE_OFFSET, self.shader_size);
        write_u32_le(&mut bytes, CONSTBUF_SIZE_OFFSET, self.constbuf_size);
        write_u32_le(&mut bytes, CONSTBUF_OFFSET_OFFSET, self.constbuf_offset);
        bytes
    }

    /// Whether the shader carries a constant buffer
    pub fn has_constbuf(&self) -> bool {
        self.constbuf_size > 0
    }
}

/// Split a combined `.bin` result into its control and code sections
///
/// Never fails: a result shorter than [`COMBINED_CONTROL_LEN`] yields a
/// short control section (rejected later by [`ControlBlock::decode`]) and
/// an empty code section.
pub fn split_combined(bin: &[u8]) -> (&[u8], &[u8]) {
    bin.split_at(bin.len().min(COMBINED_CONTROL_LEN))
}

fn check_len(len: usize) -> Result<()> {
    if len < CONTROL_BLOCK_MIN_LEN {
        return Err(Error::MalformedControlBlock {
            len,
            required: CONTROL_BLOCK_MIN_LEN,
        });
    }
    Ok(())
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn write_u32_le(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
#[path = "control_block_tests.rs"]
mod tests;
