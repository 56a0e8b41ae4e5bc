//! Artifact codec
//!
//! Decodes the compiler's control block and slices the code blob into the
//! derived formats (NV code, raw code, constant buffer).

pub mod control_block;
pub mod code_blob;
pub mod output_format;

pub use control_block::{
    ControlBlock, split_combined,
    CONTROL_BLOCK_MIN_LEN, COMBINED_CONTROL_LEN,
    SHADER_SIZE_OFFSET, CONSTBUF_SIZE_OFFSET, CONSTBUF_OFFSET_OFFSET,
};
pub use code_blob::{
    Derived, SkipReason,
    derive, derive_format, nv_code, raw_code, constant_buffer,
    NV_CODE_OFFSET, RAW_CODE_OFFSET,
};
pub use output_format::{OutputFormats, DerivedFormat};
