// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PC5 container constants.
//!
//! Layout of a PC5 container:
//!
//! ```text
//! offset  size  field
//! 0       8     magic "PC5ARRAY"
//! 8       4     version (u32 LE)
//! 12      4     manifest length in bytes (u32 LE)
//! 16      4     CRC32 of the manifest (u32 LE)
//! 20      4     reserved, zero
//! 24      n     JSON manifest
//! ...           zero padding to an 8-byte boundary
//! data          array blobs, little-endian, row-major, each 8-byte aligned
//! ```
//!
//! Manifest offsets are relative to the start of the data section.

/// Container magic bytes.
pub const PC5_MAGIC: [u8; 8] = *b"PC5ARRAY";

/// Current container version.
pub const PC5_VERSION: u32 = 1;

/// Fixed header length before the manifest.
pub const HEADER_LEN: usize = 24;

/// Alignment of the data section and of every array blob.
pub const DATA_ALIGN: usize = 8;

/// Round `n` up to the next multiple of [`DATA_ALIGN`].
pub const fn align_up(n: usize) -> usize {
    n.div_ceil(DATA_ALIGN) * DATA_ALIGN
}
