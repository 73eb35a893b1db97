// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! HDF5 recordings.
//!
//! Drive recordings are written by the logging stack as HDF5 files with one
//! group per sensor (`ouster/range`, `ouster/msgtimes`, ...). Reading them
//! needs the system HDF5 library, so the reader is behind the `hdf5` feature.

/// HDF5 superblock signature at the start of the file.
pub const HDF5_SIGNATURE: [u8; 8] = *b"\x89HDF\r\n\x1a\n";

#[cfg(feature = "hdf5")]
pub mod reader;

#[cfg(feature = "hdf5")]
pub use reader::Hdf5Store;
