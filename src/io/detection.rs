// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Data source detection using magic numbers.
//!
//! # Example
//!
//! ```rust,no_run
//! use pc5codec::io::detection::{detect_format, StoreFormat};
//!
//! let format = detect_format("drive.pc5")?;
//! assert_eq!(format, StoreFormat::Hdf5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::Pc5Error;

use super::formats::h5::HDF5_SIGNATURE;
use super::formats::pc5::PC5_MAGIC;

/// Kind of sensor data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    /// HDF5 drive recording
    Hdf5,
    /// PC5 array container
    Pc5,
    /// Anything else
    Unknown,
}

/// Detect the data source format from the file header.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn detect_format<P: AsRef<Path>>(path: P) -> Result<StoreFormat, Pc5Error> {
    let path = path.as_ref();
    let mut file = File::open(path)
        .map_err(|e| Pc5Error::io(format!("opening {}", path.display()), e))?;

    let mut header = [0u8; 8];
    let mut filled = 0;
    while filled < header.len() {
        let n = file
            .read(&mut header[filled..])
            .map_err(|e| Pc5Error::io(format!("reading {}", path.display()), e))?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    if filled < header.len() {
        return Ok(StoreFormat::Unknown);
    }
    Ok(match header {
        HDF5_SIGNATURE => StoreFormat::Hdf5,
        PC5_MAGIC => StoreFormat::Pc5,
        _ => StoreFormat::Unknown,
    })
}

/// Check if a file is a recording `open_store` knows (HDF5 or PC5 container).
pub fn is_pc5_file<P: AsRef<Path>>(path: P) -> bool {
    matches!(
        detect_format(path),
        Ok(StoreFormat::Hdf5 | StoreFormat::Pc5)
    )
}
