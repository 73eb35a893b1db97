// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for sensor data sources.
//!
//! This module provides the [`SensorDataStore`] abstraction and its
//! implementations. The decode pipeline only ever sees the trait.

pub mod arena;
pub mod array;
pub mod detection;
pub mod formats;
pub mod memory;
pub mod metadata;
pub mod traits;

use std::path::Path;

pub use arena::MmapArena;
pub use array::ArrayBuffer;
pub use detection::{detect_format, is_pc5_file, StoreFormat};
#[cfg(feature = "hdf5")]
pub use formats::h5::Hdf5Store;
pub use formats::pc5::{Pc5Store, Pc5Writer};
pub use memory::MemoryStore;
pub use metadata::{dataset_path, DType, DatasetInfo};
pub use traits::SensorDataStore;

use crate::core::{Pc5Error, Result};

/// Open a sensor data source with format detection.
///
/// The returned handle owns the underlying file mapping; dropping it releases
/// the source.
///
/// # Errors
///
/// Returns `NotFound` if `path` does not exist and a format error if the file
/// is not a supported container. HDF5 recordings fail with an `HDF5` format
/// error when the crate is built without the `hdf5` feature.
///
/// # Example
///
/// ```rust,no_run
/// let store = pc5codec::io::open_store("drive.pc5")?;
/// println!("{} arrays", store.datasets().len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open_store<P: AsRef<Path>>(path: P) -> Result<Box<dyn SensorDataStore>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Pc5Error::not_found(
            "data source",
            path.display().to_string(),
        ));
    }

    match detect_format(path)? {
        StoreFormat::Hdf5 => open_hdf5(path),
        StoreFormat::Pc5 => Ok(Box::new(Pc5Store::open(path)?)),
        StoreFormat::Unknown => Err(Pc5Error::format(
            "open_store",
            format!("'{}' is not a supported sensor container", path.display()),
        )),
    }
}

#[cfg(feature = "hdf5")]
fn open_hdf5(path: &Path) -> Result<Box<dyn SensorDataStore>> {
    Ok(Box::new(Hdf5Store::open(path)?))
}

#[cfg(not(feature = "hdf5"))]
fn open_hdf5(path: &Path) -> Result<Box<dyn SensorDataStore>> {
    Err(Pc5Error::format(
        "HDF5",
        format!(
            "'{}' is an HDF5 recording; rebuild pc5codec with the `hdf5` feature to read it",
            path.display()
        ),
    ))
}
