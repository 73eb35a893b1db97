// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! HDF5 reader backed by the `hdf5` crate.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use hdf5::types::{FloatSize, IntSize, TypeDescriptor};
use hdf5::{Dataset, Group, H5Type};
use ndarray::s;
use tracing::debug;

use crate::core::{Pc5Error, Result};
use crate::io::array::ArrayBuffer;
use crate::io::metadata::{DType, DatasetInfo};
use crate::io::traits::{row_bounds, SensorDataStore};

fn h5_err(err: hdf5::Error) -> Pc5Error {
    Pc5Error::format("HDF5", err.to_string())
}

/// Map an HDF5 element type onto a store dtype.
///
/// Signed integers are read through the unsigned type of the same width;
/// HDF5 clamps negative values to zero during the conversion.
fn dtype_of(descriptor: &TypeDescriptor) -> Option<DType> {
    match descriptor {
        TypeDescriptor::Unsigned(size) | TypeDescriptor::Integer(size) => Some(match size {
            IntSize::U1 => DType::U8,
            IntSize::U2 => DType::U16,
            IntSize::U4 => DType::U32,
            IntSize::U8 => DType::U64,
        }),
        TypeDescriptor::Float(FloatSize::U4) => Some(DType::F32),
        TypeDescriptor::Float(FloatSize::U8) => Some(DType::F64),
        _ => None,
    }
}

/// Read a whole dataset, or one row of it, as `T`.
fn read_values<T: H5Type + Copy>(
    dataset: &Dataset,
    row: Option<usize>,
) -> hdf5::Result<Vec<T>> {
    let Some(row) = row else {
        return dataset.read_raw::<T>();
    };
    match dataset.ndim() {
        0 => dataset.read_raw::<T>(),
        1 => Ok(dataset.read_slice_1d::<T, _>(s![row..row + 1])?.to_vec()),
        2 => Ok(dataset.read_slice_1d::<T, _>(s![row, ..])?.to_vec()),
        3 => Ok(dataset
            .read_slice_2d::<T, _>(s![row, .., ..])?
            .iter()
            .copied()
            .collect()),
        // Higher ranks: read the whole array and cut the row out.
        _ => {
            let all = dataset.read_raw::<T>()?;
            let row_len = dataset.shape().iter().skip(1).product::<usize>();
            Ok(all[row * row_len..(row + 1) * row_len].to_vec())
        }
    }
}

/// An open HDF5 recording.
pub struct Hdf5Store {
    path: String,
    file: hdf5::File,
    datasets: BTreeMap<String, DatasetInfo>,
}

impl fmt::Debug for Hdf5Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hdf5Store")
            .field("path", &self.path)
            .field("datasets", &self.datasets.len())
            .finish()
    }
}

impl Hdf5Store {
    /// Open an HDF5 file read-only and index its numeric datasets.
    ///
    /// Datasets of other element types (strings, compounds) are skipped.
    ///
    /// # Errors
    ///
    /// Returns a format error if the file cannot be opened or walked by the
    /// HDF5 library.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = hdf5::File::open(path).map_err(h5_err)?;

        let mut datasets = BTreeMap::new();
        collect_datasets(&file, &mut datasets)?;
        debug!(
            path = %path.display(),
            datasets = datasets.len(),
            "opened HDF5 recording"
        );

        Ok(Self {
            path: path.display().to_string(),
            file,
            datasets,
        })
    }

    fn read_buffer(&self, path: &str, row: Option<usize>) -> Result<ArrayBuffer> {
        let info = self
            .datasets
            .get(path)
            .ok_or_else(|| Pc5Error::not_found(format!("array '{path}'"), &self.path))?;
        let dataset = self.file.dataset(path).map_err(h5_err)?;

        let buffer = match info.dtype {
            DType::U8 => ArrayBuffer::U8(read_values(&dataset, row).map_err(h5_err)?),
            DType::U16 => ArrayBuffer::U16(read_values(&dataset, row).map_err(h5_err)?),
            DType::U32 => ArrayBuffer::U32(read_values(&dataset, row).map_err(h5_err)?),
            DType::U64 => ArrayBuffer::U64(read_values(&dataset, row).map_err(h5_err)?),
            DType::F32 => ArrayBuffer::F32(read_values(&dataset, row).map_err(h5_err)?),
            DType::F64 => ArrayBuffer::F64(read_values(&dataset, row).map_err(h5_err)?),
        };
        Ok(buffer)
    }
}

fn collect_datasets(group: &Group, out: &mut BTreeMap<String, DatasetInfo>) -> Result<()> {
    for dataset in group.datasets().map_err(h5_err)? {
        let path = dataset.name().trim_start_matches('/').to_string();
        let descriptor = dataset
            .dtype()
            .and_then(|t| t.to_descriptor())
            .map_err(h5_err)?;
        let Some(dtype) = dtype_of(&descriptor) else {
            debug!(path = %path, "skipping non-numeric dataset");
            continue;
        };
        let info = DatasetInfo::new(path.clone(), dtype, dataset.shape());
        if info.checked_byte_len().is_none() {
            return Err(Pc5Error::format(
                "HDF5",
                format!("array '{path}' shape {:?} overflows", info.shape),
            ));
        }
        out.insert(path, info);
    }
    for child in group.groups().map_err(h5_err)? {
        collect_datasets(&child, out)?;
    }
    Ok(())
}

impl SensorDataStore for Hdf5Store {
    fn path(&self) -> &str {
        &self.path
    }

    fn datasets(&self) -> Vec<&DatasetInfo> {
        self.datasets.values().collect()
    }

    fn dataset(&self, path: &str) -> Option<&DatasetInfo> {
        self.datasets.get(path)
    }

    fn read(&self, path: &str) -> Result<ArrayBuffer> {
        self.read_buffer(path, None)
    }

    fn read_row(&self, path: &str, row: usize) -> Result<ArrayBuffer> {
        let info = self
            .datasets
            .get(path)
            .ok_or_else(|| Pc5Error::not_found(format!("array '{path}'"), &self.path))?;
        row_bounds(info, row)?;
        self.read_buffer(path, Some(row))
    }
}
