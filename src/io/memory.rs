// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-memory sensor data store.
//!
//! Useful for building synthetic recordings and for feeding arrays that
//! were decoded elsewhere into the pipeline. A `MemoryStore` can be saved as a
//! PC5 container with [`Pc5Writer`](crate::io::formats::pc5::Pc5Writer).

use std::collections::BTreeMap;

use crate::core::{Pc5Error, Result};

use super::array::ArrayBuffer;
use super::metadata::{dataset_path, DatasetInfo};
use super::traits::{row_bounds, SensorDataStore};

/// A sensor data store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    path: String,
    datasets: BTreeMap<String, (DatasetInfo, ArrayBuffer)>,
}

impl MemoryStore {
    /// Create an empty store with a diagnostic name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            path: name.into(),
            datasets: BTreeMap::new(),
        }
    }

    /// Insert an array, replacing any array at the same path.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the shape does not describe `data.len()`
    /// elements.
    pub fn insert(
        &mut self,
        group: &str,
        name: &str,
        shape: Vec<usize>,
        data: ArrayBuffer,
    ) -> Result<()> {
        let path = dataset_path(group, name);
        let info = DatasetInfo::new(path.clone(), data.dtype(), shape);
        if info.len() != data.len() {
            return Err(Pc5Error::shape_mismatch(
                format!("array '{path}'"),
                info.len(),
                data.len(),
            ));
        }
        self.datasets.insert(path, (info, data));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_array(
        mut self,
        group: &str,
        name: &str,
        shape: Vec<usize>,
        data: ArrayBuffer,
    ) -> Result<Self> {
        self.insert(group, name, shape, data)?;
        Ok(self)
    }

    /// Iterate over arrays and their data, ordered by path.
    pub fn arrays(&self) -> impl Iterator<Item = (&DatasetInfo, &ArrayBuffer)> {
        self.datasets.values().map(|(info, data)| (info, data))
    }
}

impl SensorDataStore for MemoryStore {
    fn path(&self) -> &str {
        &self.path
    }

    fn datasets(&self) -> Vec<&DatasetInfo> {
        self.datasets.values().map(|(info, _)| info).collect()
    }

    fn dataset(&self, path: &str) -> Option<&DatasetInfo> {
        self.datasets.get(path).map(|(info, _)| info)
    }

    fn read(&self, path: &str) -> Result<ArrayBuffer> {
        self.datasets
            .get(path)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| Pc5Error::not_found(format!("array '{path}'"), &self.path))
    }

    fn read_row(&self, path: &str, row: usize) -> Result<ArrayBuffer> {
        let (info, data) = self
            .datasets
            .get(path)
            .ok_or_else(|| Pc5Error::not_found(format!("array '{path}'"), &self.path))?;
        let (start, end) = row_bounds(info, row)?;
        data.slice(start, end)
    }
}
