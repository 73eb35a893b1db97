// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core trait for random-access sensor data stores.
//!
//! The decode pipeline never touches a storage format directly. It asks a
//! [`SensorDataStore`] whether a group exists and reads named arrays, either
//! whole or one row at a time.

use crate::core::{Pc5Error, Result};

use super::array::ArrayBuffer;
use super::metadata::DatasetInfo;

/// Read-only access to named, row-major numeric arrays.
///
/// Implementations must allow concurrent row reads through `&self`, so a
/// batch can decode frames on several threads from one open store.
///
/// # Example
///
/// ```no_run
/// use pc5codec::io::traits::SensorDataStore;
///
/// fn describe(store: &dyn SensorDataStore) {
///     for info in store.datasets() {
///         println!("{} {:?} {}", info.path, info.shape, info.dtype);
///     }
/// }
/// ```
pub trait SensorDataStore: Send + Sync {
    /// Path the store was opened from (for diagnostics).
    fn path(&self) -> &str;

    /// All arrays in the store, ordered by path.
    fn datasets(&self) -> Vec<&DatasetInfo>;

    /// Look up one array by full path.
    fn dataset(&self, path: &str) -> Option<&DatasetInfo>;

    /// Read a whole array, flattened.
    fn read(&self, path: &str) -> Result<ArrayBuffer>;

    /// Read row `row` of an array (the flattened trailing dimensions).
    fn read_row(&self, path: &str, row: usize) -> Result<ArrayBuffer>;

    /// Check whether any array lives under `group`.
    fn contains_group(&self, group: &str) -> bool {
        let group = group.trim_matches('/');
        if group.is_empty() {
            return false;
        }
        let prefix = format!("{group}/");
        self.datasets().iter().any(|d| d.path.starts_with(&prefix))
    }

    /// Look up an array, failing with `NotFound` if it is absent.
    fn require(&self, path: &str) -> Result<&DatasetInfo> {
        self.dataset(path)
            .ok_or_else(|| Pc5Error::not_found(format!("array '{path}'"), self.path()))
    }
}

/// Compute the element range of `row` in `info`, checking bounds.
pub(crate) fn row_bounds(info: &DatasetInfo, row: usize) -> Result<(usize, usize)> {
    let rows = info.num_rows();
    if row >= rows {
        return Err(Pc5Error::out_of_range(row as i64, rows));
    }
    let row_len = info.row_len();
    Ok((row * row_len, (row + 1) * row_len))
}

impl std::fmt::Debug for dyn SensorDataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorDataStore")
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}
