// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Array metadata shared by all sensor data stores.

use serde::{Deserialize, Serialize};

/// Element type of a stored array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// Unsigned 8-bit integer
    U8,
    /// Unsigned 16-bit integer
    U16,
    /// Unsigned 32-bit integer
    U32,
    /// Unsigned 64-bit integer
    U64,
    /// IEEE 754 single precision
    F32,
    /// IEEE 754 double precision
    F64,
}

impl DType {
    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            DType::U8 => 1,
            DType::U16 => 2,
            DType::U32 | DType::F32 => 4,
            DType::U64 | DType::F64 => 8,
        }
    }

    /// Whether the type is an integer type.
    pub fn is_integer(&self) -> bool {
        !matches!(self, DType::F32 | DType::F64)
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::U64 => "u64",
            DType::F32 => "f32",
            DType::F64 => "f64",
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join a group path and an array name into a dataset path.
pub fn dataset_path(group: &str, name: &str) -> String {
    format!("{}/{}", group.trim_matches('/'), name)
}

/// Description of one named array inside a data store.
///
/// Arrays are row-major. The first dimension indexes rows (frames for
/// per-frame arrays); a row is the flattened remaining dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Full path, e.g. "ouster/range"
    pub path: String,
    /// Element type
    pub dtype: DType,
    /// Dimensions
    pub shape: Vec<usize>,
}

impl DatasetInfo {
    /// Create a new DatasetInfo.
    pub fn new(path: impl Into<String>, dtype: DType, shape: Vec<usize>) -> Self {
        Self {
            path: path.into(),
            dtype,
            shape,
        }
    }

    /// Group part of the path ("" for top-level arrays).
    pub fn group(&self) -> &str {
        self.path.rsplit_once('/').map(|(g, _)| g).unwrap_or("")
    }

    /// Array name without the group.
    pub fn name(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map(|(_, n)| n)
            .unwrap_or(&self.path)
    }

    /// Total element count.
    ///
    /// Saturates on overflow; stores reject such shapes with
    /// [`checked_byte_len`](Self::checked_byte_len) when they are opened.
    pub fn len(&self) -> usize {
        self.shape.iter().fold(1usize, |acc, &d| acc.saturating_mul(d))
    }

    /// Check if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of rows (size of the first dimension, 1 for scalars).
    pub fn num_rows(&self) -> usize {
        self.shape.first().copied().unwrap_or(1)
    }

    /// Elements per row (product of the trailing dimensions).
    pub fn row_len(&self) -> usize {
        self.shape
            .iter()
            .skip(1)
            .fold(1usize, |acc, &d| acc.saturating_mul(d))
    }

    /// Total size in bytes.
    pub fn byte_len(&self) -> usize {
        self.len().saturating_mul(self.dtype.size())
    }

    /// Total size in bytes, or `None` if the row length, the element count
    /// or the byte count does not fit in `usize`.
    pub fn checked_byte_len(&self) -> Option<usize> {
        let row_len = self
            .shape
            .iter()
            .skip(1)
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))?;
        row_len
            .checked_mul(self.num_rows())?
            .checked_mul(self.dtype.size())
    }
}
