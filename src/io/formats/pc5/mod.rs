// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PC5 sensor container format.
//!
//! A PC5 container is a single file holding named numeric arrays grouped by
//! sensor (e.g. `ouster/range`, `ouster/reflectivity`, `ouster/msgtimes`,
//! `ouster/direction`, `ouster/offset`). The reader memory-maps the file and
//! serves individual rows without loading whole arrays.

pub mod constants;
pub mod reader;
pub mod writer;

pub use constants::{PC5_MAGIC, PC5_VERSION};
pub use reader::Pc5Store;
pub use writer::Pc5Writer;

use serde::{Deserialize, Serialize};

use crate::io::metadata::DatasetInfo;

/// JSON manifest stored after the container header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Manifest {
    pub datasets: Vec<ManifestEntry>,
}

/// One array in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ManifestEntry {
    #[serde(flatten)]
    pub info: DatasetInfo,
    /// Byte offset relative to the data section
    pub offset: u64,
}
