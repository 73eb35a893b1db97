// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PC5 container writer.
//!
//! Arrays are staged in memory and serialized in one pass by
//! [`Pc5Writer::write`]. Existing files are overwritten.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::core::{Pc5Error, Result};
use crate::io::array::ArrayBuffer;
use crate::io::memory::MemoryStore;
use crate::io::metadata::{dataset_path, DatasetInfo};

use super::constants::{align_up, HEADER_LEN, PC5_MAGIC, PC5_VERSION};
use super::{Manifest, ManifestEntry};

/// Builder for PC5 containers.
#[derive(Debug, Default)]
pub struct Pc5Writer {
    arrays: Vec<(DatasetInfo, ArrayBuffer)>,
}

impl Pc5Writer {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage every array of a memory store.
    pub fn from_store(store: &MemoryStore) -> Self {
        Self {
            arrays: store
                .arrays()
                .map(|(info, data)| (info.clone(), data.clone()))
                .collect(),
        }
    }

    /// Stage an array under `group/name`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `shape` does not describe `data`, or a
    /// format error if the path was already added.
    pub fn add_array(
        &mut self,
        group: &str,
        name: &str,
        shape: Vec<usize>,
        data: ArrayBuffer,
    ) -> Result<&mut Self> {
        let info = DatasetInfo::new(dataset_path(group, name), data.dtype(), shape);
        if info.len() != data.len() {
            return Err(Pc5Error::shape_mismatch(
                format!("array '{}'", info.path),
                info.len(),
                data.len(),
            ));
        }
        if self.arrays.iter().any(|(i, _)| i.path == info.path) {
            return Err(Pc5Error::format(
                "PC5",
                format!("array '{}' added twice", info.path),
            ));
        }
        self.arrays.push((info, data));
        Ok(self)
    }

    /// Number of staged arrays.
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    /// Check if no array is staged.
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Serialize the container to a writer.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut manifest = Manifest::default();
        let mut offset = 0usize;
        for (info, _) in &self.arrays {
            manifest.datasets.push(ManifestEntry {
                info: info.clone(),
                offset: offset as u64,
            });
            offset = align_up(offset + info.byte_len());
        }

        let manifest_bytes = serde_json::to_vec(&manifest)
            .map_err(|e| Pc5Error::format("PC5", format!("serializing manifest: {e}")))?;
        let manifest_len = u32::try_from(manifest_bytes.len())
            .map_err(|_| Pc5Error::format("PC5", "manifest exceeds 4 GiB"))?;

        w.write_all(&PC5_MAGIC)?;
        w.write_u32::<LittleEndian>(PC5_VERSION)?;
        w.write_u32::<LittleEndian>(manifest_len)?;
        w.write_u32::<LittleEndian>(crc32fast::hash(&manifest_bytes))?;
        w.write_u32::<LittleEndian>(0)?;
        w.write_all(&manifest_bytes)?;

        let header_end = HEADER_LEN + manifest_bytes.len();
        write_padding(w, align_up(header_end) - header_end)?;

        for (info, data) in &self.arrays {
            data.write_le(w)?;
            let len = info.byte_len();
            write_padding(w, align_up(len) - len)?;
        }

        Ok(())
    }

    /// Serialize the container to a file, creating parent directories.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Pc5Error::io(format!("creating {}", parent.display()), e))?;
        }
        let file = File::create(path)
            .map_err(|e| Pc5Error::io(format!("creating {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer
            .flush()
            .map_err(|e| Pc5Error::io(format!("writing {}", path.display()), e))?;
        Ok(())
    }
}

fn write_padding<W: Write>(w: &mut W, n: usize) -> std::io::Result<()> {
    const ZEROS: [u8; 8] = [0; 8];
    w.write_all(&ZEROS[..n])
}
