// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Memory-mapped PC5 container reader.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::core::{Pc5Error, Result};
use crate::io::arena::MmapArena;
use crate::io::array::ArrayBuffer;
use crate::io::metadata::DatasetInfo;
use crate::io::traits::{row_bounds, SensorDataStore};

use super::constants::{align_up, HEADER_LEN, PC5_MAGIC, PC5_VERSION};
use super::Manifest;

/// An open PC5 container.
///
/// The file stays mapped for the lifetime of the store and is unmapped when
/// the store is dropped.
#[derive(Debug)]
pub struct Pc5Store {
    arena: MmapArena,
    /// path -> (info, absolute byte offset)
    datasets: BTreeMap<String, (DatasetInfo, usize)>,
}

impl Pc5Store {
    /// Open and validate a PC5 container.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be mapped and a format error if
    /// the header, manifest checksum or array extents are invalid.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let arena = MmapArena::open(path)?;
        let datasets = Self::parse_layout(&arena)?;
        Ok(Self { arena, datasets })
    }

    fn parse_layout(arena: &MmapArena) -> Result<BTreeMap<String, (DatasetInfo, usize)>> {
        let header = arena
            .slice(0, HEADER_LEN)
            .map_err(|_| Pc5Error::format("PC5", format!("'{}' is too short", arena.path())))?;

        if header[..8] != PC5_MAGIC {
            return Err(Pc5Error::format(
                "PC5",
                format!("'{}' is not a PC5 container", arena.path()),
            ));
        }

        let mut cursor = Cursor::new(&header[8..]);
        let version = cursor.read_u32::<LittleEndian>()?;
        let manifest_len = cursor.read_u32::<LittleEndian>()? as usize;
        let manifest_crc = cursor.read_u32::<LittleEndian>()?;

        if version != PC5_VERSION {
            return Err(Pc5Error::format(
                "PC5",
                format!("unsupported version {version} (expected {PC5_VERSION})"),
            ));
        }

        let manifest_bytes = arena.slice(HEADER_LEN, manifest_len)?;
        let actual_crc = crc32fast::hash(manifest_bytes);
        if actual_crc != manifest_crc {
            return Err(Pc5Error::format(
                "PC5",
                format!("manifest checksum mismatch: stored {manifest_crc:#010x}, computed {actual_crc:#010x}"),
            ));
        }

        let manifest: Manifest = serde_json::from_slice(manifest_bytes)
            .map_err(|e| Pc5Error::format("PC5", format!("invalid manifest: {e}")))?;

        let data_start = align_up(HEADER_LEN + manifest_len);
        let mut datasets = BTreeMap::new();
        for entry in manifest.datasets {
            let offset = data_start
                .checked_add(entry.offset as usize)
                .ok_or_else(|| Pc5Error::format("PC5", "array offset overflows"))?;
            let byte_len = entry.info.checked_byte_len().ok_or_else(|| {
                Pc5Error::format(
                    "PC5",
                    format!(
                        "array '{}' shape {:?} overflows",
                        entry.info.path, entry.info.shape
                    ),
                )
            })?;
            // Validate extents once so row reads can trust the layout.
            arena.slice(offset, byte_len)?;
            if datasets.contains_key(&entry.info.path) {
                return Err(Pc5Error::format(
                    "PC5",
                    format!("duplicate array '{}'", entry.info.path),
                ));
            }
            datasets.insert(entry.info.path.clone(), (entry.info, offset));
        }

        Ok(datasets)
    }

    fn entry(&self, path: &str) -> Result<&(DatasetInfo, usize)> {
        self.datasets
            .get(path)
            .ok_or_else(|| Pc5Error::not_found(format!("array '{path}'"), self.arena.path()))
    }
}

impl SensorDataStore for Pc5Store {
    fn path(&self) -> &str {
        self.arena.path()
    }

    fn datasets(&self) -> Vec<&DatasetInfo> {
        self.datasets.values().map(|(info, _)| info).collect()
    }

    fn dataset(&self, path: &str) -> Option<&DatasetInfo> {
        self.datasets.get(path).map(|(info, _)| info)
    }

    fn read(&self, path: &str) -> Result<ArrayBuffer> {
        let (info, offset) = self.entry(path)?;
        let bytes = self.arena.slice(*offset, info.byte_len())?;
        ArrayBuffer::decode_le(info.dtype, bytes)
    }

    fn read_row(&self, path: &str, row: usize) -> Result<ArrayBuffer> {
        let (info, offset) = self.entry(path)?;
        let (start, end) = row_bounds(info, row)?;
        let size = info.dtype.size();
        let bytes = self
            .arena
            .slice(offset + start * size, (end - start) * size)?;
        ArrayBuffer::decode_le(info.dtype, bytes)
    }
}
