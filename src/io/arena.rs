// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Memory-mapped file arena for random-access array reads.
//!
//! The `MmapArena` owns the memory-mapped container. Stores borrow slices
//! from it for the lifetime of the arena, so reading one frame row touches
//! only the pages that hold that row.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pc5codec::io::arena::MmapArena;
//!
//! let arena = MmapArena::open("drive.pc5")?;
//! let header: &[u8] = arena.slice(0, 8)?;
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use crate::Pc5Error;

/// A memory-mapped file arena that owns all file data.
///
/// The mapping is read-only and the type is `Send + Sync`, so one arena can
/// serve concurrent row reads from a worker pool.
pub struct MmapArena {
    /// The memory-mapped file (owned)
    mmap: memmap2::Mmap,
    /// File path for diagnostics
    path: String,
}

impl MmapArena {
    /// Open a file and create a memory-mapped arena.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or memory-mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Pc5Error> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        let file = File::open(path_ref)
            .map_err(|e| Pc5Error::io(format!("opening '{path_str}'"), e))?;

        // The container is opened read-only and never resized while mapped.
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| Pc5Error::io(format!("mapping '{path_str}'"), e))?;

        Ok(Self {
            mmap,
            path: path_str,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get a reference to the memory-mapped data.
    pub fn data(&self) -> &[u8] {
        &self.mmap
    }

    /// Get the length of the data.
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns a format error if the range is out of bounds.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&[u8], Pc5Error> {
        let end = offset.checked_add(len).ok_or_else(|| {
            Pc5Error::format("MmapArena", format!("range {offset}+{len} overflows"))
        })?;

        if end > self.mmap.len() {
            return Err(Pc5Error::format(
                "MmapArena",
                format!(
                    "range {offset}..{end} exceeds file length {} of '{}'",
                    self.mmap.len(),
                    self.path
                ),
            ));
        }

        Ok(&self.mmap[offset..end])
    }
}

impl Deref for MmapArena {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.mmap
    }
}

impl std::fmt::Debug for MmapArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MmapArena")
            .field("path", &self.path)
            .field("len", &self.mmap.len())
            .finish()
    }
}
