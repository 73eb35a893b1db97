// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # pc5codec
//!
//! Lidar frame decoder and point cloud exporter for PC5 drive recordings.
//!
//! A recording stores, per sensor group, a sequence of range and
//! reflectivity images together with per-beam calibration geometry. This
//! library reconstructs Cartesian point clouds frame by frame and writes
//! them as binary PCD, KITTI-style bin and CSV files.
//!
//! Recordings are HDF5 files, read with the `hdf5` feature. The PC5 array
//! container is a dependency-free alternative with the same group layout.
//!
//! ## Architecture
//!
//! - `io/` - [`SensorDataStore`] trait, HDF5 reader, memory-mapped PC5 array
//!   container reader and writer, in-memory store
//! - `lidar/` - Calibration loading, frame index resolution, reconstruction,
//!   intensity normalization
//! - `export/` - PCD, bin and CSV encoders and the per-frame [`Exporter`]
//! - `convert/` - [`BatchConverter`] driving whole frame selections
//! - `core/` - Errors, sensor registry, export format identifiers
//!
//! ## Example: Exporting every frame
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pc5codec::{BatchConverter, CalibrationProvider, ConvertOptions, ExportFormatSet};
//! use pc5codec::{FrameSelection, SensorRegistry};
//!
//! let store = pc5codec::open_store("drive.pc5")?;
//! let provider = CalibrationProvider::new(SensorRegistry::builtin());
//! let converter = BatchConverter::new(store.as_ref(), provider, ConvertOptions::default())
//!     .with_progress(|outcome, pos, total| println!("{}", outcome.progress_line(pos, total)));
//!
//! let summary = converter.run("top", FrameSelection::All, "exports", &ExportFormatSet::all())?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Decoding a single frame
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pc5codec::{CalibrationProvider, FrameReader, FrameSequence, SensorRegistry};
//!
//! let store = pc5codec::open_store("drive.pc5")?;
//! let provider = CalibrationProvider::new(SensorRegistry::builtin());
//! let calibration = provider.calibration(store.as_ref(), "top")?;
//! let sequence = FrameSequence::open(store.as_ref(), provider.sensor("top")?)?;
//!
//! let frame = FrameReader::new(&sequence, &calibration)?.read(0)?;
//! if let Some(cloud) = frame.normalize() {
//!     println!("{} points at {}", cloud.len(), cloud.stem());
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{ExportFormat, Pc5Error, Result, SensorConfig, SensorRegistry, DEFAULT_SENSOR};

// Data sources
pub mod io;

pub use io::{open_store, MemoryStore, Pc5Store, Pc5Writer, SensorDataStore};

#[cfg(feature = "hdf5")]
pub use io::Hdf5Store;

// Frame decoding
pub mod lidar;

pub use lidar::{
    CalibrationProvider, CalibrationRecord, FramePoints, FrameReader, FrameSelection,
    FrameSelector, FrameSequence, Point, PointCloud,
};

// Output encoders
pub mod export;

pub use export::{ExportFormatSet, ExportedFrame, Exporter};

// Batch orchestration
pub mod convert;

pub use convert::{BatchConverter, BatchSummary, ConvertOptions, FrameOutcome, SkipReason};
