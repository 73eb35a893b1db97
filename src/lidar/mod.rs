// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Lidar frame decoding.
//!
//! - [`calibration`] - Per-beam direction and offset vectors
//! - [`frames`] - Frame sequence and frame index resolution
//! - [`reader`] - Range image to Cartesian reconstruction
//! - [`points`] - XYZI point assembly and intensity normalization

pub mod calibration;
pub mod frames;
pub mod points;
pub mod reader;

pub use calibration::{CalibrationProvider, CalibrationRecord, Vec3};
pub use frames::{resolve_timestamp, FrameSelection, FrameSelector, FrameSequence};
pub use points::{normalize_intensity, timestamp_stem, Point, PointCloud};
pub use reader::{reconstruct, FramePoints, FrameReader, RANGE_SCALE};

/// Array names inside a sensor group.
pub mod arrays {
    /// Per-frame capture time, u64 nanoseconds
    pub const MSGTIMES: &str = "msgtimes";
    /// Per-frame range image, raw millimeters
    pub const RANGE: &str = "range";
    /// Per-frame reflectivity image, 0-255
    pub const REFLECTIVITY: &str = "reflectivity";
    /// Beam unit directions, stored 3 x M
    pub const DIRECTION: &str = "direction";
    /// Beam origin offsets, stored 3 x M
    pub const OFFSET: &str = "offset";
}
