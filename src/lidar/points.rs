// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! XYZI point assembly.

use tracing::info;

use super::calibration::Vec3;

/// Nanoseconds per second.
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// One point: position in meters and intensity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
    /// Z coordinate in meters
    pub z: f32,
    /// Normalized reflectivity in `[0, 1]`
    pub intensity: f32,
}

impl Point {
    /// Create a point.
    pub fn new(x: f32, y: f32, z: f32, intensity: f32) -> Self {
        Self { x, y, z, intensity }
    }

    /// Fields in `x, y, z, intensity` order.
    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.intensity]
    }
}

/// Map raw 0-255 reflectivity to intensity in `[0, 1]`.
///
/// Out-of-range values clamp; non-finite results become `0.0`.
pub fn normalize_intensity(raw: f32) -> f32 {
    let value = (raw / 255.0).clamp(0.0, 1.0);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Filename stem for a timestamp: `"<seconds>.<nanoseconds:09>"`.
pub fn timestamp_stem(timestamp_ns: u64) -> String {
    format!(
        "{}.{:09}",
        timestamp_ns / NANOS_PER_SEC,
        timestamp_ns % NANOS_PER_SEC
    )
}

/// The points of one frame with the frame's capture time.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
    timestamp_ns: u64,
}

impl PointCloud {
    /// Create a point cloud.
    pub fn new(points: Vec<Point>, timestamp_ns: u64) -> Self {
        Self {
            points,
            timestamp_ns,
        }
    }

    /// Points in frame order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Capture time in nanoseconds.
    pub fn timestamp_ns(&self) -> u64 {
        self.timestamp_ns
    }

    /// Whole seconds of the capture time.
    pub fn secs(&self) -> u64 {
        self.timestamp_ns / NANOS_PER_SEC
    }

    /// Sub-second remainder of the capture time, in nanoseconds.
    pub fn nanos(&self) -> u32 {
        (self.timestamp_ns % NANOS_PER_SEC) as u32
    }

    /// Output filename stem.
    pub fn stem(&self) -> String {
        timestamp_stem(self.timestamp_ns)
    }
}

/// Assemble XYZI points from reconstructed positions and raw reflectivity.
///
/// Returns `None` when there are no points. This is the normal outcome for
/// a frame without returns, not an error.
pub fn normalize(xyz: &[Vec3], reflectivity: &[f32], timestamp_ns: u64) -> Option<PointCloud> {
    debug_assert_eq!(xyz.len(), reflectivity.len());

    if xyz.is_empty() {
        info!(timestamp_ns, "frame has 0 points");
        return None;
    }

    let points = xyz
        .iter()
        .zip(reflectivity)
        .map(|(p, &r)| Point::new(p[0], p[1], p[2], normalize_intensity(r)))
        .collect();

    Some(PointCloud::new(points, timestamp_ns))
}
