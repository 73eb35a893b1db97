// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Range image to Cartesian point reconstruction.
//!
//! For each beam `k` with non-zero scaled range `r`:
//!
//! ```text
//! point_k = r * direction_k + offset_k
//! ```
//!
//! Beams with zero range carry no return and are dropped. Arithmetic is done
//! in `f64` and the result is stored as `f32`.

use crate::core::{Pc5Error, Result};

use super::calibration::{CalibrationRecord, Vec3};
use super::frames::FrameSequence;
use super::points::{normalize, PointCloud};

/// Raw range unit to meters.
pub const RANGE_SCALE: f64 = 0.001;

/// Valid beams of one frame, before intensity normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePoints {
    /// Frame index
    pub index: usize,
    /// Capture time in nanoseconds
    pub timestamp_ns: u64,
    /// Reconstructed positions in meters
    pub xyz: Vec<Vec3>,
    /// Raw reflectivity, index-aligned with `xyz`
    pub reflectivity: Vec<f32>,
}

impl FramePoints {
    /// Number of valid beams.
    pub fn len(&self) -> usize {
        self.xyz.len()
    }

    /// Whether the frame had no valid beam.
    pub fn is_empty(&self) -> bool {
        self.xyz.is_empty()
    }

    /// Build the XYZI point cloud, or `None` for an empty frame.
    pub fn normalize(&self) -> Option<PointCloud> {
        normalize(&self.xyz, &self.reflectivity, self.timestamp_ns)
    }
}

/// Reconstruct the valid beams of one frame.
///
/// Returns empty vectors when every range is zero.
///
/// # Errors
///
/// Returns `ShapeMismatch` if either row length differs from the calibration
/// beam count.
pub fn reconstruct(
    calibration: &CalibrationRecord,
    range_mm: &[f64],
    reflectivity: &[f32],
) -> Result<(Vec<Vec3>, Vec<f32>)> {
    let beams = calibration.num_beams();
    if range_mm.len() != beams {
        return Err(Pc5Error::shape_mismatch("range row", beams, range_mm.len()));
    }
    if reflectivity.len() != beams {
        return Err(Pc5Error::shape_mismatch(
            "reflectivity row",
            beams,
            reflectivity.len(),
        ));
    }

    let mut xyz = Vec::new();
    let mut refl = Vec::new();

    let beams_iter = range_mm
        .iter()
        .zip(reflectivity)
        .zip(calibration.directions().iter().zip(calibration.offsets()));

    for ((&raw, &r), (d, o)) in beams_iter {
        let range = raw * RANGE_SCALE;
        if range == 0.0 {
            continue;
        }
        xyz.push([
            (range * d[0] as f64 + o[0] as f64) as f32,
            (range * d[1] as f64 + o[1] as f64) as f32,
            (range * d[2] as f64 + o[2] as f64) as f32,
        ]);
        refl.push(r);
    }

    Ok((xyz, refl))
}

/// Reads frames of a sequence using one calibration.
#[derive(Debug)]
pub struct FrameReader<'a> {
    sequence: &'a FrameSequence<'a>,
    calibration: &'a CalibrationRecord,
}

impl<'a> FrameReader<'a> {
    /// Pair a frame sequence with its calibration.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the calibration beam count differs from the
    /// frame beam count. No frame of such a source can be decoded.
    pub fn new(sequence: &'a FrameSequence<'a>, calibration: &'a CalibrationRecord) -> Result<Self> {
        if calibration.num_beams() != sequence.num_beams() {
            return Err(Pc5Error::shape_mismatch(
                "calibration beams",
                sequence.num_beams(),
                calibration.num_beams(),
            ));
        }
        Ok(Self {
            sequence,
            calibration,
        })
    }

    /// The frame sequence.
    pub fn sequence(&self) -> &FrameSequence<'a> {
        self.sequence
    }

    /// The calibration record.
    pub fn calibration(&self) -> &CalibrationRecord {
        self.calibration
    }

    /// Read and reconstruct one frame.
    pub fn read(&self, index: usize) -> Result<FramePoints> {
        let timestamp_ns = self.sequence.timestamp(index)?;
        let range = self.sequence.range_row(index)?;
        let reflectivity = self.sequence.reflectivity_row(index)?;
        let (xyz, reflectivity) = reconstruct(self.calibration, &range, &reflectivity)?;

        Ok(FramePoints {
            index,
            timestamp_ns,
            xyz,
            reflectivity,
        })
    }
}
