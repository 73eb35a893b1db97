// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Beam calibration loading.
//!
//! Each sensor group stores two `3 x M` arrays: unit beam directions and
//! beam origin offsets. They are read once per batch and never mutated.

use tracing::debug;

use crate::core::{Pc5Error, Result, SensorConfig, SensorRegistry};
use crate::io::metadata::dataset_path;
use crate::io::traits::SensorDataStore;

use super::arrays;

/// A 3-vector in sensor coordinates.
pub type Vec3 = [f32; 3];

/// Static calibration of one sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationRecord {
    /// Sensor identifier
    pub sensor_id: String,
    /// Time offset in seconds
    pub time_offset: f64,
    directions: Vec<Vec3>,
    offsets: Vec<Vec3>,
}

impl CalibrationRecord {
    /// Create a record from per-beam vectors.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the two arrays differ in length.
    pub fn new(
        sensor_id: impl Into<String>,
        time_offset: f64,
        directions: Vec<Vec3>,
        offsets: Vec<Vec3>,
    ) -> Result<Self> {
        if directions.len() != offsets.len() {
            return Err(Pc5Error::shape_mismatch(
                "beam offsets",
                directions.len(),
                offsets.len(),
            ));
        }
        Ok(Self {
            sensor_id: sensor_id.into(),
            time_offset,
            directions,
            offsets,
        })
    }

    /// Number of beams M.
    pub fn num_beams(&self) -> usize {
        self.directions.len()
    }

    /// Unit direction of every beam.
    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }

    /// Origin offset of every beam.
    pub fn offsets(&self) -> &[Vec3] {
        &self.offsets
    }
}

/// Convert a flattened `3 x M` component-major array into M vectors.
pub(crate) fn columns_to_vectors(flat: &[f32], what: &str) -> Result<Vec<Vec3>> {
    if flat.len() % 3 != 0 {
        return Err(Pc5Error::shape_mismatch(
            format!("{what} (3 x M)"),
            flat.len().div_ceil(3) * 3,
            flat.len(),
        ));
    }
    let m = flat.len() / 3;
    Ok((0..m)
        .map(|k| [flat[k], flat[m + k], flat[2 * m + k]])
        .collect())
}

/// Resolves sensor identifiers to calibration records.
///
/// Built once from a [`SensorRegistry`]; the registry is not re-read per call.
#[derive(Debug, Clone)]
pub struct CalibrationProvider {
    registry: SensorRegistry,
}

impl CalibrationProvider {
    /// Create a provider over a sensor registry.
    pub fn new(registry: SensorRegistry) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Look up the static configuration of a sensor.
    pub fn sensor(&self, sensor_id: &str) -> Result<&SensorConfig> {
        self.registry.get(sensor_id)
    }

    /// Load the calibration record of `sensor_id` from `store`.
    ///
    /// # Errors
    ///
    /// - `UnknownSensor` if the id is not registered
    /// - `NotFound` if the sensor group or a calibration array is missing
    /// - `ShapeMismatch` if the arrays are not `3 x M` of equal M
    pub fn calibration(
        &self,
        store: &dyn SensorDataStore,
        sensor_id: &str,
    ) -> Result<CalibrationRecord> {
        let config = self.sensor(sensor_id)?;
        if !store.contains_group(&config.group) {
            return Err(Pc5Error::not_found(
                format!("group '{}'", config.group),
                store.path(),
            ));
        }

        let direction_path = dataset_path(&config.group, arrays::DIRECTION);
        let offset_path = dataset_path(&config.group, arrays::OFFSET);
        store.require(&direction_path)?;
        store.require(&offset_path)?;

        let directions = columns_to_vectors(&store.read(&direction_path)?.to_f32(), "direction")?;
        let offsets = columns_to_vectors(&store.read(&offset_path)?.to_f32(), "offset")?;

        debug!(
            sensor = sensor_id,
            group = %config.group,
            beams = directions.len(),
            "loaded calibration"
        );

        CalibrationRecord::new(config.id.clone(), config.time_offset, directions, offsets)
    }
}
