// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Frame sequence access and frame index resolution.
//!
//! A sensor group holds one timestamp per frame plus `range` and
//! `reflectivity` arrays whose first dimension is the frame index. Rows are
//! read lazily, one frame at a time.
//!
//! # Timestamp lookup
//!
//! [`FrameSelector::Timestamp`] resolves to the index of the first frame whose
//! timestamp is strictly greater than the query, i.e. the number of frames
//! stamped at or before it. Callers wanting the frame at or before `t` must
//! subtract one and handle the `0` case themselves.
//!
//! The lookup is a binary search and requires non-decreasing timestamps. On
//! an unsorted sequence the result is unspecified: it is some index in
//! `0..=num_frames`, never a panic. [`FrameSequence::is_sorted`] checks the
//! precondition.

use std::fmt;

use tracing::warn;

use crate::core::{Pc5Error, Result, SensorConfig};
use crate::io::metadata::dataset_path;
use crate::io::traits::SensorDataStore;

use super::arrays;

/// Selects one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSelector {
    /// Explicit 0-based index; negative values are reported as out of range
    Index(i64),
    /// Capture time in nanoseconds
    Timestamp(u64),
}

/// Which frames a batch processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameSelection {
    /// Every frame, in index order
    #[default]
    All,
    /// A single frame
    Single(FrameSelector),
}

impl fmt::Display for FrameSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameSelection::All => write!(f, "all frames"),
            FrameSelection::Single(FrameSelector::Index(i)) => write!(f, "frame {i}"),
            FrameSelection::Single(FrameSelector::Timestamp(t)) => write!(f, "frame after {t}"),
        }
    }
}

/// Index of the first timestamp strictly greater than `t`.
///
/// Equivalent to the count of timestamps `<= t`; `timestamps` must be
/// non-decreasing.
pub fn resolve_timestamp(timestamps: &[u64], t: u64) -> usize {
    timestamps.partition_point(|&ts| ts <= t)
}

/// The frames of one sensor inside a data store.
pub struct FrameSequence<'s> {
    store: &'s dyn SensorDataStore,
    range_path: String,
    reflectivity_path: String,
    timestamps: Vec<u64>,
    num_beams: usize,
    time_offset: f64,
}

impl<'s> FrameSequence<'s> {
    /// Open the frame arrays of `sensor` in `store`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the group or one of `msgtimes`, `range`,
    ///   `reflectivity` is missing
    /// - `ShapeMismatch` if the arrays disagree on frame or beam count
    pub fn open(store: &'s dyn SensorDataStore, sensor: &SensorConfig) -> Result<Self> {
        if !store.contains_group(&sensor.group) {
            return Err(Pc5Error::not_found(
                format!("group '{}'", sensor.group),
                store.path(),
            ));
        }

        let range_path = dataset_path(&sensor.group, arrays::RANGE);
        let reflectivity_path = dataset_path(&sensor.group, arrays::REFLECTIVITY);
        let msgtimes_path = dataset_path(&sensor.group, arrays::MSGTIMES);

        let range = store.require(&range_path)?;
        let reflectivity = store.require(&reflectivity_path)?;
        store.require(&msgtimes_path)?;

        let num_frames = range.num_rows();
        let num_beams = range.row_len();

        if reflectivity.num_rows() != num_frames {
            return Err(Pc5Error::shape_mismatch(
                "reflectivity frames",
                num_frames,
                reflectivity.num_rows(),
            ));
        }
        if reflectivity.row_len() != num_beams {
            return Err(Pc5Error::shape_mismatch(
                "reflectivity beams",
                num_beams,
                reflectivity.row_len(),
            ));
        }

        let timestamps = store.read(&msgtimes_path)?.to_u64()?;
        if timestamps.len() != num_frames {
            return Err(Pc5Error::shape_mismatch(
                "msgtimes",
                num_frames,
                timestamps.len(),
            ));
        }

        let sequence = Self {
            store,
            range_path,
            reflectivity_path,
            timestamps,
            num_beams,
            time_offset: sensor.time_offset,
        };

        if !sequence.is_sorted() {
            warn!(
                group = %sensor.group,
                "msgtimes are not sorted; timestamp lookup results are unspecified"
            );
        }

        Ok(sequence)
    }

    /// Number of frames.
    pub fn num_frames(&self) -> usize {
        self.timestamps.len()
    }

    /// Beams per frame.
    pub fn num_beams(&self) -> usize {
        self.num_beams
    }

    /// Raw frame timestamps in nanoseconds.
    pub fn timestamps(&self) -> &[u64] {
        &self.timestamps
    }

    /// Frame timestamps in seconds with the sensor time offset applied.
    pub fn timestamps_secs(&self) -> Vec<f64> {
        self.timestamps
            .iter()
            .map(|&ns| ns as f64 * 1e-9 - self.time_offset)
            .collect()
    }

    /// Whether timestamps are non-decreasing.
    pub fn is_sorted(&self) -> bool {
        self.timestamps.windows(2).all(|w| w[0] <= w[1])
    }

    /// Timestamp of one frame.
    pub fn timestamp(&self, index: usize) -> Result<u64> {
        self.timestamps
            .get(index)
            .copied()
            .ok_or_else(|| Pc5Error::out_of_range(index as i64, self.num_frames()))
    }

    /// Validate an explicit index against `[0, num_frames - 1]`.
    pub fn check_index(&self, index: i64) -> Result<usize> {
        if index < 0 || index as u64 >= self.num_frames() as u64 {
            return Err(Pc5Error::out_of_range(index, self.num_frames()));
        }
        Ok(index as usize)
    }

    /// Resolve a selector to a frame index.
    ///
    /// Explicit indices are bounds-checked. Timestamps resolve to the first
    /// frame strictly after `t`, which may equal `num_frames()`.
    pub fn resolve(&self, selector: FrameSelector) -> Result<usize> {
        match selector {
            FrameSelector::Index(i) => self.check_index(i),
            FrameSelector::Timestamp(t) => Ok(resolve_timestamp(&self.timestamps, t)),
        }
    }

    /// Frame indices covered by a selection, in processing order.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the selected frame does not exist, including a
    /// timestamp later than every frame.
    pub fn indices(&self, selection: FrameSelection) -> Result<Vec<usize>> {
        match selection {
            FrameSelection::All => Ok((0..self.num_frames()).collect()),
            FrameSelection::Single(selector) => {
                let index = self.resolve(selector)?;
                self.check_index(index as i64).map(|i| vec![i])
            }
        }
    }

    /// Raw range row of a frame, in millimeters.
    pub fn range_row(&self, index: usize) -> Result<Vec<f64>> {
        Ok(self.store.read_row(&self.range_path, index)?.to_f64())
    }

    /// Raw reflectivity row of a frame.
    pub fn reflectivity_row(&self, index: usize) -> Result<Vec<f32>> {
        Ok(self.store.read_row(&self.reflectivity_path, index)?.to_f32())
    }
}

impl fmt::Debug for FrameSequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameSequence")
            .field("store", &self.store.path())
            .field("range", &self.range_path)
            .field("frames", &self.num_frames())
            .field("beams", &self.num_beams)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::array::ArrayBuffer;
    use crate::io::memory::MemoryStore;

    fn store(timestamps: Vec<u64>, beams: usize) -> MemoryStore {
        let n = timestamps.len();
        MemoryStore::new("memory")
            .with_array("ouster", "msgtimes", vec![n], ArrayBuffer::U64(timestamps))
            .unwrap()
            .with_array(
                "ouster",
                "range",
                vec![n, beams],
                ArrayBuffer::U32((0..(n * beams) as u32).collect()),
            )
            .unwrap()
            .with_array(
                "ouster",
                "reflectivity",
                vec![n, beams],
                ArrayBuffer::U8(vec![7; n * beams]),
            )
            .unwrap()
    }

    fn top() -> SensorConfig {
        SensorConfig::from_topic("top", "/ouster")
    }

    #[test]
    fn test_resolve_timestamp_next_semantics() {
        let ts = [10, 20, 20, 30];
        assert_eq!(resolve_timestamp(&ts, 20), 3);
        assert_eq!(resolve_timestamp(&ts, 5), 0);
        assert_eq!(resolve_timestamp(&ts, 10), 1);
        assert_eq!(resolve_timestamp(&ts, 25), 3);
        assert_eq!(resolve_timestamp(&ts, 30), 4);
        assert_eq!(resolve_timestamp(&[], 30), 0);
    }

    #[test]
    fn test_resolve_unsorted_stays_in_bounds() {
        let ts = [30, 10, 40, 20];
        for t in [0, 15, 25, 35, 45] {
            assert!(resolve_timestamp(&ts, t) <= ts.len());
        }
    }

    #[test]
    fn test_open_sequence() {
        let store = store(vec![10, 20, 20, 30], 3);
        let seq = FrameSequence::open(&store, &top()).unwrap();
        assert_eq!(seq.num_frames(), 4);
        assert_eq!(seq.num_beams(), 3);
        assert!(seq.is_sorted());
        assert_eq!(seq.range_row(1).unwrap(), vec![3.0, 4.0, 5.0]);
        assert_eq!(seq.reflectivity_row(3).unwrap(), vec![7.0; 3]);
    }

    #[test]
    fn test_resolve_index_bounds() {
        let store = store(vec![10, 20, 20, 30], 2);
        let seq = FrameSequence::open(&store, &top()).unwrap();

        assert_eq!(seq.resolve(FrameSelector::Index(3)).unwrap(), 3);
        let err = seq.resolve(FrameSelector::Index(4)).unwrap_err();
        assert_eq!(err.to_string(), "frame 4 out of range [0, 3]");
        assert!(seq.resolve(FrameSelector::Index(-1)).is_err());
    }

    #[test]
    fn test_resolve_timestamp_selector() {
        let store = store(vec![10, 20, 20, 30], 2);
        let seq = FrameSequence::open(&store, &top()).unwrap();
        assert_eq!(seq.resolve(FrameSelector::Timestamp(20)).unwrap(), 3);
        assert_eq!(
            seq.indices(FrameSelection::Single(FrameSelector::Timestamp(15)))
                .unwrap(),
            vec![1]
        );
        assert!(matches!(
            seq.indices(FrameSelection::Single(FrameSelector::Timestamp(30))),
            Err(Pc5Error::OutOfRange { index: 4, .. })
        ));
    }

    #[test]
    fn test_indices_all() {
        let store = store(vec![1, 2, 3], 1);
        let seq = FrameSequence::open(&store, &top()).unwrap();
        assert_eq!(seq.indices(FrameSelection::All).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_timestamps_secs_applies_offset() {
        let store = store(vec![1_500_000_000, 2_000_000_000], 1);
        let config = top().with_time_offset(0.5);
        let seq = FrameSequence::open(&store, &config).unwrap();
        let secs = seq.timestamps_secs();
        assert!((secs[0] - 1.0).abs() < 1e-9);
        assert!((secs[1] - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_msgtimes_length_mismatch() {
        let mut store = store(vec![1, 2, 3], 2);
        store
            .insert("ouster", "msgtimes", vec![2], ArrayBuffer::U64(vec![1, 2]))
            .unwrap();
        let err = FrameSequence::open(&store, &top()).unwrap_err();
        assert!(matches!(err, Pc5Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_missing_range() {
        let store = MemoryStore::new("memory")
            .with_array("ouster", "msgtimes", vec![1], ArrayBuffer::U64(vec![1]))
            .unwrap();
        let err = FrameSequence::open(&store, &top()).unwrap_err();
        assert!(err.to_string().contains("array 'ouster/range'"));
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(FrameSelection::All.to_string(), "all frames");
        assert_eq!(
            FrameSelection::Single(FrameSelector::Index(7)).to_string(),
            "frame 7"
        );
    }
}
