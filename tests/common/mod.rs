// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use pc5codec::io::ArrayBuffer;
use pc5codec::{MemoryStore, Pc5Writer};

// ============================================================================
// Synthetic recording
// ============================================================================
//
// Four beams, three frames, stored under group "ouster":
//
//   beam  direction        offset
//   0     (1, 0, 0)        (0, 0, 0)
//   1     (0, 1, 0)        (0, 0, 0)
//   2     (0, 0, 1)        (0, 0, 0.1)
//   3     (0.6, 0.8, 0)    (0, 0, 0)
//
//   frame  msgtime (ns)    range (mm)              reflectivity
//   0      1_000_000_000   [1000, 2000, 0, 5000]   [255, 51, 9, 0]
//   1      1_100_000_000   [0, 0, 0, 0]            [10, 10, 10, 10]
//   2      1_200_000_000   [1000, 1000, 1000, 1000] [0, 64, 128, 255]

/// Sensor group of the synthetic recording.
pub const GROUP: &str = "ouster";

/// Beams per frame.
pub const NUM_BEAMS: usize = 4;

/// Frame capture times.
pub const TIMESTAMPS: [u64; 3] = [1_000_000_000, 1_100_000_000, 1_200_000_000];

/// Index of the frame with no valid beam.
pub const EMPTY_FRAME: usize = 1;

/// Filename stems of the frames that produce points.
pub const STEMS: [&str; 2] = ["1.000000000", "1.200000000"];

const RANGE: [u32; 12] = [1000, 2000, 0, 5000, 0, 0, 0, 0, 1000, 1000, 1000, 1000];
const REFLECTIVITY: [u8; 12] = [255, 51, 9, 0, 10, 10, 10, 10, 0, 64, 128, 255];

/// Directions flattened as 3 x M, x components first.
const DIRECTION: [f32; 12] = [
    1.0, 0.0, 0.0, 0.6, // x
    0.0, 1.0, 0.0, 0.8, // y
    0.0, 0.0, 1.0, 0.0, // z
];

const OFFSET: [f32; 12] = [
    0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.1, 0.0, //
];

/// Build the synthetic recording in memory.
pub fn sample_store() -> MemoryStore {
    let frames = TIMESTAMPS.len();
    MemoryStore::new("sample")
        .with_array(GROUP, "msgtimes", vec![frames], ArrayBuffer::U64(TIMESTAMPS.to_vec()))
        .unwrap()
        .with_array(
            GROUP,
            "range",
            vec![frames, NUM_BEAMS],
            ArrayBuffer::U32(RANGE.to_vec()),
        )
        .unwrap()
        .with_array(
            GROUP,
            "reflectivity",
            vec![frames, NUM_BEAMS],
            ArrayBuffer::U8(REFLECTIVITY.to_vec()),
        )
        .unwrap()
        .with_array(GROUP, "direction", vec![3, NUM_BEAMS], ArrayBuffer::F32(DIRECTION.to_vec()))
        .unwrap()
        .with_array(GROUP, "offset", vec![3, NUM_BEAMS], ArrayBuffer::F32(OFFSET.to_vec()))
        .unwrap()
}

/// Write the synthetic recording as `<dir>/drive.pc5`.
pub fn write_sample(dir: &Path) -> PathBuf {
    let path = dir.join("drive.pc5");
    Pc5Writer::from_store(&sample_store()).write(&path).unwrap();
    path
}

/// Write the synthetic recording as an HDF5 file `<dir>/drive_h5.pc5`.
#[cfg(feature = "hdf5")]
pub fn write_sample_hdf5(dir: &Path) -> PathBuf {
    use ndarray::ArrayD;

    fn write<T: hdf5::H5Type>(group: &hdf5::Group, name: &str, shape: &[usize], data: Vec<T>) {
        let array = ArrayD::from_shape_vec(shape.to_vec(), data).unwrap();
        group
            .new_dataset_builder()
            .with_data(&array)
            .create(name)
            .unwrap();
    }

    let path = dir.join("drive_h5.pc5");
    let file = hdf5::File::create(&path).unwrap();
    let group = file.create_group(GROUP).unwrap();
    let frames = TIMESTAMPS.len();
    write(&group, "msgtimes", &[frames], TIMESTAMPS.to_vec());
    write(&group, "range", &[frames, NUM_BEAMS], RANGE.to_vec());
    write(&group, "reflectivity", &[frames, NUM_BEAMS], REFLECTIVITY.to_vec());
    write(&group, "direction", &[3, NUM_BEAMS], DIRECTION.to_vec());
    write(&group, "offset", &[3, NUM_BEAMS], OFFSET.to_vec());
    path
}

/// Files below `dir`, sorted by name.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Decode a little-endian f32 buffer.
pub fn read_f32s(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

// ============================================================================
// Assertions
// ============================================================================

/// Assert two float slices agree within `tol`.
pub fn assert_close(actual: &[f32], expected: &[f32], tol: f32) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() <= tol, "element {i}: {a} != {e}");
    }
}
