// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tests for HDF5 recordings.
//!
//! Run with: cargo test --features hdf5 --test hdf5_tests

#![cfg(feature = "hdf5")]

mod common;

use std::fs;

use common::*;
use pc5codec::io::detection::{detect_format, StoreFormat};
use pc5codec::{
    BatchConverter, CalibrationProvider, ConvertOptions, ExportFormatSet, FrameSelection,
    Hdf5Store, SensorDataStore, SensorRegistry,
};

#[test]
fn test_hdf5_detected_and_opened() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_hdf5(dir.path());

    assert_eq!(detect_format(&path).unwrap(), StoreFormat::Hdf5);
    let store = pc5codec::open_store(&path).unwrap();
    assert!(store.contains_group(GROUP));
    assert_eq!(store.datasets().len(), 5);
}

#[test]
fn test_hdf5_matches_memory() {
    let dir = tempfile::tempdir().unwrap();
    let store = Hdf5Store::open(write_sample_hdf5(dir.path())).unwrap();
    let memory = sample_store();

    let on_disk: Vec<_> = store.datasets().into_iter().cloned().collect();
    let in_memory: Vec<_> = memory.datasets().into_iter().cloned().collect();
    assert_eq!(on_disk, in_memory);

    for info in &on_disk {
        assert_eq!(store.read(&info.path).unwrap(), memory.read(&info.path).unwrap());
    }
    for row in 0..TIMESTAMPS.len() {
        assert_eq!(
            store.read_row("ouster/range", row).unwrap(),
            memory.read_row("ouster/range", row).unwrap()
        );
    }
}

#[test]
fn test_hdf5_export_matches_container_export() {
    let dir = tempfile::tempdir().unwrap();
    let h5 = pc5codec::open_store(write_sample_hdf5(dir.path())).unwrap();
    let pc5 = pc5codec::open_store(write_sample(dir.path())).unwrap();

    let run = |store: &dyn SensorDataStore, out: &std::path::Path| {
        let provider = CalibrationProvider::new(SensorRegistry::builtin());
        BatchConverter::new(store, provider, ConvertOptions::default())
            .run("top", FrameSelection::All, out, &ExportFormatSet::all())
            .unwrap()
    };

    let h5_out = dir.path().join("from_h5");
    let pc5_out = dir.path().join("from_pc5");
    let summary = run(h5.as_ref(), &h5_out);
    run(pc5.as_ref(), &pc5_out);

    assert_eq!(summary.exported, 2);
    for sub in ["pcd", "bin", "bin_k", "csv"] {
        let names = list_files(&h5_out.join(sub));
        assert_eq!(names, list_files(&pc5_out.join(sub)));
        for name in names {
            assert_eq!(
                fs::read(h5_out.join(sub).join(&name)).unwrap(),
                fs::read(pc5_out.join(sub).join(&name)).unwrap(),
                "{sub}/{name}"
            );
        }
    }
}
