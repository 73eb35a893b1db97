// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual pc5codec binary and verify its behavior.

mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use common::{write_sample, STEMS};

/// Run pc5codec with arguments
fn run(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_pc5codec");
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {bin}"))
}

/// Run pc5codec and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run pc5codec and assert failure with exit code 1
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("point cloud exporter"));
    assert!(output.contains("export"));
    assert!(output.contains("inspect"));
    assert!(output.contains("timestamps"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains("pc5codec"));
}

#[test]
fn test_cli_no_args() {
    let output = run(&[]);
    assert!(!output.status.success());
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_all() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let out = dir.path().join("exports");

    let stdout = run_ok(&[
        "export",
        "--pc5-path",
        path_str(&input),
        "--out-dir",
        path_str(&out),
    ]);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "1/3  frame=0 -> 1.000000000   (3 pts)".to_string(),
            " 1: no valid points".to_string(),
            "3/3  frame=2 -> 1.200000000   (4 pts)".to_string(),
            format!("exported 2/3 (all frames) to {}", out.display()),
        ]
    );

    for stem in STEMS {
        assert!(out.join(format!("pcd/{stem}.pcd")).is_file());
        assert!(out.join(format!("bin/{stem}.bin")).is_file());
        assert!(out.join(format!("bin_k/{stem}.bin")).is_file());
        assert!(out.join(format!("csv/{stem}.csv")).is_file());
    }
}

#[test]
fn test_export_single_frame_selected_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let out = dir.path().join("exports");

    let stdout = run_ok(&[
        "export",
        "--pc5-path",
        path_str(&input),
        "--out-dir",
        path_str(&out),
        "--frame",
        "0",
        "--to-csv",
    ]);

    assert!(stdout.contains(&format!("exported 1/1 (frame 0) to {}", out.display())));
    assert!(out.join("csv/1.000000000.csv").is_file());
    assert!(!out.join("pcd").exists());
}

#[test]
fn test_export_underscore_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let out = dir.path().join("exports");

    run_ok(&[
        "export",
        "--pc5_path",
        path_str(&input),
        "--out_dir",
        path_str(&out),
        "--formats",
        "pcd",
        "--parallel",
    ]);

    assert_eq!(fs::read_dir(out.join("pcd")).unwrap().count(), 2);
}

#[test]
fn test_export_at_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let out = dir.path().join("exports");

    let stdout = run_ok(&[
        "export",
        "--pc5-path",
        path_str(&input),
        "--out-dir",
        path_str(&out),
        "--at",
        "1100000001",
    ]);
    assert!(stdout.contains("(frame 2)"));
}

#[test]
fn test_export_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let out = dir.path().join("exports");

    let stderr = run_err(&[
        "export",
        "--pc5-path",
        path_str(&input),
        "--out-dir",
        path_str(&out),
        "--formats",
        "pcd,xyz",
    ]);

    assert!(stderr.contains("Error: Unknown format(s): xyz. Valid: bin, csv, pcd"));
    assert!(!out.exists());
}

#[test]
fn test_export_conflicting_format_flags() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());

    let stderr = run_err(&[
        "export",
        "--pc5-path",
        path_str(&input),
        "--formats",
        "pcd",
        "--to-bin",
    ]);
    assert!(stderr.contains("cannot be combined"));
}

#[test]
fn test_export_frame_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let out = dir.path().join("exports");

    let output = run(&[
        "export",
        "--pc5-path",
        path_str(&input),
        "--out-dir",
        path_str(&out),
        "--frame",
        "3",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("frame 3 out of range [0, 2]"), "{stderr}");
}

#[test]
fn test_export_negative_frame() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());

    let stderr = run_err(&["export", "--pc5-path", path_str(&input), "--frame", "-1"]);
    assert!(stderr.contains("frame -1 out of range [0, 2]"), "{stderr}");
}

#[test]
fn test_export_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pc5");

    let stderr = run_err(&["export", "--pc5-path", path_str(&missing)]);
    assert!(stderr.contains("not found"), "{stderr}");
}

#[test]
fn test_export_not_a_container() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.pc5");
    fs::write(&bogus, b"definitely not a container").unwrap();

    let stderr = run_err(&["export", "--pc5-path", path_str(&bogus)]);
    assert!(stderr.contains("format error"), "{stderr}");
}

#[test]
fn test_export_sensor_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let sensors = dir.path().join("sensors.toml");
    fs::write(
        &sensors,
        "[[sensors]]\nid = \"roof\"\ngroup = \"ouster\"\n",
    )
    .unwrap();

    let stdout = run_ok(&[
        "export",
        "--pc5-path",
        path_str(&input),
        "--out-dir",
        path_str(&dir.path().join("exports")),
        "--sensors",
        path_str(&sensors),
        "--lidar-name",
        "roof",
    ]);
    assert!(stdout.contains("exported 2/3"));

    let stderr = run_err(&[
        "export",
        "--pc5-path",
        path_str(&input),
        "--sensors",
        path_str(&sensors),
    ]);
    assert!(stderr.contains("Unknown sensor: 'top'"));
}

// ============================================================================
// Inspect and timestamps
// ============================================================================

#[test]
fn test_inspect_info() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());

    let stdout = run_ok(&["inspect", "info", path_str(&input)]);
    assert!(stdout.contains("Frames: 3"));
    assert!(stdout.contains("Beams: 4"));
    assert!(stdout.contains("range"));
    assert!(stdout.contains("Duration: 200ms"));
}

#[test]
fn test_inspect_info_applies_time_offset() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());

    let stdout = run_ok(&["inspect", "info", path_str(&input)]);
    assert!(stdout.contains("Sensor time: 1.000000s .. 1.200000s"), "{stdout}");

    let sensors = dir.path().join("sensors.toml");
    fs::write(
        &sensors,
        "[[sensors]]\nid = \"top\"\ngroup = \"ouster\"\nmsgtime-offset = 0.25\n",
    )
    .unwrap();
    let stdout = run_ok(&[
        "inspect",
        "info",
        path_str(&input),
        "--sensors",
        path_str(&sensors),
    ]);
    assert!(stdout.contains("Time offset: 0.25s"), "{stdout}");
    assert!(stdout.contains("Sensor time: 0.750000s .. 0.950000s"), "{stdout}");
}

#[test]
fn test_inspect_frame() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());

    let stdout = run_ok(&["inspect", "frame", path_str(&input), "2"]);
    assert!(stdout.contains("frame 2"));
    assert!(stdout.contains("timestamp: 1200000000"));
    assert!(stdout.contains("points: 4 of 4"));

    let stdout = run_ok(&["inspect", "frame", path_str(&input), "1"]);
    assert!(stdout.contains("points: 0 of 4"));
}

#[test]
fn test_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let output = dir.path().join("msgtimes.csv");

    let stdout = run_ok(&[
        "timestamps",
        "--pc5-path",
        path_str(&input),
        "--output",
        path_str(&output),
    ]);

    assert!(stdout.contains("saved 3 timestamps"));
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().next(), Some("msgtimes_ns"));
    assert_eq!(text.lines().count(), 4);
}
