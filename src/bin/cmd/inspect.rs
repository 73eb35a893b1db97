// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show sensor group summary and decoded frames.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{format_duration, format_timestamp, open_source, Result};
use pc5codec::lidar::timestamp_stem;
use pc5codec::{FrameReader, FrameSequence, DEFAULT_SENSOR};

/// Points printed by `inspect frame`.
const PREVIEW_POINTS: usize = 5;

/// Inspect container contents.
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// Show the sensor group: frames, beams, time span, arrays
    Info {
        /// Input PC5 container
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Sensor identifier
        #[arg(long, default_value = DEFAULT_SENSOR)]
        lidar_name: String,

        /// TOML sensor table replacing the built-in one
        #[arg(long, value_name = "FILE")]
        sensors: Option<PathBuf>,
    },

    /// Decode one frame and print its first points
    Frame {
        /// Input PC5 container
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Frame index
        #[arg(value_name = "INDEX", allow_negative_numbers = true, default_value_t = 0)]
        index: i64,

        /// Sensor identifier
        #[arg(long, default_value = DEFAULT_SENSOR)]
        lidar_name: String,

        /// TOML sensor table replacing the built-in one
        #[arg(long, value_name = "FILE")]
        sensors: Option<PathBuf>,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Info {
                input,
                lidar_name,
                sensors,
            } => cmd_info(input, &lidar_name, sensors),
            InspectCmd::Frame {
                input,
                index,
                lidar_name,
                sensors,
            } => cmd_frame(input, index, &lidar_name, sensors),
        }
    }
}

/// Cmd: Show sensor group summary
fn cmd_info(input: PathBuf, lidar_name: &str, sensors: Option<PathBuf>) -> Result<()> {
    let (store, provider) = open_source(&input, sensors.as_deref())?;
    let sensor = provider.sensor(lidar_name)?;
    let calibration = provider.calibration(store.as_ref(), lidar_name)?;
    let sequence = FrameSequence::open(store.as_ref(), sensor)?;

    println!("=== {} ===", input.display());
    println!("Sensor: {} (group '{}')", sensor.id, sensor.group);
    println!("Frames: {}", sequence.num_frames());
    println!("Beams: {}", sequence.num_beams());
    println!("Calibrated beams: {}", calibration.num_beams());
    println!("Time offset: {}s", sensor.time_offset);

    let timestamps = sequence.timestamps();
    if let (Some(&start), Some(&end)) = (timestamps.first(), timestamps.last()) {
        println!("Start: {}", format_timestamp(start));
        println!("End: {}", format_timestamp(end));
        println!("Duration: {}", format_duration(end.saturating_sub(start)));
    }
    let sensor_secs = sequence.timestamps_secs();
    if let (Some(start), Some(end)) = (sensor_secs.first(), sensor_secs.last()) {
        println!("Sensor time: {start:.6}s .. {end:.6}s");
    }
    if !sequence.is_sorted() {
        println!("Warning: timestamps are not sorted");
    }

    println!();
    println!("Arrays:");
    for info in store.datasets() {
        if info.group() == sensor.group {
            println!("  {} | {} | {:?}", info.name(), info.dtype, info.shape);
        }
    }

    Ok(())
}

/// Cmd: Decode one frame
fn cmd_frame(
    input: PathBuf,
    index: i64,
    lidar_name: &str,
    sensors: Option<PathBuf>,
) -> Result<()> {
    let (store, provider) = open_source(&input, sensors.as_deref())?;
    let sensor = provider.sensor(lidar_name)?;
    let calibration = provider.calibration(store.as_ref(), lidar_name)?;
    let sequence = FrameSequence::open(store.as_ref(), sensor)?;
    let index = sequence.check_index(index)?;

    let frame = FrameReader::new(&sequence, &calibration)?.read(index)?;

    println!("frame {index}");
    println!(
        "timestamp: {} ({})",
        frame.timestamp_ns,
        format_timestamp(frame.timestamp_ns)
    );
    println!("stem: {}", timestamp_stem(frame.timestamp_ns));

    let Some(cloud) = frame.normalize() else {
        println!("points: 0 of {}", sequence.num_beams());
        return Ok(());
    };

    println!("points: {} of {}", cloud.len(), sequence.num_beams());
    println!("first {} points (x, y, z, intensity):", PREVIEW_POINTS.min(cloud.len()));
    for p in cloud.points().iter().take(PREVIEW_POINTS) {
        println!(
            "  {:>12.6} {:>12.6} {:>12.6} {:>9.6}",
            p.x, p.y, p.z, p.intensity
        );
    }

    Ok(())
}
