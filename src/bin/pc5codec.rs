// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # pc5codec CLI
//!
//! Command-line tool for decoding lidar frames from PC5 sensor containers.
//!
//! ## Usage
//!
//! ```sh
//! # Export every frame as PCD, bin and CSV
//! pc5codec export --pc5-path drive.pc5 --out-dir exports
//!
//! # Export one frame as PCD only
//! pc5codec export --pc5-path drive.pc5 --frame 12 --formats pcd
//!
//! # Summarize the sensor group
//! pc5codec inspect info drive.pc5
//!
//! # Dump frame timestamps
//! pc5codec timestamps --pc5-path drive.pc5 --output msgtimes.csv
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{ExportCmd, InspectCmd, TimestampsCmd};
use common::Result;

/// pc5codec - Lidar frame decoder and point cloud exporter
///
/// Reconstructs Cartesian point clouds from the range images stored in a PC5
/// container and writes them as binary PCD, KITTI-style bin and CSV files.
#[derive(Parser, Clone)]
#[command(name = "pc5codec")]
#[command(about = "Lidar frame decoder and point cloud exporter for PC5 containers", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Log pipeline details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Export frames as point cloud files (pcd, bin, csv)
    Export(ExportCmd),

    /// Inspect the sensor group or a single decoded frame
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Write raw frame timestamps as CSV
    Timestamps(TimestampsCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    match cli.command {
        Commands::Export(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Timestamps(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
