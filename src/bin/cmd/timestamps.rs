// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Timestamps command - dump raw frame capture times.

use std::path::PathBuf;

use clap::Args;

use crate::common::{Result, SourceArgs};
use pc5codec::convert::export_timestamps;
use pc5codec::FrameSequence;

/// Write raw frame timestamps as CSV.
#[derive(Args, Clone, Debug)]
pub struct TimestampsCmd {
    #[command(flatten)]
    source: SourceArgs,

    /// Output CSV path
    #[arg(short, long, alias = "export_ts", value_name = "FILE")]
    output: PathBuf,
}

impl TimestampsCmd {
    pub fn run(self) -> Result<()> {
        let (store, provider) = self.source.open()?;
        let sensor = provider.sensor(&self.source.lidar_name)?;
        let sequence = FrameSequence::open(store.as_ref(), sensor)?;

        let count = export_timestamps(&sequence, &self.output)?;
        println!("saved {count} timestamps to {}", self.output.display());
        Ok(())
    }
}
