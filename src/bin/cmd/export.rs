// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Export command - write frames as PCD, bin and CSV files.

use std::path::PathBuf;

use clap::Args;

use crate::common::{Result, SourceArgs};
use pc5codec::{BatchConverter, ConvertOptions, ExportFormatSet, FrameSelection, FrameSelector};

/// Export frames as point cloud files.
#[derive(Args, Clone, Debug)]
pub struct ExportCmd {
    #[command(flatten)]
    source: SourceArgs,

    /// Output root; pcd/, bin/, bin_k/ and csv/ are created below it
    #[arg(long, alias = "out_dir", default_value = "exports")]
    out_dir: PathBuf,

    /// Comma separated formats: pcd,bin,csv
    #[arg(long, value_name = "LIST")]
    formats: Option<String>,

    /// Export PCD
    #[arg(long, alias = "to_pcd")]
    to_pcd: bool,

    /// Export bin and bin_k
    #[arg(long, alias = "to_bin")]
    to_bin: bool,

    /// Export CSV
    #[arg(long, alias = "to_csv")]
    to_csv: bool,

    /// Export only this frame index
    #[arg(long, allow_negative_numbers = true, conflicts_with = "at")]
    frame: Option<i64>,

    /// Export only the first frame stamped after this time (nanoseconds)
    #[arg(long, value_name = "NS")]
    at: Option<u64>,

    /// Convert frames on a thread pool
    #[arg(long)]
    parallel: bool,

    /// Thread pool size (implies --parallel)
    #[arg(long, value_name = "N")]
    threads: Option<usize>,
}

impl ExportCmd {
    pub fn run(self) -> Result<()> {
        // Validate formats before touching the file system.
        let formats = ExportFormatSet::resolve(
            self.formats.as_deref(),
            self.to_pcd,
            self.to_bin,
            self.to_csv,
        )?;

        let selection = match (self.frame, self.at) {
            (Some(index), _) => FrameSelection::Single(FrameSelector::Index(index)),
            (None, Some(ns)) => FrameSelection::Single(FrameSelector::Timestamp(ns)),
            (None, None) => FrameSelection::All,
        };

        let mut options = ConvertOptions::default().with_parallel(self.parallel);
        if let Some(n) = self.threads {
            options = options.with_threads(n);
        }

        let (store, provider) = self.source.open()?;
        let summary = BatchConverter::new(store.as_ref(), provider, options)
            .with_progress(|outcome, pos, total| println!("{}", outcome.progress_line(pos, total)))
            .run(&self.source.lidar_name, selection, &self.out_dir, &formats)?;

        println!("{summary}");
        Ok(())
    }
}
