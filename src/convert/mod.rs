// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Batch conversion of lidar frames into point cloud files.
//!
//! # Architecture
//!
//! - [`BatchConverter`] - Iterates a frame selection and drives each frame
//!   through read, normalize and export
//! - [`ConvertOptions`] - Sequential or thread-pool execution
//! - [`BatchSummary`] - Per-frame outcomes and exported/attempted counts

pub mod batch;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::Result;
use crate::export::write_timestamps;
use crate::lidar::FrameSequence;

pub use batch::{BatchConverter, ProgressFn};

/// Options for a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Convert frames on a rayon thread pool
    pub parallel: bool,

    /// Pool size; `None` lets rayon choose
    pub num_threads: Option<usize>,
}

impl ConvertOptions {
    /// Enable or disable parallel conversion.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the pool size. Implies parallel conversion.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.parallel = true;
        self.num_threads = Some(num_threads);
        self
    }
}

/// Why a frame produced no files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Every beam had zero range
    NoValidPoints,
    /// Points were assembled but the exporter wrote nothing
    EmptyAfterExport,
}

/// Result of converting one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Files were written
    Exported {
        index: usize,
        stem: String,
        point_count: usize,
    },
    /// Frame was skipped
    Skipped { index: usize, reason: SkipReason },
}

impl FrameOutcome {
    /// Frame index.
    pub fn index(&self) -> usize {
        match self {
            FrameOutcome::Exported { index, .. } | FrameOutcome::Skipped { index, .. } => *index,
        }
    }

    /// Whether files were written.
    pub fn is_exported(&self) -> bool {
        matches!(self, FrameOutcome::Exported { .. })
    }

    /// One-line progress report for position `pos` (1-based) of `total`.
    pub fn progress_line(&self, pos: usize, total: usize) -> String {
        match self {
            FrameOutcome::Exported {
                index,
                stem,
                point_count,
            } => format!("{pos}/{total}  frame={index} -> {stem}   ({point_count} pts)"),
            FrameOutcome::Skipped {
                index,
                reason: SkipReason::NoValidPoints,
            } => format!(" {index}: no valid points"),
            FrameOutcome::Skipped {
                index,
                reason: SkipReason::EmptyAfterExport,
            } => format!(" {index}: zero after"),
        }
    }
}

/// Tally of a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Frames with files written
    pub exported: usize,
    /// Frames selected
    pub attempted: usize,
    /// Frames skipped
    pub skipped: usize,
    /// `"all frames"` or `"frame <N>"`
    pub scope: String,
    /// Output root
    pub out_dir: PathBuf,
    /// Outcomes in frame order
    pub frames: Vec<FrameOutcome>,
}

impl BatchSummary {
    pub(crate) fn new(scope: impl Into<String>, out_dir: &Path, attempted: usize) -> Self {
        Self {
            exported: 0,
            attempted,
            skipped: 0,
            scope: scope.into(),
            out_dir: out_dir.to_path_buf(),
            frames: Vec::with_capacity(attempted),
        }
    }

    pub(crate) fn record(&mut self, outcome: FrameOutcome) {
        if outcome.is_exported() {
            self.exported += 1;
        } else {
            self.skipped += 1;
        }
        self.frames.push(outcome);
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exported {}/{} ({}) to {}",
            self.exported,
            self.attempted,
            self.scope,
            self.out_dir.display()
        )
    }
}

/// Write the raw frame timestamps of `sequence` as a one-column CSV.
///
/// Returns the number of timestamps written.
pub fn export_timestamps(sequence: &FrameSequence<'_>, path: impl AsRef<Path>) -> Result<usize> {
    let timestamps = sequence.timestamps();
    crate::export::write_file(path.as_ref(), |w| write_timestamps(w, timestamps))?;
    Ok(timestamps.len())
}
