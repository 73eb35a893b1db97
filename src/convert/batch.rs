// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Batch frame conversion.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::{Pc5Error, Result};
use crate::export::{ExportFormatSet, Exporter};
use crate::io::traits::SensorDataStore;
use crate::lidar::{CalibrationProvider, FrameReader, FrameSelection, FrameSequence};

use super::{BatchSummary, ConvertOptions, FrameOutcome, SkipReason};

/// Progress callback: frame outcome, 1-based position, total frames.
pub type ProgressFn<'a> = Box<dyn Fn(&FrameOutcome, usize, usize) + Send + Sync + 'a>;

/// Drives read, normalize and export over a frame selection.
///
/// # Example
///
/// ```rust,no_run
/// use pc5codec::convert::{BatchConverter, ConvertOptions};
/// use pc5codec::export::ExportFormatSet;
/// use pc5codec::lidar::{CalibrationProvider, FrameSelection};
/// use pc5codec::SensorRegistry;
///
/// let store = pc5codec::io::open_store("drive.pc5")?;
/// let provider = CalibrationProvider::new(SensorRegistry::builtin());
/// let summary = BatchConverter::new(store.as_ref(), provider, ConvertOptions::default())
///     .run("top", FrameSelection::All, "exports", &ExportFormatSet::all())?;
/// println!("{summary}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct BatchConverter<'a> {
    store: &'a dyn SensorDataStore,
    provider: CalibrationProvider,
    options: ConvertOptions,
    progress: Option<ProgressFn<'a>>,
}

impl<'a> BatchConverter<'a> {
    /// Create a converter over an open store.
    pub fn new(
        store: &'a dyn SensorDataStore,
        provider: CalibrationProvider,
        options: ConvertOptions,
    ) -> Self {
        Self {
            store,
            provider,
            options,
            progress: None,
        }
    }

    /// Report every frame outcome, in frame order, as it is tallied.
    pub fn with_progress<F>(mut self, progress: F) -> Self
    where
        F: Fn(&FrameOutcome, usize, usize) + Send + Sync + 'a,
    {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Conversion options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert the selected frames of `sensor_id` into `out_dir`.
    ///
    /// Frames without valid points are skipped and counted, never fatal.
    ///
    /// # Errors
    ///
    /// - `UnknownSensor`, `NotFound` or `ShapeMismatch` while loading the
    ///   sensor, before any frame is touched
    /// - `OutOfRange` if a single selected frame does not exist
    /// - `Io` if an output cannot be written; the run stops there
    pub fn run(
        &self,
        sensor_id: &str,
        selection: FrameSelection,
        out_dir: impl AsRef<Path>,
        formats: &ExportFormatSet,
    ) -> Result<BatchSummary> {
        let out_dir = out_dir.as_ref();
        let sensor = self.provider.sensor(sensor_id)?;
        let calibration = self.provider.calibration(self.store, sensor_id)?;
        let sequence = FrameSequence::open(self.store, sensor)?;
        let reader = FrameReader::new(&sequence, &calibration)?;
        let indices = sequence.indices(selection)?;

        let scope = match selection {
            FrameSelection::All => "all frames".to_string(),
            FrameSelection::Single(_) => format!("frame {}", indices[0]),
        };

        fs::create_dir_all(out_dir)
            .map_err(|e| Pc5Error::io(out_dir.display().to_string(), e))?;
        let exporter = Exporter::new(out_dir, formats.clone());

        info!(
            source = %self.store.path(),
            sensor = sensor_id,
            selection = %selection,
            frames = indices.len(),
            formats = %formats,
            parallel = self.options.parallel,
            "starting export"
        );

        let mut summary = BatchSummary::new(scope, out_dir, indices.len());

        if self.options.parallel && indices.len() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.num_threads.unwrap_or(0))
                .thread_name(|index| format!("pc5-export-{index}"))
                .build()
                .map_err(|e| {
                    Pc5Error::invalid_argument("threads", format!("cannot build thread pool: {e}"))
                })?;

            let results: Vec<Result<FrameOutcome>> = pool.install(|| {
                indices
                    .par_iter()
                    .map(|&index| convert_frame(&reader, &exporter, index))
                    .collect()
            });

            for result in results {
                self.tally(&mut summary, result?);
            }
        } else {
            for &index in &indices {
                let outcome = convert_frame(&reader, &exporter, index)?;
                self.tally(&mut summary, outcome);
            }
        }

        info!(
            exported = summary.exported,
            attempted = summary.attempted,
            skipped = summary.skipped,
            "export finished"
        );

        Ok(summary)
    }

    fn tally(&self, summary: &mut BatchSummary, outcome: FrameOutcome) {
        summary.record(outcome);
        if let (Some(progress), Some(last)) = (&self.progress, summary.frames.last()) {
            progress(last, summary.frames.len(), summary.attempted);
        }
    }
}

impl std::fmt::Debug for BatchConverter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchConverter")
            .field("store", &self.store.path())
            .field("options", &self.options)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Read, normalize and export one frame.
fn convert_frame(reader: &FrameReader<'_>, exporter: &Exporter, index: usize) -> Result<FrameOutcome> {
    let frame = reader.read(index)?;

    let Some(cloud) = frame.normalize() else {
        info!(frame = index, "no valid points, skipping");
        return Ok(FrameOutcome::Skipped {
            index,
            reason: SkipReason::NoValidPoints,
        });
    };

    match exporter.export(&cloud)? {
        Some(exported) => {
            debug!(frame = index, stem = %exported.stem, "frame converted");
            Ok(FrameOutcome::Exported {
                index,
                stem: exported.stem,
                point_count: exported.point_count,
            })
        }
        None => {
            info!(frame = index, "nothing written, skipping");
            Ok(FrameOutcome::Skipped {
                index,
                reason: SkipReason::EmptyAfterExport,
            })
        }
    }
}
