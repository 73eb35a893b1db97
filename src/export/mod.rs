// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Point cloud file export.
//!
//! An [`Exporter`] is configured once with an output directory and a
//! validated [`ExportFormatSet`], then writes each frame to:
//!
//! ```text
//! <out>/pcd/<stem>.pcd
//! <out>/bin/<stem>.bin     (5 columns)
//! <out>/bin_k/<stem>.bin   (4 columns)
//! <out>/csv/<stem>.csv
//! ```
//!
//! where `<stem>` is `"<secs>.<nsecs:09>"` of the frame timestamp. Existing
//! files are truncated, so re-exporting a frame is idempotent.

pub mod bin;
pub mod csv;
pub mod pcd;

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{ExportFormat, Pc5Error, Result};
use crate::lidar::PointCloud;

pub use bin::{write_bin, BinLayout};
pub use csv::{write_csv, write_timestamps, CSV_HEADER, TIMESTAMPS_HEADER};
pub use pcd::{pcd_header, write_pcd};

/// A non-empty set of output formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFormatSet {
    formats: BTreeSet<ExportFormat>,
}

impl Default for ExportFormatSet {
    fn default() -> Self {
        Self::all()
    }
}

impl ExportFormatSet {
    /// Every supported format.
    pub fn all() -> Self {
        Self {
            formats: ExportFormat::ALL.into_iter().collect(),
        }
    }

    /// Build from explicit formats.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `formats` is empty.
    pub fn new(formats: impl IntoIterator<Item = ExportFormat>) -> Result<Self> {
        let formats: BTreeSet<_> = formats.into_iter().collect();
        if formats.is_empty() {
            return Err(Pc5Error::invalid_argument(
                "formats",
                "at least one format is required",
            ));
        }
        Ok(Self { formats })
    }

    /// Parse a comma separated list such as `"pcd,bin"`.
    ///
    /// Tokens are trimmed and case-insensitive; blank tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming every unrecognized token, or if no
    /// token remains.
    pub fn parse_list(list: &str) -> Result<Self> {
        let tokens: Vec<String> = list
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let mut formats = BTreeSet::new();
        let mut unknown = Vec::new();
        for token in tokens {
            match token.parse::<ExportFormat>() {
                Ok(format) => {
                    formats.insert(format);
                }
                Err(_) => unknown.push(token),
            }
        }

        if !unknown.is_empty() {
            let valid = ExportFormat::ALL.iter().map(|f| f.to_string()).collect();
            return Err(Pc5Error::unknown_format(unknown, valid));
        }
        Self::new(formats)
    }

    /// Resolve the format selection from a list argument and boolean flags.
    ///
    /// With neither given, every format is selected. Giving both is rejected.
    pub fn resolve(list: Option<&str>, pcd: bool, bin: bool, csv: bool) -> Result<Self> {
        let any_flag = pcd || bin || csv;
        match list {
            Some(_) if any_flag => Err(Pc5Error::invalid_argument(
                "formats",
                "a format list cannot be combined with --to-pcd/--to-bin/--to-csv",
            )),
            Some(list) => Self::parse_list(list),
            None if any_flag => {
                let flags = [
                    (pcd, ExportFormat::Pcd),
                    (bin, ExportFormat::Bin),
                    (csv, ExportFormat::Csv),
                ];
                Self::new(flags.into_iter().filter(|(on, _)| *on).map(|(_, f)| f))
            }
            None => Ok(Self::all()),
        }
    }

    /// Whether `format` is selected.
    pub fn contains(&self, format: ExportFormat) -> bool {
        self.formats.contains(&format)
    }

    /// Selected formats, ordered.
    pub fn iter(&self) -> impl Iterator<Item = ExportFormat> + '_ {
        self.formats.iter().copied()
    }

    /// Number of selected formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Whether no format is selected.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl std::fmt::Display for ExportFormatSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.formats.iter().map(|f| f.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

/// Files written for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFrame {
    /// Filename stem shared by every output
    pub stem: String,
    /// Points written per file
    pub point_count: usize,
    /// Written paths, in write order
    pub files: Vec<PathBuf>,
}

/// Writes point clouds into the per-format directory layout.
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
    formats: ExportFormatSet,
}

impl Exporter {
    /// Create an exporter rooted at `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>, formats: ExportFormatSet) -> Self {
        Self {
            out_dir: out_dir.into(),
            formats,
        }
    }

    /// Output root.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Selected formats.
    pub fn formats(&self) -> &ExportFormatSet {
        &self.formats
    }

    /// Path of one output file.
    pub fn output_path(&self, dir_name: &str, stem: &str, extension: &str) -> PathBuf {
        self.out_dir.join(dir_name).join(format!("{stem}.{extension}"))
    }

    /// Write `cloud` in every selected format.
    ///
    /// Returns `Ok(None)` without touching the file system when the cloud has
    /// no points.
    ///
    /// # Errors
    ///
    /// Returns `Io` if a directory or file cannot be written. Files written
    /// before the failure are left in place.
    pub fn export(&self, cloud: &PointCloud) -> Result<Option<ExportedFrame>> {
        if cloud.is_empty() {
            return Ok(None);
        }

        let stem = cloud.stem();
        let mut files = Vec::new();

        if self.formats.contains(ExportFormat::Pcd) {
            let path = self.output_path("pcd", &stem, "pcd");
            write_file(&path, |w| write_pcd(w, cloud))?;
            files.push(path);
        }
        if self.formats.contains(ExportFormat::Bin) {
            for layout in BinLayout::ALL {
                let path = self.output_path(layout.dir_name(), &stem, "bin");
                write_file(&path, |w| write_bin(w, cloud, layout))?;
                files.push(path);
            }
        }
        if self.formats.contains(ExportFormat::Csv) {
            let path = self.output_path("csv", &stem, "csv");
            write_file(&path, |w| write_csv(w, cloud))?;
            files.push(path);
        }

        debug!(stem = %stem, points = cloud.len(), files = files.len(), "exported frame");

        Ok(Some(ExportedFrame {
            stem,
            point_count: cloud.len(),
            files,
        }))
    }
}

/// Create `path` (and its parent directories) and fill it through a buffered writer.
pub(crate) fn write_file<F>(path: &Path, encode: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let context = || path.display().to_string();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Pc5Error::io(context(), e))?;
    }
    let file = File::create(path).map_err(|e| Pc5Error::io(context(), e))?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer).map_err(|e| Pc5Error::io(context(), e))?;
    writer.flush().map_err(|e| Pc5Error::io(context(), e))?;
    Ok(())
}
