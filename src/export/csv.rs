// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Comma separated point text.

use std::io::Write;

use crate::lidar::PointCloud;

/// Header line of point CSV files.
pub const CSV_HEADER: &str = "x,y,z,i";

/// Header line of timestamp CSV files.
pub const TIMESTAMPS_HEADER: &str = "msgtimes_ns";

/// Write the header and one `x,y,z,i` row per point, six decimals each.
pub fn write_csv<W: Write>(writer: &mut W, cloud: &PointCloud) -> std::io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for p in cloud.points() {
        writeln!(
            writer,
            "{:.6},{:.6},{:.6},{:.6}",
            p.x as f64, p.y as f64, p.z as f64, p.intensity as f64
        )?;
    }
    Ok(())
}

/// Write raw frame timestamps, one integer per line.
pub fn write_timestamps<W: Write>(writer: &mut W, timestamps: &[u64]) -> std::io::Result<()> {
    writeln!(writer, "{TIMESTAMPS_HEADER}")?;
    for ts in timestamps {
        writeln!(writer, "{ts}")?;
    }
    Ok(())
}
