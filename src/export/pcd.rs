// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binary PCD v0.7 encoding.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::lidar::PointCloud;

/// PCD header for `n` XYZI float points, newline terminated.
pub fn pcd_header(n: usize) -> String {
    format!(
        "# .PCD v0.7 - Point Cloud Data file format\n\
         VERSION 0.7\n\
         FIELDS x y z intensity\n\
         SIZE 4 4 4 4\n\
         TYPE F F F F\n\
         COUNT 1 1 1 1\n\
         WIDTH {n}\n\
         HEIGHT 1\n\
         VIEWPOINT 0 0 0 1 0 0 0\n\
         POINTS {n}\n\
         DATA binary\n"
    )
}

/// Write the ASCII header followed by little-endian `x y z intensity` rows.
pub fn write_pcd<W: Write>(writer: &mut W, cloud: &PointCloud) -> std::io::Result<()> {
    writer.write_all(pcd_header(cloud.len()).as_bytes())?;
    write_xyzi(writer, cloud)
}

/// Write the raw XYZI payload shared by PCD and 4-column bin files.
pub(crate) fn write_xyzi<W: Write>(writer: &mut W, cloud: &PointCloud) -> std::io::Result<()> {
    for point in cloud.points() {
        for value in point.to_array() {
            writer.write_f32::<LittleEndian>(value)?;
        }
    }
    Ok(())
}
