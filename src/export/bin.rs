// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Headerless float32 point files.
//!
//! Two layouts are produced side by side:
//! - `bin/`: five columns `x y z intensity 0` (nuScenes style)
//! - `bin_k/`: four columns `x y z intensity` (KITTI style)

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::lidar::PointCloud;

use super::pcd::write_xyzi;

/// Column layout of a bin file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinLayout {
    /// XYZI plus a zero fifth column
    Padded,
    /// XYZI only
    Kitti,
}

impl BinLayout {
    /// Both layouts, in write order.
    pub const ALL: [BinLayout; 2] = [BinLayout::Padded, BinLayout::Kitti];

    /// Floats per point.
    pub fn columns(&self) -> usize {
        match self {
            BinLayout::Padded => 5,
            BinLayout::Kitti => 4,
        }
    }

    /// Output subdirectory name.
    pub fn dir_name(&self) -> &'static str {
        match self {
            BinLayout::Padded => "bin",
            BinLayout::Kitti => "bin_k",
        }
    }
}

/// Write every point as little-endian f32 columns.
pub fn write_bin<W: Write>(
    writer: &mut W,
    cloud: &PointCloud,
    layout: BinLayout,
) -> std::io::Result<()> {
    match layout {
        BinLayout::Kitti => write_xyzi(writer, cloud),
        BinLayout::Padded => {
            for point in cloud.points() {
                for value in point.to_array() {
                    writer.write_f32::<LittleEndian>(value)?;
                }
                writer.write_f32::<LittleEndian>(0.0)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lidar::Point;

    fn cloud() -> PointCloud {
        PointCloud::new(
            vec![
                Point::new(1.0, 2.0, 3.0, 0.5),
                Point::new(-1.0, -2.0, -3.0, 1.0),
                Point::new(0.1, 0.2, 0.3, 0.0),
            ],
            42,
        )
    }

    #[test]
    fn test_padded_layout() {
        let mut buf = Vec::new();
        write_bin(&mut buf, &cloud(), BinLayout::Padded).unwrap();
        assert_eq!(buf.len(), 3 * 20);
        for row in buf.chunks(20) {
            assert_eq!(&row[16..20], &0.0f32.to_le_bytes());
        }
        assert_eq!(&buf[20..24], &(-1.0f32).to_le_bytes());
    }

    #[test]
    fn test_kitti_layout() {
        let mut buf = Vec::new();
        write_bin(&mut buf, &cloud(), BinLayout::Kitti).unwrap();
        assert_eq!(buf.len(), 3 * 16);
        assert_eq!(&buf[12..16], &0.5f32.to_le_bytes());
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(BinLayout::Padded.dir_name(), "bin");
        assert_eq!(BinLayout::Kitti.dir_name(), "bin_k");
        assert_eq!(BinLayout::Padded.columns(), 5);
    }
}
