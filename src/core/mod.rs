// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout pc5codec.
//!
//! This module provides the foundational types for the library:
//! - [`Pc5Error`] - Error handling
//! - [`SensorRegistry`] - Sensor identifier to configuration mapping
//! - [`ExportFormat`] - Point cloud output format identifier

pub mod error;
pub mod registry;

pub use error::{Pc5Error, Result};
pub use registry::{SensorConfig, SensorRegistry, DEFAULT_SENSOR};

/// Point cloud output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExportFormat {
    /// Binary PCD v0.7
    Pcd,
    /// Headerless float32 arrays (5-column and 4-column KITTI variants)
    Bin,
    /// Comma separated text
    Csv,
}

/// Error returned when parsing an `ExportFormat` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseExportFormatError {
    _private: (),
}

impl std::fmt::Display for ParseExportFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid export format, expected 'pcd', 'bin', or 'csv'")
    }
}

impl std::error::Error for ParseExportFormatError {}

impl std::str::FromStr for ExportFormat {
    type Err = ParseExportFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pcd" => Ok(ExportFormat::Pcd),
            "bin" => Ok(ExportFormat::Bin),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(ParseExportFormatError { _private: () }),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ExportFormat {
    /// All supported formats.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pcd, ExportFormat::Bin, ExportFormat::Csv];

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pcd => "pcd",
            ExportFormat::Bin => "bin",
            ExportFormat::Csv => "csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("pcd".parse::<ExportFormat>(), Ok(ExportFormat::Pcd));
        assert_eq!(" BIN ".parse::<ExportFormat>(), Ok(ExportFormat::Bin));
        assert_eq!("csv".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert!("xyz".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        let names: Vec<String> = ExportFormat::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, vec!["pcd", "bin", "csv"]);
    }
}
