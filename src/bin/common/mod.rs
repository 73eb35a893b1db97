// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::{Path, PathBuf};

use clap::Args;
use pc5codec::{CalibrationProvider, SensorDataStore, SensorRegistry, DEFAULT_SENSOR};
use tracing_subscriber::EnvFilter;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "pc5codec=warn";

/// Log filter used with `--verbose`.
const VERBOSE_FILTER: &str = "pc5codec=debug";

/// Arguments shared by every command that reads a sensor group.
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// PC5 container to read
    #[arg(long, alias = "pc5_path", value_name = "FILE")]
    pub pc5_path: PathBuf,

    /// Sensor identifier
    #[arg(long, alias = "lidar_name", default_value = DEFAULT_SENSOR)]
    pub lidar_name: String,

    /// TOML sensor table replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub sensors: Option<PathBuf>,
}

impl SourceArgs {
    /// Open the container and build the calibration provider.
    pub fn open(&self) -> Result<(Box<dyn SensorDataStore>, CalibrationProvider)> {
        open_source(&self.pc5_path, self.sensors.as_deref())
    }
}

/// Open a container and build a calibration provider from the sensor table.
///
/// The sensor table is loaded first so a bad table fails before the
/// container is mapped.
pub fn open_source(
    path: &Path,
    sensors: Option<&Path>,
) -> Result<(Box<dyn SensorDataStore>, CalibrationProvider)> {
    let registry = load_registry(sensors)?;
    let store = pc5codec::open_store(path)?;
    Ok((store, CalibrationProvider::new(registry)))
}

/// Install the stderr tracing subscriber.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the sensor table from `path`, or the built-in table.
pub fn load_registry(path: Option<&Path>) -> Result<SensorRegistry> {
    Ok(match path {
        Some(path) => SensorRegistry::load(path)?,
        None => SensorRegistry::builtin(),
    })
}

/// Format a duration in nanoseconds to human-readable string.
pub fn format_duration(nanos: u64) -> String {
    let secs = nanos / 1_000_000_000;
    let millis = (nanos % 1_000_000_000) / 1_000_000;

    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{secs}.{millis:03}s")
    } else {
        format!("{millis}ms")
    }
}

/// Format a timestamp in nanoseconds as UTC with millisecond precision.
pub fn format_timestamp(nanos: u64) -> String {
    let secs = (nanos / 1_000_000_000) as i64;
    let subsec = (nanos % 1_000_000_000) as u32;

    match chrono::DateTime::<chrono::Utc>::from_timestamp(secs, subsec) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
        None => format!("{nanos} ns"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(500_000_000), "500ms");
        assert_eq!(format_duration(1_500_000_000), "1.500s");
        assert_eq!(format_duration(90_000_000_000), "1m 30s");
        assert_eq!(format_duration(3_600_000_000_000), "1h 0m");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00.000 UTC");
        assert_eq!(
            format_timestamp(1_700_000_000_250_000_000),
            "2023-11-14 22:13:20.250 UTC"
        );
    }

    #[test]
    fn test_builtin_registry() {
        let registry = load_registry(None).unwrap();
        assert!(registry.contains(DEFAULT_SENSOR));
    }
}
