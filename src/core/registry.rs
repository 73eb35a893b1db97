// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sensor registry mapping sensor identifiers to their static configuration.
//!
//! The registry is built once at process start (from the built-in table or a
//! TOML file) and passed by reference to the calibration provider. Adding a
//! sensor never requires touching reader logic.
//!
//! # TOML layout
//!
//! ```toml
//! [[sensors]]
//! id = "top"
//! time_offset = 0.0
//! topic = "/ouster"
//! ```
//!
//! `msgtime-offset` and `ouster-packet-ros-topic` are accepted as aliases for
//! `time_offset` and `topic`. A sensor may give `group` directly instead of a
//! topic.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::error::{Pc5Error, Result};

/// Identifier of the built-in sensor.
pub const DEFAULT_SENSOR: &str = "top";

/// Static configuration of one lidar sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorConfig {
    /// Sensor identifier (e.g., "top")
    pub id: String,
    /// Offset subtracted from message times, in seconds
    pub time_offset: f64,
    /// Group path holding this sensor's arrays inside the data source
    pub group: String,
}

impl SensorConfig {
    /// Create a config from a ROS topic; the group path is the topic without
    /// leading or trailing slashes.
    pub fn from_topic(id: impl Into<String>, topic: &str) -> Self {
        Self {
            id: id.into(),
            time_offset: 0.0,
            group: topic.trim_matches('/').to_string(),
        }
    }

    /// Set the time offset.
    pub fn with_time_offset(mut self, seconds: f64) -> Self {
        self.time_offset = seconds;
        self
    }
}

#[derive(Debug, Deserialize)]
struct SensorFile {
    #[serde(default)]
    sensors: Vec<SensorEntry>,
}

#[derive(Debug, Deserialize)]
struct SensorEntry {
    id: String,
    #[serde(default, alias = "msgtime-offset")]
    time_offset: f64,
    #[serde(default, alias = "ouster-packet-ros-topic")]
    topic: Option<String>,
    #[serde(default)]
    group: Option<String>,
}

impl SensorEntry {
    fn into_config(self) -> Result<SensorConfig> {
        let group = match (self.group, self.topic) {
            (Some(group), _) => group.trim_matches('/').to_string(),
            (None, Some(topic)) => topic.trim_matches('/').to_string(),
            (None, None) => {
                return Err(Pc5Error::config(format!(
                    "sensor '{}' needs either 'topic' or 'group'",
                    self.id
                )))
            }
        };
        if group.is_empty() {
            return Err(Pc5Error::config(format!(
                "sensor '{}' has an empty group path",
                self.id
            )));
        }
        Ok(SensorConfig {
            id: self.id,
            time_offset: self.time_offset,
            group,
        })
    }
}

/// Mapping from sensor identifier to [`SensorConfig`].
#[derive(Debug, Clone, Default)]
pub struct SensorRegistry {
    sensors: BTreeMap<String, SensorConfig>,
}

impl SensorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in sensor table.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(SensorConfig::from_topic(DEFAULT_SENSOR, "/ouster"));
        registry
    }

    /// Parse a registry from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: SensorFile =
            toml::from_str(text).map_err(|e| Pc5Error::config(e.to_string()))?;

        let mut registry = Self::new();
        for entry in file.sensors {
            let config = entry.into_config()?;
            if registry.contains(&config.id) {
                return Err(Pc5Error::config(format!(
                    "sensor '{}' is defined more than once",
                    config.id
                )));
            }
            registry.register(config);
        }

        if registry.is_empty() {
            return Err(Pc5Error::config("no sensors defined"));
        }
        Ok(registry)
    }

    /// Load a registry from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Pc5Error::io(format!("reading {}", path.display()), e))?;
        Self::from_toml_str(&text)
    }

    /// Register a sensor, replacing any previous entry with the same id.
    pub fn register(&mut self, config: SensorConfig) {
        self.sensors.insert(config.id.clone(), config);
    }

    /// Look up a sensor by id.
    pub fn get(&self, id: &str) -> Result<&SensorConfig> {
        self.sensors
            .get(id)
            .ok_or_else(|| Pc5Error::unknown_sensor(id))
    }

    /// Check if a sensor is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.sensors.contains_key(id)
    }

    /// Registered sensor ids, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.sensors.keys().map(String::as_str).collect()
    }

    /// Number of registered sensors.
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}
