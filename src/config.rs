//! Runtime configuration: the id universe plus geometry and timing knobs.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::defaults;
use crate::errors::ConfigError;
use crate::model::{AnchorId, TagId, Universe};
use crate::types::positive_finite;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub anchors: Vec<String>,
    pub tags: Vec<String>,
    pub anchor_size: f64,
    pub distance_scale: f64,
    pub proximity_threshold: f64,
    pub sample_step: f64,
    pub sample_offset: f64,
    pub grid_size: f64,
    pub poll_interval_ms: u64,
    pub frame_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anchors: defaults::ANCHOR_IDS.iter().map(|s| s.to_string()).collect(),
            tags: defaults::TAG_IDS.iter().map(|s| s.to_string()).collect(),
            anchor_size: defaults::ANCHOR_SIZE,
            distance_scale: defaults::DISTANCE_SCALE,
            proximity_threshold: defaults::PROXIMITY_THRESHOLD,
            sample_step: defaults::SAMPLE_STEP,
            sample_offset: defaults::SAMPLE_OFFSET,
            grid_size: defaults::GRID_SIZE,
            poll_interval_ms: defaults::POLL_INTERVAL_MS,
            frame_interval_ms: defaults::FRAME_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Config, ConfigError> {
        let config: Config =
            serde_json::from_str(text).map_err(|source| ConfigError::InvalidJson { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Config::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ids("anchor", &self.anchors)?;
        check_ids("tag", &self.tags)?;

        let fields = [
            ("anchor_size", self.anchor_size),
            ("distance_scale", self.distance_scale),
            ("proximity_threshold", self.proximity_threshold),
            ("sample_step", self.sample_step),
            ("sample_offset", self.sample_offset),
            ("grid_size", self.grid_size),
            ("poll_interval_ms", self.poll_interval_ms as f64),
            ("frame_interval_ms", self.frame_interval_ms as f64),
        ];
        for (field, value) in fields {
            positive_finite(value).map_err(|source| ConfigError::InvalidValue { field, source })?;
        }
        Ok(())
    }

    pub fn universe(&self) -> Universe {
        Universe::new(
            self.anchors.iter().map(AnchorId::new).collect(),
            self.tags.iter().map(TagId::new).collect(),
        )
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

fn check_ids(kind: &'static str, ids: &[String]) -> Result<(), ConfigError> {
    if ids.is_empty() {
        return Err(ConfigError::EmptyUniverse { kind });
    }
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(ConfigError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(())
}
