use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Invalid config file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("sensorsNames was an empty list in '{0}'")]
    NoSensors(PathBuf),
}

/// Fetch-and-graph request, loaded from a JSON config file:
///
/// ```json
/// {
///     "days": 7,
///     "sensorsNames": ["sds011_43258", "dht22_43259"],
///     "dataToGraph": [["sds011", "P1"], ["dht22", "temperature"]]
/// }
/// ```
///
/// `days` is how far back from today to fetch, `dataToGraph` pairs a sensor
/// category with the CSV column to chart for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchConfig {
    pub days: u64,
    pub sensors_names: Vec<String>,
    pub data_to_graph: Vec<(String, String)>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            days: 1,
            sensors_names: Vec::new(),
            data_to_graph: Vec::new(),
        }
    }
}

impl FetchConfig {
    /// Loads and validates a config file. A config without any sensors has
    /// nothing to fetch and is rejected here, before the batch starts.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config: FetchConfig = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        if config.sensors_names.is_empty() {
            return Err(ConfigError::NoSensors(path.to_path_buf()));
        }
        Ok(config)
    }
}
