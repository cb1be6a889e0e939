use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Recorder settings. Simulation-side toggles (team spawns, beacons, game
/// mode) come from the host instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Arms the recorder at construction, as if `wdlstats <dir>` had run.
    pub log_dir: Option<PathBuf>,
    /// Record file names are `<prefix><timestamp>.log`.
    pub file_prefix: String,
    /// Events shown by `wdlinfo tail`.
    pub tail_len: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            file_prefix: "wdl_".to_string(),
            tail_len: 10,
        }
    }
}

impl RecorderConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
