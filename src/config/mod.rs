// ABOUTME: Configuration types and parsing for skafos.yml.
// ABOUTME: Engine socket override and the acquisition timeout; missing file means defaults.

use crate::engine::EngineConfig;
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "skafos.yml";
pub const CONFIG_FILENAME_ALT: &str = "skafos.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Engine runtime/socket override.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Budget for a single pull or build, e.g. "10m". Unset means no limit.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Config {
    /// Look for a config file in `dir`; absence is not an error.
    pub fn discover(dir: &Path) -> Result<Self> {
        for filename in [CONFIG_FILENAME, CONFIG_FILENAME_ALT] {
            let candidate = dir.join(filename);
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        Ok(Self::default())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}
