use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::warn;

use dungeonfinder_world::ScanRegion;

pub const DEFAULT_CONFIG_PATH: &str = "dungeonfinder.toml";

/// Scan settings read from TOML; every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub seed: u64,
    /// Chunk range, half-open on the max side.
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
    /// Optional JSON-lines output file, one record per dungeon.
    pub jsonl: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            seed: 46290,
            min_x: -5,
            min_z: -5,
            max_x: 5,
            max_z: 5,
            jsonl: None,
        }
    }
}

impl ScanConfig {
    /// Load from `path`. A missing file yields defaults; an unreadable or malformed one is an
    /// error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("{} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn region(&self) -> Result<ScanRegion> {
        ScanRegion::new(self.min_x, self.min_z, self.max_x, self.max_z)
            .context("Invalid scan region")
    }
}
