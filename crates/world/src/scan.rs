//! Rectangular chunk-range dungeon scans.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::storage::World;

/// Largest chunk coordinate magnitude a scan may touch; block coordinates stay inside `i32`.
pub const MAX_SCAN_CHUNK: i32 = (i32::MAX >> 4) - 16;

/// Errors returned when building a scan region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("scan region is empty: x {min_x}..{max_x}, z {min_z}..{max_z}")]
    Empty {
        min_x: i32,
        min_z: i32,
        max_x: i32,
        max_z: i32,
    },
    #[error("chunk coordinate {0} is outside the scannable range")]
    OutOfBounds(i32),
}

/// Half-open chunk range `[min_x, max_x) × [min_z, max_z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRegion {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

impl ScanRegion {
    pub fn new(min_x: i32, min_z: i32, max_x: i32, max_z: i32) -> Result<Self, ScanError> {
        if min_x >= max_x || min_z >= max_z {
            return Err(ScanError::Empty {
                min_x,
                min_z,
                max_x,
                max_z,
            });
        }
        if let Some(&bad) = [min_x, min_z, max_x, max_z]
            .iter()
            .find(|c| !(-MAX_SCAN_CHUNK..=MAX_SCAN_CHUNK).contains(*c))
        {
            return Err(ScanError::OutOfBounds(bad));
        }
        Ok(Self {
            min_x,
            min_z,
            max_x,
            max_z,
        })
    }

    /// Square region `[-radius, radius)²` around the origin.
    pub fn around_origin(radius: i32) -> Result<Self, ScanError> {
        Self::new(-radius, -radius, radius, radius)
    }

    /// Number of chunks searched.
    pub fn chunk_count(&self) -> u64 {
        (self.max_x - self.min_x) as u64 * (self.max_z - self.min_z) as u64
    }

    /// Chunk coordinates in scan order: x outer, z inner.
    pub fn chunks(&self) -> impl Iterator<Item = (i32, i32)> {
        let (min_z, max_z) = (self.min_z, self.max_z);
        (self.min_x..self.max_x).flat_map(move |x| (min_z..max_z).map(move |z| (x, z)))
    }
}

/// One dungeon found by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonReport {
    pub chunk_x: i32,
    pub chunk_z: i32,
    /// Minimum x corner of the room's outer wall.
    pub x: i32,
    /// Minimum z corner of the room's outer wall.
    pub z: i32,
}

/// Search every chunk of `region`, returning found dungeons in scan order.
#[instrument(skip(world), fields(seed = world.seed()))]
pub fn scan_region(world: &mut World, region: ScanRegion) -> Vec<DungeonReport> {
    let mut reports = Vec::new();
    for (chunk_x, chunk_z) in region.chunks() {
        if let Some((x, z)) = world.find_dungeon(chunk_x, chunk_z).position() {
            reports.push(DungeonReport {
                chunk_x,
                chunk_z,
                x,
                z,
            });
        }
    }
    info!(
        chunks = region.chunk_count(),
        generated = world.len(),
        found = reports.len(),
        "scan finished"
    );
    reports
}
