//! Deterministic reproduction of legacy beta-era terrain generation, down to the dungeon
//! placement pass.
//!
//! Chunks are produced by a fixed pipeline (climate noise, density terrain, cave carving) and
//! cached per world; dungeon queries validate candidate rooms against that terrain.

pub mod biome;
mod biome_table;
pub mod caves;
pub mod chunk;
pub mod dungeon;
pub mod generator;
pub mod noise;
pub mod scan;
pub mod storage;
pub mod terrain;

pub use biome::{Biome, BiomeGrid, BiomeNoises};
pub use caves::CaveCarver;
pub use chunk::*;
pub use dungeon::{room_is_valid, BlockSource, DungeonResult, DungeonSearch};
pub use generator::ChunkGenerator;
pub use noise::{OctaveSet, PermutationTable};
pub use scan::{scan_region, DungeonReport, ScanError, ScanRegion};
pub use storage::World;
pub use terrain::{TerrainBuilder, TerrainNoises, SEA_LEVEL};

/// Create an empty chunk store for `seed`.
pub fn create_world(seed: u64) -> World {
    World::new(seed)
}

/// Report whether chunk `(chunk_x, chunk_z)` contains a dungeon, and where.
///
/// Generates any chunk the validation touches, so repeated queries get cheaper.
pub fn chunk_has_dungeon(world: &mut World, chunk_x: i32, chunk_z: i32) -> DungeonResult {
    world.find_dungeon(chunk_x, chunk_z)
}

/// Release a world and every chunk it holds.
pub fn destroy_world(world: World) {
    tracing::debug!(seed = world.seed(), chunks = world.len(), "destroying world");
    drop(world);
}
