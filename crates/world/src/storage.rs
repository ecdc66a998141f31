//! Per-seed chunk store.
//!
//! Answers block queries in world coordinates, generating each chunk the first time it is touched,
//! and runs dungeon searches against itself.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::trace;

use crate::chunk::{Block, Chunk, ChunkPos, CHUNK_SIZE_Y};
use crate::dungeon::{BlockSource, DungeonResult, DungeonSearch};
use crate::generator::ChunkGenerator;

/// Lazily generated chunk store for one seed.
///
/// Chunks are generated on first access and kept for the lifetime of the world; a position is
/// never generated twice. Uses BTreeMap for deterministic iteration order.
pub struct World {
    seed: u64,
    chunks: BTreeMap<ChunkPos, Chunk>,
    generator: ChunkGenerator,
    dungeons: DungeonSearch,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            chunks: BTreeMap::new(),
            generator: ChunkGenerator::new(seed),
            dungeons: DungeonSearch::new(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of resident chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true when no chunks have been generated yet.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn contains(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    /// Attempt to fetch a chunk without generating it.
    pub fn get(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Fetch a chunk, generating and caching it on first access.
    pub fn get_or_generate(&mut self, pos: ChunkPos) -> &Chunk {
        match self.chunks.entry(pos) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                trace!(chunk_pos = %pos, "chunk cache miss");
                entry.insert(self.generator.generate(pos))
            }
        }
    }

    /// Block at world coordinates. Heights outside `0..128` read as air without generating.
    pub fn get_block(&mut self, x: i32, y: i32, z: i32) -> Block {
        if !(0..CHUNK_SIZE_Y as i32).contains(&y) {
            return Block::Air;
        }
        let chunk = self.get_or_generate(ChunkPos::containing(x, z));
        chunk.get((x & 15) as usize, y as usize, (z & 15) as usize)
    }

    /// Search one chunk for a dungeon, generating whatever neighbours validation touches.
    pub fn find_dungeon(&mut self, chunk_x: i32, chunk_z: i32) -> DungeonResult {
        let search = self.dungeons;
        search.search(self, chunk_x, chunk_z)
    }

    /// Iterate over resident chunk positions in sorted order.
    pub fn iter_positions(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.chunks.keys().copied()
    }
}

impl BlockSource for World {
    fn block_at(&mut self, x: i32, y: i32, z: i32) -> Block {
        self.get_block(x, y, z)
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("seed", &self.seed)
            .field("chunks", &self.chunks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 46290;

    #[test]
    fn get_block_generates_lazily() {
        let mut world = World::new(SEED);
        assert!(world.is_empty());
        assert_eq!(world.get_block(0, 60, 0), Block::Stone);
        assert_eq!(world.len(), 1);
        assert!(world.contains(ChunkPos::new(0, 0)));

        assert_eq!(world.get_block(5, 100, 5), Block::Air);
        assert_eq!(world.len(), 1, "same chunk must not be generated twice");

        assert_eq!(world.get_block(-70, 40, 50), Block::Stone);
        assert!(world.contains(ChunkPos::new(-5, 3)));
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn out_of_range_heights_read_as_air() {
        let mut world = World::new(SEED);
        assert_eq!(world.get_block(0, -1, 0), Block::Air);
        assert_eq!(world.get_block(0, 128, 0), Block::Air);
        assert!(world.is_empty());
    }

    #[test]
    fn cached_chunk_is_returned_unchanged() {
        let mut world = World::new(SEED);
        let first = world.get_or_generate(ChunkPos::new(1, 1)).clone();
        let again = world.get_or_generate(ChunkPos::new(1, 1));
        assert_eq!(&first, again);
        assert_eq!(world.get(ChunkPos::new(1, 1)), Some(&first));
        assert!(world.get(ChunkPos::new(9, 9)).is_none());
    }

    #[test]
    fn find_dungeon_reference_chunk() {
        let mut world = World::new(SEED);
        let result = world.find_dungeon(-5, 3);
        assert_eq!(result, DungeonResult::at(-63, 52));
        assert_eq!(world.len(), 5);
    }

    #[test]
    fn find_dungeon_absent() {
        let mut world = World::new(SEED);
        assert!(!world.find_dungeon(0, 0).found);
        assert_eq!(world.len(), 4);
    }

    #[test]
    fn iter_positions_is_sorted() {
        let mut world = World::new(SEED);
        for pos in [ChunkPos::new(2, 0), ChunkPos::new(-1, 4), ChunkPos::new(-1, -4)] {
            world.get_or_generate(pos);
        }
        let positions: Vec<_> = world.iter_positions().collect();
        assert_eq!(
            positions,
            vec![ChunkPos::new(-1, -4), ChunkPos::new(-1, 4), ChunkPos::new(2, 0)]
        );
    }
}
