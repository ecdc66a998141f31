use std::fmt;

use serde::{Deserialize, Serialize};

/// Chunk width (X axis) in voxels.
pub const CHUNK_SIZE_X: usize = 16;
/// Chunk height (Y axis) in voxels.
pub const CHUNK_SIZE_Y: usize = 128;
/// Chunk depth (Z axis) in voxels.
pub const CHUNK_SIZE_Z: usize = 16;
/// Total voxel count per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;

/// Block kinds the generator can produce.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Block {
    #[default]
    Air = 0,
    Stone,
    Grass,
    Dirt,
    Bedrock,
    MovingWater,
    Sand,
    Gravel,
    Ice,
    Lava,
}

impl Block {
    /// Every block kind in discriminant order.
    pub const ALL: [Block; 10] = [
        Block::Air,
        Block::Stone,
        Block::Grass,
        Block::Dirt,
        Block::Bedrock,
        Block::MovingWater,
        Block::Sand,
        Block::Gravel,
        Block::Ice,
        Block::Lava,
    ];

    /// Numeric identifier of the block.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// True for the blocks a cave tunnel is allowed to remove.
    #[inline]
    pub const fn is_carvable(self) -> bool {
        matches!(self, Block::Stone | Block::Dirt | Block::Grass)
    }
}

/// Chunk-local position (X, Y, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl LocalPos {
    /// Convert to a linear index into the block array (`x << 11 | z << 7 | y`).
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.x < CHUNK_SIZE_X);
        debug_assert!(self.y < CHUNK_SIZE_Y);
        debug_assert!(self.z < CHUNK_SIZE_Z);
        (self.x << 11) | (self.z << 7) | self.y
    }
}

/// Chunk coordinate (X,Z) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the given block column.
    pub const fn containing(block_x: i32, block_z: i32) -> Self {
        Self {
            x: block_x >> 4,
            z: block_z >> 4,
        }
    }

    /// World X of the chunk's first block column.
    pub const fn min_block_x(self) -> i32 {
        self.x.wrapping_mul(CHUNK_SIZE_X as i32)
    }

    /// World Z of the chunk's first block column.
    pub const fn min_block_z(self) -> i32 {
        self.z.wrapping_mul(CHUNK_SIZE_Z as i32)
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Dense block column for one 16×128×16 chunk.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    position: ChunkPos,
    blocks: Box<[Block; CHUNK_VOLUME]>,
}

impl Chunk {
    /// Allocate an all-air chunk.
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            blocks: Box::new([Block::Air; CHUNK_VOLUME]),
        }
    }

    pub fn position(&self) -> ChunkPos {
        self.position
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[LocalPos { x, y, z }.index()]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: Block) {
        self.blocks[LocalPos { x, y, z }.index()] = block;
    }

    /// Raw block array in `x << 11 | z << 7 | y` order.
    pub fn blocks(&self) -> &[Block; CHUNK_VOLUME] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block; CHUNK_VOLUME] {
        &mut self.blocks
    }

    /// Block ids as bytes, in storage order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.blocks.iter().map(|b| b.id()).collect()
    }

    /// Count of each block kind, indexed by block id.
    pub fn histogram(&self) -> [usize; Block::ALL.len()] {
        let mut counts = [0usize; Block::ALL.len()];
        for block in self.blocks.iter() {
            counts[block.id() as usize] += 1;
        }
        counts
    }

    /// Highest y in the column holding something other than air, if any.
    pub fn top_solid(&self, x: usize, z: usize) -> Option<usize> {
        (0..CHUNK_SIZE_Y)
            .rev()
            .find(|&y| !matches!(self.get(x, y, z), Block::Air))
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("position", &self.position)
            .field("histogram", &self.histogram())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_index_layout() {
        assert_eq!(LocalPos { x: 0, y: 0, z: 0 }.index(), 0);
        assert_eq!(LocalPos { x: 0, y: 1, z: 0 }.index(), 1);
        assert_eq!(LocalPos { x: 0, y: 0, z: 1 }.index(), 128);
        assert_eq!(LocalPos { x: 1, y: 0, z: 0 }.index(), 2048);
        assert_eq!(LocalPos { x: 15, y: 127, z: 15 }.index(), CHUNK_VOLUME - 1);
    }

    #[test]
    fn containing_uses_floor_division() {
        assert_eq!(ChunkPos::containing(0, 0), ChunkPos::new(0, 0));
        assert_eq!(ChunkPos::containing(15, 16), ChunkPos::new(0, 1));
        assert_eq!(ChunkPos::containing(-1, -16), ChunkPos::new(-1, -1));
        assert_eq!(ChunkPos::containing(-17, -70), ChunkPos::new(-2, -5));
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut chunk = Chunk::new(ChunkPos::new(2, -3));
        chunk.set(3, 70, 9, Block::Stone);
        assert_eq!(chunk.get(3, 70, 9), Block::Stone);
        assert_eq!(chunk.blocks()[(3 << 11) | (9 << 7) | 70], Block::Stone);
        assert_eq!(chunk.top_solid(3, 9), Some(70));
        assert_eq!(chunk.top_solid(0, 0), None);
    }

    #[test]
    fn histogram_counts_everything() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.set(0, 0, 0, Block::Lava);
        chunk.set(1, 0, 0, Block::Lava);
        let histogram = chunk.histogram();
        assert_eq!(histogram[Block::Lava as usize], 2);
        assert_eq!(histogram.iter().sum::<usize>(), CHUNK_VOLUME);
    }

    #[test]
    fn block_ids_are_stable() {
        for (i, block) in Block::ALL.iter().enumerate() {
            assert_eq!(block.id() as usize, i);
        }
        assert_eq!(Block::MovingWater.id(), 5);
        assert_eq!(Block::Lava.id(), 9);
    }

    #[test]
    fn chunk_pos_display() {
        assert_eq!(ChunkPos::new(-5, 3).to_string(), "(-5, 3)");
    }
}
