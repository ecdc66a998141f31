//! Reference Chunk Worldtest
//!
//! Pins whole-chunk output for seed 46290 with block histograms and FNV-1a digests of the raw
//! block bytes, and checks that independent stores agree byte for byte.

use dungeonfinder_testkit::fnv1a;
use dungeonfinder_world::{
    BiomeNoises, Block, ChunkGenerator, ChunkPos, TerrainBuilder, World, CHUNK_SIZE_Y,
};

const WORLD_SEED: u64 = 46290;

#[test]
fn reference_chunk_digests() {
    let generator = ChunkGenerator::new(WORLD_SEED);
    let cases = [
        (
            ChunkPos::new(0, 0),
            [15538, 17098, 0, 0, 0, 0, 0, 0, 1, 131],
            4_069_518_871_240_762_226u64,
        ),
        (
            ChunkPos::new(-5, 3),
            [11809, 20839, 0, 0, 0, 0, 0, 0, 0, 120],
            10_453_211_102_031_096_342,
        ),
        (
            ChunkPos::new(3, -2),
            [16917, 14289, 0, 0, 0, 1422, 0, 0, 126, 14],
            2_943_804_446_951_259_616,
        ),
    ];

    for (pos, histogram, digest) in cases {
        let chunk = generator.generate(pos);
        assert_eq!(chunk.histogram(), histogram, "histogram of {pos}");
        assert_eq!(fnv1a(&chunk.to_bytes()), digest, "digest of {pos}");
    }
}

#[test]
fn independent_stores_are_byte_identical() {
    let positions = [
        ChunkPos::new(0, 0),
        ChunkPos::new(-5, 3),
        ChunkPos::new(3, -2),
        ChunkPos::new(-1, -1),
    ];
    let mut forward = World::new(WORLD_SEED);
    let mut backward = World::new(WORLD_SEED);
    for &pos in &positions {
        forward.get_or_generate(pos);
    }
    for &pos in positions.iter().rev() {
        backward.get_or_generate(pos);
    }
    for pos in positions {
        let a = forward.get(pos).expect("generated");
        let b = backward.get(pos).expect("generated");
        assert_eq!(a.to_bytes(), b.to_bytes(), "chunk {pos}");
    }
}

#[test]
fn world_queries_match_reference() {
    let mut world = World::new(WORLD_SEED);
    assert_eq!(world.get_block(0, 60, 0), Block::Stone);
    assert_eq!(world.get_block(-70, 40, 50), Block::Stone);
    assert_eq!(world.get_block(5, 100, 5), Block::Air);
    assert_eq!(world.get_block(0, CHUNK_SIZE_Y as i32 - 1, 0), Block::Air);
}

#[test]
fn carving_keeps_floor_and_sky() {
    let generator = ChunkGenerator::new(WORLD_SEED);
    let climate = BiomeNoises::new(WORLD_SEED);
    let terrain = TerrainBuilder::new(WORLD_SEED);
    for pos in [ChunkPos::new(0, 0), ChunkPos::new(3, -2), ChunkPos::new(-7, 9)] {
        let carved = generator.generate(pos);
        let uncarved = terrain.build(pos, &climate.biomes_for_chunk(pos));
        for x in 0..16 {
            for z in 0..16 {
                assert_eq!(carved.get(x, 0, z), uncarved.get(x, 0, z), "{pos} ({x}, {z})");
                for y in 121..CHUNK_SIZE_Y {
                    assert_eq!(carved.get(x, y, z), Block::Air, "{pos} ({x}, {y}, {z})");
                }
            }
        }
    }
}
