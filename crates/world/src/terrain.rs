//! Terrain generation from biome climate and layered 3D noise.
//!
//! A coarse density field of 5×5 columns × 17 levels is built per chunk, then trilinearly
//! interpolated into 4×8×4 block cells. Positive density is stone; empty cells below sea level
//! fill with water, or ice at the surface of cold columns.

use dungeonfinder_core::JavaRandom;
use tracing::{debug, instrument};

use crate::biome::BiomeGrid;
use crate::chunk::{Block, Chunk, ChunkPos, CHUNK_SIZE_X, CHUNK_SIZE_Z};
use crate::noise::{OctaveSet, PermutationTable};

/// Coarse density columns per horizontal axis.
pub const DENSITY_WIDTH: usize = 5;
/// Coarse density levels per column.
pub const DENSITY_HEIGHT: usize = 17;
/// Total samples in a [`DensityField`].
pub const DENSITY_LEN: usize = DENSITY_WIDTH * DENSITY_WIDTH * DENSITY_HEIGHT;
/// Blocks below this height fill with water when not solid.
pub const SEA_LEVEL: usize = 64;

/// Coarse density samples, indexed `(x * 5 + z) * 17 + y`.
pub type DensityField = [f64; DENSITY_LEN];

const COORDINATE_SCALE: f64 = 684.412_000_000_000_03;

/// Octave stacks shaping terrain for one world seed.
#[derive(Debug, Clone)]
pub struct TerrainNoises {
    min_limit: OctaveSet,
    max_limit: OctaveSet,
    main: OctaveSet,
    scale: OctaveSet,
    depth: OctaveSet,
}

impl TerrainNoises {
    /// Draw every stack in generation order from `JavaRandom::new(world_seed)`.
    ///
    /// The shore and river composition tables and the surface elevation stack are not needed for
    /// stone placement, but their draws still advance the generator.
    pub fn new(world_seed: u64) -> Self {
        let mut rng = JavaRandom::new(world_seed);
        let min_limit = OctaveSet::new(&mut rng, 16);
        let max_limit = OctaveSet::new(&mut rng, 16);
        let main = OctaveSet::new(&mut rng, 8);
        for _ in 0..4 {
            PermutationTable::skip(&mut rng);
        }
        let _surface_elevation = OctaveSet::new(&mut rng, 4);
        let scale = OctaveSet::new(&mut rng, 10);
        let depth = OctaveSet::new(&mut rng, 16);
        Self {
            min_limit,
            max_limit,
            main,
            scale,
            depth,
        }
    }

    /// Sample the 5×5 grid of 2D scale noise at a coarse origin.
    pub fn scale_noise(&self, origin_x: i32, origin_z: i32) -> [f64; 25] {
        let mut buf = [0.0; 25];
        self.scale.sample_perlin_2d(
            &mut buf,
            [f64::from(origin_x), f64::from(origin_z)],
            [DENSITY_WIDTH, DENSITY_WIDTH],
            [1.121, 1.121],
        );
        buf
    }

    /// Build the density field for the coarse origin `(chunk_x * 4, chunk_z * 4)`.
    pub fn density_field(&self, origin_x: i32, origin_z: i32, climate: &BiomeGrid) -> DensityField {
        let origin_2d = [f64::from(origin_x), f64::from(origin_z)];
        let origin_3d = [f64::from(origin_x), 0.0, f64::from(origin_z)];
        let size_2d = [DENSITY_WIDTH, DENSITY_WIDTH];
        let size_3d = [DENSITY_WIDTH, DENSITY_HEIGHT, DENSITY_WIDTH];

        let scale = self.scale_noise(origin_x, origin_z);
        let mut depth = [0.0; 25];
        self.depth
            .sample_perlin_2d(&mut depth, origin_2d, size_2d, [200.0, 200.0]);

        let mut main = [0.0; DENSITY_LEN];
        let mut min = [0.0; DENSITY_LEN];
        let mut max = [0.0; DENSITY_LEN];
        self.main.sample_perlin_3d(
            &mut main,
            origin_3d,
            size_3d,
            [
                COORDINATE_SCALE / 80.0,
                COORDINATE_SCALE / 160.0,
                COORDINATE_SCALE / 80.0,
            ],
        );
        self.min_limit
            .sample_perlin_3d(&mut min, origin_3d, size_3d, [COORDINATE_SCALE; 3]);
        self.max_limit
            .sample_perlin_3d(&mut max, origin_3d, size_3d, [COORDINATE_SCALE; 3]);

        let mut field = [0.0; DENSITY_LEN];
        let step = CHUNK_SIZE_X / DENSITY_WIDTH;
        let mut column = 0;
        let mut index = 0;
        for x in 0..DENSITY_WIDTH {
            let block_x = x * step + step / 2;
            for z in 0..DENSITY_WIDTH {
                let block_z = z * step + step / 2;
                let climate_index = block_x * CHUNK_SIZE_Z + block_z;
                let heat = climate.temperature[climate_index] * climate.humidity[climate_index];
                let (midpoint, stretch) = column_shape(heat, scale[column], depth[column]);
                column += 1;

                for level in 0..DENSITY_HEIGHT {
                    field[index] = level_density(
                        level,
                        midpoint,
                        stretch,
                        min[index],
                        max[index],
                        main[index],
                    );
                    index += 1;
                }
            }
        }
        field
    }

    /// Interpolate a density field into blocks.
    ///
    /// Each coarse cell spans 4 blocks in x and z and 8 in y; densities step linearly inside it.
    pub fn voxelize(&self, field: &DensityField, climate: &BiomeGrid, chunk: &mut Chunk) {
        let blocks = chunk.blocks_mut();
        let at = |x: usize, z: usize, y: usize| field[(x * DENSITY_WIDTH + z) * DENSITY_HEIGHT + y];

        for cx in 0..4 {
            for cz in 0..4 {
                for cy in 0..16 {
                    let mut d00 = at(cx, cz, cy);
                    let mut d01 = at(cx, cz + 1, cy);
                    let mut d10 = at(cx + 1, cz, cy);
                    let mut d11 = at(cx + 1, cz + 1, cy);
                    let s00 = (at(cx, cz, cy + 1) - d00) * 0.125;
                    let s01 = (at(cx, cz + 1, cy + 1) - d01) * 0.125;
                    let s10 = (at(cx + 1, cz, cy + 1) - d10) * 0.125;
                    let s11 = (at(cx + 1, cz + 1, cy + 1) - d11) * 0.125;

                    for sub_y in 0..8 {
                        let y = cy * 8 + sub_y;
                        let mut row0 = d00;
                        let mut row1 = d01;
                        let row0_step = (d10 - d00) * 0.25;
                        let row1_step = (d11 - d01) * 0.25;

                        for sub_x in 0..4 {
                            let x = cx * 4 + sub_x;
                            let mut index = (x << 11) | ((cz * 4) << 7) | y;
                            let mut density = row0;
                            let density_step = (row1 - row0) * 0.25;

                            for sub_z in 0..4 {
                                let z = cz * 4 + sub_z;
                                let mut block = Block::Air;
                                if y < SEA_LEVEL {
                                    block = if climate.temperature_at(x, z) < 0.5
                                        && y >= SEA_LEVEL - 1
                                    {
                                        Block::Ice
                                    } else {
                                        Block::MovingWater
                                    };
                                }
                                if density > 0.0 {
                                    block = Block::Stone;
                                }
                                blocks[index] = block;
                                index += 128;
                                density += density_step;
                            }

                            row0 += row0_step;
                            row1 += row1_step;
                        }

                        d00 += s00;
                        d01 += s01;
                        d10 += s10;
                        d11 += s11;
                    }
                }
            }
        }
    }
}

/// Vertical midpoint and stretch of one density column.
fn column_shape(heat: f64, scale: f64, depth: f64) -> (f64, f64) {
    let mut dryness = 1.0 - heat;
    dryness *= dryness;
    dryness *= dryness;
    let dryness = 1.0 - dryness;

    let mut stretch = (scale + 256.0) / 512.0;
    stretch *= dryness;
    if stretch > 1.0 {
        stretch = 1.0;
    }

    let mut offset = depth / 8000.0;
    if offset < 0.0 {
        offset = -offset * 0.3;
    }
    offset = offset * 3.0 - 2.0;
    if offset < 0.0 {
        offset /= 2.0;
        if offset < -1.0 {
            offset = -1.0;
        }
        offset /= 1.4;
        offset /= 2.0;
        stretch = 0.0;
    } else {
        if offset > 1.0 {
            offset = 1.0;
        }
        offset /= 8.0;
    }

    if stretch < 0.0 {
        stretch = 0.0;
    }
    stretch += 0.5;
    offset = offset * DENSITY_HEIGHT as f64 / 16.0;
    let midpoint = DENSITY_HEIGHT as f64 / 2.0 + offset * 4.0;
    (midpoint, stretch)
}

/// Density at one level of a column: the main noise picks between the limit noises, then the
/// distance from the midpoint is subtracted and the top three levels taper to -10.
fn level_density(level: usize, midpoint: f64, stretch: f64, min: f64, max: f64, main: f64) -> f64 {
    let mut falloff = (level as f64 - midpoint) * 12.0 / stretch;
    if falloff < 0.0 {
        falloff *= 4.0;
    }

    let low = min / 512.0;
    let high = max / 512.0;
    let select = (main / 10.0 + 1.0) / 2.0;
    let mut density = if select < 0.0 {
        low
    } else if select > 1.0 {
        high
    } else {
        low + (high - low) * select
    };
    density -= falloff;

    let taper_start = DENSITY_HEIGHT - 4;
    if level > taper_start {
        let t = f64::from((level - taper_start) as f32 / 3.0_f32);
        density = density * (1.0 - t) + -10.0 * t;
    }
    density
}

/// Builds the uncarved block layout of a chunk.
#[derive(Debug, Clone)]
pub struct TerrainBuilder {
    world_seed: u64,
    noises: TerrainNoises,
}

impl TerrainBuilder {
    pub fn new(world_seed: u64) -> Self {
        Self {
            world_seed,
            noises: TerrainNoises::new(world_seed),
        }
    }

    pub fn noises(&self) -> &TerrainNoises {
        &self.noises
    }

    /// Generate stone, water and ice for a chunk.
    #[instrument(skip(self, climate), fields(chunk_pos = %chunk_pos, world_seed = self.world_seed))]
    pub fn build(&self, chunk_pos: ChunkPos, climate: &BiomeGrid) -> Chunk {
        debug!("Starting terrain generation");
        let mut chunk = Chunk::new(chunk_pos);
        let field = self.noises.density_field(
            chunk_pos.x.wrapping_mul(4),
            chunk_pos.z.wrapping_mul(4),
            climate,
        );
        self.noises.voxelize(&field, climate, &mut chunk);
        debug!("Terrain generation complete");
        chunk
    }
}
