//! Biome classification for terrain generation.
//!
//! Temperature, humidity and precipitation come from three independent simplex octave stacks.
//! Precipitation is blended into the other two, which then index [`BIOME_TABLE`].

use std::fmt;

use dungeonfinder_core::JavaRandom;
use serde::{Deserialize, Serialize};

use crate::biome_table::BIOME_TABLE;
use crate::chunk::{ChunkPos, CHUNK_SIZE_X, CHUNK_SIZE_Z};
use crate::noise::OctaveSet;

/// Columns per chunk.
pub const BIOME_GRID_SIZE: usize = CHUNK_SIZE_X * CHUNK_SIZE_Z;

/// Biome identifier.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Rainforest = 0,
    Swampland,
    SeasonalForest,
    Forest,
    Savanna,
    Shrubland,
    Taiga,
    Desert,
    Plains,
    IceDesert,
    Tundra,
}

impl Biome {
    /// All biomes in id order.
    pub const ALL: [Biome; 11] = [
        Biome::Rainforest,
        Biome::Swampland,
        Biome::SeasonalForest,
        Biome::Forest,
        Biome::Savanna,
        Biome::Shrubland,
        Biome::Taiga,
        Biome::Desert,
        Biome::Plains,
        Biome::IceDesert,
        Biome::Tundra,
    ];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Biome::Rainforest => "Rainforest",
            Biome::Swampland => "Swampland",
            Biome::SeasonalForest => "Seasonal Forest",
            Biome::Forest => "Forest",
            Biome::Savanna => "Savanna",
            Biome::Shrubland => "Shrubland",
            Biome::Taiga => "Taiga",
            Biome::Desert => "Desert",
            Biome::Plains => "Plains",
            Biome::IceDesert => "IceDesert",
            Biome::Tundra => "Tundra",
        }
    }

    /// Table lookup for clamped temperature and humidity in `[0, 1]`.
    #[inline]
    pub fn lookup(temperature: f64, humidity: f64) -> Biome {
        debug_assert!((0.0..=1.0).contains(&temperature));
        debug_assert!((0.0..=1.0).contains(&humidity));
        let t = (temperature * 63.0) as usize;
        let h = (humidity * 63.0) as usize;
        BIOME_TABLE[t + h * 64]
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-column climate for one chunk, indexed `x * 16 + z`.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeGrid {
    pub temperature: Box<[f64; BIOME_GRID_SIZE]>,
    pub humidity: Box<[f64; BIOME_GRID_SIZE]>,
    pub biomes: Box<[Biome; BIOME_GRID_SIZE]>,
}

impl BiomeGrid {
    pub fn temperature_at(&self, x: usize, z: usize) -> f64 {
        self.temperature[x * CHUNK_SIZE_Z + z]
    }

    pub fn humidity_at(&self, x: usize, z: usize) -> f64 {
        self.humidity[x * CHUNK_SIZE_Z + z]
    }

    pub fn biome_at(&self, x: usize, z: usize) -> Biome {
        self.biomes[x * CHUNK_SIZE_Z + z]
    }
}

/// Climate noise stacks for one world seed.
#[derive(Debug, Clone)]
pub struct BiomeNoises {
    temperature: OctaveSet,
    humidity: OctaveSet,
    precipitation: OctaveSet,
}

impl BiomeNoises {
    /// Build the three climate stacks, each from its own salted generator.
    pub fn new(world_seed: u64) -> Self {
        let mut rng = JavaRandom::new(world_seed.wrapping_mul(9871));
        let temperature = OctaveSet::new(&mut rng, 4);
        let mut rng = JavaRandom::new(world_seed.wrapping_mul(39811));
        let humidity = OctaveSet::new(&mut rng, 4);
        let mut rng = JavaRandom::new(world_seed.wrapping_mul(543_321));
        let precipitation = OctaveSet::new(&mut rng, 2);
        Self {
            temperature,
            humidity,
            precipitation,
        }
    }

    /// Classify every column of a chunk.
    pub fn biomes_for_chunk(&self, pos: ChunkPos) -> BiomeGrid {
        let origin = [f64::from(pos.min_block_x()), f64::from(pos.min_block_z())];
        let size = [CHUNK_SIZE_X, CHUNK_SIZE_Z];

        let mut temperature = Box::new([0.0; BIOME_GRID_SIZE]);
        let mut humidity = Box::new([0.0; BIOME_GRID_SIZE]);
        let mut precipitation = [0.0; BIOME_GRID_SIZE];
        self.temperature.sample_simplex_2d(
            &mut temperature[..],
            origin,
            size,
            [0.025_000_000_372_529_03, 0.025_000_000_372_529_03],
            0.25,
        );
        self.humidity.sample_simplex_2d(
            &mut humidity[..],
            origin,
            size,
            [0.050_000_000_745_058_06, 0.050_000_000_745_058_06],
            0.333_333_333_333_333_31,
        );
        self.precipitation.sample_simplex_2d(
            &mut precipitation,
            origin,
            size,
            [0.25, 0.25],
            0.588_235_294_117_647_08,
        );

        let mut biomes = Box::new([Biome::Tundra; BIOME_GRID_SIZE]);
        for i in 0..BIOME_GRID_SIZE {
            let (t, h) = blend(temperature[i], humidity[i], precipitation[i]);
            temperature[i] = t;
            humidity[i] = h;
            biomes[i] = Biome::lookup(t, h);
        }

        BiomeGrid {
            temperature,
            humidity,
            biomes,
        }
    }
}

/// Mix precipitation into raw temperature and humidity, returning both clamped to `[0, 1]`.
fn blend(temperature: f64, humidity: f64, precipitation: f64) -> (f64, f64) {
    let preci = precipitation * 1.100_000_000_000_000_1 + 0.5;
    let temp = (temperature * 0.149_999_999_999_999_99 + 0.699_999_999_999_999_96) * (1.0 - 0.01)
        + preci * 0.01;
    let temp = 1.0 - (1.0 - temp) * (1.0 - temp);
    let humi = (humidity * 0.149_999_999_999_999_99 + 0.5) * (1.0 - 0.002) + preci * 0.002;
    (temp.clamp(0.0, 1.0), humi.clamp(0.0, 1.0))
}
