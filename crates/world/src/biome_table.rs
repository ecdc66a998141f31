//! Climate lookup table: `BIOME_TABLE[t + h * 64]` for temperature and humidity buckets `0..64`.
//!
//! Each row of the encoded grid is one humidity bucket, each column one temperature bucket.

use crate::biome::Biome;

/// Row-major letter grid, decoded at compile time into [`BIOME_TABLE`].
///
/// `R` rainforest, `W` swampland, `S` seasonal forest, `F` forest, `V` savanna, `H` shrubland,
/// `T` taiga, `D` desert, `P` plains, `I` ice desert, `U` tundra.
const ENCODED: &str = concat!(
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=0
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=1
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=2
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=3
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=4
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=5
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=6
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=7
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=8
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=9
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=10
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=11
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDDD", // h=12
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVVVVDDPP", // h=13
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVVVVVHHHHHPP", // h=14
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVVVVHHHHHHHHHPP", // h=15
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVVVVHHHHHHHHHHHHPP", // h=16
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVVVHHHHHHHHHHHHHHHPP", // h=17
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVVVVHHHHHHHHHHHHHHHHHPP", // h=18
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVVVHHHHHHHHHHHHHHHHHHHHPP", // h=19
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVVVHHHHHHHHHHHHHHHHHHHHHHPP", // h=20
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVVHHHHHHHHHHHHHHHHHHHHHHHHPP", // h=21
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVVVHHHHHHHHHHHHHHHHHHHHHHHHHPP", // h=22
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVVHHHHHHHHHHHHHHHHHHHHHHHHHHFPP", // h=23
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUVVHHHHHHHHHHHHHHHHHHHHHHHHFFFFPP", // h=24
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUHHHHHHHHHHHHHHHHHHHHHHHHFFFFFFPP", // h=25
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUUTHHHHHHHHHHHHHHHHHHHHHHFFFFFFFFPP", // h=26
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUUTTHHHHHHHHHHHHHHHHHHHHFFFFFFFFFFPP", // h=27
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUUTTTHHHHHHHHHHHHHHHHHHFFFFFFFFFFFFPP", // h=28
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUUTTTTHHHHHHHHHHHHHHHHFFFFFFFFFFFFFFSS", // h=29
    "UUUUUUUUUUUUUUUUUUUUUUUUUUUTTTTTHHHHHHHHHHHHHHHFFFFFFFFFFFFFFFSS", // h=30
    "UUUUUUUUUUUUUUUUUUUUUUUUUUTTTTTTHHHHHHHHHHHHHFFFFFFFFFFFFFFFFFSS", // h=31
    "UUUUUUUUUUUUUUUUUUUUUUUUUTTTTTTTHHHHHHHHHHHHFFFFFFFFFFFFFFFFFFSS", // h=32
    "UUUUUUUUUUUUUUUUUUUUUUUUUTTTTTTTHHHHHHHHHHHFFFFFFFFFFFFFFFFFFFSS", // h=33
    "UUUUUUUUUUUUUUUUUUUUUUUUTTTTTTTTHHHHHHHHHFFFFFFFFFFFFFFFFFFFFFSS", // h=34
    "UUUUUUUUUUUUUUUUUUUUUUUTTTTTTTTTHHHHHHHHFFFFFFFFFFFFFFFFFFFFFFSS", // h=35
    "UUUUUUUUUUUUUUUUUUUUUUUTTTTTTTTTHHHHHHHFFFFFFFFFFFFFFFFFFFFFFFSS", // h=36
    "UUUUUUUUUUUUUUUUUUUUUUTTTTTTTTTTHHHHHHFFFFFFFFFFFFFFFFFFFFFFFFSS", // h=37
    "UUUUUUUUUUUUUUUUUUUUUTTTTTTTTTTTHHHHHFFFFFFFFFFFFFFFFFFFFFFFFFSS", // h=38
    "UUUUUUUUUUUUUUUUUUUUUTTTTTTTTTTTHHHHFFFFFFFFFFFFFFFFFFFFFFFFFFSS", // h=39
    "UUUUUUUUUUUUUUUUUUUUTTTTTTTTTTTTHHHFFFFFFFFFFFFFFFFFFFFFFFFFFFSS", // h=40
    "UUUUUUUUUUUUUUUUUUUUTTTTTTTTTTTTHHFFFFFFFFFFFFFFFFFFFFFFFFFFFFSS", // h=41
    "UUUUUUUUUUUUUUUUUUUTTTTTTTTTTTTTHHFFFFFFFFFFFFFFFFFFFFFFFFFFFFSS", // h=42
    "UUUUUUUUUUUUUUUUUUUTTTTTTTTTTTTTHFFFFFFFFFFFFFFFFFFFFFFFFFFFFFSS", // h=43
    "UUUUUUUUUUUUUUUUUUUTTTTTTTTTTTTTFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFSS", // h=44
    "UUUUUUUUUUUUUUUUUUTTTTTTTTTTTTTTFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFSS", // h=45
    "UUUUUUUUUUUUUUUUUUTTTTTTTTTTTTTTFFFFFFFFFFFFWFFFFFFFFFFFFFFFFFSS", // h=46
    "UUUUUUUUUUUUUUUUUTTTTTTTTTTTTTTTFFFFFFFFFFFWWFFFFFFFFFFFFFFFFFSS", // h=47
    "UUUUUUUUUUUUUUUUUTTTTTTTTTTTTTTTFFFFFFFFFFWWWFFFFFFFFFFFFFFFFFSS", // h=48
    "UUUUUUUUUUUUUUUUUTTTTTTTTTTTTTTTFFFFFFFFFWWWWFFFFFFFFFFFFFFFFFSS", // h=49
    "UUUUUUUUUUUUUUUUTTTTTTTTTTTTTTTTFFFFFFFFWWWWWFFFFFFFFFFFFFFFFFSS", // h=50
    "UUUUUUUUUUUUUUUUTTTTTTTTTTTTTTTTFFFFFFFWWWWWWFFFFFFFFFFFFFFFFFSS", // h=51
    "UUUUUUUUUUUUUUUUTTTTTTTTTTTTTTTTFFFFFFFWWWWWWFFFFFFFFFFFFFFFFFSS", // h=52
    "UUUUUUUUUUUUUUUTTTTTTTTTTTTTTTTTFFFFFFWWWWWWWFFFFFFFFFFFFFFFFFSS", // h=53
    "UUUUUUUUUUUUUUUTTTTTTTTTTTTTTTTTFFFFFWWWWWWWWFFFFFFFFFFFFFFFFFSS", // h=54
    "UUUUUUUUUUUUUUUTTTTTTTTTTTTTTTTTFFFFFWWWWWWWWFFFFFFFFFFFFFFFFFSS", // h=55
    "UUUUUUUUUUUUUUUTTTTTTTTTTTTTTTTTFFFFWWWWWWWWWFFFFFFFFFFFFFFFFFSS", // h=56
    "UUUUUUUUUUUUUUTTTTTTTTTTTTTTTTTTFFFWWWWWWWWWWFFFFFFFFFFFFFFFFFSR", // h=57
    "UUUUUUUUUUUUUUTTTTTTTTTTTTTTTTTTFFFWWWWWWWWWWFFFFFFFFFFFFFFFFFRR", // h=58
    "UUUUUUUUUUUUUUTTTTTTTTTTTTTTTTTTFFWWWWWWWWWWWFFFFFFFFFFFFFFFFFRR", // h=59
    "UUUUUUUUUUUUUUTTTTTTTTTTTTTTTTTTFFWWWWWWWWWWWFFFFFFFFFFFFFFFFFRR", // h=60
    "UUUUUUUUUUUUUUTTTTTTTTTTTTTTTTTTFWWWWWWWWWWWWFFFFFFFFFFFFFFFFFRR", // h=61
    "UUUUUUUUUUUUUTTTTTTTTTTTTTTTTTTTFWWWWWWWWWWWWFFFFFFFFFFFFFFFFFRR", // h=62
    "UUUUUUUUUUUUUTTTTTTTTTTTTTTTTTTTWWWWWWWWWWWWWFFFFFFFFFFFFFFFFFRR", // h=63
);

/// Biome for every (temperature, humidity) bucket pair.
pub static BIOME_TABLE: [Biome; 4096] = decode(ENCODED);

const fn decode(encoded: &str) -> [Biome; 4096] {
    let bytes = encoded.as_bytes();
    assert!(bytes.len() == 4096, "biome grid must be 64x64");
    let mut table = [Biome::Tundra; 4096];
    let mut i = 0;
    while i < bytes.len() {
        table[i] = match bytes[i] {
            b'R' => Biome::Rainforest,
            b'W' => Biome::Swampland,
            b'S' => Biome::SeasonalForest,
            b'F' => Biome::Forest,
            b'V' => Biome::Savanna,
            b'H' => Biome::Shrubland,
            b'T' => Biome::Taiga,
            b'D' => Biome::Desert,
            b'P' => Biome::Plains,
            b'I' => Biome::IceDesert,
            b'U' => Biome::Tundra,
            _ => panic!("unknown biome code"),
        };
        i += 1;
    }
    table
}
