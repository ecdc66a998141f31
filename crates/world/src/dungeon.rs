//! Dungeon placement search.
//!
//! Each chunk gets its own generator keyed on the chunk coordinates. Two early gates reject most
//! chunks outright; the rest try up to eight candidate rooms, validated against generated terrain.

use dungeonfinder_core::JavaRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::chunk::Block;

/// Candidate rooms tried per chunk.
pub const DUNGEON_ATTEMPTS: usize = 8;
/// Interior height of a dungeon room.
const ROOM_HEIGHT: i32 = 3;
/// Accepted range of doorway openings around the room.
const MIN_DOORWAYS: u32 = 1;
const MAX_DOORWAYS: u32 = 5;

/// Anything that can answer block queries in world coordinates.
///
/// Queries may have side effects (a chunk store generates chunks lazily), hence `&mut self`.
pub trait BlockSource {
    fn block_at(&mut self, x: i32, y: i32, z: i32) -> Block;
}

impl<F> BlockSource for F
where
    F: FnMut(i32, i32, i32) -> Block,
{
    fn block_at(&mut self, x: i32, y: i32, z: i32) -> Block {
        self(x, y, z)
    }
}

/// Outcome of a dungeon query for one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DungeonResult {
    pub found: bool,
    /// Minimum x corner of the room's outer wall; meaningful only when `found`.
    pub x: i32,
    /// Minimum z corner of the room's outer wall; meaningful only when `found`.
    pub z: i32,
}

impl DungeonResult {
    pub const NONE: Self = Self {
        found: false,
        x: 0,
        z: 0,
    };

    pub const fn at(x: i32, z: i32) -> Self {
        Self { found: true, x, z }
    }

    pub fn position(&self) -> Option<(i32, i32)> {
        self.found.then_some((self.x, self.z))
    }
}

/// Per-world dungeon locator.
#[derive(Debug, Clone, Copy)]
pub struct DungeonSearch {
    world_seed: u64,
    x_multiplier: u64,
    z_multiplier: u64,
}

impl DungeonSearch {
    pub fn new(world_seed: u64) -> Self {
        let mut rng = JavaRandom::new(world_seed);
        let x_multiplier = rng.next_odd_multiplier();
        let z_multiplier = rng.next_odd_multiplier();
        Self {
            world_seed,
            x_multiplier,
            z_multiplier,
        }
    }

    /// Seed of the generator placing dungeons in chunk `(chunk_x, chunk_z)`.
    pub fn chunk_seed(&self, chunk_x: i32, chunk_z: i32) -> u64 {
        (i64::from(chunk_x) as u64)
            .wrapping_mul(self.x_multiplier)
            .wrapping_add((i64::from(chunk_z) as u64).wrapping_mul(self.z_multiplier))
            ^ self.world_seed
    }

    /// Find the first valid dungeon room in a chunk.
    #[instrument(skip(self, source), fields(world_seed = self.world_seed))]
    pub fn search<S: BlockSource + ?Sized>(
        &self,
        source: &mut S,
        chunk_x: i32,
        chunk_z: i32,
    ) -> DungeonResult {
        let mut rng = JavaRandom::new(self.chunk_seed(chunk_x, chunk_z));
        if rng.next_int(4) == 0 || rng.next_int(8) == 0 {
            trace!("rejected by placement gate");
            return DungeonResult::NONE;
        }

        let base_x = chunk_x.wrapping_mul(16);
        let base_z = chunk_z.wrapping_mul(16);
        for attempt in 0..DUNGEON_ATTEMPTS {
            let x = base_x.wrapping_add(rng.next_int(16)).wrapping_add(8);
            let y = rng.next_int(128);
            let z = base_z.wrapping_add(rng.next_int(16)).wrapping_add(8);
            let half_x = rng.next_int(2) + 2;
            let half_z = rng.next_int(2) + 2;
            if let Some((min_x, min_z)) = room_is_valid(source, x, y, z, half_x, half_z) {
                debug!(attempt, x, y, z, min_x, min_z, "dungeon room accepted");
                return DungeonResult::at(min_x, min_z);
            }
        }
        DungeonResult::NONE
    }
}

/// Validate a room centred at `(x, y, z)` with horizontal half extents `half_x` and `half_z`.
///
/// The box one block larger than the room must have a solid floor layer and a solid layer above
/// the ceiling; the wall ring at floor height must contain between one and five doorways (two
/// stacked air cells). Returns the room's minimum outer corner.
///
/// Bounds wrap like 32-bit block coordinates; a box whose upper bound wraps past `i32::MAX` is
/// empty and never validates.
pub fn room_is_valid<S: BlockSource + ?Sized>(
    source: &mut S,
    x: i32,
    y: i32,
    z: i32,
    half_x: i32,
    half_z: i32,
) -> Option<(i32, i32)> {
    let (min_x, max_x) = (x.wrapping_sub(half_x + 1), x.wrapping_add(half_x + 1));
    let (min_z, max_z) = (z.wrapping_sub(half_z + 1), z.wrapping_add(half_z + 1));
    let (floor, ceiling) = (y.wrapping_sub(1), y.wrapping_add(ROOM_HEIGHT + 1));

    let mut doorways = 0u32;
    for bx in min_x..=max_x {
        for by in floor..=ceiling {
            for bz in min_z..=max_z {
                let block = source.block_at(bx, by, bz);
                if (by == floor || by == ceiling) && block == Block::Air {
                    return None;
                }
                let on_wall = bx == min_x || bx == max_x || bz == min_z || bz == max_z;
                if on_wall
                    && by == y
                    && block == Block::Air
                    && source.block_at(bx, by.wrapping_add(1), bz) == Block::Air
                {
                    doorways += 1;
                }
            }
        }
    }

    (MIN_DOORWAYS..=MAX_DOORWAYS)
        .contains(&doorways)
        .then_some((min_x, min_z))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 5×5 room at (0, 50, 0) with stone walls, floor and roof, and air doorways at `doors`.
    fn room(doors: Vec<(i32, i32)>) -> impl FnMut(i32, i32, i32) -> Block {
        move |x, y, z| {
            if y <= 49 || y >= 54 {
                Block::Stone
            } else if x.abs() == 3 || z.abs() == 3 {
                if doors.contains(&(x, z)) {
                    Block::Air
                } else {
                    Block::Stone
                }
            } else {
                Block::Air
            }
        }
    }

    #[test]
    fn room_with_three_doorways_is_accepted() {
        let mut source = room(vec![(-3, 0), (3, 1), (0, 3)]);
        assert_eq!(room_is_valid(&mut source, 0, 50, 0, 2, 2), Some((-3, -3)));
    }

    #[test]
    fn doorway_count_bounds() {
        let mut closed = room(vec![]);
        assert_eq!(room_is_valid(&mut closed, 0, 50, 0, 2, 2), None);

        let mut one = room(vec![(3, 3)]);
        assert_eq!(room_is_valid(&mut one, 0, 50, 0, 2, 2), Some((-3, -3)));

        let five: Vec<_> = (-2..=2).map(|x| (x, -3)).collect();
        let mut five = room(five);
        assert!(room_is_valid(&mut five, 0, 50, 0, 2, 2).is_some());

        let six: Vec<_> = (-2..=2).map(|x| (x, -3)).chain([(3, 0)]).collect();
        let mut six = room(six);
        assert_eq!(room_is_valid(&mut six, 0, 50, 0, 2, 2), None);
    }

    #[test]
    fn missing_floor_or_roof_rejects() {
        let mut base = room(vec![(-3, 0)]);
        let mut no_floor = |x: i32, y: i32, z: i32| {
            if (x, y, z) == (1, 49, 1) {
                Block::Air
            } else {
                base(x, y, z)
            }
        };
        assert_eq!(room_is_valid(&mut no_floor, 0, 50, 0, 2, 2), None);

        let mut base = room(vec![(-3, 0)]);
        let mut no_roof = |x: i32, y: i32, z: i32| {
            if (x, y, z) == (-3, 54, 3) {
                Block::Air
            } else {
                base(x, y, z)
            }
        };
        assert_eq!(room_is_valid(&mut no_roof, 0, 50, 0, 2, 2), None);
    }

    #[test]
    fn doorway_needs_two_air_cells() {
        let mut base = room(vec![(-3, 0), (3, 0)]);
        let mut half_blocked = |x: i32, y: i32, z: i32| {
            if (x, y, z) == (3, 51, 0) {
                Block::Stone
            } else {
                base(x, y, z)
            }
        };
        // Only (-3, 0) remains a doorway.
        assert_eq!(room_is_valid(&mut half_blocked, 0, 50, 0, 2, 2), Some((-3, -3)));

        let mut base = room(vec![(3, 0)]);
        let mut blocked = |x: i32, y: i32, z: i32| {
            if (x, y, z) == (3, 51, 0) {
                Block::Stone
            } else {
                base(x, y, z)
            }
        };
        assert_eq!(room_is_valid(&mut blocked, 0, 50, 0, 2, 2), None);
    }

    #[test]
    fn room_bounds_wrap_at_block_range_edges() {
        for centre in [i32::MAX - 3, i32::MIN + 3] {
            let mut base = room(vec![(-3, 0)]);
            let mut shifted = |x: i32, y: i32, z: i32| base(x.wrapping_sub(centre), y, z);
            assert_eq!(
                room_is_valid(&mut shifted, centre, 50, 0, 2, 2),
                Some((centre - 3, -3))
            );
        }

        // One block further out the wall ring wraps around and the box is empty.
        for centre in [i32::MAX - 2, i32::MIN + 2] {
            let mut base = room(vec![(-3, 0)]);
            let mut shifted = |x: i32, y: i32, z: i32| base(x.wrapping_sub(centre), y, z);
            assert_eq!(room_is_valid(&mut shifted, centre, 50, 0, 2, 2), None);
        }
    }

    #[test]
    fn search_at_outermost_chunks_terminates() {
        let search = DungeonSearch::new(46290);
        let mut solid = |_: i32, _: i32, _: i32| Block::Stone;
        for cx in [i32::MAX >> 4, i32::MIN >> 4] {
            for cz in [i32::MAX >> 4, 0, i32::MIN >> 4] {
                assert_eq!(search.search(&mut solid, cx, cz), DungeonResult::NONE);
            }
        }
    }

    #[test]
    fn solid_world_never_has_dungeons() {
        let search = DungeonSearch::new(46290);
        let mut solid = |_: i32, _: i32, _: i32| Block::Stone;
        for cx in -4..4 {
            for cz in -4..4 {
                assert_eq!(search.search(&mut solid, cx, cz), DungeonResult::NONE);
            }
        }
    }

    #[test]
    fn open_cavern_has_too_many_doorways() {
        // Any candidate with stone floor and roof around the open band sees a fully open wall
        // ring.
        let search = DungeonSearch::new(46290);
        let mut cavern = |_: i32, y: i32, _: i32| {
            if (40..44).contains(&y) {
                Block::Air
            } else {
                Block::Stone
            }
        };
        for cx in -4..4 {
            for cz in -4..4 {
                assert!(!search.search(&mut cavern, cx, cz).found);
            }
        }
    }

    #[test]
    fn result_position() {
        assert_eq!(DungeonResult::NONE.position(), None);
        assert_eq!(DungeonResult::at(-63, 52).position(), Some((-63, 52)));
    }

    #[test]
    fn chunk_seed_matches_cave_keying() {
        let search = DungeonSearch::new(7);
        let caves = crate::caves::CaveCarver::new(7);
        for (x, z) in [(0, 0), (-5, 3), (1000, -1000)] {
            assert_eq!(search.chunk_seed(x, z), caves.region_seed(x, z));
        }
    }
}
