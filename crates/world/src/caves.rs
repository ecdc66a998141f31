//! Worm-style cave carving.
//!
//! Every chunk within eight chunks of the target may start cave systems whose tunnels reach into
//! it. Each region is reseeded from the world seed and its coordinates, so a chunk's caves do not
//! depend on generation order. A tunnel walks up to ~112 steps, drifting in yaw and pitch, and
//! clears an ellipsoid around each step that overlaps the target chunk. Tunnels fork once; forks
//! are processed depth first through an explicit work stack so that they consume the region
//! generator in the same order nested calls would.

use std::f32::consts::PI;

use dungeonfinder_core::JavaRandom;
use tracing::{instrument, trace};

use crate::chunk::{Block, Chunk, ChunkPos, CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z};
use crate::noise::floor_i32;

/// Chunks in each direction whose cave systems may reach the target chunk.
pub const CAVE_RANGE: i32 = 8;

/// Lowest block a tunnel may clear (tested coordinate).
const MIN_CARVE_Y: i32 = 1;
/// Upper bound of the carving box.
const MAX_CARVE_Y: i32 = 120;
/// Tested heights below this turn into lava instead of air.
const LAVA_LEVEL: i32 = 10;

/// Parameters of one tunnel sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunnel {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// First step; `None` marks a room that starts halfway and carves once.
    pub start: Option<i32>,
    /// Step count; `None` draws one from the tunnel's own generator.
    pub length: Option<i32>,
    /// Vertical radius relative to the horizontal one.
    pub height_ratio: f64,
}

/// Carves caves into freshly generated terrain.
#[derive(Debug, Clone, Copy)]
pub struct CaveCarver {
    world_seed: u64,
    x_multiplier: u64,
    z_multiplier: u64,
}

impl CaveCarver {
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

    /// Seed of the generator driving cave systems that start in region `(rx, rz)`.
    pub fn region_seed(&self, rx: i32, rz: i32) -> u64 {
        (rx as i64 as u64)
            .wrapping_mul(self.x_multiplier)
            .wrapping_add((rz as i64 as u64).wrapping_mul(self.z_multiplier))
            ^ self.world_seed
    }

    /// Carve every tunnel that reaches `chunk`.
    #[instrument(skip(self, chunk), fields(chunk_pos = %chunk.position(), world_seed = self.world_seed))]
    pub fn carve(&self, chunk: &mut Chunk) {
        let pos = chunk.position();
        let mut rng = JavaRandom::new(0);
        for rx in pos.x.wrapping_sub(CAVE_RANGE)..=pos.x.wrapping_add(CAVE_RANGE) {
            for rz in pos.z.wrapping_sub(CAVE_RANGE)..=pos.z.wrapping_add(CAVE_RANGE) {
                rng.set_seed(self.region_seed(rx, rz));
                self.carve_region(chunk, &mut rng, rx, rz);
            }
        }
    }

    fn carve_region(&self, chunk: &mut Chunk, rng: &mut JavaRandom, rx: i32, rz: i32) {
        let inner = rng.next_int(40) + 1;
        let inner = rng.next_int(inner) + 1;
        let mut systems = rng.next_int(inner);
        if rng.next_int(15) != 0 {
            systems = 0;
        }
        if systems > 0 {
            trace!(rx, rz, systems, "cave systems");
        }

        for _ in 0..systems {
            let x = f64::from(rx.wrapping_mul(16).wrapping_add(rng.next_int(16)));
            let bound = rng.next_int(120) + 8;
            let y = f64::from(rng.next_int(bound));
            let z = f64::from(rz.wrapping_mul(16).wrapping_add(rng.next_int(16)));

            let mut tunnels = 1;
            if rng.next_int(4) == 0 {
                let room = Tunnel {
                    x,
                    y,
                    z,
                    width: 1.0 + rng.next_float() * 6.0,
                    yaw: 0.0,
                    pitch: 0.0,
                    start: None,
                    length: None,
                    height_ratio: 0.5,
                };
                self.dig(chunk, rng, room);
                tunnels += rng.next_int(4);
            }

            for _ in 0..tunnels {
                let yaw = rng.next_float() * PI * 2.0;
                let pitch = (rng.next_float() - 0.5) * 2.0 / 8.0;
                let width = rng.next_float() * 2.0 + rng.next_float();
                let tunnel = Tunnel {
                    x,
                    y,
                    z,
                    width,
                    yaw,
                    pitch,
                    start: Some(0),
                    length: None,
                    height_ratio: 1.0,
                };
                self.dig(chunk, rng, tunnel);
            }
        }
    }

    /// Sweep a tunnel and all of its forks.
    pub fn dig(&self, chunk: &mut Chunk, rng: &mut JavaRandom, tunnel: Tunnel) {
        let mut pending = vec![tunnel];
        while let Some(next) = pending.pop() {
            sweep(chunk, rng, next, &mut pending);
        }
    }
}

/// Walk one tunnel. A fork pushes both branches (right first, so left pops first) and ends the
/// sweep.
fn sweep(chunk: &mut Chunk, region_rng: &mut JavaRandom, tunnel: Tunnel, pending: &mut Vec<Tunnel>) {
    let pos = chunk.position();
    let centre_x = f64::from(pos.min_block_x().wrapping_add(8));
    let centre_z = f64::from(pos.min_block_z().wrapping_add(8));

    let mut rng = JavaRandom::new(region_rng.next_long() as u64);
    let length = match tunnel.length {
        Some(length) if length > 0 => length,
        _ => {
            let max = (CHUNK_SIZE_X * 8 - 16) as i32;
            max - rng.next_int(max / 4)
        }
    };
    let (mut step, room) = match tunnel.start {
        Some(start) => (start, false),
        None => (length / 2, true),
    };
    let branch_step = rng.next_int(length / 2) + length / 4;
    let steep = rng.next_int(6) == 0;

    let Tunnel {
        mut x,
        mut y,
        mut z,
        width,
        mut yaw,
        mut pitch,
        height_ratio,
        ..
    } = tunnel;
    let mut yaw_drift = 0.0f32;
    let mut pitch_drift = 0.0f32;

    while step < length {
        let radius = 1.5 + f64::from((step as f32 * PI / length as f32).sin() * width * 1.0);
        let radius_y = radius * height_ratio;
        let cos_pitch = pitch.cos();
        let sin_pitch = pitch.sin();
        x += f64::from(yaw.cos() * cos_pitch);
        y += f64::from(sin_pitch);
        z += f64::from(yaw.sin() * cos_pitch);

        pitch *= if steep { 0.92 } else { 0.7 };
        pitch += pitch_drift * 0.1;
        yaw += yaw_drift * 0.1;
        pitch_drift *= 0.9;
        yaw_drift *= 0.75;
        pitch_drift += (rng.next_float() - rng.next_float()) * rng.next_float() * 2.0;
        yaw_drift += (rng.next_float() - rng.next_float()) * rng.next_float() * 4.0;

        if !room && step == branch_step && width > 1.0 {
            let left_width = rng.next_float() * 0.5 + 0.5;
            let right_width = rng.next_float() * 0.5 + 0.5;
            let branch = |width: f32, yaw: f32| Tunnel {
                x,
                y,
                z,
                width,
                yaw,
                pitch: pitch / 3.0,
                start: Some(step),
                length: Some(length),
                height_ratio: 1.0,
            };
            pending.push(branch(right_width, yaw + PI * 0.5));
            pending.push(branch(left_width, yaw - PI * 0.5));
            return;
        }

        if room || rng.next_int(4) != 0 {
            let dx = x - centre_x;
            let dz = z - centre_z;
            let remaining = f64::from(length - step);
            let reach = f64::from(width + 2.0 + 16.0);
            if dx * dx + dz * dz - remaining * remaining > reach * reach {
                return;
            }

            if x >= centre_x - 16.0 - radius * 2.0
                && z >= centre_z - 16.0 - radius * 2.0
                && x <= centre_x + 16.0 + radius * 2.0
                && z <= centre_z + 16.0 + radius * 2.0
                && carve_ellipsoid(chunk, [x, y, z], radius, radius_y)
                && room
            {
                break;
            }
        }
        step += 1;
    }
}

/// Clear an ellipsoid centred at world position `centre`, clipped to the chunk.
///
/// Returns `false` without touching anything when the clipped box (grown by one block) holds
/// moving water. Each tested height `y` writes the cell at `y + 1`.
pub fn carve_ellipsoid(chunk: &mut Chunk, centre: [f64; 3], radius: f64, radius_y: f64) -> bool {
    let pos = chunk.position();
    let base_x = pos.min_block_x();
    let base_z = pos.min_block_z();
    let [x, y, z] = centre;

    // Chunk-local offsets wrap at the ends of the 32-bit block range.
    let local = |v: f64, base: i32, pad: i32| floor_i32(v).wrapping_sub(base).wrapping_add(pad);
    let x0 = local(x - radius, base_x, -1).max(0);
    let x1 = local(x + radius, base_x, 1).min(CHUNK_SIZE_X as i32);
    let y0 = local(y - radius_y, 0, -1).max(MIN_CARVE_Y);
    let y1 = local(y + radius_y, 0, 1).min(MAX_CARVE_Y);
    let z0 = local(z - radius, base_z, -1).max(0);
    let z1 = local(z + radius, base_z, 1).min(CHUNK_SIZE_Z as i32);
    let bounds = CarveBox {
        x0,
        x1,
        y0,
        y1,
        z0,
        z1,
    };

    let blocks = chunk.blocks_mut();
    if bounds.has_water(blocks) {
        return false;
    }

    for bx in x0..x1 {
        let nx = (f64::from(bx.wrapping_add(base_x)) + 0.5 - x) / radius;
        for bz in z0..z1 {
            let nz = (f64::from(bz.wrapping_add(base_z)) + 0.5 - z) / radius;
            if nx * nx + nz * nz >= 1.0 {
                continue;
            }
            let column = column_index(bx, bz);
            let mut exposed_grass = false;
            for by in (y0..y1).rev() {
                let ny = (f64::from(by) + 0.5 - y) / radius_y;
                if ny <= -0.7 || nx * nx + ny * ny + nz * nz >= 1.0 {
                    continue;
                }
                let index = column + (by + 1) as usize;
                let block = blocks[index];
                if block == Block::Grass {
                    exposed_grass = true;
                }
                if !block.is_carvable() {
                    continue;
                }
                if by < LAVA_LEVEL {
                    blocks[index] = Block::Lava;
                } else {
                    blocks[index] = Block::Air;
                    if exposed_grass && blocks[index - 1] == Block::Dirt {
                        blocks[index - 1] = Block::Grass;
                    }
                }
            }
        }
    }
    true
}

#[inline]
fn column_index(bx: i32, bz: i32) -> usize {
    (bx as usize * CHUNK_SIZE_Z + bz as usize) * CHUNK_SIZE_Y
}

/// Chunk-local carving bounds, half-open on the upper side.
struct CarveBox {
    x0: i32,
    x1: i32,
    y0: i32,
    y1: i32,
    z0: i32,
    z1: i32,
}

impl CarveBox {
    /// Scan each column top to bottom over `y0 - 1..=y1 + 1`. Interior columns only need their top
    /// and bottom cells checked, so the scan jumps straight to the bottom after the first cell.
    fn has_water(&self, blocks: &[Block]) -> bool {
        for bx in self.x0..self.x1 {
            for bz in self.z0..self.z1 {
                let column = column_index(bx, bz);
                let interior =
                    bx != self.x0 && bx != self.x1 - 1 && bz != self.z0 && bz != self.z1 - 1;
                let mut by = self.y1 + 1;
                while by >= self.y0 - 1 {
                    if (0..CHUNK_SIZE_Y as i32).contains(&by) {
                        if blocks[column + by as usize] == Block::MovingWater {
                            return true;
                        }
                        if interior && by != self.y0 - 1 {
                            by = self.y0;
                        }
                    }
                    by -= 1;
                }
            }
        }
        false
    }
}
