//! Octave noise for biome and terrain generation.
//!
//! Every octave is a [`PermutationTable`] drawn from a [`JavaRandom`]: three lattice offsets and a
//! shuffled permutation of `0..=255`. An [`OctaveSet`] sums octaves into a caller-owned buffer using
//! one of three samplers:
//!
//! - [`OctaveSet::sample_simplex_2d`]: 2D simplex noise, used for the biome climate fields.
//! - [`OctaveSet::sample_perlin_3d`]: 3D gradient noise, used for the terrain density limits.
//! - [`OctaveSet::sample_perlin_2d`]: the 2D gradient variant, used for terrain scale and depth.
//!
//! The samplers reproduce the legacy generator's floating point evaluation order exactly, so the
//! arithmetic below is not simplified even where it could be.

use dungeonfinder_core::JavaRandom;

const F2: f64 = 0.366_025_403_784_438_6;
const G2: f64 = 0.211_324_865_405_187_13;

/// Simplex gradient directions; the last eight repeat the axis-aligned pairs.
const GRAD2: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// One octave: lattice offsets plus a permutation of `0..=255`.
#[derive(Debug, Clone, PartialEq)]
pub struct PermutationTable {
    /// Offsets added to the x, y and z sample coordinates.
    pub offset: [f64; 3],
    pub permutations: [u8; 256],
}

impl PermutationTable {
    /// Draw a table: three offsets in `[0, 256)` then a Fisher-Yates style shuffle.
    pub fn new(rng: &mut JavaRandom) -> Self {
        let offset = [
            rng.next_double() * 256.0,
            rng.next_double() * 256.0,
            rng.next_double() * 256.0,
        ];
        let mut permutations = [0u8; 256];
        for (i, p) in permutations.iter_mut().enumerate() {
            *p = i as u8;
        }
        for i in 0..256usize {
            let j = rng.next_int(256 - i as i32) as usize + i;
            permutations.swap(i, j);
        }
        Self {
            offset,
            permutations,
        }
    }

    /// Consume exactly the draws [`PermutationTable::new`] would, without building the table.
    pub fn skip(rng: &mut JavaRandom) {
        rng.advance6();
        for i in 0..256 {
            rng.next_int(256 - i);
        }
    }

    #[inline]
    fn perm(&self, index: u8) -> u8 {
        self.permutations[index as usize]
    }

    /// Whether the table is a true permutation of `0..=255`.
    pub fn is_valid(&self) -> bool {
        let mut seen = [false; 256];
        for &p in &self.permutations {
            if seen[p as usize] {
                return false;
            }
            seen[p as usize] = true;
        }
        true
    }

    fn simplex_2d(
        &self,
        buf: &mut [f64],
        origin: [f64; 2],
        size: [usize; 2],
        freq: [f64; 2],
        amplitude: f64,
    ) {
        let mut k = 0;
        for x in 0..size[0] {
            let xin = (origin[0] + x as f64) * freq[0] + self.offset[0];
            for z in 0..size[1] {
                let zin = (origin[1] + z as f64) * freq[1] + self.offset[1];

                let skew = (xin + zin) * F2;
                let i = floor_i32(xin + skew);
                let j = floor_i32(zin + skew);
                let unskew = f64::from(i.wrapping_add(j)) * G2;
                let x0 = xin - (f64::from(i) - unskew);
                let y0 = zin - (f64::from(j) - unskew);

                let (i1, j1) = if x0 > y0 { (1u8, 0u8) } else { (0u8, 1u8) };
                let x1 = (x0 - f64::from(i1)) + G2;
                let y1 = (y0 - f64::from(j1)) + G2;
                let x2 = (x0 - 1.0) + 2.0 * G2;
                let y2 = (y0 - 1.0) + 2.0 * G2;

                let ii = i as u8;
                let jj = j as u8;
                let gi0 = self.perm(ii.wrapping_add(self.perm(jj))) % 12;
                let gi1 = self.perm(
                    ii.wrapping_add(i1)
                        .wrapping_add(self.perm(jj.wrapping_add(j1))),
                ) % 12;
                let gi2 = self.perm(
                    ii.wrapping_add(1)
                        .wrapping_add(self.perm(jj.wrapping_add(1))),
                ) % 12;

                let n0 = corner(gi0, x0, y0);
                let n1 = corner(gi1, x1, y1);
                let n2 = corner(gi2, x2, y2);
                buf[k] += 70.0 * (n0 + n1 + n2) * amplitude;
                k += 1;
            }
        }
    }

    fn perlin_3d(
        &self,
        buf: &mut [f64],
        origin: [f64; 3],
        size: [usize; 3],
        freq: [f64; 3],
        octave_size: f64,
    ) {
        let [size_x, size_y, size_z] = size;
        let weight = 1.0 / octave_size;
        let mut cached_bucket: Option<u8> = None;
        let (mut x1, mut x2, mut xx1, mut xx2) = (0.0, 0.0, 0.0, 0.0);
        let mut index = 0;

        for x in 0..size_x {
            let (xb, xf) = lattice((origin[0] + x as f64) * freq[0] + self.offset[0]);
            let fade_x = fade(xf);
            for z in 0..size_z {
                let (zb, zf) = lattice((origin[2] + z as f64) * freq[2] + self.offset[2]);
                let fade_z = fade(zf);
                for y in 0..size_y {
                    let (yb, yf) = lattice((origin[1] + y as f64) * freq[1] + self.offset[1]);
                    let fade_y = fade(yf);

                    // Corner gradients only depend on the y cell once x and z are fixed.
                    if y == 0 || cached_bucket != Some(yb) {
                        cached_bucket = Some(yb);
                        let a = self.perm(xb);
                        let b = self.perm(xb.wrapping_add(1));
                        let k2 = self.perm(a.wrapping_add(yb)).wrapping_add(zb);
                        let l2 = self.perm(a.wrapping_add(yb).wrapping_add(1)).wrapping_add(zb);
                        let k3 = self.perm(b.wrapping_add(yb)).wrapping_add(zb);
                        let l3 = self.perm(b.wrapping_add(yb).wrapping_add(1)).wrapping_add(zb);
                        x1 = lerp(
                            fade_x,
                            grad(self.perm(k2), xf, yf, zf),
                            grad(self.perm(k3), xf - 1.0, yf, zf),
                        );
                        x2 = lerp(
                            fade_x,
                            grad(self.perm(l2), xf, yf - 1.0, zf),
                            grad(self.perm(l3), xf - 1.0, yf - 1.0, zf),
                        );
                        xx1 = lerp(
                            fade_x,
                            grad(self.perm(k2.wrapping_add(1)), xf, yf, zf - 1.0),
                            grad(self.perm(k3.wrapping_add(1)), xf - 1.0, yf, zf - 1.0),
                        );
                        xx2 = lerp(
                            fade_x,
                            grad(self.perm(l2.wrapping_add(1)), xf, yf - 1.0, zf - 1.0),
                            grad(
                                self.perm(l3.wrapping_add(1)),
                                xf - 1.0,
                                yf - 1.0,
                                zf - 1.0,
                            ),
                        );
                    }
                    let y1 = lerp(fade_y, x1, x2);
                    let y2 = lerp(fade_y, xx1, xx2);
                    buf[index] += lerp(fade_z, y1, y2) * weight;
                    index += 1;
                }
            }
        }
    }

    fn perlin_2d(
        &self,
        buf: &mut [f64],
        origin: [f64; 2],
        size: [usize; 2],
        freq: [f64; 2],
        octave_size: f64,
    ) {
        let weight = 1.0 / octave_size;
        let mut index = 0;
        for x in 0..size[0] {
            let (xb, xf) = lattice((origin[0] + x as f64) * freq[0] + self.offset[0]);
            let fade_x = fade(xf);
            for z in 0..size[1] {
                let (zb, zf) = lattice((origin[1] + z as f64) * freq[1] + self.offset[2]);
                let fade_z = fade(zf);
                let hxz = self.perm(self.perm(xb)).wrapping_add(zb);
                let hx1z = self.perm(self.perm(xb.wrapping_add(1))).wrapping_add(zb);
                let x1 = lerp(
                    fade_x,
                    grad_2d(self.perm(hxz), xf, zf),
                    grad_2d(self.perm(hx1z), xf - 1.0, zf),
                );
                let x2 = lerp(
                    fade_x,
                    grad_2d(self.perm(hxz.wrapping_add(1)), xf, zf - 1.0),
                    grad_2d(self.perm(hx1z.wrapping_add(1)), xf - 1.0, zf - 1.0),
                );
                buf[index] += lerp(fade_z, x1, x2) * weight;
                index += 1;
            }
        }
    }
}

/// A stack of octaves drawn consecutively from one generator.
#[derive(Debug, Clone, PartialEq)]
pub struct OctaveSet {
    tables: Vec<PermutationTable>,
}

impl OctaveSet {
    /// Draw `octaves` tables in order from `rng`.
    pub fn new(rng: &mut JavaRandom, octaves: usize) -> Self {
        let tables = (0..octaves).map(|_| PermutationTable::new(rng)).collect();
        Self { tables }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn tables(&self) -> &[PermutationTable] {
        &self.tables
    }

    /// Overwrite `buf` (x-major, `size[0] * size[1]`) with summed simplex octaves.
    ///
    /// The base frequency is divided by 1.5; octave `j` samples at `freq * lacunarity^j` with
    /// amplitude `0.55 / 0.5^j`.
    pub fn sample_simplex_2d(
        &self,
        buf: &mut [f64],
        origin: [f64; 2],
        size: [usize; 2],
        freq: [f64; 2],
        lacunarity: f64,
    ) {
        debug_assert_eq!(buf.len(), size[0] * size[1]);
        buf.fill(0.0);
        let freq = [freq[0] / 1.5, freq[1] / 1.5];
        let mut amplification = 1.0;
        let mut diminution = 1.0;
        for table in &self.tables {
            table.simplex_2d(
                buf,
                origin,
                size,
                [freq[0] * amplification, freq[1] * amplification],
                0.550_000_000_000_000_04 / diminution,
            );
            amplification *= lacunarity;
            diminution *= 0.5;
        }
    }

    /// Overwrite `buf` with summed 3D gradient octaves.
    ///
    /// `origin`, `size` and `freq` are in x, y, z order; the buffer is laid out
    /// `(x * size_z + z) * size_y + y`. Octave `o` samples at `freq / 2^o` and is weighted `2^o`.
    pub fn sample_perlin_3d(
        &self,
        buf: &mut [f64],
        origin: [f64; 3],
        size: [usize; 3],
        freq: [f64; 3],
    ) {
        debug_assert_eq!(buf.len(), size[0] * size[1] * size[2]);
        buf.fill(0.0);
        let mut factor = 1.0;
        for table in &self.tables {
            table.perlin_3d(
                buf,
                origin,
                size,
                [freq[0] * factor, freq[1] * factor, freq[2] * factor],
                factor,
            );
            factor /= 2.0;
        }
    }

    /// Overwrite `buf` (x-major) with summed 2D gradient octaves, weighted like
    /// [`OctaveSet::sample_perlin_3d`].
    pub fn sample_perlin_2d(
        &self,
        buf: &mut [f64],
        origin: [f64; 2],
        size: [usize; 2],
        freq: [f64; 2],
    ) {
        debug_assert_eq!(buf.len(), size[0] * size[1]);
        buf.fill(0.0);
        let mut factor = 1.0;
        for table in &self.tables {
            table.perlin_2d(
                buf,
                origin,
                size,
                [freq[0] * factor, freq[1] * factor],
                factor,
            );
            factor /= 2.0;
        }
    }
}

/// Truncate toward zero, then step down for negative fractions.
#[inline]
pub(crate) fn floor_i32(v: f64) -> i32 {
    let t = v as i32;
    if v < f64::from(t) {
        t.wrapping_sub(1)
    } else {
        t
    }
}

/// Lattice cell (low 8 bits) and the fractional position inside it.
#[inline]
fn lattice(v: f64) -> (u8, f64) {
    let cell = floor_i32(v);
    (cell as u8, v - f64::from(cell))
}

#[inline]
pub(crate) fn fade(t: f64) -> f64 {
    let w = t * (t * 6.0 - 15.0) + 10.0;
    t * t * t * w
}

#[inline]
pub(crate) fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Gradient dot product selected by the low four bits of `hash`.
#[inline]
pub(crate) fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    match hash & 0xF {
        0x0 => x + y,
        0x1 => -x + y,
        0x2 => x - y,
        0x3 => -x - y,
        0x4 => x + z,
        0x5 => -x + z,
        0x6 => x - z,
        0x7 => -x - z,
        0x8 => y + z,
        0x9 => -y + z,
        0xA => y - z,
        0xB => -y - z,
        0xC => y + x,
        0xD => -y + z,
        0xE => y - x,
        _ => -y - z,
    }
}

#[inline]
fn grad_2d(hash: u8, x: f64, z: f64) -> f64 {
    grad(hash, x, 0.0, z)
}

#[inline]
fn corner(gi: u8, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        let [gx, gy] = GRAD2[gi as usize];
        t * t * (gx * x + gy * y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_table_matches_reference() {
        let mut rng = JavaRandom::new(46290);
        let table = PermutationTable::new(&mut rng);
        assert_eq!(table.offset[0], 88.129_504_636_603_514);
        assert_eq!(table.offset[1], 9.211_413_528_707_906_2);
        assert_eq!(table.offset[2], 77.243_878_395_707_867);
        assert_eq!(
            &table.permutations[..8],
            &[109, 45, 255, 91, 192, 237, 219, 232]
        );
        assert_eq!(rng.state(), 57_985_821_026_085);
        assert!(table.is_valid());
    }

    #[test]
    fn skip_consumes_same_draws_as_new() {
        let mut built = JavaRandom::new(99);
        let mut skipped = JavaRandom::new(99);
        PermutationTable::new(&mut built);
        PermutationTable::skip(&mut skipped);
        assert_eq!(built, skipped);
    }

    #[test]
    fn octave_set_draws_tables_in_sequence() {
        let mut rng = JavaRandom::new(3);
        let set = OctaveSet::new(&mut rng, 4);
        let mut again = JavaRandom::new(3);
        for table in set.tables() {
            assert_eq!(table, &PermutationTable::new(&mut again));
        }
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn floor_handles_negative_fractions() {
        assert_eq!(floor_i32(1.5), 1);
        assert_eq!(floor_i32(-0.5), -1);
        assert_eq!(floor_i32(-2.0), -2);
        assert_eq!(lattice(-0.25), (255, 0.75));
        assert_eq!(lattice(257.5), (1, 0.5));
    }

    #[test]
    fn fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
    }

    #[test]
    fn grad_reuses_z_for_upper_cases() {
        assert_eq!(grad(0xD, 1.0, 2.0, 3.0), 1.0);
        assert_eq!(grad(0xF, 1.0, 2.0, 3.0), -5.0);
        assert_eq!(grad(0x1C, 1.0, 2.0, 3.0), 3.0);
    }

    #[test]
    fn samplers_overwrite_previous_contents() {
        let mut rng = JavaRandom::new(11);
        let set = OctaveSet::new(&mut rng, 2);
        let mut dirty = vec![1.0e9; 3 * 4];
        let mut clean = vec![0.0; 3 * 4];
        set.sample_simplex_2d(&mut dirty, [16.0, -32.0], [3, 4], [0.25, 0.25], 0.5);
        set.sample_simplex_2d(&mut clean, [16.0, -32.0], [3, 4], [0.25, 0.25], 0.5);
        assert_eq!(dirty, clean);

        let mut dirty = vec![-7.0; 2 * 3 * 2];
        let mut clean = vec![0.0; 2 * 3 * 2];
        set.sample_perlin_3d(&mut dirty, [4.0, 0.0, 8.0], [2, 3, 2], [1.0, 0.5, 1.0]);
        set.sample_perlin_3d(&mut clean, [4.0, 0.0, 8.0], [2, 3, 2], [1.0, 0.5, 1.0]);
        assert_eq!(dirty, clean);
    }

    #[test]
    fn simplex_stays_bounded() {
        let mut rng = JavaRandom::new(46290);
        let set = OctaveSet::new(&mut rng, 1);
        let mut buf = vec![0.0; 16 * 16];
        set.sample_simplex_2d(&mut buf, [-256.0, 512.0], [16, 16], [0.7, 0.7], 1.0);
        // A single octave is bounded by its amplitude.
        assert!(buf.iter().all(|v| v.abs() <= 0.56), "{buf:?}");
        assert!(buf.iter().any(|v| *v != 0.0));
    }
}
