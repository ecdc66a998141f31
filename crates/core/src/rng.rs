//! 48-bit linear congruential generator compatible with the legacy engine's `Random`.
//!
//! Every downstream stage derives its randomness from this type, so the arithmetic here is
//! deliberately literal: all updates wrap, and the state is masked to 48 bits after each step.

use rand::{RngCore, SeedableRng};

/// LCG multiplier.
pub const MULTIPLIER: u64 = 0x5_DEEC_E66D;
/// LCG addend.
pub const ADDEND: u64 = 0xB;
/// Mask keeping the low 48 bits of the state.
pub const MASK: u64 = (1 << 48) - 1;

const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;
const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

// Composite multiplier/addend pairs for skipping a fixed number of draws.
const ADVANCE4_MULTIPLIER: u64 = 0x32EB_772C_5F11;
const ADVANCE4_ADDEND: u64 = 0x2D38_73C4_CD04;
const ADVANCE6_MULTIPLIER: u64 = 0x45D7_3749_A7F9;
const ADVANCE6_ADDEND: u64 = 0x1761_7168_255E;

/// Deterministic pseudo-random generator with the legacy 48-bit LCG semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JavaRandom {
    state: u64,
}

impl JavaRandom {
    /// Create a generator from a 64-bit seed (scrambled with the multiplier).
    #[inline]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ MULTIPLIER) & MASK,
        }
    }

    /// Reset the generator as if freshly constructed from `seed`.
    #[inline]
    pub fn set_seed(&mut self, seed: u64) {
        self.state = (seed ^ MULTIPLIER) & MASK;
    }

    /// Raw 48-bit state.
    #[inline]
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// Step the generator and return its top `bits` bits as a signed 32-bit value.
    #[inline]
    pub fn next_bits(&mut self, bits: u32) -> i32 {
        debug_assert!((1..=32).contains(&bits));
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.state >> (48 - bits)) as i64 as i32
    }

    /// Uniform integer in `0..bound`.
    ///
    /// Power-of-two bounds take the multiply-high shortcut and draw exactly once. Any other bound
    /// rejects draws for which `bits - val + (bound - 1)` overflows into the sign bit, using 32-bit
    /// wrapping arithmetic; the overflow test is what selects the output sequence.
    #[inline]
    pub fn next_int(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "bound must be positive, got {bound}");
        let mut bits = self.next_bits(31);
        let m = bound.wrapping_sub(1);
        if bound & m == 0 {
            return ((i64::from(bound) * i64::from(bits)) >> 31) as i32;
        }
        loop {
            let val = bits % bound;
            if bits.wrapping_sub(val).wrapping_add(m) >= 0 {
                return val;
            }
            bits = self.next_bits(31);
        }
    }

    /// Uniform `f64` in `[0, 1)` built from a 53-bit mantissa.
    #[inline]
    pub fn next_double(&mut self) -> f64 {
        let high = (self.next_bits(26) as u32 as u64) << 27;
        let low = self.next_bits(27) as i64;
        (high as i64).wrapping_add(low) as f64 * DOUBLE_UNIT
    }

    /// Uniform `f32` in `[0, 1)` built from a 24-bit mantissa.
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        self.next_bits(24) as f32 * FLOAT_UNIT
    }

    /// Two 32-bit draws combined as `(high << 32) + low`, with `low` sign-extended.
    #[inline]
    pub fn next_long(&mut self) -> i64 {
        let high = i64::from(self.next_bits(32));
        let low = i64::from(self.next_bits(32));
        (high << 32).wrapping_add(low)
    }

    /// Jump forward by four draws.
    #[inline]
    pub fn advance4(&mut self) {
        self.state = self
            .state
            .wrapping_mul(ADVANCE4_MULTIPLIER)
            .wrapping_add(ADVANCE4_ADDEND)
            & MASK;
    }

    /// Jump forward by six draws.
    #[inline]
    pub fn advance6(&mut self) {
        self.state = self
            .state
            .wrapping_mul(ADVANCE6_MULTIPLIER)
            .wrapping_add(ADVANCE6_ADDEND)
            & MASK;
    }

    /// Derive an odd 64-bit multiplier the way region seeding expects: `(next_long / 2) * 2 + 1`.
    #[inline]
    pub fn next_odd_multiplier(&mut self) -> u64 {
        ((self.next_long() / 2).wrapping_mul(2).wrapping_add(1)) as u64
    }
}

impl RngCore for JavaRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_long() as u64
    }

    /// Byte layout of the legacy `nextBytes`: each 32-bit draw fills up to four bytes, low first.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let mut rnd = self.next_bits(32);
            for byte in chunk {
                *byte = rnd as u8;
                rnd >>= 8;
            }
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for JavaRandom {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 46290;

    #[test]
    fn seeding_scrambles_with_multiplier() {
        assert_eq!(JavaRandom::new(SEED).state(), 25_214_866_111);
        assert_eq!(JavaRandom::new(0).state(), MULTIPLIER);
    }

    #[test]
    fn next_int_rejection_bound_matches_reference() {
        let mut rng = JavaRandom::new(SEED);
        let drawn: Vec<i32> = (0..8).map(|_| rng.next_int(10)).collect();
        assert_eq!(drawn, vec![5, 9, 8, 3, 7, 1, 9, 4]);
    }

    #[test]
    fn next_int_power_of_two_matches_reference() {
        let mut rng = JavaRandom::new(SEED);
        let drawn: Vec<i32> = (0..8).map(|_| rng.next_int(16)).collect();
        assert_eq!(drawn, vec![5, 13, 0, 12, 4, 4, 6, 11]);
    }

    #[test]
    fn power_of_two_bound_draws_exactly_once() {
        for bound in [1, 2, 4, 64, 256, 1 << 15] {
            let mut rng = JavaRandom::new(SEED);
            let mut reference = JavaRandom::new(SEED);
            rng.next_int(bound);
            reference.next_bits(31);
            assert_eq!(rng, reference, "bound {bound} consumed more than one draw");
        }
    }

    #[test]
    fn next_int_stays_in_range() {
        let mut rng = JavaRandom::new(7);
        for bound in 1..300 {
            for _ in 0..20 {
                let v = rng.next_int(bound);
                assert!((0..bound).contains(&v), "{v} outside 0..{bound}");
            }
        }
    }

    #[test]
    fn large_bound_rejection_terminates() {
        // Bounds just above 2^30 reject roughly half the draws.
        let mut rng = JavaRandom::new(SEED);
        for _ in 0..100 {
            let v = rng.next_int((1 << 30) + 1);
            assert!(v >= 0);
        }
    }

    #[test]
    fn next_double_matches_reference() {
        let mut rng = JavaRandom::new(SEED);
        assert_eq!(rng.next_double(), 0.344_255_877_486_732_48);
        assert_eq!(rng.next_double(), 0.035_982_084_096_749_634);
        assert_eq!(rng.next_double(), 0.301_733_899_983_233_86);
    }

    #[test]
    fn next_float_matches_reference() {
        let mut rng = JavaRandom::new(SEED);
        assert_eq!(rng.next_float(), 0.344_255_865_f32);
        assert_eq!(rng.next_float(), 0.863_457_739_f32);
        assert_eq!(rng.next_float(), 0.035_982_072_4_f32);
    }

    #[test]
    fn next_long_matches_reference() {
        let mut rng = JavaRandom::new(SEED);
        assert_eq!(rng.next_long(), 6_350_399_872_885_821_943);
        assert_eq!(rng.next_long(), 663_752_306_667_288_063);
        assert_eq!(rng.next_long(), 5_566_008_038_807_507_126);
    }

    #[test]
    fn advance_matches_repeated_draws() {
        let mut jumped = JavaRandom::new(SEED);
        let mut stepped = JavaRandom::new(SEED);
        jumped.advance4();
        for _ in 0..4 {
            stepped.next_bits(31);
        }
        assert_eq!(jumped, stepped);

        let mut jumped = JavaRandom::new(SEED);
        let mut stepped = JavaRandom::new(SEED);
        jumped.advance6();
        for _ in 0..6 {
            stepped.next_bits(17);
        }
        assert_eq!(jumped, stepped);
    }

    #[test]
    fn state_is_always_masked() {
        let mut rng = JavaRandom::new(u64::MAX);
        for _ in 0..1000 {
            rng.next_bits(32);
            assert_eq!(rng.state() & !MASK, 0);
        }
    }

    #[test]
    fn odd_multiplier_is_odd() {
        let mut rng = JavaRandom::new(SEED);
        for _ in 0..64 {
            assert_eq!(rng.next_odd_multiplier() & 1, 1);
        }
    }

    #[test]
    fn rng_core_uses_legacy_streams() {
        let mut a = JavaRandom::seed_from_u64(SEED);
        let mut b = JavaRandom::new(SEED);
        assert_eq!(a.next_u64(), b.next_long() as u64);
        assert_eq!(a.next_u32(), b.next_bits(32) as u32);

        let mut bytes = [0u8; 6];
        let mut c = JavaRandom::new(SEED);
        c.fill_bytes(&mut bytes);
        let mut d = JavaRandom::new(SEED);
        let first = d.next_bits(32).to_le_bytes();
        let second = d.next_bits(32).to_le_bytes();
        assert_eq!(&bytes[..4], &first);
        assert_eq!(&bytes[4..], &second[..2]);
    }

    #[test]
    fn from_seed_is_little_endian_u64() {
        let rng = JavaRandom::from_seed(SEED.to_le_bytes());
        assert_eq!(rng, JavaRandom::new(SEED));
    }
}
