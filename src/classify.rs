//! Bit-Mask Classifier (map primitive)
//!
//! Classifies every key by a single bit. Each output entry depends only on the
//! matching input entry, so the parallel version simply splits the index range
//! across rayon workers.

use rayon::prelude::*;

/// A single bit position used to classify keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitMask {
    bit: u32,
}

impl BitMask {
    pub fn new(bit: u32) -> Self {
        BitMask { bit }
    }

    /// Bit position, 0 being least significant.
    pub fn bit(&self) -> u32 {
        self.bit
    }

    /// The mask value `1 << bit`, or 0 when the bit is outside the key width.
    #[inline]
    pub fn mask(&self) -> u32 {
        1u32.checked_shl(self.bit).unwrap_or(0)
    }

    #[inline]
    pub fn is_set(&self, value: u32) -> bool {
        value & self.mask() != 0
    }
}

/// Write `out[i] = mask.is_set(input[i])` for every index both slices share.
pub fn map_mask(input: &[u32], mask: BitMask, out: &mut [bool]) {
    for (flag, &value) in out.iter_mut().zip(input) {
        *flag = mask.is_set(value);
    }
}

/// Parallel [`map_mask`].
pub fn par_map_mask(input: &[u32], mask: BitMask, out: &mut [bool]) {
    out.par_iter_mut()
        .zip(input.par_iter())
        .for_each(|(flag, &value)| *flag = mask.is_set(value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_mask_values() {
        assert_eq!(BitMask::new(0).mask(), 1);
        assert_eq!(BitMask::new(6).mask(), 64);
        assert_eq!(BitMask::new(31).mask(), 1 << 31);
        assert_eq!(BitMask::new(32).mask(), 0);
    }

    #[test]
    fn test_map_mask_bit_zero() {
        let input = [5u32, 4, 3, 2, 1];
        let mut out = [false; 5];
        map_mask(&input, BitMask::new(0), &mut out);
        assert_eq!(out, [true, false, true, false, true]);
    }

    #[test]
    fn test_map_mask_high_bit() {
        let input = [32u32, 12, 5, 2, 64, 12, 4, 84, 1, 3];
        let mut out = [false; 10];
        map_mask(&input, BitMask::new(6), &mut out);
        assert_eq!(
            out,
            [false, false, false, false, true, false, false, true, false, false]
        );
    }

    #[test]
    fn test_map_mask_out_of_width_bit() {
        let input = [u32::MAX, 0, 7];
        let mut out = [true; 3];
        map_mask(&input, BitMask::new(40), &mut out);
        assert_eq!(out, [false; 3]);
    }

    #[test]
    fn test_map_mask_mismatched_lengths() {
        let input = [1u32, 1, 1, 1];
        let mut short_out = [false; 2];
        map_mask(&input, BitMask::new(0), &mut short_out);
        assert_eq!(short_out, [true, true]);

        let mut long_out = [false; 6];
        map_mask(&input[..2], BitMask::new(0), &mut long_out);
        assert_eq!(long_out, [true, true, false, false, false, false]);
    }

    #[test]
    fn test_par_map_mask_matches_sequential() {
        let mut rng = rand::thread_rng();
        let input: Vec<u32> = (0..50_000).map(|_| rng.gen()).collect();
        for bit in [0, 7, 19, 31] {
            let mut seq = vec![false; input.len()];
            let mut par = vec![false; input.len()];
            map_mask(&input, BitMask::new(bit), &mut seq);
            par_map_mask(&input, BitMask::new(bit), &mut par);
            assert_eq!(seq, par);
        }
    }
}
