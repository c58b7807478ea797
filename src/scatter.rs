//! Stable Scatter
//!
//! Places every key of a pass at the index computed from the two prefix
//! counts. Keys with a clear bit go to the front, keys with a set bit follow
//! them, and each group keeps its input order:
//!
//! - clear bit: `false_count[i] - 1`
//! - set bit: `false_count[n - 1] + true_count[i] - 1`
//!
//! Every destination depends only on the already finished scans, so the
//! writes are independent. With prefix counts satisfying
//! `false_count[i] + true_count[i] == i + 1` the destinations are a
//! permutation of `0..n`, which is what makes the parallel writes disjoint.

use rayon::prelude::*;

/// Destination of element `index` for the given classification.
///
/// `false_total` is the number of clear-bit keys in the pass, i.e.
/// `false_count[n - 1]`.
#[inline]
pub fn destination(
    index: usize,
    flag: bool,
    false_total: usize,
    false_count: &[usize],
    true_count: &[usize],
) -> usize {
    if flag {
        false_total + true_count[index] - 1
    } else {
        false_count[index] - 1
    }
}

/// Destinations of every element, in input order.
pub fn destinations(flags: &[bool], false_count: &[usize], true_count: &[usize]) -> Vec<usize> {
    check_lengths(flags.len(), false_count.len(), true_count.len());
    let false_total = total(false_count);
    flags
        .iter()
        .enumerate()
        .map(|(i, &flag)| destination(i, flag, false_total, false_count, true_count))
        .collect()
}

/// Returns true if `indices` holds each of `0..indices.len()` exactly once.
pub fn is_permutation(indices: &[usize]) -> bool {
    let mut seen = vec![false; indices.len()];
    for &j in indices {
        match seen.get_mut(j) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// Returns true if both count vectors are the zero-based inclusive scans of
/// `flags` (clear flags and set flags respectively).
///
/// Exact scans are what make the destinations a permutation of `0..n`.
pub fn counts_match_flags(flags: &[bool], false_count: &[usize], true_count: &[usize]) -> bool {
    if flags.len() != false_count.len() || flags.len() != true_count.len() {
        return false;
    }
    (0..flags.len()).into_par_iter().all(|i| {
        let (prev_false, prev_true) = match i {
            0 => (0, 0),
            _ => (false_count[i - 1], true_count[i - 1]),
        };
        false_count[i] == prev_false + usize::from(!flags[i])
            && true_count[i] == prev_true + usize::from(flags[i])
    })
}

/// Write `out[destination(i)] = input[i]` for every element.
///
/// # Panics
/// If `input`, `flags`, both count vectors and `out` do not share one length.
pub fn scatter(
    input: &[u32],
    flags: &[bool],
    false_count: &[usize],
    true_count: &[usize],
    out: &mut [u32],
) {
    check_lengths(input.len(), flags.len(), false_count.len());
    check_lengths(input.len(), true_count.len(), out.len());

    let false_total = total(false_count);
    for (i, (&value, &flag)) in input.iter().zip(flags).enumerate() {
        out[destination(i, flag, false_total, false_count, true_count)] = value;
    }
}

/// Parallel [`scatter`].
///
/// # Panics
/// Same length requirements as [`scatter`], plus a panic if the counts are
/// not the inclusive scans of `flags` (see [`counts_match_flags`]).
pub fn par_scatter(
    input: &[u32],
    flags: &[bool],
    false_count: &[usize],
    true_count: &[usize],
    out: &mut [u32],
) {
    check_lengths(input.len(), flags.len(), false_count.len());
    check_lengths(input.len(), true_count.len(), out.len());
    assert!(
        counts_match_flags(flags, false_count, true_count),
        "prefix counts do not match the classification"
    );

    let false_total = total(false_count);
    let target = ScatterTarget {
        ptr: out.as_mut_ptr(),
        len: out.len(),
    };

    input
        .par_iter()
        .zip(flags.par_iter())
        .enumerate()
        .for_each(|(i, (&value, &flag))| {
            let j = destination(i, flag, false_total, false_count, true_count);
            // SAFETY: the counts were checked to be exact scans of `flags`, so
            // destinations form a permutation of 0..n and every index is
            // written by exactly one worker. `write` bounds-checks it.
            unsafe { target.write(j, value) };
        });
}

/// Raw view of the output buffer shared by the scatter workers.
struct ScatterTarget {
    ptr: *mut u32,
    len: usize,
}

// SAFETY: workers write to pairwise distinct indices (see `par_scatter`).
unsafe impl Send for ScatterTarget {}
unsafe impl Sync for ScatterTarget {}

impl ScatterTarget {
    /// # Safety
    /// No other thread may access `index` concurrently.
    #[inline]
    unsafe fn write(&self, index: usize, value: u32) {
        assert!(index < self.len, "scatter index {} out of range {}", index, self.len);
        *self.ptr.add(index) = value;
    }
}

#[inline]
fn total(false_count: &[usize]) -> usize {
    false_count.last().copied().unwrap_or(0)
}

fn check_lengths(a: usize, b: usize, c: usize) {
    assert!(
        a == b && b == c,
        "scatter inputs must share one length, got {}, {} and {}",
        a,
        b,
        c
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{map_mask, BitMask};
    use crate::scan::{inclusive_scan, Count};
    use rand::Rng;

    fn counts(flags: &[bool]) -> (Vec<usize>, Vec<usize>) {
        let mut falses = vec![0usize; flags.len()];
        let mut trues = vec![0usize; flags.len()];
        inclusive_scan(flags, Count::False, 0, &mut falses);
        inclusive_scan(flags, Count::True, 0, &mut trues);
        (falses, trues)
    }

    #[test]
    fn test_scatter_trace_example() {
        let input = [5u32, 4, 3, 2, 1];
        let flags = [true, false, true, false, true];
        let falses = [0usize, 1, 1, 2, 2];
        let trues = [1usize, 1, 2, 2, 3];
        let mut out = [0u32; 5];
        scatter(&input, &flags, &falses, &trues, &mut out);
        assert_eq!(out, [4, 2, 5, 3, 1]);
    }

    #[test]
    fn test_destinations_trace_example() {
        let flags = [true, false, true, false, true];
        let (falses, trues) = counts(&flags);
        let dest = destinations(&flags, &falses, &trues);
        assert_eq!(dest, vec![2, 0, 3, 1, 4]);
        assert!(is_permutation(&dest));
    }

    #[test]
    fn test_all_same_classification() {
        let input = [9u32, 8, 7];
        for flag in [true, false] {
            let flags = [flag; 3];
            let (falses, trues) = counts(&flags);
            let mut out = [0u32; 3];
            scatter(&input, &flags, &falses, &trues, &mut out);
            assert_eq!(out, input);
        }
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[]));
        assert!(is_permutation(&[0]));
        assert!(is_permutation(&[2, 0, 1]));
        assert!(!is_permutation(&[0, 0, 1]));
        assert!(!is_permutation(&[0, 3, 1]));
    }

    #[test]
    fn test_par_scatter_matches_sequential() {
        let mut rng = rand::thread_rng();
        let input: Vec<u32> = (0..50_000).map(|_| rng.gen()).collect();
        let mut flags = vec![false; input.len()];
        map_mask(&input, BitMask::new(13), &mut flags);
        let (falses, trues) = counts(&flags);

        let mut seq = vec![0u32; input.len()];
        let mut par = vec![0u32; input.len()];
        scatter(&input, &flags, &falses, &trues, &mut seq);
        par_scatter(&input, &flags, &falses, &trues, &mut par);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_counts_match_flags() {
        let flags = [true, false, true, false, true];
        let (falses, trues) = counts(&flags);
        assert!(counts_match_flags(&flags, &falses, &trues));
        assert!(counts_match_flags(&[], &[], &[]));
        assert!(!counts_match_flags(&flags, &trues, &falses));
        assert!(!counts_match_flags(&flags, &falses[..4], &trues));
    }

    #[test]
    #[should_panic(expected = "prefix counts do not match the classification")]
    fn test_par_scatter_rejects_colliding_counts() {
        // Every element would land on index 0.
        let n = 100_000;
        let input: Vec<u32> = (0..n as u32).collect();
        let mut out = vec![0u32; n];
        par_scatter(&input, &vec![false; n], &vec![1; n], &vec![0; n], &mut out);
    }

    #[test]
    #[should_panic(expected = "scatter inputs must share one length")]
    fn test_scatter_length_mismatch_panics() {
        let mut out = [0u32; 2];
        scatter(&[1, 2, 3], &[false; 3], &[1, 2, 3], &[0; 3], &mut out);
    }
}
