//! Prefix Counter (scan primitive)
//!
//! Inclusive prefix scans over a classification vector. The combining
//! operation is chosen by the [`Count`] strategy instead of a closure, so the
//! scan stays a pure function of its arguments.
//!
//! ## Parallel scan
//!
//! The parallel version is the classic two-phase blocked scan:
//! 1. **Reduce**: count matching flags in each block (parallel)
//! 2. **Offsets**: exclusive scan of the block totals (sequential, one entry per block)
//! 3. **Scan**: scan every block starting from its offset (parallel)
//!
//! Integer addition is associative, so the result is identical to the
//! sequential scan.

use rayon::prelude::*;

/// Which classification a running counter counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Count {
    True,
    False,
}

impl Count {
    #[inline]
    pub fn matches(self, flag: bool) -> bool {
        match self {
            Count::True => flag,
            Count::False => !flag,
        }
    }

    /// The combining operation: `acc + 1` when `flag` is counted, else `acc`.
    #[inline]
    pub fn step(self, acc: usize, flag: bool) -> usize {
        acc + usize::from(self.matches(flag))
    }
}

/// Inclusive scan: `out[0] = op(init, input[0])`, `out[i] = op(out[i-1], input[i])`.
///
/// Only the indices both slices share are written.
pub fn inclusive_scan(input: &[bool], op: Count, init: usize, out: &mut [usize]) {
    let mut acc = init;
    for (slot, &flag) in out.iter_mut().zip(input) {
        acc = op.step(acc, flag);
        *slot = acc;
    }
}

/// Parallel [`inclusive_scan`] over blocks of `block` elements.
pub fn par_inclusive_scan(
    input: &[bool],
    op: Count,
    init: usize,
    out: &mut [usize],
    block: usize,
) {
    let n = input.len().min(out.len());
    let block = block.max(1);
    let input = &input[..n];
    let out = &mut out[..n];

    let totals: Vec<usize> = input
        .par_chunks(block)
        .map(|chunk| chunk.iter().filter(|&&flag| op.matches(flag)).count())
        .collect();

    let mut offsets = Vec::with_capacity(totals.len());
    let mut running = init;
    for total in totals {
        offsets.push(running);
        running += total;
    }

    out.par_chunks_mut(block)
        .zip(input.par_chunks(block))
        .zip(offsets.par_iter())
        .for_each(|((out_chunk, in_chunk), &offset)| {
            inclusive_scan(in_chunk, op, offset, out_chunk);
        });
}
