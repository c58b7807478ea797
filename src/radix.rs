//! Radix Driver
//!
//! Binary LSD radix sort built from the three primitives:
//!
//! 1. **Map**: classify every key by bit `d` ([`crate::classify`])
//! 2. **Scan**: count clear bits and set bits with two inclusive scans ([`crate::scan`])
//! 3. **Scatter**: move each key to its computed index ([`crate::scatter`])
//!
//! One pass runs per bit of the maximum key, least significant first. Each
//! pass is a stable partition, so after the last pass the keys are ordered by
//! their full value.
//!
//! Two key buffers are allocated per call and swap roles after every pass;
//! the classification and prefix vectors are allocated once and overwritten.
//!
//! Complexity with parallel primitives: map O(1), scan O(n log n), scatter
//! O(1) per pass, for O(n log n) per pass overall.

use crate::classify::{map_mask, par_map_mask, BitMask};
use crate::config::{Execution, SortConfig};
use crate::error::SortError;
use crate::observer::{NoopObserver, PassObserver};
use crate::scan::{inclusive_scan, par_inclusive_scan, Count};
use crate::scatter::{par_scatter, scatter};
use rayon::prelude::*;
use tracing::{debug_span, trace};

/// Number of passes needed to cover every set bit of `max`.
///
/// This is the bit length of `max`, i.e. `ceil(log2(max + 1))`.
#[inline]
pub fn digit_count(max: u32) -> u32 {
    u32::BITS - max.leading_zeros()
}

/// Largest key, or `None` for an empty slice.
pub fn max_value(data: &[u32]) -> Option<u32> {
    data.iter().copied().max()
}

/// Parallel reduce variant of [`max_value`].
pub fn par_max_value(data: &[u32]) -> Option<u32> {
    data.par_iter().copied().max()
}

/// Check if a slice is sorted in ascending order.
#[inline]
pub fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

/// Validate unsigned keys and return their maximum.
pub(crate) fn validate_keys(input: &[u32], execution: Execution) -> Result<u32, SortError> {
    let max = match execution {
        Execution::Sequential => max_value(input),
        Execution::Parallel => par_max_value(input),
    }
    .ok_or(SortError::EmptyInput)?;

    if max == 0 {
        return Err(SortError::NonPositiveMaximum { max: 0 });
    }
    Ok(max)
}

/// Validate signed keys and convert them to unsigned ones, returning the
/// keys together with their maximum.
pub(crate) fn validate_signed(input: &[i32]) -> Result<(Vec<u32>, u32), SortError> {
    if input.is_empty() {
        return Err(SortError::EmptyInput);
    }
    if let Some((index, &value)) = input.iter().enumerate().find(|&(_, &v)| v < 0) {
        return Err(SortError::NegativeElement {
            index,
            value: value.into(),
        });
    }
    let max = input.iter().copied().max().unwrap_or(0);
    if max <= 0 {
        return Err(SortError::NonPositiveMaximum { max: max.into() });
    }
    Ok((input.iter().map(|&v| v as u32).collect(), max as u32))
}

/// Per-call scratch space reused by every pass.
struct PassBuffers {
    flags: Vec<bool>,
    false_count: Vec<usize>,
    true_count: Vec<usize>,
}

impl PassBuffers {
    fn new(len: usize) -> Self {
        PassBuffers {
            flags: vec![false; len],
            false_count: vec![0; len],
            true_count: vec![0; len],
        }
    }
}

/// Scan-based binary radix sorter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadixSorter {
    config: SortConfig,
}

impl RadixSorter {
    pub fn new(config: SortConfig) -> Self {
        RadixSorter { config }
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Sort unsigned keys into a new ascending vector.
    ///
    /// # Errors
    /// [`SortError::EmptyInput`] or [`SortError::NonPositiveMaximum`].
    pub fn sort(&self, input: &[u32]) -> Result<Vec<u32>, SortError> {
        self.sort_observed(input, &mut NoopObserver)
    }

    /// Like [`sort`](Self::sort), reporting every stage to `observer`.
    pub fn sort_observed<O: PassObserver + ?Sized>(
        &self,
        input: &[u32],
        observer: &mut O,
    ) -> Result<Vec<u32>, SortError> {
        let execution = self.config.execution_for(input.len());
        let max = validate_keys(input, execution)?;
        Ok(self.run(input, max, execution, observer))
    }

    /// Sort signed keys, rejecting negative values.
    ///
    /// # Errors
    /// [`SortError::EmptyInput`], [`SortError::NegativeElement`] or
    /// [`SortError::NonPositiveMaximum`].
    pub fn sort_signed(&self, input: &[i32]) -> Result<Vec<i32>, SortError> {
        self.sort_signed_observed(input, &mut NoopObserver)
    }

    /// Like [`sort_signed`](Self::sort_signed), reporting every stage to `observer`.
    pub fn sort_signed_observed<O: PassObserver + ?Sized>(
        &self,
        input: &[i32],
        observer: &mut O,
    ) -> Result<Vec<i32>, SortError> {
        let (keys, max) = validate_signed(input)?;
        let execution = self.config.execution_for(keys.len());
        let sorted = self.run(&keys, max, execution, observer);
        Ok(sorted.into_iter().map(|v| v as i32).collect())
    }

    /// Run a single stable partition pass by `bit`.
    pub fn split_by_bit(&self, input: &[u32], bit: u32) -> Vec<u32> {
        self.split_by_bit_observed(input, bit, &mut NoopObserver)
    }

    /// Like [`split_by_bit`](Self::split_by_bit), reporting every stage to `observer`.
    pub fn split_by_bit_observed<O: PassObserver + ?Sized>(
        &self,
        input: &[u32],
        bit: u32,
        observer: &mut O,
    ) -> Vec<u32> {
        let execution = self.config.execution_for(input.len());
        let mut buffers = PassBuffers::new(input.len());
        let mut out = vec![0u32; input.len()];
        let mask = BitMask::new(bit);
        observer.pass_started(0, mask, input);
        self.partition(input, &mut out, mask, &mut buffers, execution, observer);
        out
    }

    fn run<O: PassObserver + ?Sized>(
        &self,
        input: &[u32],
        max: u32,
        execution: Execution,
        observer: &mut O,
    ) -> Vec<u32> {
        let digits = digit_count(max);
        trace!(len = input.len(), max, digits, ?execution, "radix sort");

        let mut current = input.to_vec();
        let mut next = vec![0u32; input.len()];
        let mut buffers = PassBuffers::new(input.len());

        for d in 0..digits {
            let _span = debug_span!("radix_pass", bit = d).entered();
            let mask = BitMask::new(d);
            observer.pass_started(d as usize, mask, &current);
            self.partition(&current, &mut next, mask, &mut buffers, execution, observer);
            std::mem::swap(&mut current, &mut next);
        }

        current
    }

    /// Stable partition of `input` into `out` by `mask`.
    ///
    /// Each stage returns only after all of its work is done, so the scans see
    /// a complete classification and the scatter sees complete counts.
    fn partition<O: PassObserver + ?Sized>(
        &self,
        input: &[u32],
        out: &mut [u32],
        mask: BitMask,
        buffers: &mut PassBuffers,
        execution: Execution,
        observer: &mut O,
    ) {
        let PassBuffers {
            flags,
            false_count,
            true_count,
        } = buffers;

        match execution {
            Execution::Sequential => {
                map_mask(input, mask, flags);
                observer.classified(mask, flags);

                inclusive_scan(flags, Count::False, 0, false_count);
                inclusive_scan(flags, Count::True, 0, true_count);
                observer.scanned(mask, false_count, true_count);

                scatter(input, flags, false_count, true_count, out);
            }
            Execution::Parallel => {
                let block = self.config.scan_block;

                par_map_mask(input, mask, flags);
                observer.classified(mask, flags);

                let flags_ref: &[bool] = &flags[..];
                let (false_out, true_out) = (&mut false_count[..], &mut true_count[..]);
                rayon::join(
                    || par_inclusive_scan(flags_ref, Count::False, 0, false_out, block),
                    || par_inclusive_scan(flags_ref, Count::True, 0, true_out, block),
                );
                observer.scanned(mask, false_count, true_count);

                par_scatter(input, flags, false_count, true_count, out);
            }
        }
        observer.scattered(mask, out);
    }
}

/// Sort signed keys with the default sequential sorter.
///
/// # Example
///
/// ```
/// let sorted = scan_radix_sort::sort(&[32, 12, 5, 2, 64, 12, 4, 84, 1, 3]).unwrap();
/// assert_eq!(sorted, vec![1, 2, 3, 4, 5, 12, 12, 32, 64, 84]);
/// ```
pub fn sort(input: &[i32]) -> Result<Vec<i32>, SortError> {
    RadixSorter::default().sort_signed(input)
}

/// Sort unsigned keys with the default sequential sorter.
pub fn sort_unsigned(input: &[u32]) -> Result<Vec<u32>, SortError> {
    RadixSorter::default().sort(input)
}

/// One stable partition pass by `bit` with the default sequential sorter.
pub fn split_by_bit(input: &[u32], bit: u32) -> Vec<u32> {
    RadixSorter::default().split_by_bit(input, bit)
}
