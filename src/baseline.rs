//! Baseline Binary Radix Sorts
//!
//! Two straightforward whole-list versions of the same bitwise LSD radix
//! sort, used as reference points for the scan-based sorter. They accept the
//! same input and reject the same degenerate cases.
//!
//! - `partition_lists`: builds fresh left/right lists every pass and
//!   concatenates them
//! - `partition_buffers`: reuses preallocated left/right buffers with write
//!   heads and copies them back in place

use crate::config::Execution;
use crate::error::SortError;
use crate::radix::{digit_count, validate_keys};

/// Radix sort that allocates new partition lists on every pass.
pub fn partition_lists(input: &[u32]) -> Result<Vec<u32>, SortError> {
    let max = validate_keys(input, Execution::Sequential)?;

    let mut output = input.to_vec();
    for d in 0..digit_count(max) {
        let mask = 1u32 << d;
        let (mut left, right): (Vec<u32>, Vec<u32>) =
            output.iter().partition(|&&value| value & mask == 0);
        left.extend(right);
        output = left;
    }
    Ok(output)
}

/// Radix sort that partitions through two reusable buffers.
pub fn partition_buffers(input: &[u32]) -> Result<Vec<u32>, SortError> {
    let max = validate_keys(input, Execution::Sequential)?;

    let n = input.len();
    let mut output = input.to_vec();
    let mut left = vec![0u32; n];
    let mut right = vec![0u32; n];

    for d in 0..digit_count(max) {
        let mask = 1u32 << d;
        let mut l_head = 0;
        let mut r_head = 0;

        for &value in output.iter() {
            if value & mask == 0 {
                left[l_head] = value;
                l_head += 1;
            } else {
                right[r_head] = value;
                r_head += 1;
            }
        }

        output[..l_head].copy_from_slice(&left[..l_head]);
        output[l_head..].copy_from_slice(&right[..r_head]);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radix::is_sorted;
    use rand::Rng;

    const EXAMPLE: [u32; 10] = [32, 12, 5, 2, 64, 12, 4, 84, 1, 3];
    const EXPECTED: [u32; 10] = [1, 2, 3, 4, 5, 12, 12, 32, 64, 84];

    #[test]
    fn test_partition_lists_example() {
        assert_eq!(partition_lists(&EXAMPLE).unwrap(), EXPECTED);
    }

    #[test]
    fn test_partition_buffers_example() {
        assert_eq!(partition_buffers(&EXAMPLE).unwrap(), EXPECTED);
    }

    #[test]
    fn test_baselines_random() {
        let mut rng = rand::thread_rng();
        let data: Vec<u32> = (0..1000).map(|_| rng.gen_range(1..100_000)).collect();
        let mut expected = data.clone();
        expected.sort_unstable();

        let lists = partition_lists(&data).unwrap();
        let buffers = partition_buffers(&data).unwrap();
        assert!(is_sorted(&lists));
        assert_eq!(lists, expected);
        assert_eq!(buffers, expected);
    }

    #[test]
    fn test_baselines_power_of_two_maximum() {
        assert_eq!(partition_lists(&[64, 1, 63]).unwrap(), vec![1, 63, 64]);
        assert_eq!(partition_buffers(&[64, 1, 63]).unwrap(), vec![1, 63, 64]);
    }

    #[test]
    fn test_baselines_reject_degenerate_input() {
        assert_eq!(partition_lists(&[]), Err(SortError::EmptyInput));
        assert_eq!(
            partition_buffers(&[0, 0]),
            Err(SortError::NonPositiveMaximum { max: 0 })
        );
    }
}
