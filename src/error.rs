//! Input validation errors.
//!
//! Every variant is detected before the first radix pass runs, so a failed
//! sort never hands back partially sorted data.

use thiserror::Error;

/// Why a sequence was rejected by the radix sorter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// Zero elements: there is no maximum to derive a digit count from.
    #[error("cannot sort an empty sequence: digit count is undefined")]
    EmptyInput,

    /// Every element is zero (or below), so the maximum has no set bits.
    #[error("maximum element is {max}, at least one element must be greater than zero")]
    NonPositiveMaximum { max: i64 },

    /// A negative key was found; bitwise partitioning needs non-negative keys.
    #[error("element {value} at index {index} is negative")]
    NegativeElement { index: usize, value: i64 },
}
