//! Binary LSD radix sort from data-parallel primitives.
//!
//! Each pass partitions the keys by one bit using three stages that can each
//! run on independent workers:
//!
//! - **Map** ([`classify`]): flag every key whose bit `d` is set
//! - **Scan** ([`scan`]): inclusive prefix counts of clear and set flags
//! - **Scatter** ([`scatter`]): move each key to the index the counts give it
//!
//! The [`radix`] driver runs one pass per bit of the maximum key,
//! double-buffering between passes. [`baseline`] holds two simpler
//! whole-list versions of the same sort for comparison.
//!
//! ```
//! use scan_radix_sort::{RadixSorter, SortConfig, SortError};
//!
//! let sorter = RadixSorter::new(SortConfig::parallel());
//! assert_eq!(sorter.sort(&[5, 4, 3, 2, 1]).unwrap(), vec![1, 2, 3, 4, 5]);
//! assert_eq!(sorter.sort(&[]), Err(SortError::EmptyInput));
//! ```

pub mod baseline;
pub mod classify;
pub mod config;
pub mod error;
pub mod observer;
pub mod radix;
pub mod scan;
pub mod scatter;

pub use classify::BitMask;
pub use config::{Execution, SortConfig};
pub use error::SortError;
pub use observer::{NoopObserver, PassObserver, PassRecorder, PassTrace, TracingObserver};
pub use radix::{digit_count, is_sorted, sort, sort_unsigned, split_by_bit, RadixSorter};
pub use scan::Count;
