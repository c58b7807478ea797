//! Execution settings for the radix driver.

/// Inputs shorter than this run sequentially even in parallel mode.
pub const DEFAULT_MIN_PARALLEL_LEN: usize = 10_000;

/// Elements per block of the parallel prefix scan.
pub const DEFAULT_SCAN_BLOCK: usize = 4096;

/// How the map, scan and scatter primitives are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// Plain loops on the calling thread.
    #[default]
    Sequential,
    /// Data-parallel primitives on the rayon thread pool.
    Parallel,
}

/// Configuration of a [`RadixSorter`](crate::RadixSorter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub execution: Execution,
    pub min_parallel_len: usize,
    pub scan_block: usize,
}

impl SortConfig {
    /// Sequential configuration with default thresholds.
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Parallel configuration with default thresholds.
    pub fn parallel() -> Self {
        SortConfig {
            execution: Execution::Parallel,
            ..Self::default()
        }
    }

    pub fn with_min_parallel_len(mut self, len: usize) -> Self {
        self.min_parallel_len = len;
        self
    }

    pub fn with_scan_block(mut self, block: usize) -> Self {
        self.scan_block = block.max(1);
        self
    }

    /// Execution mode actually used for an input of `len` elements.
    pub fn execution_for(&self, len: usize) -> Execution {
        match self.execution {
            Execution::Parallel if len >= self.min_parallel_len => Execution::Parallel,
            _ => Execution::Sequential,
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            execution: Execution::Sequential,
            min_parallel_len: DEFAULT_MIN_PARALLEL_LEN,
            scan_block: DEFAULT_SCAN_BLOCK,
        }
    }
}
