//! Stage-boundary hooks for the radix driver.
//!
//! The driver never prints. Callers that want to see the intermediate
//! classification, scans and outputs pass a [`PassObserver`]; the default
//! methods do nothing, so an observer only implements the stages it cares
//! about.

use crate::classify::BitMask;
use tracing::debug;

/// Receives the state of each pass as it is produced.
pub trait PassObserver {
    /// A pass is about to partition `input` by `mask`.
    fn pass_started(&mut self, _pass: usize, _mask: BitMask, _input: &[u32]) {}

    /// The classifier finished.
    fn classified(&mut self, _mask: BitMask, _flags: &[bool]) {}

    /// Both prefix scans finished.
    fn scanned(&mut self, _mask: BitMask, _false_count: &[usize], _true_count: &[usize]) {}

    /// The scatter finished; `output` is the input of the next pass.
    fn scattered(&mut self, _mask: BitMask, _output: &[u32]) {}
}

/// Observer that ignores every stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PassObserver for NoopObserver {}

/// Emits one `debug` event per stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PassObserver for TracingObserver {
    fn pass_started(&mut self, pass: usize, mask: BitMask, input: &[u32]) {
        debug!(pass, bit = mask.bit(), len = input.len(), "pass started");
    }

    fn classified(&mut self, mask: BitMask, flags: &[bool]) {
        debug!(bit = mask.bit(), ?flags, "map");
    }

    fn scanned(&mut self, mask: BitMask, false_count: &[usize], true_count: &[usize]) {
        debug!(bit = mask.bit(), ?false_count, ?true_count, "scan");
    }

    fn scattered(&mut self, mask: BitMask, output: &[u32]) {
        debug!(bit = mask.bit(), ?output, "output");
    }
}

/// Snapshot of one completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassTrace {
    pub bit: u32,
    pub input: Vec<u32>,
    pub flags: Vec<bool>,
    pub false_count: Vec<usize>,
    pub true_count: Vec<usize>,
    pub output: Vec<u32>,
}

/// Records a [`PassTrace`] for every pass.
#[derive(Debug, Default, Clone)]
pub struct PassRecorder {
    passes: Vec<PassTrace>,
}

impl PassRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passes(&self) -> &[PassTrace] {
        &self.passes
    }

    pub fn into_passes(self) -> Vec<PassTrace> {
        self.passes
    }

    fn current(&mut self) -> Option<&mut PassTrace> {
        self.passes.last_mut()
    }
}

impl PassObserver for PassRecorder {
    fn pass_started(&mut self, _pass: usize, mask: BitMask, input: &[u32]) {
        self.passes.push(PassTrace {
            bit: mask.bit(),
            input: input.to_vec(),
            ..PassTrace::default()
        });
    }

    fn classified(&mut self, _mask: BitMask, flags: &[bool]) {
        if let Some(trace) = self.current() {
            trace.flags = flags.to_vec();
        }
    }

    fn scanned(&mut self, _mask: BitMask, false_count: &[usize], true_count: &[usize]) {
        if let Some(trace) = self.current() {
            trace.false_count = false_count.to_vec();
            trace.true_count = true_count.to_vec();
        }
    }

    fn scattered(&mut self, _mask: BitMask, output: &[u32]) {
        if let Some(trace) = self.current() {
            trace.output = output.to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_ignores_stages_before_start() {
        let mut recorder = PassRecorder::new();
        recorder.classified(BitMask::new(0), &[true]);
        assert!(recorder.passes().is_empty());
    }

    #[test]
    fn test_recorder_collects_stages() {
        let mut recorder = PassRecorder::new();
        let mask = BitMask::new(2);
        recorder.pass_started(0, mask, &[4, 1]);
        recorder.classified(mask, &[true, false]);
        recorder.scanned(mask, &[0, 1], &[1, 1]);
        recorder.scattered(mask, &[1, 4]);

        let passes = recorder.into_passes();
        assert_eq!(passes.len(), 1);
        assert_eq!(
            passes[0],
            PassTrace {
                bit: 2,
                input: vec![4, 1],
                flags: vec![true, false],
                false_count: vec![0, 1],
                true_count: vec![1, 1],
                output: vec![1, 4],
            }
        );
    }
}
