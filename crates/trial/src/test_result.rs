use crate::test_part::{invalid_index, TestPartResult};
use std::time::Duration;

/// The accumulated outcome of a test: its part results and elapsed time.
#[derive(Clone, Debug, Default)]
pub struct TestResult {
    test_part_results: Vec<TestPartResult>,
    elapsed_time: Duration,
}

impl TestResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return whether no part of the test failed.
    pub fn passed(&self) -> bool {
        !self.failed()
    }

    /// Return whether some part of the test failed.
    pub fn failed(&self) -> bool {
        self.test_part_results.iter().any(TestPartResult::failed)
    }

    /// Return whether the test has a fatal failure.
    pub fn has_fatal_failure(&self) -> bool {
        self.test_part_results
            .iter()
            .any(TestPartResult::fatally_failed)
    }

    /// Return whether the test has a non-fatal failure.
    pub fn has_nonfatal_failure(&self) -> bool {
        self.test_part_results
            .iter()
            .any(TestPartResult::nonfatally_failed)
    }

    /// Return the number of recorded part results.
    #[inline]
    pub fn total_part_count(&self) -> usize {
        self.test_part_results.len()
    }

    /// Return the part result at `index`.
    ///
    /// The process is aborted if the index is out of range.
    pub fn get_test_part_result(&self, index: usize) -> &TestPartResult {
        match self.test_part_results.get(index) {
            Some(result) => result,
            None => invalid_index("TestResult", index, self.test_part_results.len()),
        }
    }

    /// Return all part results in the order they were recorded.
    #[inline]
    pub fn test_part_results(&self) -> &[TestPartResult] {
        &self.test_part_results
    }

    /// Return the time spent running the test.
    #[inline]
    pub fn elapsed_time(&self) -> Duration {
        self.elapsed_time
    }

    pub(crate) fn add_test_part_result(&mut self, result: TestPartResult) {
        self.test_part_results.push(result);
    }

    pub(crate) fn set_elapsed_time(&mut self, elapsed_time: Duration) {
        self.elapsed_time = elapsed_time;
    }

    pub(crate) fn clear(&mut self) {
        self.test_part_results.clear();
        self.elapsed_time = Duration::default();
    }
}
