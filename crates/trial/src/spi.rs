//! Helpers for testing the assertions themselves.

use crate::{
    assertion::AssertionResult,
    sync::lock,
    test_part::{TestPartResult, TestPartResultArray, TestPartResultReporter, TestPartResultType},
    unit_test::UnitTestImpl,
};
use std::{
    fmt,
    marker::PhantomData,
    sync::{Arc, Mutex},
};

/// The set of threads whose part results are intercepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InterceptMode {
    /// Intercept only the results raised on the thread that installed the reporter.
    InterceptOnlyCurrentThread,
    /// Intercept the results raised on every thread.
    InterceptAllThreads,
}

#[derive(Default)]
struct Collector {
    results: Mutex<TestPartResultArray>,
}

impl TestPartResultReporter for Collector {
    fn report_test_part_result(&self, result: &TestPartResult) {
        lock(&self.results).append(result.clone());
    }
}

/// Captures the part results raised while it is alive, instead of recording
/// them on the running test.
///
/// The previously installed reporter is restored on drop. The value must be
/// dropped on the thread that created it.
pub struct ScopedFakeTestPartResultReporter {
    mode: InterceptMode,
    unit_test: Arc<UnitTestImpl>,
    collector: Arc<Collector>,
    old_reporter: Option<OldReporter>,
    _not_send: PhantomData<*const ()>,
}

enum OldReporter {
    Global(Arc<dyn TestPartResultReporter>),
    // `None` when the thread had no reporter of its own.
    CurrentThread(Option<Arc<dyn TestPartResultReporter>>),
}

impl ScopedFakeTestPartResultReporter {
    /// Start intercepting the part results according to `mode`.
    pub fn new(mode: InterceptMode) -> Self {
        let unit_test = UnitTestImpl::for_current_thread();
        let collector = Arc::new(Collector::default());
        let reporter: Arc<dyn TestPartResultReporter> = collector.clone();
        let old_reporter = match mode {
            InterceptMode::InterceptAllThreads => {
                OldReporter::Global(unit_test.set_global_test_part_result_reporter(reporter))
            }
            InterceptMode::InterceptOnlyCurrentThread => OldReporter::CurrentThread(
                unit_test.replace_test_part_result_reporter_for_current_thread(Some(reporter)),
            ),
        };
        Self {
            mode,
            unit_test,
            collector,
            old_reporter: Some(old_reporter),
            _not_send: PhantomData,
        }
    }

    /// Return the interception mode.
    pub fn mode(&self) -> InterceptMode {
        self.mode
    }

    /// Return a snapshot of the results captured so far.
    pub fn results(&self) -> TestPartResultArray {
        lock(&self.collector.results).clone()
    }
}

impl Drop for ScopedFakeTestPartResultReporter {
    fn drop(&mut self) {
        match self.old_reporter.take() {
            Some(OldReporter::Global(old_reporter)) => {
                self.unit_test
                    .set_global_test_part_result_reporter(old_reporter);
            }
            Some(OldReporter::CurrentThread(old_reporter)) => {
                self.unit_test
                    .replace_test_part_result_reporter_for_current_thread(old_reporter);
            }
            None => {}
        }
    }
}

impl fmt::Debug for ScopedFakeTestPartResultReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedFakeTestPartResultReporter")
            .field("mode", &self.mode)
            .field("results", &self.results())
            .finish()
    }
}

/// Check that `results` holds exactly one failure of type `result_type`
/// whose message contains `substr`.
#[doc(hidden)]
pub fn check_single_failure(
    results: &TestPartResultArray,
    result_type: TestPartResultType,
    substr: &str,
) -> AssertionResult {
    let expected = match result_type {
        TestPartResultType::FatalFailure => "1 fatal failure",
        _ => "1 non-fatal failure",
    };

    if results.size() != 1 {
        let mut failure = AssertionResult::failure().push(format_args!(
            "Expected: {}\n  Actual: {} failures",
            expected,
            results.size()
        ));
        for result in results {
            failure = failure.push(format_args!("\n{}", result));
        }
        return failure;
    }

    let result = results.get_test_part_result(0);
    if result.result_type() != result_type {
        return AssertionResult::failure().push(format_args!(
            "Expected: {}\n  Actual:\n{}",
            expected, result
        ));
    }

    if !result.message().contains(substr) {
        return AssertionResult::failure().push(format_args!(
            "Expected: {} containing \"{}\"\n  Actual:\n{}",
            expected, substr, result
        ));
    }

    AssertionResult::success()
}
