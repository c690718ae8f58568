use super::TestEventListener;
use crate::{test_case::TestCase, test_info::TestInfo, test_part::TestPartResult, unit_test::UnitTest};

/// A listener that mirrors the test events to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogListener {
    _p: (),
}

impl LogListener {
    /// Create a log listener.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { _p: () }
    }
}

impl TestEventListener for LogListener {
    fn on_test_program_start(&mut self, unit_test: &UnitTest) {
        let count = unit_test.test_to_run_count();
        let suffix = match count {
            1 => "",
            _ => "s",
        };
        log::info!("running {} test{}", count, suffix);
    }

    fn on_test_iteration_start(&mut self, _: &UnitTest, iteration: i32) {
        log::debug!("iteration {} started", iteration);
    }

    fn on_test_case_start(&mut self, test_case: &TestCase) {
        log::info!("test case start: {}", test_case.name());
    }

    fn on_test_start(&mut self, test_info: &TestInfo) {
        log::info!("start: {}", test_info);
    }

    fn on_test_part_result(&mut self, result: &TestPartResult) {
        if result.failed() {
            log::error!("{}", result);
        }
    }

    fn on_test_end(&mut self, test_info: &TestInfo) {
        if test_info.result().passed() {
            log::info!("{}: ok", test_info);
        } else {
            log::error!("{}: FAILED", test_info);
        }
    }

    fn on_test_case_end(&mut self, test_case: &TestCase) {
        log::info!(
            "test case end: {} ({} passed, {} failed)",
            test_case.name(),
            test_case.successful_test_count(),
            test_case.failed_test_count()
        );
    }

    fn on_test_program_end(&mut self, unit_test: &UnitTest) {
        if unit_test.passed() {
            log::info!("test status: ok");
        } else {
            log::error!("test status: FAILED");
        }
    }
}
