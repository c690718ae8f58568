use super::UnitTestImpl;
use crate::{
    listener::TestEventListener as _,
    test_part::{TestPartResult, TestPartResultReporter},
};
use std::sync::Weak;

/// Records a part result on the running test and notifies the listeners.
pub(super) struct DefaultGlobalTestPartResultReporter {
    pub(super) unit_test: Weak<UnitTestImpl>,
}

impl TestPartResultReporter for DefaultGlobalTestPartResultReporter {
    fn report_test_part_result(&self, result: &TestPartResult) {
        if let Some(unit_test) = self.unit_test.upgrade() {
            unit_test.with_current_test_result_mut(|r| r.add_test_part_result(result.clone()));
            unit_test.listeners().repeater().on_test_part_result(result);
        }
    }
}

/// Forwards a part result to the process-wide reporter of the unit test.
pub(super) struct DefaultPerThreadTestPartResultReporter {
    pub(super) unit_test: Weak<UnitTestImpl>,
}

impl TestPartResultReporter for DefaultPerThreadTestPartResultReporter {
    fn report_test_part_result(&self, result: &TestPartResult) {
        if let Some(unit_test) = self.unit_test.upgrade() {
            unit_test
                .global_test_part_result_reporter()
                .report_test_part_result(result);
        }
    }
}
