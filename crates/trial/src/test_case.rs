use crate::{
    listener::TestEventListener as _,
    sync::{lock, read, write},
    test::{run_guarded, FixtureDesc},
    test_info::TestInfo,
    unit_test::UnitTest,
};
use std::{
    fmt,
    sync::{Arc, Mutex, RwLock},
    time::{Duration, Instant},
};

/// A named group of tests sharing a fixture type.
pub struct TestCase {
    name: String,
    fixture: FixtureDesc,
    tests: RwLock<Tests>,
    elapsed_time: Mutex<Duration>,
}

#[derive(Default)]
struct Tests {
    test_info_list: Vec<Arc<TestInfo>>,
    // execution order, as positions into `test_info_list`.
    test_indices: Vec<usize>,
}

impl TestCase {
    pub(crate) fn new(name: &str, fixture: FixtureDesc) -> Self {
        Self {
            name: name.to_owned(),
            fixture,
            tests: RwLock::new(Tests::default()),
            elapsed_time: Mutex::new(Duration::default()),
        }
    }

    /// Return the name of the test case.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the fixture type shared by the tests.
    #[inline]
    pub fn fixture(&self) -> &FixtureDesc {
        &self.fixture
    }

    pub(crate) fn add_test_info(&self, test_info: Arc<TestInfo>) {
        if *test_info.fixture() != self.fixture {
            log::warn!(
                "test {} uses the fixture {}, but test case {} was registered with {}",
                test_info,
                test_info.fixture().type_name(),
                self.name,
                self.fixture.type_name(),
            );
        }
        let mut tests = write(&self.tests);
        let index = tests.test_info_list.len();
        tests.test_info_list.push(test_info);
        tests.test_indices.push(index);
    }

    /// Return the `i`-th test in execution order.
    pub fn get_test_info(&self, i: usize) -> Option<Arc<TestInfo>> {
        let tests = read(&self.tests);
        let index = *tests.test_indices.get(i)?;
        tests.test_info_list.get(index).cloned()
    }

    /// Return all tests in execution order.
    pub fn test_infos(&self) -> Vec<Arc<TestInfo>> {
        let tests = read(&self.tests);
        tests
            .test_indices
            .iter()
            .filter_map(|&index| tests.test_info_list.get(index).cloned())
            .collect()
    }

    fn count_tests<F>(&self, f: F) -> usize
    where
        F: Fn(&TestInfo) -> bool,
    {
        read(&self.tests)
            .test_info_list
            .iter()
            .filter(|info| f(&***info))
            .count()
    }

    /// Return the number of tests that ran and passed.
    pub fn successful_test_count(&self) -> usize {
        self.count_tests(|info| info.should_run() && info.result().passed())
    }

    /// Return the number of tests that ran and failed.
    pub fn failed_test_count(&self) -> usize {
        self.count_tests(|info| info.should_run() && info.result().failed())
    }

    /// Return the number of disabled tests.
    pub fn disabled_test_count(&self) -> usize {
        self.count_tests(TestInfo::is_disabled)
    }

    /// Return the number of tests selected to run.
    pub fn test_to_run_count(&self) -> usize {
        self.count_tests(TestInfo::should_run)
    }

    /// Return the number of registered tests.
    pub fn total_test_count(&self) -> usize {
        read(&self.tests).test_info_list.len()
    }

    /// Return whether no test of this case failed.
    pub fn passed(&self) -> bool {
        !self.failed()
    }

    /// Return whether some test of this case failed.
    pub fn failed(&self) -> bool {
        self.failed_test_count() > 0
    }

    /// Return whether at least one test of this case should run.
    pub fn should_run(&self) -> bool {
        self.test_to_run_count() > 0
    }

    /// Return the time spent running the test case.
    pub fn elapsed_time(&self) -> Duration {
        *lock(&self.elapsed_time)
    }

    pub(crate) fn clear_result(&self) {
        for test_info in read(&self.tests).test_info_list.iter() {
            test_info.clear_result();
        }
        *lock(&self.elapsed_time) = Duration::default();
    }

    pub(crate) fn run(self: &Arc<Self>, unit_test: &UnitTest) {
        if !self.should_run() {
            return;
        }

        let imp = unit_test.imp();
        let _current = imp.enter_test_case(self.clone());
        imp.listeners().repeater().on_test_case_start(self);

        let start = Instant::now();
        let fixture = self.fixture;
        run_guarded(|| fixture.set_up_test_case(), "set_up_test_case()");

        for test_info in self.test_infos() {
            test_info.run(unit_test);
        }

        run_guarded(|| fixture.tear_down_test_case(), "tear_down_test_case()");
        *lock(&self.elapsed_time) = start.elapsed();

        imp.listeners().repeater().on_test_case_end(self);
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("fixture", &self.fixture)
            .field("total_test_count", &self.total_test_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{Fixture, FixtureFactory};

    fn body(_: &mut ()) -> anyhow::Result<()> {
        Ok(())
    }

    fn add(test_case: &TestCase, name: &str) {
        test_case.add_test_info(Arc::new(TestInfo::new(
            test_case.name(),
            name,
            crate::__location!(),
            FixtureDesc::of::<()>(),
            Box::new(FixtureFactory::<()>::new(body)),
        )));
    }

    #[test]
    fn tests_keep_registration_order() {
        let test_case = TestCase::new("MyTest", FixtureDesc::of::<()>());
        add(&test_case, "first");
        add(&test_case, "second");
        add(&test_case, "DISABLED_third");

        let names: Vec<_> = test_case
            .test_infos()
            .iter()
            .map(|info| info.name().to_owned())
            .collect();
        assert_eq!(names, vec!["first", "second", "DISABLED_third"]);
        assert_eq!(test_case.get_test_info(1).unwrap().name(), "second");
        assert!(test_case.get_test_info(3).is_none());

        assert_eq!(test_case.total_test_count(), 3);
        assert_eq!(test_case.test_to_run_count(), 2);
        assert_eq!(test_case.disabled_test_count(), 1);
        assert_eq!(test_case.successful_test_count(), 2);
        assert_eq!(test_case.failed_test_count(), 0);
        assert!(test_case.should_run());
        assert!(test_case.passed());
    }

    #[test]
    fn only_disabled_tests_means_nothing_to_run() {
        let test_case = TestCase::new("MyTest", FixtureDesc::of::<()>());
        add(&test_case, "DISABLED_first");
        assert!(!test_case.should_run());
    }

    #[test]
    fn mismatched_fixture_is_still_added() {
        #[derive(Default)]
        struct Other;
        impl Fixture for Other {}

        let test_case = TestCase::new("MyTest", FixtureDesc::of::<Other>());
        add(&test_case, "first");
        assert_eq!(test_case.total_test_count(), 1);
    }
}
