use crate::{
    listener::TestEventListener as _,
    sync::lock,
    test::{run_guarded, run_test, FixtureDesc, Location, TestFactory},
    test_result::TestResult,
    unit_test::UnitTest,
};
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};

/// The prefix that marks a test or a test case as disabled.
pub(crate) const DISABLED_PREFIX: &str = "DISABLED_";

/// A statically registered test, collected before `main` runs.
#[derive(Copy, Clone)]
pub struct TestRegistration {
    #[doc(hidden)]
    pub test_case_name: &'static str,
    #[doc(hidden)]
    pub name: &'static str,
    #[doc(hidden)]
    pub location: Location,
    #[doc(hidden)]
    pub fixture: FixtureDesc,
    #[doc(hidden)]
    pub factory: &'static dyn TestFactory,
}

impl fmt::Debug for TestRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRegistration")
            .field("test_case_name", &self.test_case_name)
            .field("name", &self.name)
            .field("location", &self.location)
            .field("fixture", &self.fixture)
            .finish()
    }
}

/// The registered metadata and the result of a single test.
pub struct TestInfo {
    test_case_name: String,
    name: String,
    location: Location,
    fixture: FixtureDesc,
    should_run: bool,
    factory: Box<dyn TestFactory>,
    result: Mutex<TestResult>,
}

impl TestInfo {
    pub(crate) fn new(
        test_case_name: &str,
        name: &str,
        location: Location,
        fixture: FixtureDesc,
        factory: Box<dyn TestFactory>,
    ) -> Self {
        let should_run =
            !test_case_name.starts_with(DISABLED_PREFIX) && !name.starts_with(DISABLED_PREFIX);
        Self {
            test_case_name: test_case_name.to_owned(),
            name: name.to_owned(),
            location,
            fixture,
            should_run,
            factory,
            result: Mutex::new(TestResult::new()),
        }
    }

    /// Return the name of the test case this test belongs to.
    #[inline]
    pub fn test_case_name(&self) -> &str {
        &self.test_case_name
    }

    /// Return the name of the test.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return where the test is defined.
    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Return the fixture type of the test.
    #[inline]
    pub fn fixture(&self) -> &FixtureDesc {
        &self.fixture
    }

    /// Return whether the test is selected to run.
    #[inline]
    pub fn should_run(&self) -> bool {
        self.should_run
    }

    /// Return whether the test is disabled by its name.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        !self.should_run
    }

    /// Return the result of the most recent run.
    ///
    /// The result is locked while the guard is alive; do not hold it across
    /// a call that may record an assertion.
    pub fn result(&self) -> MutexGuard<'_, TestResult> {
        lock(&self.result)
    }

    pub(crate) fn clear_result(&self) {
        self.result().clear();
    }

    pub(crate) fn run(self: &Arc<Self>, unit_test: &UnitTest) {
        if !self.should_run {
            return;
        }

        let imp = unit_test.imp();
        let _current = imp.enter_test_info(self.clone());
        imp.listeners().repeater().on_test_start(self);

        let start = Instant::now();
        let test = run_guarded(|| self.factory.create_test(), "the test constructor");
        match test {
            Some(Some(mut test)) => {
                run_test(&mut *test);
                run_guarded(move || drop(test), "the test destructor");
            }
            Some(None) => log::debug!("no test instance was created for {}", self),
            None => {}
        }
        self.result().set_elapsed_time(start.elapsed());

        imp.listeners().repeater().on_test_end(self);
    }
}

impl fmt::Display for TestInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.test_case_name, self.name)
    }
}

impl fmt::Debug for TestInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestInfo")
            .field("test_case_name", &self.test_case_name)
            .field("name", &self.name)
            .field("location", &self.location)
            .field("should_run", &self.should_run)
            .finish()
    }
}
