use super::{
    reporter::{DefaultGlobalTestPartResultReporter, DefaultPerThreadTestPartResultReporter},
    UnitTest,
};
use crate::{
    config::Config,
    listener::{
        ListenerId, LogListener, PrettyUnitTestResultPrinter, TestEventListener as _,
        TestEventListeners,
    },
    sync::{lock, read, write},
    test::{run_guarded, Environment, FixtureDesc},
    test_case::TestCase,
    test_info::TestInfo,
    test_part::{TestPartResult, TestPartResultReporter, TestPartResultType},
    test_result::TestResult,
    tls::{self, ThreadLocal},
};
use maybe_unwind::capture_panic_info;
use std::{
    panic,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, Once, RwLock,
    },
    time::{Duration, Instant},
};

#[derive(Default)]
struct Registry {
    test_cases: Vec<Arc<TestCase>>,
    // execution order, as positions into `test_cases`.
    test_case_indices: Vec<usize>,
}

/// The state behind a `UnitTest`.
pub(crate) struct UnitTestImpl {
    config: Mutex<Config>,
    registry: RwLock<Registry>,
    environments: Mutex<Vec<Box<dyn Environment>>>,
    listeners: Mutex<TestEventListeners>,
    log_listener: Mutex<Option<ListenerId>>,
    // the default result printer installed by `configure`, if still in place.
    builtin_printer: Mutex<Option<ListenerId>>,
    current_test_case: Mutex<Option<Arc<TestCase>>>,
    current_test_info: Mutex<Option<Arc<TestInfo>>>,
    ad_hoc_test_result: Mutex<TestResult>,
    elapsed_time: Mutex<Duration>,
    running: AtomicBool,
    // serializes the delivery of part results.
    part_mutex: Mutex<()>,
    global_test_part_result_reporter: Mutex<Arc<dyn TestPartResultReporter>>,
    per_thread_test_part_result_reporter: ThreadLocal<Arc<dyn TestPartResultReporter>>,
}

impl UnitTestImpl {
    pub(crate) fn new(config: Config) -> Arc<Self> {
        let imp = Arc::new_cyclic(|weak| {
            let global: Arc<dyn TestPartResultReporter> =
                Arc::new(DefaultGlobalTestPartResultReporter {
                    unit_test: weak.clone(),
                });
            let per_thread: Arc<dyn TestPartResultReporter> =
                Arc::new(DefaultPerThreadTestPartResultReporter {
                    unit_test: weak.clone(),
                });
            Self {
                config: Mutex::new(config),
                registry: RwLock::new(Registry::default()),
                environments: Mutex::new(vec![]),
                listeners: Mutex::new(TestEventListeners::new()),
                log_listener: Mutex::new(None),
                builtin_printer: Mutex::new(None),
                current_test_case: Mutex::new(None),
                current_test_info: Mutex::new(None),
                ad_hoc_test_result: Mutex::new(TestResult::new()),
                elapsed_time: Mutex::new(Duration::default()),
                running: AtomicBool::new(false),
                part_mutex: Mutex::new(()),
                global_test_part_result_reporter: Mutex::new(global),
                per_thread_test_part_result_reporter: ThreadLocal::new(per_thread),
            }
        });
        imp.configure(config);
        imp
    }

    /// Return the unit test that receives assertions raised on this thread.
    ///
    /// This is the unit test running on this thread, or the global instance
    /// when none is. Threads spawned by a test body start without one, so
    /// their assertions go to the global instance even while a separately
    /// created unit test runs, unless the running unit test is installed on
    /// them with `tls::set`.
    pub(crate) fn for_current_thread() -> Arc<UnitTestImpl> {
        tls::active().unwrap_or_else(|| UnitTest::get_instance().imp().clone())
    }

    pub(crate) fn config(&self) -> Config {
        *lock(&self.config)
    }

    pub(crate) fn configure(&self, config: Config) {
        *lock(&self.config) = config;

        let mut listeners = self.listeners();
        let mut builtin_printer = lock(&self.builtin_printer);
        // a printer installed or removed by the user is left alone.
        if builtin_printer.is_none() || *builtin_printer == listeners.default_result_printer() {
            *builtin_printer = listeners.set_default_result_printer(Some(Box::new(
                PrettyUnitTestResultPrinter::new(config.color),
            )));
        }

        let mut log_listener = lock(&self.log_listener);
        match (config.log_events, *log_listener) {
            (true, None) => {
                *log_listener = Some(listeners.append(Box::new(LogListener::new())));
            }
            (false, Some(id)) => {
                drop(listeners.release(id));
                *log_listener = None;
            }
            _ => {}
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub(crate) fn listeners(&self) -> MutexGuard<'_, TestEventListeners> {
        lock(&self.listeners)
    }

    pub(crate) fn add_environment(&self, env: Box<dyn Environment>) {
        lock(&self.environments).push(env);
    }

    // ---- registration ----

    pub(crate) fn add_test_info(&self, test_info: Arc<TestInfo>) {
        if self.is_running() {
            log::warn!("{} is registered while the tests are running", test_info);
        }
        log::debug!("register {} ({})", test_info, test_info.location());
        self.get_or_create_test_case(test_info.test_case_name(), *test_info.fixture())
            .add_test_info(test_info);
    }

    fn get_or_create_test_case(&self, name: &str, fixture: FixtureDesc) -> Arc<TestCase> {
        let mut registry = write(&self.registry);
        if let Some(test_case) = registry.test_cases.iter().find(|tc| tc.name() == name) {
            return test_case.clone();
        }
        let test_case = Arc::new(TestCase::new(name, fixture));
        let index = registry.test_cases.len();
        registry.test_cases.push(test_case.clone());
        registry.test_case_indices.push(index);
        test_case
    }

    pub(crate) fn get_test_case(&self, i: usize) -> Option<Arc<TestCase>> {
        let registry = read(&self.registry);
        let index = *registry.test_case_indices.get(i)?;
        registry.test_cases.get(index).cloned()
    }

    pub(crate) fn test_cases(&self) -> Vec<Arc<TestCase>> {
        let registry = read(&self.registry);
        registry
            .test_case_indices
            .iter()
            .filter_map(|&index| registry.test_cases.get(index).cloned())
            .collect()
    }

    pub(crate) fn total_test_case_count(&self) -> usize {
        read(&self.registry).test_cases.len()
    }

    // ---- execution state ----

    pub(crate) fn current_test_case(&self) -> Option<Arc<TestCase>> {
        lock(&self.current_test_case).clone()
    }

    /// Mark `test_case` as current until the returned guard is dropped.
    pub(crate) fn enter_test_case(&self, test_case: Arc<TestCase>) -> ClearOnDrop<'_, TestCase> {
        *lock(&self.current_test_case) = Some(test_case);
        ClearOnDrop(&self.current_test_case)
    }

    pub(crate) fn current_test_info(&self) -> Option<Arc<TestInfo>> {
        lock(&self.current_test_info).clone()
    }

    /// Mark `test_info` as current until the returned guard is dropped.
    pub(crate) fn enter_test_info(&self, test_info: Arc<TestInfo>) -> ClearOnDrop<'_, TestInfo> {
        *lock(&self.current_test_info) = Some(test_info);
        ClearOnDrop(&self.current_test_info)
    }

    pub(crate) fn ad_hoc_test_result(&self) -> MutexGuard<'_, TestResult> {
        lock(&self.ad_hoc_test_result)
    }

    pub(crate) fn elapsed_time(&self) -> Duration {
        *lock(&self.elapsed_time)
    }

    /// Apply `f` to the result of the running test, or to the ad-hoc
    /// result when no test is running.
    pub(crate) fn with_current_test_result<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TestResult) -> R,
    {
        match self.current_test_info() {
            Some(test_info) => {
                let result = test_info.result();
                f(&result)
            }
            None => {
                let result = self.ad_hoc_test_result();
                f(&result)
            }
        }
    }

    pub(crate) fn with_current_test_result_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TestResult) -> R,
    {
        match self.current_test_info() {
            Some(test_info) => {
                let mut result = test_info.result();
                f(&mut result)
            }
            None => {
                let mut result = self.ad_hoc_test_result();
                f(&mut result)
            }
        }
    }

    // ---- reporting ----

    pub(crate) fn global_test_part_result_reporter(&self) -> Arc<dyn TestPartResultReporter> {
        lock(&self.global_test_part_result_reporter).clone()
    }

    /// Install a process-wide reporter, returning the previous one.
    pub(crate) fn set_global_test_part_result_reporter(
        &self,
        reporter: Arc<dyn TestPartResultReporter>,
    ) -> Arc<dyn TestPartResultReporter> {
        std::mem::replace(&mut *lock(&self.global_test_part_result_reporter), reporter)
    }

    pub(crate) fn test_part_result_reporter_for_current_thread(
        &self,
    ) -> Arc<dyn TestPartResultReporter> {
        self.per_thread_test_part_result_reporter.get()
    }

    /// Install a reporter for the calling thread, returning the previous one.
    pub(crate) fn set_test_part_result_reporter_for_current_thread(
        &self,
        reporter: Arc<dyn TestPartResultReporter>,
    ) -> Arc<dyn TestPartResultReporter> {
        self.per_thread_test_part_result_reporter.set(reporter)
    }

    /// Install or remove the calling thread's own reporter, returning the one
    /// it had before. Without one the thread reports to the default reporter.
    pub(crate) fn replace_test_part_result_reporter_for_current_thread(
        &self,
        reporter: Option<Arc<dyn TestPartResultReporter>>,
    ) -> Option<Arc<dyn TestPartResultReporter>> {
        self.per_thread_test_part_result_reporter.replace(reporter)
    }

    #[cfg(test)]
    pub(crate) fn per_thread_reporter_slots(&self) -> usize {
        self.per_thread_test_part_result_reporter.len()
    }

    pub(crate) fn add_test_part_result(
        &self,
        result_type: TestPartResultType,
        file_name: Option<&str>,
        line_number: Option<u32>,
        message: &str,
    ) {
        let result = TestPartResult::new(result_type, file_name, line_number, message);
        let _guard = lock(&self.part_mutex);
        self.test_part_result_reporter_for_current_thread()
            .report_test_part_result(&result);
    }

    // ---- running ----

    fn clear_non_ad_hoc_test_result(&self) {
        for test_case in self.test_cases() {
            test_case.clear_result();
        }
    }

    pub(crate) fn run_all_tests(self: &Arc<Self>) -> bool {
        install_panic_hook();

        let unit_test = UnitTest { imp: self.clone() };
        let _active = tls::set(self.clone());
        self.running.store(true, Ordering::SeqCst);
        let _running = ResetOnDrop(&self.running);

        let repeat = self.config().repeat;
        let forever = repeat < 0;
        log::debug!(
            "running {} tests from {} test cases (repeat = {})",
            unit_test.test_to_run_count(),
            unit_test.test_case_to_run_count(),
            repeat
        );

        self.listeners()
            .repeater()
            .on_test_program_start(&unit_test);

        let mut iteration: i32 = 0;
        while forever || iteration < repeat {
            self.clear_non_ad_hoc_test_result();
            self.run_iteration(&unit_test, iteration);
            iteration = iteration.wrapping_add(1);
        }

        self.listeners().repeater().on_test_program_end(&unit_test);

        unit_test.passed()
    }

    fn run_iteration(&self, unit_test: &UnitTest, iteration: i32) {
        let start = Instant::now();
        self.listeners()
            .repeater()
            .on_test_iteration_start(unit_test, iteration);

        self.listeners()
            .repeater()
            .on_environments_set_up_start(unit_test);
        {
            let mut environments = lock(&self.environments);
            for env in environments.iter_mut() {
                run_guarded(|| env.set_up(), "Environment::set_up()");
            }
        }
        self.listeners()
            .repeater()
            .on_environments_set_up_end(unit_test);

        if self.ad_hoc_test_result().has_fatal_failure() {
            log::debug!("skipping the test cases because the environment set-up failed");
        } else {
            for test_case in self.test_cases() {
                test_case.run(unit_test);
            }
        }

        self.listeners()
            .repeater()
            .on_environments_tear_down_start(unit_test);
        {
            let mut environments = lock(&self.environments);
            for env in environments.iter_mut().rev() {
                run_guarded(|| env.tear_down(), "Environment::tear_down()");
            }
        }
        self.listeners()
            .repeater()
            .on_environments_tear_down_end(unit_test);

        *lock(&self.elapsed_time) = start.elapsed();
        self.listeners()
            .repeater()
            .on_test_iteration_end(unit_test, iteration);
    }
}

/// Clears a current-execution marker when dropped, including on unwinding.
pub(crate) struct ClearOnDrop<'a, T>(&'a Mutex<Option<Arc<T>>>);

impl<T> Drop for ClearOnDrop<'_, T> {
    fn drop(&mut self) {
        *lock(self.0) = None;
    }
}

struct ResetOnDrop<'a>(&'a AtomicBool);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn install_panic_hook() {
    static SET_HOOK: Once = Once::new();
    SET_HOOK.call_once(|| {
        let prev_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !capture_panic_info(info) {
                prev_hook(info);
            }
        }));
    });
}
