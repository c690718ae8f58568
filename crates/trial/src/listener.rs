//! Test event listeners.

mod log;
mod printer;

pub use self::{log::LogListener, printer::PrettyUnitTestResultPrinter};

use crate::{
    test_case::TestCase, test_info::TestInfo, test_part::TestPartResult, unit_test::UnitTest,
};

/// The interface for tracing the execution of tests.
///
/// Every method has an empty default implementation, so a listener only
/// overrides the events it is interested in.
///
/// Listeners are called while the listener list is locked. They must not
/// access `UnitTest::listeners` nor raise assertions from within a callback.
#[allow(unused_variables)]
pub trait TestEventListener: Send {
    /// Called before any test activity starts.
    fn on_test_program_start(&mut self, unit_test: &UnitTest) {}

    /// Called before each iteration of tests starts.
    fn on_test_iteration_start(&mut self, unit_test: &UnitTest, iteration: i32) {}

    /// Called before the environments are set up.
    fn on_environments_set_up_start(&mut self, unit_test: &UnitTest) {}

    /// Called after the environments have been set up.
    fn on_environments_set_up_end(&mut self, unit_test: &UnitTest) {}

    /// Called before the tests of a test case start.
    fn on_test_case_start(&mut self, test_case: &TestCase) {}

    /// Called before a test starts.
    fn on_test_start(&mut self, test_info: &TestInfo) {}

    /// Called after an assertion, or an explicit success or failure.
    fn on_test_part_result(&mut self, result: &TestPartResult) {}

    /// Called after a test ends.
    fn on_test_end(&mut self, test_info: &TestInfo) {}

    /// Called after the tests of a test case ended.
    fn on_test_case_end(&mut self, test_case: &TestCase) {}

    /// Called before the environments are torn down.
    fn on_environments_tear_down_start(&mut self, unit_test: &UnitTest) {}

    /// Called after the environments have been torn down.
    fn on_environments_tear_down_end(&mut self, unit_test: &UnitTest) {}

    /// Called after each iteration of tests ends.
    fn on_test_iteration_end(&mut self, unit_test: &UnitTest, iteration: i32) {}

    /// Called after all test activities have ended.
    fn on_test_program_end(&mut self, unit_test: &UnitTest) {}
}

impl<L: ?Sized> TestEventListener for Box<L>
where
    L: TestEventListener,
{
    fn on_test_program_start(&mut self, unit_test: &UnitTest) {
        (**self).on_test_program_start(unit_test)
    }

    fn on_test_iteration_start(&mut self, unit_test: &UnitTest, iteration: i32) {
        (**self).on_test_iteration_start(unit_test, iteration)
    }

    fn on_environments_set_up_start(&mut self, unit_test: &UnitTest) {
        (**self).on_environments_set_up_start(unit_test)
    }

    fn on_environments_set_up_end(&mut self, unit_test: &UnitTest) {
        (**self).on_environments_set_up_end(unit_test)
    }

    fn on_test_case_start(&mut self, test_case: &TestCase) {
        (**self).on_test_case_start(test_case)
    }

    fn on_test_start(&mut self, test_info: &TestInfo) {
        (**self).on_test_start(test_info)
    }

    fn on_test_part_result(&mut self, result: &TestPartResult) {
        (**self).on_test_part_result(result)
    }

    fn on_test_end(&mut self, test_info: &TestInfo) {
        (**self).on_test_end(test_info)
    }

    fn on_test_case_end(&mut self, test_case: &TestCase) {
        (**self).on_test_case_end(test_case)
    }

    fn on_environments_tear_down_start(&mut self, unit_test: &UnitTest) {
        (**self).on_environments_tear_down_start(unit_test)
    }

    fn on_environments_tear_down_end(&mut self, unit_test: &UnitTest) {
        (**self).on_environments_tear_down_end(unit_test)
    }

    fn on_test_iteration_end(&mut self, unit_test: &UnitTest, iteration: i32) {
        (**self).on_test_iteration_end(unit_test, iteration)
    }

    fn on_test_program_end(&mut self, unit_test: &UnitTest) {
        (**self).on_test_program_end(unit_test)
    }
}

/// An opaque handle of a listener appended to `TestEventListeners`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Copy, Clone)]
enum Direction {
    Forward,
    Reverse,
}

/// Broadcasts every event to an ordered list of listeners.
///
/// "Start" events and part results go to the listeners in the order they
/// were appended. "End" events go in the reverse order, so that output of
/// nested listeners is properly bracketed.
pub(crate) struct TestEventRepeater {
    forwarding_enabled: bool,
    listeners: Vec<(ListenerId, Box<dyn TestEventListener>)>,
}

impl TestEventRepeater {
    fn new() -> Self {
        Self {
            forwarding_enabled: true,
            listeners: vec![],
        }
    }

    fn dispatch<F>(&mut self, direction: Direction, mut f: F)
    where
        F: FnMut(&mut dyn TestEventListener),
    {
        if !self.forwarding_enabled {
            return;
        }
        match direction {
            Direction::Forward => {
                for (_, listener) in self.listeners.iter_mut() {
                    f(&mut **listener);
                }
            }
            Direction::Reverse => {
                for (_, listener) in self.listeners.iter_mut().rev() {
                    f(&mut **listener);
                }
            }
        }
    }

    fn append(&mut self, id: ListenerId, listener: Box<dyn TestEventListener>) {
        self.listeners.push((id, listener));
    }

    fn release(&mut self, id: ListenerId) -> Option<Box<dyn TestEventListener>> {
        let pos = self.listeners.iter().position(|(i, _)| *i == id)?;
        Some(self.listeners.remove(pos).1)
    }
}

impl TestEventListener for TestEventRepeater {
    fn on_test_program_start(&mut self, unit_test: &UnitTest) {
        self.dispatch(Direction::Forward, |l| l.on_test_program_start(unit_test));
    }

    fn on_test_iteration_start(&mut self, unit_test: &UnitTest, iteration: i32) {
        self.dispatch(Direction::Forward, |l| {
            l.on_test_iteration_start(unit_test, iteration)
        });
    }

    fn on_environments_set_up_start(&mut self, unit_test: &UnitTest) {
        self.dispatch(Direction::Forward, |l| {
            l.on_environments_set_up_start(unit_test)
        });
    }

    fn on_environments_set_up_end(&mut self, unit_test: &UnitTest) {
        self.dispatch(Direction::Reverse, |l| l.on_environments_set_up_end(unit_test));
    }

    fn on_test_case_start(&mut self, test_case: &TestCase) {
        self.dispatch(Direction::Forward, |l| l.on_test_case_start(test_case));
    }

    fn on_test_start(&mut self, test_info: &TestInfo) {
        self.dispatch(Direction::Forward, |l| l.on_test_start(test_info));
    }

    fn on_test_part_result(&mut self, result: &TestPartResult) {
        self.dispatch(Direction::Forward, |l| l.on_test_part_result(result));
    }

    fn on_test_end(&mut self, test_info: &TestInfo) {
        self.dispatch(Direction::Reverse, |l| l.on_test_end(test_info));
    }

    fn on_test_case_end(&mut self, test_case: &TestCase) {
        self.dispatch(Direction::Reverse, |l| l.on_test_case_end(test_case));
    }

    fn on_environments_tear_down_start(&mut self, unit_test: &UnitTest) {
        self.dispatch(Direction::Forward, |l| {
            l.on_environments_tear_down_start(unit_test)
        });
    }

    fn on_environments_tear_down_end(&mut self, unit_test: &UnitTest) {
        self.dispatch(Direction::Reverse, |l| {
            l.on_environments_tear_down_end(unit_test)
        });
    }

    fn on_test_iteration_end(&mut self, unit_test: &UnitTest, iteration: i32) {
        self.dispatch(Direction::Reverse, |l| {
            l.on_test_iteration_end(unit_test, iteration)
        });
    }

    fn on_test_program_end(&mut self, unit_test: &UnitTest) {
        self.dispatch(Direction::Reverse, |l| l.on_test_program_end(unit_test));
    }
}

/// The ordered list of listeners that receive test events.
pub struct TestEventListeners {
    repeater: TestEventRepeater,
    next_id: u64,
    default_result_printer: Option<ListenerId>,
}

impl TestEventListeners {
    pub(crate) fn new() -> Self {
        Self {
            repeater: TestEventRepeater::new(),
            next_id: 0,
            default_result_printer: None,
        }
    }

    /// Append a listener to the end of the list and return its handle.
    pub fn append(&mut self, listener: Box<dyn TestEventListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.repeater.append(id, listener);
        id
    }

    /// Remove a listener from the list and give it back to the caller.
    ///
    /// Returns `None` if the handle is unknown.
    pub fn release(&mut self, id: ListenerId) -> Option<Box<dyn TestEventListener>> {
        if self.default_result_printer == Some(id) {
            self.default_result_printer = None;
        }
        self.repeater.release(id)
    }

    /// Return the handle of the default result printer, if installed.
    pub fn default_result_printer(&self) -> Option<ListenerId> {
        self.default_result_printer
    }

    /// Replace the default result printer.
    ///
    /// The previous printer is removed and dropped. Passing `None` leaves
    /// the list without a result printer.
    pub fn set_default_result_printer(
        &mut self,
        listener: Option<Box<dyn TestEventListener>>,
    ) -> Option<ListenerId> {
        if let Some(prev) = self.default_result_printer.take() {
            drop(self.repeater.release(prev));
        }
        let id = listener.map(|listener| self.append(listener));
        self.default_result_printer = id;
        id
    }

    /// Return the number of listeners.
    pub fn len(&self) -> usize {
        self.repeater.listeners.len()
    }

    /// Return whether no listener is installed.
    pub fn is_empty(&self) -> bool {
        self.repeater.listeners.is_empty()
    }

    /// Return whether events are forwarded to the listeners.
    pub fn event_forwarding_enabled(&self) -> bool {
        self.repeater.forwarding_enabled
    }

    /// Stop forwarding events to the listeners.
    pub fn suppress_event_forwarding(&mut self) {
        self.repeater.forwarding_enabled = false;
    }

    pub(crate) fn repeater(&mut self) -> &mut TestEventRepeater {
        &mut self.repeater
    }
}

impl std::fmt::Debug for TestEventListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestEventListeners")
            .field("len", &self.len())
            .field("forwarding_enabled", &self.repeater.forwarding_enabled)
            .field("default_result_printer", &self.default_result_printer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sync::lock, test_part::TestPartResultType};
    use std::sync::{Arc, Mutex};

    type Trace = Arc<Mutex<Vec<String>>>;

    struct Tracer {
        name: &'static str,
        trace: Trace,
    }

    impl Tracer {
        fn boxed(name: &'static str, trace: &Trace) -> Box<dyn TestEventListener> {
            Box::new(Self {
                name,
                trace: trace.clone(),
            })
        }

        fn record(&self, event: &str) {
            lock(&self.trace).push(format!("{}:{}", self.name, event));
        }
    }

    impl TestEventListener for Tracer {
        fn on_test_program_start(&mut self, _: &UnitTest) {
            self.record("program_start");
        }

        fn on_test_part_result(&mut self, _: &TestPartResult) {
            self.record("part");
        }

        fn on_test_iteration_end(&mut self, _: &UnitTest, iteration: i32) {
            self.record(&format!("iteration_end({})", iteration));
        }

        fn on_test_program_end(&mut self, _: &UnitTest) {
            self.record("program_end");
        }
    }

    fn part() -> TestPartResult {
        TestPartResult::new(TestPartResultType::Success, None, None, "")
    }

    #[test]
    fn start_events_forward_end_events_reverse() {
        let trace = Trace::default();
        let unit_test = UnitTest::new();
        let mut listeners = TestEventListeners::new();
        listeners.append(Tracer::boxed("a", &trace));
        listeners.append(Tracer::boxed("b", &trace));

        let repeater = listeners.repeater();
        repeater.on_test_program_start(&unit_test);
        repeater.on_test_part_result(&part());
        repeater.on_test_iteration_end(&unit_test, 0);
        repeater.on_test_program_end(&unit_test);

        assert_eq!(
            *lock(&trace),
            vec![
                "a:program_start",
                "b:program_start",
                "a:part",
                "b:part",
                "b:iteration_end(0)",
                "a:iteration_end(0)",
                "b:program_end",
                "a:program_end",
            ]
        );
    }

    #[test]
    fn suppressed_forwarding() {
        let trace = Trace::default();
        let mut listeners = TestEventListeners::new();
        listeners.append(Tracer::boxed("a", &trace));
        assert!(listeners.event_forwarding_enabled());
        listeners.suppress_event_forwarding();
        assert!(!listeners.event_forwarding_enabled());
        listeners.repeater().on_test_part_result(&part());
        assert!(lock(&trace).is_empty());
    }

    #[test]
    fn release_returns_ownership() {
        let trace = Trace::default();
        let mut listeners = TestEventListeners::new();
        let a = listeners.append(Tracer::boxed("a", &trace));
        let b = listeners.append(Tracer::boxed("b", &trace));
        assert_eq!(listeners.len(), 2);

        let mut released = listeners.release(a).expect("listener a was appended");
        assert!(listeners.release(a).is_none());
        assert_eq!(listeners.len(), 1);

        listeners.repeater().on_test_part_result(&part());
        released.on_test_part_result(&part());
        assert_eq!(*lock(&trace), vec!["b:part", "a:part"]);
        assert!(listeners.release(b).is_some());
        assert!(listeners.is_empty());
    }

    #[test]
    fn default_result_printer_is_replaced() {
        let trace = Trace::default();
        let mut listeners = TestEventListeners::new();
        let first = listeners.set_default_result_printer(Some(Tracer::boxed("first", &trace)));
        assert_eq!(listeners.default_result_printer(), first);

        let second = listeners.set_default_result_printer(Some(Tracer::boxed("second", &trace)));
        assert_ne!(first, second);
        assert_eq!(listeners.len(), 1);

        listeners.repeater().on_test_part_result(&part());
        assert_eq!(*lock(&trace), vec!["second:part"]);

        assert_eq!(listeners.set_default_result_printer(None), None);
        assert!(listeners.is_empty());
        assert_eq!(listeners.default_result_printer(), None);
    }
}
