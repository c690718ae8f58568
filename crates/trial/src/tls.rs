use crate::{sync::lock, unit_test::UnitTestImpl};
use std::{
    cell::RefCell,
    collections::HashMap,
    marker::PhantomData,
    sync::{Arc, Mutex},
    thread::{self, ThreadId},
};

thread_local! {
    static ACTIVE_UNIT_TEST: RefCell<Option<Arc<UnitTestImpl>>> = RefCell::new(None);
}

struct SetOnDrop(Option<Arc<UnitTestImpl>>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        let prev = self.0.take();
        ACTIVE_UNIT_TEST.with(|tls| {
            *tls.borrow_mut() = prev;
        });
    }
}

/// Restores the previously active unit test when dropped.
pub(crate) struct Guard {
    _set_on_drop: SetOnDrop,
    // the guard must be dropped on the thread that created it.
    _marker: PhantomData<*const ()>,
}

/// Make `unit_test` the destination of assertions raised on this thread.
pub(crate) fn set(unit_test: Arc<UnitTestImpl>) -> Guard {
    let prev = ACTIVE_UNIT_TEST.with(|tls| tls.borrow_mut().replace(unit_test));
    Guard {
        _set_on_drop: SetOnDrop(prev),
        _marker: PhantomData,
    }
}

/// Return the unit test running on this thread, if any.
pub(crate) fn active() -> Option<Arc<UnitTestImpl>> {
    ACTIVE_UNIT_TEST.with(|tls| tls.borrow().clone())
}

/// A value with a separate slot per thread, owned by a single object.
///
/// Threads that never stored a value observe the default one.
pub(crate) struct ThreadLocal<T> {
    default_value: T,
    slots: Mutex<HashMap<ThreadId, T>>,
}

impl<T: Clone> ThreadLocal<T> {
    pub(crate) fn new(default_value: T) -> Self {
        Self {
            default_value,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn get(&self) -> T {
        lock(&self.slots)
            .get(&thread::current().id())
            .cloned()
            .unwrap_or_else(|| self.default_value.clone())
    }

    /// Store a value for the current thread, returning the previous one.
    pub(crate) fn set(&self, value: T) -> T {
        let prev = lock(&self.slots).insert(thread::current().id(), value);
        prev.unwrap_or_else(|| self.default_value.clone())
    }

    /// Store or remove the current thread's own value, returning the one it
    /// had before. `None` means the thread falls back to the default again.
    pub(crate) fn replace(&self, value: Option<T>) -> Option<T> {
        let mut slots = lock(&self.slots);
        let id = thread::current().id();
        match value {
            Some(value) => slots.insert(id, value),
            None => slots.remove(&id),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        lock(&self.slots).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_per_thread() {
        let local = Arc::new(ThreadLocal::new(0));
        assert_eq!(local.get(), 0);
        assert_eq!(local.set(1), 0);
        assert_eq!(local.get(), 1);

        let remote = {
            let local = local.clone();
            thread::spawn(move || {
                let before = local.get();
                local.set(2);
                (before, local.get())
            })
            .join()
            .unwrap()
        };
        assert_eq!(remote, (0, 2));
        assert_eq!(local.get(), 1);
    }

    #[test]
    fn replace_with_none_drops_the_slot() {
        let local = ThreadLocal::new(0);
        assert_eq!(local.replace(Some(5)), None);
        assert_eq!(local.replace(Some(6)), Some(5));
        assert_eq!(local.len(), 1);

        assert_eq!(local.replace(None), Some(6));
        assert_eq!(local.len(), 0);
        assert_eq!(local.get(), 0);
        assert_eq!(local.replace(None), None);
    }

    #[test]
    fn guard_restores_previous() {
        assert!(active().is_none());
        let outer = crate::unit_test::UnitTest::new();
        let inner = crate::unit_test::UnitTest::new();
        {
            let _outer = set(outer.imp().clone());
            {
                let _inner = set(inner.imp().clone());
                assert!(Arc::ptr_eq(&active().unwrap(), inner.imp()));
            }
            assert!(Arc::ptr_eq(&active().unwrap(), outer.imp()));
        }
        assert!(active().is_none());
    }
}
