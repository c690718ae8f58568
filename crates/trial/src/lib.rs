/*!
A unit testing framework core.

Test cases register themselves statically before `main` runs, are grouped
into test cases by name, executed in registration order, and report every
assertion outcome through a chain of pluggable event listeners.

```ignore
#[trial::test(MyTest)]
fn adds_numbers() {
    trial::expect_eq!(1 + 1, 2);
}

trial::test_harness!();
```
!*/

#![doc(html_root_url = "https://docs.rs/trial/0.1.0-dev")]
#![deny(missing_docs)]
#![forbid(clippy::unimplemented, clippy::todo)]

#[macro_use]
mod macros;
mod assertion;
mod config;
mod exit_status;
mod harness;
mod listener;
mod message;
mod spi;
mod sync;
mod termination;
mod test_case;
mod test_info;
mod test_part;
mod test_result;
mod tls;

pub use crate::{
    assertion::{
        assertion_failure, assertion_success, cmp_helper_eq, cmp_helper_ge, cmp_helper_gt,
        cmp_helper_le, cmp_helper_lt, cmp_helper_ne, eq_failure, AssertionResult,
    },
    config::{ColorConfig, Config, ConfigError},
    exit_status::ExitStatus,
    listener::{
        ListenerId, LogListener, PrettyUnitTestResultPrinter, TestEventListener,
        TestEventListeners,
    },
    message::Message,
    spi::{InterceptMode, ScopedFakeTestPartResultReporter},
    termination::Termination,
    test::{
        has_failure, has_fatal_failure, has_nonfatal_failure, Environment, Fixture, FixtureDesc,
        FixtureFactory, FixtureTest, Location, Test, TestFactory,
    },
    test_case::TestCase,
    test_info::{TestInfo, TestRegistration},
    test_part::{TestPartResult, TestPartResultArray, TestPartResultReporter, TestPartResultType},
    test_result::TestResult,
    unit_test::{run_all_tests, UnitTest},
};

#[cfg(feature = "harness")]
pub use crate::harness::main;

/// Register a function as a test of the named test case.
///
/// The function takes no arguments and returns `()` or `Result<(), E>`.
pub use trial_macros::test;

/// Register a function as a test that runs against a fixture.
///
/// The function takes `&mut F` where `F: Fixture`, and the name of `F`
/// is used as the name of the test case.
pub use trial_macros::test_f;

hidden_item! {
    /// Re-exported items for #[test] and #[test_f]
    pub mod _test_reexports {
        pub use crate::{
            __location as location,
            termination::Termination,
            test::{FixtureDesc, FixtureFactory, Location},
            test_info::TestRegistration,
        };
        pub use anyhow::Error;
        pub use std::{column, file, line, result::Result};
    }

    /// Re-exported items for the assertion macros
    pub mod _assert_reexports {
        pub use crate::{
            assertion::{
                cmp_helper_eq, cmp_helper_ge, cmp_helper_gt, cmp_helper_le, cmp_helper_lt,
                cmp_helper_ne, test_bool, AssertHelper, AssertionResult,
            },
            message::Message,
            spi::{check_single_failure, InterceptMode, ScopedFakeTestPartResultReporter},
            termination::Termination,
            test_part::TestPartResultType,
        };
        pub use std::{file, format_args, line, stringify};
    }

    /// Re-exported items for test_harness!() and the registration macro
    #[cfg(feature = "harness")]
    pub mod _test_harness_reexports {
        pub use {
            crate::harness::{main, TEST_REGISTRATIONS},
            linkme::{self, distributed_slice},
        };
    }
}
