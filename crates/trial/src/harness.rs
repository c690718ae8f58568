#[cfg(feature = "harness")]
use crate::{config::Config, test_info::TestRegistration, unit_test::UnitTest};
#[cfg(feature = "harness")]
use linkme::distributed_slice;

#[cfg(feature = "harness")]
#[doc(hidden)]
#[distributed_slice]
pub static TEST_REGISTRATIONS: [TestRegistration] = [..];

/// Register every test collected by `#[trial::test]` and `#[trial::test_f]`.
///
/// The link order of the registrations is unspecified, so they are
/// sorted by source location first.
#[cfg(feature = "harness")]
pub(crate) fn register_static_tests(unit_test: &UnitTest) {
    let mut registrations: Vec<&'static TestRegistration> = TEST_REGISTRATIONS.iter().collect();
    registrations.sort_by_key(|r| r.location);
    log::debug!("found {} statically registered tests", registrations.len());
    for registration in registrations {
        unit_test.register(registration);
    }
}

#[cfg(feature = "harness")]
#[doc(hidden)]
pub fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("test", String::as_str);
    let config = match Config::from_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{}", Config::usage(program));
            crate::ExitStatus::OK.exit();
        }
        Err(err) => {
            eprintln!("error: {}", err);
            eprintln!("{}", Config::usage(program));
            crate::ExitStatus::FAILED.exit();
        }
    };

    UnitTest::get_instance().configure(config);
    crate::run_all_tests().exit();
}

#[cfg(feature = "harness")]
#[doc(hidden)] // private API.
#[macro_export]
macro_rules! __test_registration {
    ( $item:item ) => {
        #[$crate::_test_harness_reexports::distributed_slice(
            $crate::_test_harness_reexports::TEST_REGISTRATIONS
        )]
        #[linkme(crate = $crate::_test_harness_reexports::linkme)]
        $item
    };
}

#[cfg(not(feature = "harness"))]
#[doc(hidden)] // private API.
#[macro_export]
macro_rules! __test_registration {
    ( $item:item ) => {
        #[allow(dead_code)]
        $item
    };
}

/// Generate the main function for running test application.
#[cfg(feature = "harness")]
#[macro_export]
macro_rules! test_harness {
    () => {
        fn main() {
            $crate::_test_harness_reexports::main()
        }
    };
}
