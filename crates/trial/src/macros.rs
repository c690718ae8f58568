macro_rules! hidden_item {
    ( $( $item:item )* ) => {
        $(
            #[doc(hidden)]
            $item
        )*
    };
}

#[doc(hidden)] // private API
#[macro_export]
macro_rules! __location {
    () => {{
        use $crate::_test_reexports as __trial;
        __trial::Location {
            file: __trial::file!(),
            line: __trial::line!(),
            column: __trial::column!(),
        }
    }};
}

#[doc(hidden)] // private API
#[macro_export]
macro_rules! __user_message {
    () => {
        $crate::_assert_reexports::Message::new()
    };
    ( $($arg:tt)+ ) => {
        $crate::_assert_reexports::Message::new()
            .push($crate::_assert_reexports::format_args!($($arg)+))
    };
}

#[doc(hidden)] // private API
#[macro_export]
macro_rules! __report_assertion {
    (@nonfatal $result:expr $(, $($arg:tt)+ )? ) => {{
        use $crate::_assert_reexports as __trial;
        let __result: __trial::AssertionResult = $result;
        if !__result.is_success() {
            __trial::AssertHelper::new(
                __trial::TestPartResultType::NonFatalFailure,
                __trial::file!(),
                __trial::line!(),
                __result.failure_message(),
            )
            .report($crate::__user_message!($( $($arg)+ )?));
        }
    }};
    (@fatal $result:expr $(, $($arg:tt)+ )? ) => {{
        use $crate::_assert_reexports as __trial;
        let __result: __trial::AssertionResult = $result;
        if !__result.is_success() {
            __trial::AssertHelper::new(
                __trial::TestPartResultType::FatalFailure,
                __trial::file!(),
                __trial::line!(),
                __result.failure_message(),
            )
            .report($crate::__user_message!($( $($arg)+ )?));
            return __trial::Termination::stopped();
        }
    }};
}

#[doc(hidden)] // private API
#[macro_export]
macro_rules! __cmp_assertion {
    (@$severity:ident $helper:ident, $lhs:expr, $rhs:expr $(, $($arg:tt)+ )? ) => {
        match (&$lhs, &$rhs) {
            (__lhs, __rhs) => $crate::__report_assertion!(@$severity
                $crate::_assert_reexports::$helper(
                    $crate::_assert_reexports::stringify!($lhs),
                    $crate::_assert_reexports::stringify!($rhs),
                    __lhs,
                    __rhs,
                )
                $(, $($arg)+ )?
            ),
        }
    };
}

#[doc(hidden)] // private API
#[macro_export]
macro_rules! __bool_assertion {
    (@$severity:ident $expected:literal, $cond:expr $(, $($arg:tt)+ )? ) => {
        $crate::__report_assertion!(@$severity
            $crate::_assert_reexports::test_bool(
                $crate::_assert_reexports::stringify!($cond),
                $cond,
                $expected,
            )
            $(, $($arg)+ )?
        )
    };
}

/// Check that a boolean condition holds, recording a non-fatal failure otherwise.
///
/// An optional trailing format string and arguments are appended to the
/// failure message.
#[macro_export]
macro_rules! expect {
    ($cond:expr $(,)?) => {
        $crate::__bool_assertion!(@nonfatal true, $cond)
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::__bool_assertion!(@nonfatal true, $cond, $($arg)+)
    };
}

/// Check that a boolean condition does not hold, recording a non-fatal failure otherwise.
#[macro_export]
macro_rules! expect_false {
    ($cond:expr $(,)?) => {
        $crate::__bool_assertion!(@nonfatal false, $cond)
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::__bool_assertion!(@nonfatal false, $cond, $($arg)+)
    };
}

/// Check that a boolean condition holds, otherwise record a fatal failure and
/// return from the current function.
#[macro_export]
macro_rules! require {
    ($cond:expr $(,)?) => {
        $crate::__bool_assertion!(@fatal true, $cond)
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::__bool_assertion!(@fatal true, $cond, $($arg)+)
    };
}

/// Check that a boolean condition does not hold, otherwise record a fatal
/// failure and return from the current function.
#[macro_export]
macro_rules! require_false {
    ($cond:expr $(,)?) => {
        $crate::__bool_assertion!(@fatal false, $cond)
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::__bool_assertion!(@fatal false, $cond, $($arg)+)
    };
}

/// Check that `lhs == rhs`, recording a non-fatal failure otherwise.
#[macro_export]
macro_rules! expect_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_eq, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_eq, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs != rhs`, recording a non-fatal failure otherwise.
#[macro_export]
macro_rules! expect_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_ne, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_ne, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs < rhs`, recording a non-fatal failure otherwise.
#[macro_export]
macro_rules! expect_lt {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_lt, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_lt, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs <= rhs`, recording a non-fatal failure otherwise.
#[macro_export]
macro_rules! expect_le {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_le, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_le, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs > rhs`, recording a non-fatal failure otherwise.
#[macro_export]
macro_rules! expect_gt {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_gt, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_gt, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs >= rhs`, recording a non-fatal failure otherwise.
#[macro_export]
macro_rules! expect_ge {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_ge, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@nonfatal cmp_helper_ge, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs == rhs`, otherwise record a fatal failure and return.
#[macro_export]
macro_rules! require_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_eq, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_eq, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs != rhs`, otherwise record a fatal failure and return.
#[macro_export]
macro_rules! require_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_ne, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_ne, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs < rhs`, otherwise record a fatal failure and return.
#[macro_export]
macro_rules! require_lt {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_lt, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_lt, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs <= rhs`, otherwise record a fatal failure and return.
#[macro_export]
macro_rules! require_le {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_le, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_le, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs > rhs`, otherwise record a fatal failure and return.
#[macro_export]
macro_rules! require_gt {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_gt, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_gt, $lhs, $rhs, $($arg)+)
    };
}

/// Check that `lhs >= rhs`, otherwise record a fatal failure and return.
#[macro_export]
macro_rules! require_ge {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_ge, $lhs, $rhs)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::__cmp_assertion!(@fatal cmp_helper_ge, $lhs, $rhs, $($arg)+)
    };
}

/// Record a non-fatal failure and continue.
#[macro_export]
macro_rules! add_failure {
    () => {
        $crate::add_failure!("")
    };
    ($($arg:tt)+) => {{
        use $crate::_assert_reexports as __trial;
        __trial::AssertHelper::new(
            __trial::TestPartResultType::NonFatalFailure,
            __trial::file!(),
            __trial::line!(),
            "Failed",
        )
        .report($crate::__user_message!($($arg)+));
    }};
}

/// Record a fatal failure and return from the current function.
#[macro_export]
macro_rules! fail {
    () => {
        $crate::fail!("")
    };
    ($($arg:tt)+) => {{
        use $crate::_assert_reexports as __trial;
        __trial::AssertHelper::new(
            __trial::TestPartResultType::FatalFailure,
            __trial::file!(),
            __trial::line!(),
            "Failed",
        )
        .report($crate::__user_message!($($arg)+));
        return __trial::Termination::stopped();
    }};
}

/// Record an explicit success.
#[macro_export]
macro_rules! succeed {
    () => {
        $crate::succeed!("")
    };
    ($($arg:tt)+) => {{
        use $crate::_assert_reexports as __trial;
        __trial::AssertHelper::new(
            __trial::TestPartResultType::Success,
            __trial::file!(),
            __trial::line!(),
            "Succeeded",
        )
        .report($crate::__user_message!($($arg)+));
    }};
}

#[doc(hidden)] // private API
#[macro_export]
macro_rules! __expect_single_failure {
    ($kind:ident, $mode:ident, $statement:block, $substr:expr) => {{
        use $crate::_assert_reexports as __trial;
        let __results = {
            let __reporter =
                __trial::ScopedFakeTestPartResultReporter::new(__trial::InterceptMode::$mode);
            (|| -> () { $statement; })();
            __reporter.results()
        };
        $crate::__report_assertion!(@nonfatal __trial::check_single_failure(
            &__results,
            __trial::TestPartResultType::$kind,
            $substr,
        ));
    }};
}

/// Check that the statement block produces exactly one fatal failure whose
/// message contains the given substring.
///
/// The failures produced by the statement are intercepted and do not affect
/// the result of the running test.
#[macro_export]
macro_rules! expect_fatal_failure {
    ($statement:block, $substr:expr $(,)?) => {
        $crate::__expect_single_failure!(FatalFailure, InterceptOnlyCurrentThread, $statement, $substr)
    };
}

/// Same as `expect_fatal_failure!`, but also intercepts failures raised on other threads.
#[macro_export]
macro_rules! expect_fatal_failure_on_all_threads {
    ($statement:block, $substr:expr $(,)?) => {
        $crate::__expect_single_failure!(FatalFailure, InterceptAllThreads, $statement, $substr)
    };
}

/// Check that the statement block produces exactly one non-fatal failure
/// whose message contains the given substring.
#[macro_export]
macro_rules! expect_nonfatal_failure {
    ($statement:block, $substr:expr $(,)?) => {
        $crate::__expect_single_failure!(NonFatalFailure, InterceptOnlyCurrentThread, $statement, $substr)
    };
}

/// Same as `expect_nonfatal_failure!`, but also intercepts failures raised on other threads.
#[macro_export]
macro_rules! expect_nonfatal_failure_on_all_threads {
    ($statement:block, $substr:expr $(,)?) => {
        $crate::__expect_single_failure!(NonFatalFailure, InterceptAllThreads, $statement, $substr)
    };
}
