use crate::{message::Message, test_part::TestPartResultType, unit_test::UnitTestImpl};
use std::{
    cmp::{PartialEq, PartialOrd},
    fmt,
    ops::Not,
};

/// The outcome of a single assertion, carrying an optional explanatory message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssertionResult {
    success: bool,
    message: Option<String>,
}

impl AssertionResult {
    /// Create a result with the given outcome and no message.
    #[inline]
    pub fn new(success: bool) -> Self {
        Self {
            success,
            message: None,
        }
    }

    /// Create a successful result.
    #[inline]
    pub fn success() -> Self {
        Self::new(true)
    }

    /// Create a failed result.
    #[inline]
    pub fn failure() -> Self {
        Self::new(false)
    }

    /// Return whether the assertion succeeded.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Return the accumulated message, or an empty string if none was appended.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    /// Return the message to report when this assertion failed.
    pub fn failure_message(&self) -> &str {
        self.message()
    }

    /// Append a value to the message and return the result.
    pub fn push<T: fmt::Display>(mut self, value: T) -> Self {
        self.append_message(&Message::new().push(value));
        self
    }

    /// Append the content of a message.
    pub fn append_message(&mut self, msg: &Message) -> &mut Self {
        self.message
            .get_or_insert_with(String::new)
            .push_str(&msg.get_string());
        self
    }
}

impl From<bool> for AssertionResult {
    fn from(success: bool) -> Self {
        Self::new(success)
    }
}

impl From<&AssertionResult> for bool {
    fn from(result: &AssertionResult) -> Self {
        result.success
    }
}

impl Not for AssertionResult {
    type Output = AssertionResult;

    /// Negate the outcome, keeping the message.
    fn not(self) -> Self::Output {
        Self {
            success: !self.success,
            message: self.message,
        }
    }
}

impl fmt::Display for AssertionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Create a successful assertion result.
#[inline]
pub fn assertion_success() -> AssertionResult {
    AssertionResult::success()
}

/// Create a failed assertion result.
#[inline]
pub fn assertion_failure() -> AssertionResult {
    AssertionResult::failure()
}

/// Build the failure result of an equality assertion.
///
/// The value lines are omitted when the printed value is identical to the
/// source expression, as for literals.
pub fn eq_failure(
    lhs_expression: &str,
    rhs_expression: &str,
    lhs_value: &str,
    rhs_value: &str,
) -> AssertionResult {
    let mut msg = Message::new().push("Expected equality of these values:");
    append_operand(&mut msg, lhs_expression, lhs_value);
    append_operand(&mut msg, rhs_expression, rhs_value);
    AssertionResult::failure().push(msg)
}

fn append_operand(msg: &mut Message, expression: &str, value: &str) {
    msg.append("\n  ").append(expression);
    if value != expression {
        msg.append("\n    Which is: ").append(value);
    }
}

fn cmp_op_failure(
    lhs_expression: &str,
    rhs_expression: &str,
    op: &str,
    lhs_value: &str,
    rhs_value: &str,
) -> AssertionResult {
    AssertionResult::failure().push(format_args!(
        "Expected: ({}) {} ({}), actual: {} vs {}",
        lhs_expression, op, rhs_expression, lhs_value, rhs_value
    ))
}

fn format_for_failure<T: ?Sized + fmt::Debug>(value: &T) -> String {
    format!("{:?}", value)
}

/// Check the equality of two values.
pub fn cmp_helper_eq<T1, T2>(
    lhs_expression: &str,
    rhs_expression: &str,
    lhs: &T1,
    rhs: &T2,
) -> AssertionResult
where
    T1: ?Sized + PartialEq<T2> + fmt::Debug,
    T2: ?Sized + fmt::Debug,
{
    if PartialEq::eq(lhs, rhs) {
        return AssertionResult::success();
    }
    eq_failure(
        lhs_expression,
        rhs_expression,
        &format_for_failure(lhs),
        &format_for_failure(rhs),
    )
}

macro_rules! impl_cmp_helpers {
    ($( $(#[$attr:meta])* $name:ident => $bound:ident :: $method:ident, $op:literal; )*) => {$(
        $(#[$attr])*
        pub fn $name<T1, T2>(
            lhs_expression: &str,
            rhs_expression: &str,
            lhs: &T1,
            rhs: &T2,
        ) -> AssertionResult
        where
            T1: ?Sized + $bound<T2> + fmt::Debug,
            T2: ?Sized + fmt::Debug,
        {
            if $bound::$method(lhs, rhs) {
                return AssertionResult::success();
            }
            cmp_op_failure(
                lhs_expression,
                rhs_expression,
                $op,
                &format_for_failure(lhs),
                &format_for_failure(rhs),
            )
        }
    )*};
}

impl_cmp_helpers! {
    /// Check that two values differ.
    cmp_helper_ne => PartialEq::ne, "!=";
    /// Check that `lhs < rhs`.
    cmp_helper_lt => PartialOrd::lt, "<";
    /// Check that `lhs <= rhs`.
    cmp_helper_le => PartialOrd::le, "<=";
    /// Check that `lhs > rhs`.
    cmp_helper_gt => PartialOrd::gt, ">";
    /// Check that `lhs >= rhs`.
    cmp_helper_ge => PartialOrd::ge, ">=";
}

#[doc(hidden)] // private API
pub fn test_bool(expression: &str, actual: bool, expected: bool) -> AssertionResult {
    if actual == expected {
        return AssertionResult::success();
    }
    AssertionResult::failure().push(format_args!(
        "Value of: {}\n  Actual: {}\nExpected: {}",
        expression, actual, expected
    ))
}

/// Join the framework's failure text with the message supplied by the user.
pub(crate) fn append_user_message(message: &str, user_message: &Message) -> String {
    let user_message = user_message.get_string();
    if user_message.is_empty() {
        return message.to_owned();
    }
    if message.is_empty() {
        return user_message;
    }
    format!("{}\n{}", message, user_message)
}

/// Reports the outcome of a failed assertion at a known source position.
#[doc(hidden)] // private API
#[derive(Debug)]
pub struct AssertHelper {
    result_type: TestPartResultType,
    file: &'static str,
    line: u32,
    message: String,
}

impl AssertHelper {
    #[doc(hidden)]
    pub fn new(
        result_type: TestPartResultType,
        file: &'static str,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            result_type,
            file,
            line,
            message: message.into(),
        }
    }

    #[doc(hidden)]
    pub fn report(self, user_message: Message) {
        UnitTestImpl::for_current_thread().add_test_part_result(
            self.result_type,
            Some(self.file),
            Some(self.line),
            &append_user_message(&self.message, &user_message),
        );
    }
}
