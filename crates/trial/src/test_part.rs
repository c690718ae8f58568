use std::{fmt, ops::Index};

/// The separator that marks the start of a stack trace in a failure message.
pub(crate) const STACK_TRACE_MARKER: &str = "\nStack trace:\n";

/// The kind of a single test part result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TestPartResultType {
    /// The assertion succeeded.
    Success,
    /// The assertion failed but the test continued.
    NonFatalFailure,
    /// The assertion failed and the test function returned early.
    FatalFailure,
}

impl TestPartResultType {
    fn describe(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::NonFatalFailure => "Non-fatal failure",
            Self::FatalFailure => "Fatal failure",
        }
    }
}

impl fmt::Display for TestPartResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The outcome of a single assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestPartResult {
    result_type: TestPartResultType,
    file_name: Option<String>,
    line_number: Option<u32>,
    summary: String,
    message: String,
}

impl TestPartResult {
    /// Create a part result.
    ///
    /// `None` stands for an unknown source file or line. The summary is the
    /// part of the message preceding the stack trace, if any.
    pub fn new(
        result_type: TestPartResultType,
        file_name: Option<&str>,
        line_number: Option<u32>,
        message: &str,
    ) -> Self {
        Self {
            result_type,
            file_name: file_name.map(ToOwned::to_owned),
            line_number,
            summary: extract_summary(message).to_owned(),
            message: message.to_owned(),
        }
    }

    /// Return the kind of this result.
    #[inline]
    pub fn result_type(&self) -> TestPartResultType {
        self.result_type
    }

    /// Return the source file where the assertion was written, if known.
    #[inline]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Return the source line of the assertion, if known.
    #[inline]
    pub fn line_number(&self) -> Option<u32> {
        self.line_number
    }

    /// Return the message without the stack trace.
    #[inline]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Return the full message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Return whether the assertion succeeded.
    #[inline]
    pub fn passed(&self) -> bool {
        self.result_type == TestPartResultType::Success
    }

    /// Return whether the assertion failed.
    #[inline]
    pub fn failed(&self) -> bool {
        !self.passed()
    }

    /// Return whether the assertion failed non-fatally.
    #[inline]
    pub fn nonfatally_failed(&self) -> bool {
        self.result_type == TestPartResultType::NonFatalFailure
    }

    /// Return whether the assertion failed fatally.
    #[inline]
    pub fn fatally_failed(&self) -> bool {
        self.result_type == TestPartResultType::FatalFailure
    }
}

fn extract_summary(message: &str) -> &str {
    match message.find(STACK_TRACE_MARKER) {
        Some(pos) => &message[..pos],
        None => message,
    }
}

impl fmt::Display for TestPartResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}:\n{}",
            FileLocation(self.file_name(), self.line_number),
            self.result_type,
            self.message
        )
    }
}

/// Formats an optional source position as `file:line`.
pub(crate) struct FileLocation<'a>(pub(crate) Option<&'a str>, pub(crate) Option<u32>);

impl fmt::Display for FileLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.0.unwrap_or("unknown file");
        match self.1 {
            Some(line) => write!(f, "{}:{}", file, line),
            None => f.write_str(file),
        }
    }
}

/// The destination of test part results.
///
/// Assertions hand their results to the reporter installed for the current
/// thread; the default one forwards to the process-wide reporter, which
/// records the result on the running test and notifies the listeners.
pub trait TestPartResultReporter: Send + Sync {
    /// Receive a single test part result.
    fn report_test_part_result(&self, result: &TestPartResult);
}

impl<R: ?Sized> TestPartResultReporter for &R
where
    R: TestPartResultReporter,
{
    fn report_test_part_result(&self, result: &TestPartResult) {
        (**self).report_test_part_result(result)
    }
}

impl<R: ?Sized> TestPartResultReporter for Box<R>
where
    R: TestPartResultReporter,
{
    fn report_test_part_result(&self, result: &TestPartResult) {
        (**self).report_test_part_result(result)
    }
}

impl<R: ?Sized> TestPartResultReporter for std::sync::Arc<R>
where
    R: TestPartResultReporter,
{
    fn report_test_part_result(&self, result: &TestPartResult) {
        (**self).report_test_part_result(result)
    }
}

/// An ordered collection of test part results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestPartResultArray {
    array: Vec<TestPartResult>,
}

impl TestPartResultArray {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result.
    pub fn append(&mut self, result: TestPartResult) {
        self.array.push(result);
    }

    /// Return the result at `index`.
    ///
    /// The process is aborted if the index is out of range.
    pub fn get_test_part_result(&self, index: usize) -> &TestPartResult {
        match self.array.get(index) {
            Some(result) => result,
            None => invalid_index("TestPartResultArray", index, self.array.len()),
        }
    }

    /// Return the number of stored results.
    #[inline]
    pub fn size(&self) -> usize {
        self.array.len()
    }

    /// Return whether no result is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Iterate over the stored results.
    pub fn iter(&self) -> std::slice::Iter<'_, TestPartResult> {
        self.array.iter()
    }
}

impl Index<usize> for TestPartResultArray {
    type Output = TestPartResult;

    fn index(&self, index: usize) -> &Self::Output {
        self.get_test_part_result(index)
    }
}

impl<'a> IntoIterator for &'a TestPartResultArray {
    type Item = &'a TestPartResult;
    type IntoIter = std::slice::Iter<'a, TestPartResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Abort the process on an out-of-range access to a result list.
pub(crate) fn invalid_index(container: &str, index: usize, len: usize) -> ! {
    log::error!(
        "{}: index {} is out of range (size = {})",
        container,
        index,
        len
    );
    eprintln!(
        "fatal: {}: index {} is out of range (size = {})",
        container, index, len
    );
    std::process::abort()
}
