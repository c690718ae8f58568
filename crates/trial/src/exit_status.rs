/// The status a test program reports to the operating system.
///
/// It summarizes a whole run: any failed test, or a command line that could
/// not be parsed, turns it into `FAILED`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExitStatus(i32);

impl ExitStatus {
    /// All tests passed.
    pub const OK: Self = Self(0);

    /// At least one test failed, or the tests could not be run.
    pub const FAILED: Self = Self(1);

    /// The status matching the outcome of `UnitTest::run`.
    #[inline]
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Self::OK
        } else {
            Self::FAILED
        }
    }

    /// The numeric process exit code.
    #[inline]
    pub fn code(self) -> i32 {
        self.0
    }

    /// Whether this status reports success.
    #[inline]
    pub fn success(self) -> bool {
        self == Self::OK
    }

    /// Exit the process with this status.
    ///
    /// Listeners have flushed their output by the time `UnitTest::run`
    /// returns, so this is meant to be the last call of `main`.
    #[inline]
    pub fn exit(self) -> ! {
        std::process::exit(self.code());
    }
}
