use super::TestEventListener;
use crate::{
    config::ColorConfig,
    test_case::TestCase,
    test_info::TestInfo,
    test_part::{FileLocation, TestPartResult},
    unit_test::UnitTest,
};
use std::{
    fmt,
    io::{self, Write as _},
    time::Duration,
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

struct Colored<T> {
    val: T,
    spec: Option<ColorSpec>,
}

impl<T> Colored<T> {
    fn fg(mut self, color: Color) -> Self {
        self.spec
            .get_or_insert_with(ColorSpec::new)
            .set_fg(Some(color));
        self
    }

    fn fmt_colored<W: ?Sized>(&self, w: &mut W) -> io::Result<()>
    where
        T: fmt::Display,
        W: WriteColor,
    {
        if let Some(ref spec) = self.spec {
            w.set_color(spec)?;
        }
        write!(w, "{}", &self.val)?;
        if let Some(..) = self.spec {
            w.reset()?;
        }
        Ok(())
    }
}

fn colored<T>(val: T) -> Colored<T> {
    Colored { val, spec: None }
}

fn green<T>(val: T) -> Colored<T> {
    colored(val).fg(Color::Green)
}

fn red<T>(val: T) -> Colored<T> {
    colored(val).fg(Color::Red)
}

struct Countable<'a>(usize, &'a str, &'a str);

impl fmt::Display for Countable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.0 == 1 { self.1 } else { self.2 };
        write!(f, "{} {}", self.0, noun)
    }
}

fn tests(count: usize) -> Countable<'static> {
    Countable(count, "test", "tests")
}

fn test_cases(count: usize) -> Countable<'static> {
    Countable(count, "test case", "test cases")
}

fn millis(elapsed: Duration) -> u128 {
    elapsed.as_millis()
}

/// The default result printer, writing the familiar banner-style report.
///
/// ```text
/// [==========] Running 2 tests from 1 test case.
/// [----------] Global test environment set-up.
/// [----------] 2 tests from MyTest
/// [ RUN      ] MyTest.first
/// src/lib.rs:3: Failure
/// Expected equality of these values:
///   1
///   3
/// [  FAILED  ] MyTest.first (0 ms)
/// ```
pub struct PrettyUnitTestResultPrinter {
    out: Box<dyn WriteColor + Send>,
}

impl PrettyUnitTestResultPrinter {
    /// Create a printer writing to the standard output.
    pub fn new(color: ColorConfig) -> Self {
        let choice = match color {
            ColorConfig::Auto => ColorChoice::Auto,
            ColorConfig::Always => ColorChoice::Always,
            ColorConfig::Never => ColorChoice::Never,
        };
        Self::with_writer(StandardStream::stdout(choice))
    }

    /// Create a printer writing to the specified sink.
    pub fn with_writer<W>(out: W) -> Self
    where
        W: WriteColor + Send + 'static,
    {
        Self { out: Box::new(out) }
    }

    fn print_iteration_start(&mut self, unit_test: &UnitTest, iteration: i32) -> io::Result<()> {
        let w = &mut *self.out;
        if unit_test.config().repeat != 1 {
            write!(
                w,
                "\nRepeating all tests (iteration {}) . . .\n\n",
                iteration + 1
            )?;
        }
        green("[==========] ").fmt_colored(w)?;
        writeln!(
            w,
            "Running {} from {}.",
            tests(unit_test.test_to_run_count()),
            test_cases(unit_test.test_case_to_run_count()),
        )?;
        w.flush()
    }

    fn print_banner(&mut self, text: fmt::Arguments<'_>) -> io::Result<()> {
        let w = &mut *self.out;
        green("[----------] ").fmt_colored(w)?;
        writeln!(w, "{}", text)?;
        w.flush()
    }

    fn print_test_start(&mut self, test_info: &TestInfo) -> io::Result<()> {
        let w = &mut *self.out;
        green("[ RUN      ] ").fmt_colored(w)?;
        writeln!(w, "{}", test_info)?;
        w.flush()
    }

    fn print_test_part_result(&mut self, result: &TestPartResult) -> io::Result<()> {
        if result.passed() {
            return Ok(());
        }
        let w = &mut *self.out;
        writeln!(
            w,
            "{}: Failure\n{}",
            FileLocation(result.file_name(), result.line_number()),
            result.message()
        )?;
        w.flush()
    }

    fn print_test_end(&mut self, test_info: &TestInfo) -> io::Result<()> {
        let (passed, elapsed) = {
            let result = test_info.result();
            (result.passed(), result.elapsed_time())
        };
        let w = &mut *self.out;
        if passed {
            green("[       OK ] ").fmt_colored(w)?;
        } else {
            red("[  FAILED  ] ").fmt_colored(w)?;
        }
        writeln!(w, "{} ({} ms)", test_info, millis(elapsed))?;
        w.flush()
    }

    fn print_failed_tests(&mut self, unit_test: &UnitTest) -> io::Result<()> {
        let w = &mut *self.out;
        for test_case in unit_test.test_cases() {
            if test_case.failed_test_count() == 0 {
                continue;
            }
            for test_info in test_case.test_infos() {
                if !test_info.should_run() || test_info.result().passed() {
                    continue;
                }
                red("[  FAILED  ] ").fmt_colored(w)?;
                writeln!(w, "{}", test_info)?;
            }
        }
        Ok(())
    }

    fn print_iteration_end(&mut self, unit_test: &UnitTest) -> io::Result<()> {
        {
            let w = &mut *self.out;
            green("[==========] ").fmt_colored(w)?;
            writeln!(
                w,
                "{} from {} ran. ({} ms total)",
                tests(unit_test.test_to_run_count()),
                test_cases(unit_test.test_case_to_run_count()),
                millis(unit_test.elapsed_time()),
            )?;
            green("[  PASSED  ] ").fmt_colored(w)?;
            writeln!(w, "{}.", tests(unit_test.successful_test_count()))?;
        }

        let failed_test_count = unit_test.failed_test_count();
        if failed_test_count > 0 {
            {
                let w = &mut *self.out;
                red("[  FAILED  ] ").fmt_colored(w)?;
                writeln!(w, "{}, listed below:", tests(failed_test_count))?;
            }
            self.print_failed_tests(unit_test)?;
            writeln!(
                self.out,
                "\n{:2} FAILED {}",
                failed_test_count,
                if failed_test_count == 1 { "TEST" } else { "TESTS" }
            )?;
        }

        let disabled_test_count = unit_test.disabled_test_count();
        if disabled_test_count > 0 {
            if failed_test_count == 0 {
                writeln!(self.out)?;
            }
            colored(format_args!(
                "  YOU HAVE {} DISABLED {}\n",
                disabled_test_count,
                if disabled_test_count == 1 { "TEST" } else { "TESTS" }
            ))
            .fg(Color::Yellow)
            .fmt_colored(&mut *self.out)?;
            writeln!(self.out)?;
        }

        self.out.flush()
    }
}

impl fmt::Debug for PrettyUnitTestResultPrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettyUnitTestResultPrinter").finish()
    }
}

impl TestEventListener for PrettyUnitTestResultPrinter {
    fn on_test_iteration_start(&mut self, unit_test: &UnitTest, iteration: i32) {
        let _ = self.print_iteration_start(unit_test, iteration);
    }

    fn on_environments_set_up_start(&mut self, _: &UnitTest) {
        let _ = self.print_banner(format_args!("Global test environment set-up."));
    }

    fn on_test_case_start(&mut self, test_case: &TestCase) {
        let _ = self.print_banner(format_args!(
            "{} from {}",
            tests(test_case.test_to_run_count()),
            test_case.name()
        ));
    }

    fn on_test_start(&mut self, test_info: &TestInfo) {
        let _ = self.print_test_start(test_info);
    }

    fn on_test_part_result(&mut self, result: &TestPartResult) {
        let _ = self.print_test_part_result(result);
    }

    fn on_test_end(&mut self, test_info: &TestInfo) {
        let _ = self.print_test_end(test_info);
    }

    fn on_test_case_end(&mut self, test_case: &TestCase) {
        let _ = self.print_banner(format_args!(
            "{} from {} ({} ms total)\n",
            tests(test_case.test_to_run_count()),
            test_case.name(),
            millis(test_case.elapsed_time()),
        ));
    }

    fn on_environments_tear_down_start(&mut self, _: &UnitTest) {
        let _ = self.print_banner(format_args!("Global test environment tear-down"));
    }

    fn on_test_iteration_end(&mut self, unit_test: &UnitTest, _: i32) {
        let _ = self.print_iteration_end(unit_test);
    }
}
