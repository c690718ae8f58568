//! Runtime configuration of a test program.

use getopts::Options;
use std::{path::Path, str::FromStr};

/// The runtime configuration of a `UnitTest`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Coloring of the default result printer.
    pub color: ColorConfig,
    /// The number of iterations to run. A negative value repeats forever.
    pub repeat: i32,
    /// Whether to mirror the test events to the `log` facade.
    pub log_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: ColorConfig::Auto,
            repeat: 1,
            log_events: false,
        }
    }
}

/// The color configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ColorConfig {
    /// Colorize if the output is a terminal.
    Auto,
    /// Always colorize.
    Always,
    /// Never colorize.
    Never,
}

impl FromStr for ColorConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorConfig::Auto),
            "always" => Ok(ColorConfig::Always),
            "never" => Ok(ColorConfig::Never),
            v => Err(ConfigError::InvalidColor(v.to_owned())),
        }
    }
}

/// An error while reading the configuration from command line arguments.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The arguments could not be parsed.
    #[error(transparent)]
    Args(#[from] getopts::Fail),

    /// The value of `--color` is unknown.
    #[error("argument for --color must be auto, always, or never (was {0})")]
    InvalidColor(String),

    /// The value of `--repeat` is not an integer.
    #[error("argument for --repeat must be an integer (was {0})")]
    InvalidRepeat(String),
}

impl Config {
    /// Read the configuration from the arguments of the current process.
    ///
    /// Returns `Ok(None)` when the help message was requested.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let args: Vec<String> = std::env::args().collect();
        Self::from_args(&args)
    }

    /// Read the configuration from the specified arguments.
    ///
    /// The first argument is the program name.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Option<Self>, ConfigError> {
        let opts = options();
        let matches = opts.parse(args.iter().skip(1).map(AsRef::as_ref))?;
        if matches.opt_present("h") {
            return Ok(None);
        }

        let mut config = Config::default();
        if let Some(color) = matches.opt_str("color") {
            config.color = color.parse()?;
        }
        if let Some(repeat) = matches.opt_str("repeat") {
            config.repeat = repeat
                .parse()
                .map_err(|_| ConfigError::InvalidRepeat(repeat))?;
        }
        config.log_events = matches.opt_present("log-events");

        if !matches.free.is_empty() {
            log::warn!("test filters are not supported: {:?}", matches.free);
        }

        Ok(Some(config))
    }

    /// Return the help message.
    pub fn usage(program: &str) -> String {
        let progname = Path::new(program)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(program);
        options().usage(&format!("Usage: {} [OPTIONS]", progname))
    }
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optflag("h", "help", "Display this message");
    opts.optopt(
        "",
        "color",
        "Configure coloring of output:
            auto   = colorize if stdout is a tty (default);
            always = always colorize output;
            never  = never colorize output;",
        "auto|always|never",
    );
    opts.optopt(
        "",
        "repeat",
        "Run the tests N times; a negative count repeats forever (default: 1)",
        "N",
    );
    opts.optflag("", "log-events", "Mirror the test events to the logger");

    // The following options and flags are reserved for keeping the compatibility with
    // the built-in test harness.
    opts.optflag("", "ignored", "");
    opts.optflag("", "test", "");
    opts.optflag("", "bench", "");
    opts.optflag("", "nocapture", "");
    opts.optflag("q", "quiet", "");
    opts.optopt("", "logfile", "", "PATH");
    opts.optopt("", "test-threads", "", "n_threads");
    opts.optopt("", "format", "", "");
    opts.optopt("Z", "", "", "unstable-options");

    opts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_args(&["prog"]).unwrap().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.repeat, 1);
        assert_eq!(config.color, ColorConfig::Auto);
        assert!(!config.log_events);
    }

    #[test]
    fn all_options() {
        let config = Config::from_args(&["prog", "--color", "never", "--repeat", "-1", "--log-events"])
            .unwrap()
            .unwrap();
        assert_eq!(
            config,
            Config {
                color: ColorConfig::Never,
                repeat: -1,
                log_events: true,
            }
        );
    }

    #[test]
    fn help_requested() {
        assert!(Config::from_args(&["prog", "--help"]).unwrap().is_none());
        assert!(Config::from_args(&["prog", "-h"]).unwrap().is_none());
        assert!(Config::usage("/path/to/prog").contains("Usage: prog [OPTIONS]"));
    }

    #[test]
    fn libtest_flags_are_accepted() {
        let config = Config::from_args(&["prog", "--nocapture", "--test-threads", "1"])
            .unwrap()
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_values() {
        match Config::from_args(&["prog", "--color", "sometimes"]) {
            Err(ConfigError::InvalidColor(value)) => assert_eq!(value, "sometimes"),
            other => panic!("unexpected result: {:?}", other),
        }
        match Config::from_args(&["prog", "--repeat", "many"]) {
            Err(err @ ConfigError::InvalidRepeat(..)) => assert_eq!(
                err.to_string(),
                "argument for --repeat must be an integer (was many)"
            ),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            Config::from_args(&["prog", "--no-such-flag"]),
            Err(ConfigError::Args(..))
        ));
    }
}
