//! Script configuration
//!
//! CGI hosts rarely pass arguments, so every option can also be set through
//! a `CGI_ECHO_*` environment variable. Command-line values win.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use super::html::Interpolation;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_TIMEOUT: &str = "CGI_ECHO_TIMEOUT";
pub const ENV_RAW_HTML: &str = "CGI_ECHO_RAW_HTML";
pub const ENV_LOG_FILE: &str = "CGI_ECHO_LOG_FILE";
pub const ENV_JOURNAL: &str = "CGI_ECHO_JOURNAL";
pub const ENV_VERBOSE: &str = "CGI_ECHO_VERBOSE";

/// Runtime settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Deadline for reading the request body
    pub body_timeout: Duration,
    pub interpolation: Interpolation,
    pub log_file: Option<PathBuf>,
    /// JSON-lines file receiving one record per invocation
    pub journal_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            body_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            interpolation: Interpolation::Escaped,
            log_file: None,
            journal_file: None,
            verbose: false,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    Help,
    Version,
}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl Config {
    /// Defaults overridden by `CGI_ECHO_*` variables. Values that do not
    /// parse are reported in `problems` and otherwise ignored.
    pub fn from_env_lookup<F>(lookup: F, problems: &mut Vec<String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.body_timeout = Duration::from_secs(secs),
                Err(e) => problems.push(format!("{}='{}': {}", ENV_TIMEOUT, raw, e)),
            }
        }
        if lookup(ENV_RAW_HTML).is_some_and(|v| truthy(&v)) {
            config.interpolation = Interpolation::Raw;
        }
        if let Some(path) = lookup(ENV_LOG_FILE).filter(|p| !p.is_empty()) {
            config.log_file = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(ENV_JOURNAL).filter(|p| !p.is_empty()) {
            config.journal_file = Some(PathBuf::from(path));
        }
        if lookup(ENV_VERBOSE).is_some_and(|v| truthy(&v)) {
            config.verbose = true;
        }

        config
    }

    /// Apply command-line arguments (without the program name) on top of
    /// `self`
    pub fn apply_args<I>(mut self, args: I) -> Result<Command, lexopt::Error>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        use lexopt::prelude::*;

        let mut parser = lexopt::Parser::from_args(args);
        while let Some(arg) = parser.next()? {
            match arg {
                Long("timeout") => {
                    let secs: u64 = parser.value()?.parse()?;
                    self.body_timeout = Duration::from_secs(secs);
                }
                Long("raw-html") => {
                    self.interpolation = Interpolation::Raw;
                }
                Long("log-file") => {
                    self.log_file = Some(parser.value()?.into());
                }
                Long("journal") => {
                    self.journal_file = Some(parser.value()?.into());
                }
                Short('v') | Long("verbose") => {
                    self.verbose = true;
                }
                Short('h') | Long("help") => return Ok(Command::Help),
                Short('V') | Long("version") => return Ok(Command::Version),
                // Hosts pass ISINDEX search words as plain arguments
                Value(_) => {}
                _ => return Err(arg.unexpected()),
            }
        }

        Ok(Command::Run(self))
    }
}

/// Usage text for `--help`
pub fn usage(script: &str) -> String {
    format!(
        "USAGE:\n    {script} [OPTIONS]\n\n\
         Run as a CGI script: request data comes from the environment and stdin,\n\
         the response goes to stdout.\n\n\
         OPTIONS:\n\
         \x20       --timeout <SECS>     Body read deadline [default: {DEFAULT_TIMEOUT_SECS}] (env {ENV_TIMEOUT})\n\
         \x20       --raw-html           Insert request values without HTML escaping (env {ENV_RAW_HTML})\n\
         \x20       --log-file <PATH>    Append log lines to PATH (env {ENV_LOG_FILE})\n\
         \x20       --journal <PATH>     Append one JSON line per invocation to PATH (env {ENV_JOURNAL})\n\
         \x20   -v, --verbose            Enable debug logging (env {ENV_VERBOSE})\n\
         \x20   -h, --help               Print help information\n\
         \x20   -V, --version            Print version information\n"
    )
}
