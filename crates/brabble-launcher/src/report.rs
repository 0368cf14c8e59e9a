//! Console reporting: status lines, verbose details, warnings and the top-level error line.
//!
//! Everything goes to stderr so the delegate's stdout (and the version string) stay clean.

use console::style;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much the launcher says about what it is doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// Build notices and warnings
    #[default]
    Normal,
    /// Also resolved paths and full command lines
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Quiet => write!(f, "quiet"),
            LogLevel::Normal => write!(f, "normal"),
            LogLevel::Verbose => write!(f, "verbose"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(LogLevel::Quiet),
            "normal" | "" => Ok(LogLevel::Normal),
            "verbose" | "debug" => Ok(LogLevel::Verbose),
            other => anyhow::bail!("unknown log level '{other}' (expected quiet, normal or verbose)"),
        }
    }
}

/// Writes launcher messages at the configured level.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    level: LogLevel,
}

impl Reporter {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// A step the user should see, e.g. that a build is starting.
    pub fn status(&self, msg: impl fmt::Display) {
        if self.level != LogLevel::Quiet {
            eprintln!("{}", style(msg).yellow());
        }
    }

    /// Detail shown only in verbose mode.
    pub fn detail(&self, msg: impl fmt::Display) {
        if self.level == LogLevel::Verbose {
            eprintln!("{}", style(msg).dim());
        }
    }

    pub fn warn(&self, msg: impl fmt::Display) {
        if self.level != LogLevel::Quiet {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        }
    }
}

/// Print a failure that aborted the launch. Always shown, whatever the level.
pub fn error(err: &anyhow::Error) {
    eprintln!("{} {err:#}", style("Error:").red().bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parses_known_names() {
        assert_eq!("quiet".parse::<LogLevel>().unwrap(), LogLevel::Quiet);
        assert_eq!("Normal".parse::<LogLevel>().unwrap(), LogLevel::Normal);
        assert_eq!(" verbose ".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
    }

    #[test]
    fn log_level_rejects_unknown_name() {
        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert!(err.to_string().contains("loud"), "unexpected error: {err}");
    }

    #[test]
    fn log_level_display_roundtrips() {
        for level in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Verbose] {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn log_level_deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            log: LogLevel,
        }
        let parsed: Wrapper = toml::from_str("log = \"quiet\"").unwrap();
        assert_eq!(parsed.log, LogLevel::Quiet);
    }
}
