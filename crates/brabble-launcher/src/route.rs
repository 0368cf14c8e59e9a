//! Classify the launcher's arguments into help, version, or pass-through.

use std::ffi::{OsStr, OsString};

const HELP_FLAGS: [&str; 2] = ["--help", "-h"];
const VERSION_FLAGS: [&str; 2] = ["--version", "-v"];

/// What the launcher should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutedCommand {
    /// Print the launcher's help; nothing is built or run
    Help,
    /// Build if needed, then ask the artifact for its version
    Version,
    /// Build if needed, then run the artifact with exactly these arguments
    PassThrough(Vec<OsString>),
}

/// Route `args`. A help flag anywhere wins over a version flag anywhere;
/// an empty vector becomes `[default_subcommand]`.
pub fn route(args: &[OsString], default_subcommand: &str) -> RoutedCommand {
    if is_help_request(args) {
        return RoutedCommand::Help;
    }
    if args.iter().any(|a| is_one_of(a, &VERSION_FLAGS)) {
        return RoutedCommand::Version;
    }
    if args.is_empty() {
        RoutedCommand::PassThrough(vec![OsString::from(default_subcommand)])
    } else {
        RoutedCommand::PassThrough(args.to_vec())
    }
}

/// Whether `args` asks for help. Needs nothing but the arguments, so callers
/// can answer before loading any configuration.
pub fn is_help_request(args: &[OsString]) -> bool {
    args.iter().any(|a| is_one_of(a, &HELP_FLAGS))
}

fn is_one_of(arg: &OsStr, flags: &[&str]) -> bool {
    flags.iter().any(|flag| arg == *flag)
}
