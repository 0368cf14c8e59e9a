//! Help text for the launcher, rendered with clap. Arguments themselves are routed by `route`.

use std::ffi::OsString;

use clap::{Arg, ArgAction, Command};

const AFTER_HELP: &str = "\
Key commands (forwarded to ./bin/brabble):
  start | stop | restart          daemon lifecycle
  status --json                   uptime + last transcripts
  mic list | mic set \"<name>\"     select input device
  doctor                          check model/hook/portaudio
  setup                           download default whisper model
  models list|download|set        manage whisper.cpp models
  service install --env KEY=VAL   write launchd plist (macOS)
  reload                          reload hook/wake config live
  health                          control-socket liveness ping

Examples:
  brabble-launcher
  brabble-launcher start --metrics-addr 127.0.0.1:9317
  brabble-launcher mic list
  brabble-launcher models download ggml-medium-q5_1.bin
  brabble-launcher service install --env BRABBLE_METRICS_ADDR=127.0.0.1:9317

Configuration: ./brabble-launcher.toml (or $BRABBLE_LAUNCHER_CONFIG),
log level via $BRABBLE_LAUNCHER_LOG=quiet|normal|verbose";

/// The raw arguments the launcher was started with, minus the program name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchRequest {
    args: Vec<OsString>,
}

impl LaunchRequest {
    pub fn new(args: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::args_os().skip(1))
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

/// Describe the launcher's command line. Only used to render help.
pub fn command() -> Command {
    Command::new("brabble-launcher")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds the brabble binary if needed, then runs it")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .action(ArgAction::Help)
                .help("Show this help (nothing is built)"),
        )
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::SetTrue)
                .help("Build if needed, then print `brabble --version`"),
        )
        .arg(
            Arg::new("args")
                .value_name("ARGS")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .help("Forwarded verbatim to ./bin/brabble (default: serve)"),
        )
        .after_help(AFTER_HELP)
}

/// Print the launcher's help to stdout.
pub fn print_help() -> std::io::Result<()> {
    command().print_help()
}
