//! brabble-launcher: build the brabble binary if it is missing, then run it.
//! Contains the driver that sequences routing, building and delegation and decides the exit code.

pub mod artifact;
pub mod builder;
pub mod cli;
pub mod config;
pub mod delegate;
pub mod error;
pub mod report;
pub mod route;
pub mod termination;

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use cli::LaunchRequest;
use config::Config;
use delegate::{DelegateOutcome, IoMode};
use report::Reporter;
use route::RoutedCommand;

/// Run the launcher for `request` in `workdir` and return the process exit code.
///
/// A non-zero delegate exit is returned as `Ok`; `Err` means a launch step
/// itself failed and the caller should exit 1.
pub fn run(request: &LaunchRequest, workdir: &Path) -> Result<i32> {
    // Help must work whatever state the config or environment is in.
    if route::is_help_request(request.args()) {
        return print_help();
    }

    let config = Config::load_for(workdir)?;
    config.validate(workdir)?;
    let reporter = Reporter::new(config.log);

    match route::route(request.args(), &config.default_subcommand) {
        RoutedCommand::Help => print_help(),
        RoutedCommand::Version => {
            let artifact = prepare(workdir, &config, &reporter)?;
            let args: Vec<OsString> = config.version_args.iter().map(OsString::from).collect();
            let outcome = delegate::spawn(&artifact, &args, IoMode::Captured)?;
            let version = outcome.captured.as_deref().unwrap_or_default().trim();
            if !version.is_empty() {
                println!("{version}");
            }
            Ok(exit_code(&outcome, &config, &reporter))
        }
        RoutedCommand::PassThrough(args) => {
            let artifact = prepare(workdir, &config, &reporter)?;
            reporter.detail(format!("Running {} {}", artifact.display(), display_args(&args)));
            let outcome = delegate::spawn(&artifact, &args, IoMode::Inherited)?;
            Ok(exit_code(&outcome, &config, &reporter))
        }
    }
}

fn print_help() -> Result<i32> {
    cli::print_help().context("failed to print help")?;
    Ok(0)
}

/// Locate the artifact and build it if it is missing. A failed build stops here.
fn prepare(workdir: &Path, config: &Config, reporter: &Reporter) -> Result<PathBuf> {
    let artifact = artifact::locate(workdir, config);
    reporter.detail(format!("Artifact: {}", artifact.display()));
    builder::ensure_artifact(&artifact, config, workdir, reporter).into_result()?;
    Ok(artifact)
}

/// Run in the process's current directory.
pub fn run_in_current_dir(request: &LaunchRequest) -> Result<i32> {
    let workdir = std::env::current_dir().context("could not determine working directory")?;
    run(request, &workdir)
}

fn exit_code(outcome: &DelegateOutcome, config: &Config, reporter: &Reporter) -> i32 {
    if let (None, Some(signal)) = (outcome.termination.code, outcome.termination.signal) {
        reporter.warn(format!("{} was terminated by signal {signal}", config.program));
    }
    outcome.exit_code()
}

fn display_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, body: &str) {
        std::fs::write(dir.join(config::CONFIG_FILE_NAME), body).unwrap();
    }

    /// Point the artifact at the system shell so nothing has to be built.
    const SHELL_ARTIFACT: &str = "bin_dir = \"/bin\"\nprogram = \"sh\"\nlog = \"quiet\"\n";

    #[test]
    fn help_never_builds() {
        let tmp = TempDir::new().unwrap();
        write_config(
            tmp.path(),
            "log = \"quiet\"\n[build]\nprogram = \"sh\"\nargs = [\"-c\", \"echo build >> builds.log\"]\n",
        );

        let code = run(&LaunchRequest::new(["status", "--help"]), tmp.path()).unwrap();
        assert_eq!(code, 0);
        assert!(!tmp.path().join("builds.log").exists());
    }

    #[test]
    fn help_ignores_broken_config() {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path(), "log = [");

        let code = run(&LaunchRequest::new(["-h"]), tmp.path()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn delegate_exit_code_is_returned() {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path(), SHELL_ARTIFACT);

        for code in [0, 1, 2, 127] {
            let request = LaunchRequest::new(["-c".to_string(), format!("exit {code}")]);
            assert_eq!(run(&request, tmp.path()).unwrap(), code);
        }
    }

    #[test]
    fn failed_build_is_an_error() {
        let tmp = TempDir::new().unwrap();
        write_config(
            tmp.path(),
            "log = \"quiet\"\n[build]\nprogram = \"sh\"\nargs = [\"-c\", \"exit 2\"]\n",
        );

        let err = run(&LaunchRequest::new(["status"]), tmp.path()).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<error::LaunchError>(),
                Some(error::LaunchError::Build(_))
            ),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn successful_build_without_artifact_is_a_spawn_error() {
        let tmp = TempDir::new().unwrap();
        write_config(
            tmp.path(),
            "log = \"quiet\"\n[build]\nprogram = \"sh\"\nargs = [\"-c\", \"true\"]\n",
        );

        let err = run(&LaunchRequest::new(["status"]), tmp.path()).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<error::LaunchError>(),
                Some(error::LaunchError::Spawn { .. })
            ),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path(), "default_subcommand = [");

        let err = run(&LaunchRequest::default(), tmp.path()).unwrap_err();
        assert!(
            format!("{err:#}").contains("failed to parse"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn display_args_joins_lossily() {
        let args = vec![OsString::from("status"), OsString::from("--json")];
        assert_eq!(display_args(&args), "status --json");
    }
}
