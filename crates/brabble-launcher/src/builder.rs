//! Make sure the artifact exists, running the external build at most once.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::error::{BuildFailure, LaunchError};
use crate::report::Reporter;
use crate::termination::Termination;

/// Result of [`ensure_artifact`].
#[derive(Debug)]
pub enum BuildOutcome {
    /// The artifact was already there; nothing ran
    Skipped,
    /// The build ran and exited zero
    Succeeded,
    Failed(BuildFailure),
}

impl BuildOutcome {
    /// `Failed` becomes a [`LaunchError::Build`]; everything else is fine to continue.
    pub fn into_result(self) -> Result<(), LaunchError> {
        match self {
            BuildOutcome::Skipped | BuildOutcome::Succeeded => Ok(()),
            BuildOutcome::Failed(failure) => Err(failure.into()),
        }
    }
}

/// Build `artifact` unless it already exists.
///
/// The build's stdin, stdout and stderr are the launcher's own, so compiler
/// output streams live. Blocks until the build process exits.
pub fn ensure_artifact(
    artifact: &Path,
    config: &Config,
    workdir: &Path,
    reporter: &Reporter,
) -> BuildOutcome {
    if artifact.exists() {
        reporter.detail(format!("Using existing {}", artifact.display()));
        return BuildOutcome::Skipped;
    }

    let build = &config.build;
    let args = build.expanded_args(artifact, &config.program);
    let command = display_command(&build.program, &args);
    let source_dir = build.source_dir(workdir);

    reporter.status(format!("Building {} binary...", config.program));
    reporter.detail(format!("  $ {command}  (in {})", source_dir.display()));

    let status = Command::new(&build.program)
        .args(&args)
        .envs(&build.env)
        .current_dir(&source_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();

    match status {
        Ok(status) if status.success() => BuildOutcome::Succeeded,
        Ok(status) => BuildOutcome::Failed(BuildFailure::Exited {
            command,
            termination: Termination::from_status(status),
        }),
        Err(source) => BuildOutcome::Failed(BuildFailure::NotStarted { command, source }),
    }
}

fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
