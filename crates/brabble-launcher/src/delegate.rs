//! Run the artifact and wait for it.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::LaunchError;
use crate::termination::Termination;

/// How the delegate's stdout is wired. stdin and stderr are always inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoMode {
    /// Streams go straight to the launcher's terminal
    Inherited,
    /// stdout is collected and handed back
    Captured,
}

/// How one delegate run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateOutcome {
    pub termination: Termination,
    /// stdout, only in [`IoMode::Captured`]
    pub captured: Option<String>,
}

impl DelegateOutcome {
    /// The code the launcher should exit with. Falls back to 0 when the
    /// delegate ended without one (killed by a signal).
    pub fn exit_code(&self) -> i32 {
        self.termination.code.unwrap_or(0)
    }

    pub fn success(&self) -> bool {
        self.termination.success()
    }
}

/// Spawn `artifact` with exactly `args` and block until it exits.
///
/// Failing to start the process is a [`LaunchError::Spawn`]; any exit code,
/// zero or not, is a normal outcome.
pub fn spawn(
    artifact: &Path,
    args: &[OsString],
    mode: IoMode,
) -> Result<DelegateOutcome, LaunchError> {
    let mut command = Command::new(artifact);
    command
        .args(args)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit());

    let spawn_error = |source| LaunchError::Spawn {
        path: artifact.to_path_buf(),
        source,
    };

    match mode {
        IoMode::Inherited => {
            let status = command
                .stdout(Stdio::inherit())
                .status()
                .map_err(spawn_error)?;
            Ok(DelegateOutcome {
                termination: Termination::from_status(status),
                captured: None,
            })
        }
        IoMode::Captured => {
            let output = command
                .stdout(Stdio::piped())
                .output()
                .map_err(spawn_error)?;
            Ok(DelegateOutcome {
                termination: Termination::from_status(output.status),
                captured: Some(String::from_utf8_lossy(&output.stdout).into_owned()),
            })
        }
    }
}
