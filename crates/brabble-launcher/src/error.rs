//! Typed failures of the build and spawn steps.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::termination::Termination;

/// Why the build step did not produce a usable result.
#[derive(Debug, Error)]
pub enum BuildFailure {
    #[error("could not start `{command}`")]
    NotStarted {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` finished with {termination}")]
    Exited {
        command: String,
        termination: Termination,
    },
}

/// A launch step that failed. A non-zero delegate exit is not one of these.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("build failed")]
    Build(#[from] BuildFailure),

    #[error("could not run {}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_failure_chain_names_command_and_status() {
        let err = anyhow::Error::from(LaunchError::from(BuildFailure::Exited {
            command: "go build -o bin/brabble ./cmd/brabble".into(),
            termination: Termination::exited(2),
        }));
        assert_eq!(
            format!("{err:#}"),
            "build failed: `go build -o bin/brabble ./cmd/brabble` finished with exit code 2"
        );
    }

    #[test]
    fn spawn_failure_keeps_io_source() {
        let err = anyhow::Error::from(LaunchError::Spawn {
            path: PathBuf::from("/work/bin/brabble"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        });
        let rendered = format!("{err:#}");
        assert!(rendered.starts_with("could not run /work/bin/brabble"));
        assert!(rendered.contains("No such file or directory"));
    }
}
