//! Hand the resolved command over to the operating system.

use pew_core::{Command, exit};
use std::io;
use std::process;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{0}: command not found")]
    NotFound(String),

    #[error("{0}: permission denied")]
    PermissionDenied(String),

    #[error("{program}: {source}")]
    Other {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    fn classify(program: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => LaunchError::NotFound(program.to_string()),
            io::ErrorKind::PermissionDenied => LaunchError::PermissionDenied(program.to_string()),
            _ => LaunchError::Other {
                program: program.to_string(),
                source: err,
            },
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::NotFound(_) => exit::NOT_FOUND,
            LaunchError::PermissionDenied(_) => exit::NOT_EXECUTABLE,
            LaunchError::Other { .. } => exit::FAILURE,
        }
    }
}

/// Replace this process with `command`. Only returns on failure.
#[cfg(unix)]
pub fn launch(command: &Command) -> LaunchError {
    use std::os::unix::process::CommandExt;

    let err = process::Command::new(command.program())
        .args(command.args())
        .exec();
    LaunchError::classify(command.program(), err)
}

/// Run `command` and exit with its status. Only returns on failure.
#[cfg(not(unix))]
pub fn launch(command: &Command) -> LaunchError {
    match process::Command::new(command.program())
        .args(command.args())
        .status()
    {
        Ok(status) => process::exit(status.code().unwrap_or(exit::FAILURE)),
        Err(err) => LaunchError::classify(command.program(), err),
    }
}
