use pew_core::{ModuleError, PromptError};
use pew_fetch::DownloadError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to run {}: {source}", tool.display())]
    Spawn {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("package search exited with {status}: {stderr}")]
    Query { status: String, stderr: String },

    #[error("unreadable search output: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("no nix-portable release for architecture '{0}'")]
    UnsupportedArch(String),
}

impl InstallError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| InstallError::Io { action, path, source }
    }
}

impl From<InstallError> for ModuleError {
    fn from(err: InstallError) -> Self {
        match err {
            InstallError::Prompt(PromptError::Interrupted)
            | InstallError::Download(DownloadError::Interrupted) => ModuleError::Interrupted,
            other => ModuleError::failed(other),
        }
    }
}
