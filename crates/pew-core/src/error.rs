//! Error types for the pipeline and its seams.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command must contain at least a program name")]
    Empty,
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt interrupted")]
    Interrupted,

    #[error("prompt failed: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::Interrupted => PromptError::Interrupted,
            _ => PromptError::Io(err),
        }
    }
}

/// Failure raised by a module hook.
///
/// Declining a prompt or missing a lookup is not an error; hooks report
/// those as [`crate::Outcome::Unchanged`].
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("interrupted by user")]
    Interrupted,

    #[error(transparent)]
    Failed(Box<dyn std::error::Error + Send + Sync>),
}

impl ModuleError {
    pub fn failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ModuleError::Failed(err.into())
    }
}

impl From<PromptError> for ModuleError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Interrupted => ModuleError::Interrupted,
            other => ModuleError::failed(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("interrupted during module '{module}'")]
    Interrupted { module: &'static str },

    #[error("module '{module}' failed")]
    Module {
        module: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
