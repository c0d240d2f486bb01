//! Module contract.
//!
//! A module is a stateless rewrite stage. The pipeline asks [`Module::matches`]
//! first and only calls [`Module::hook`] when it returns true.

use crate::command::Command;
use crate::error::ModuleError;
use crate::prompt::Prompter;
use crate::report::Reporter;
use std::path::{Path, PathBuf};

/// Result of a single hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep the current command and continue.
    Unchanged,
    /// Continue with this command; later modules see it instead.
    Replaced(Command),
    /// Stop processing and exit with this status. Nothing is launched.
    Terminate(i32),
}

/// What a module may use while it runs.
pub struct Context<'a> {
    cwd: PathBuf,
    prompter: &'a dyn Prompter,
    reporter: &'a dyn Reporter,
}

impl<'a> Context<'a> {
    pub fn new(
        cwd: impl Into<PathBuf>,
        prompter: &'a dyn Prompter,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            cwd: cwd.into(),
            prompter,
            reporter,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter
    }

    /// Announce a message attributed to `module`.
    pub fn note(&self, module: &dyn Module, message: &str) {
        self.reporter.note(module.name(), message);
    }
}

pub trait Module {
    /// Stable name used for attribution in announcements and logs.
    fn name(&self) -> &'static str;

    /// Cheap guard. Modules without one always attempt [`Module::hook`].
    fn matches(&self, _command: &Command, _cx: &Context<'_>) -> bool {
        true
    }

    fn hook(&self, command: &Command, cx: &Context<'_>) -> Result<Outcome, ModuleError>;
}

impl<M: Module + ?Sized> Module for Box<M> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn matches(&self, command: &Command, cx: &Context<'_>) -> bool {
        (**self).matches(command, cx)
    }

    fn hook(&self, command: &Command, cx: &Context<'_>) -> Result<Outcome, ModuleError> {
        (**self).hook(command, cx)
    }
}
