//! Pipeline - ordered application of modules to a command.
//!
//! Modules run strictly in registration order. Each one sees the command
//! as left by every module before it; a rewritten command is never fed
//! back into earlier modules.

use crate::command::Command;
use crate::error::{ModuleError, PipelineError};
use crate::module::{Context, Module, Outcome};
use tracing::debug;

/// Terminal state of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Hand this command to the launcher.
    Run(Command),
    /// A module ended processing; exit with this status without launching.
    Exit(i32),
}

#[derive(Default)]
pub struct Pipeline {
    modules: Vec<Box<dyn Module>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_modules(modules: Vec<Box<dyn Module>>) -> Self {
        Self { modules }
    }

    /// Append a module after the ones already registered.
    pub fn module<M: Module + 'static>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.iter().map(|m| m.name())
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Feed `command` through every module.
    ///
    /// The initial command is announced before the first module runs and
    /// every replacement is announced as it happens.
    pub fn run(&self, command: Command, cx: &Context<'_>) -> Result<Resolution, PipelineError> {
        let reporter = cx.reporter();
        reporter.command(&command, None);

        let mut current = command;
        for module in &self.modules {
            let name = module.name();
            if !module.matches(&current, cx) {
                debug!(module = name, "skipped");
                continue;
            }

            reporter.matched(name);
            let outcome = module.hook(&current, cx).map_err(|err| match err {
                ModuleError::Interrupted => PipelineError::Interrupted { module: name },
                ModuleError::Failed(source) => PipelineError::Module { module: name, source },
            })?;

            match outcome {
                Outcome::Unchanged => debug!(module = name, "unchanged"),
                Outcome::Replaced(next) => {
                    debug!(module = name, command = %next, "replaced");
                    reporter.command(&next, Some(&current));
                    current = next;
                }
                Outcome::Terminate(code) => {
                    debug!(module = name, code, "terminated");
                    reporter.ended();
                    return Ok(Resolution::Exit(code));
                }
            }
        }

        Ok(Resolution::Run(current))
    }
}
