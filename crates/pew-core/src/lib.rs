//! Module hook pipeline for command execution.
//!
//! # Architecture
//!
//! A [`Command`] flows through an ordered list of [`Module`]s. Each module
//! may leave it alone, replace it, or end the run with a status code.
//! The [`Pipeline`] owns the ordering; modules never see each other.
//!
//! User-facing announcements go through [`Reporter`], interactive
//! questions through [`Prompter`]. Both are passed in a [`Context`] so
//! modules stay free of terminal details.
//!
//! # Example
//!
//! ```
//! use pew_core::{Command, Context, Module, ModuleError, Outcome, Pipeline, Resolution};
//! use pew_core::{NullReporter, ScriptedPrompter};
//!
//! struct Upper;
//!
//! impl Module for Upper {
//!     fn name(&self) -> &'static str {
//!         "Upper"
//!     }
//!
//!     fn hook(&self, command: &Command, _cx: &Context<'_>) -> Result<Outcome, ModuleError> {
//!         Ok(Outcome::Replaced(command.with_program(command.program().to_uppercase())))
//!     }
//! }
//!
//! let prompter = ScriptedPrompter::default();
//! let cx = Context::new(std::env::temp_dir(), &prompter, &NullReporter);
//! let command = Command::new(vec!["ls".into(), "-l".into()]).unwrap();
//! let resolution = Pipeline::new().module(Upper).run(command, &cx).unwrap();
//! assert_eq!(resolution, Resolution::Run(Command::new(vec!["LS".into(), "-l".into()]).unwrap()));
//! ```

pub use command::Command;
pub use error::{CommandError, ModuleError, PipelineError, PromptError};
pub use module::{Context, Module, Outcome};
pub use pipeline::{Pipeline, Resolution};
pub use prompt::{Answer, Prompter, ScriptedPrompter, TermPrompter};
pub use report::{NullReporter, Reporter};

mod command;
pub mod dir;
mod error;
pub mod exit;
mod module;
mod pipeline;
mod prompt;
mod report;
