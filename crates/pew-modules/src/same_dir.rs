use crate::access::is_executable_file;
use pew_core::{Command, Context, Module, ModuleError, Outcome};
use std::path::{MAIN_SEPARATOR, Path};

/// Runs `foo` as `./foo` when `foo` is an executable in the working directory.
///
/// The launcher only searches `PATH` for bare names, so without this an
/// executable sitting right next to the user would not be found.
#[derive(Debug, Clone, Copy, Default)]
pub struct SameDirExecutable;

fn is_qualified(program: &str) -> bool {
    program.contains('/') || program.contains(MAIN_SEPARATOR)
}

impl SameDirExecutable {
    fn is_local_executable(program: &str, cwd: &Path) -> bool {
        let candidate = cwd.join(program);
        if candidate.parent() != Some(cwd) || !is_executable_file(&candidate) {
            return false;
        }
        // a link in cwd may point anywhere; the target must live here too
        match (candidate.canonicalize(), cwd.canonicalize()) {
            (Ok(resolved), Ok(cwd)) => resolved.parent() == Some(cwd.as_path()),
            _ => false,
        }
    }
}

impl Module for SameDirExecutable {
    fn name(&self) -> &'static str {
        "SameDirExecutable"
    }

    fn matches(&self, command: &Command, _cx: &Context<'_>) -> bool {
        let program = command.program();
        !program.is_empty() && !is_qualified(program)
    }

    fn hook(&self, command: &Command, cx: &Context<'_>) -> Result<Outcome, ModuleError> {
        let program = command.program();
        if !Self::is_local_executable(program, cx.cwd()) {
            return Ok(Outcome::Unchanged);
        }
        Ok(Outcome::Replaced(
            command.with_program(format!(".{MAIN_SEPARATOR}{program}")),
        ))
    }
}
