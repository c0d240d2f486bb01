use crate::error::CommandError;
use std::fmt;

/// A non-empty argument vector: program locator followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command(Vec<String>);

impl Command {
    pub fn new(argv: Vec<String>) -> Result<Self, CommandError> {
        if argv.is_empty() {
            return Err(CommandError::Empty);
        }
        Ok(Self(argv))
    }

    /// Program locator: a bare name, a relative path or an absolute path.
    pub fn program(&self) -> &str {
        &self.0[0]
    }

    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Same arguments, different program.
    pub fn with_program(&self, program: impl Into<String>) -> Self {
        let mut argv = Vec::with_capacity(self.0.len());
        argv.push(program.into());
        argv.extend_from_slice(self.args());
        Self(argv)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(argv: &[&str]) -> Command {
        Command::new(argv.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_command_rejects_empty() {
        assert!(matches!(Command::new(vec![]), Err(CommandError::Empty)));
    }

    #[test]
    fn test_command_program_and_args() {
        let c = cmd(&["gcc", "-O2", "main.c"]);
        assert_eq!(c.program(), "gcc");
        assert_eq!(c.args(), ["-O2", "main.c"]);
    }

    #[test]
    fn test_command_without_args() {
        let c = cmd(&["ls"]);
        assert!(c.args().is_empty());
    }

    #[test]
    fn test_with_program_keeps_args_and_original() {
        let c = cmd(&["foo", "bar"]);
        let rewritten = c.with_program("./foo");
        assert_eq!(rewritten.as_slice(), ["./foo", "bar"]);
        assert_eq!(c.as_slice(), ["foo", "bar"]);
    }

    #[test]
    fn test_display_joins_with_spaces() {
        assert_eq!(cmd(&["echo", "a", "b"]).to_string(), "echo a b");
    }
}
