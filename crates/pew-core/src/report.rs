use crate::command::Command;

/// User-visible announcements made while the pipeline runs.
///
/// These are not diagnostics: implementations must always show them and
/// must never fail.
pub trait Reporter {
    /// A command is about to take effect. `previous` is the command it replaced.
    fn command(&self, command: &Command, previous: Option<&Command>);

    fn matched(&self, module: &str);

    fn note(&self, module: &str, message: &str);

    /// Processing stops without launching anything.
    fn ended(&self);
}

/// Discards every announcement.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn command(&self, _command: &Command, _previous: Option<&Command>) {}
    fn matched(&self, _module: &str) {}
    fn note(&self, _module: &str, _message: &str) {}
    fn ended(&self) {}
}
