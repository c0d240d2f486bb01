//! Command lines as the user sees them on stderr.

use console::{Style, Term, truncate_str};
use pew_core::{Command, Reporter};

const PREFIX: &str = "pew: ";
const MIN_WIDTH: usize = 16;

fn prefix() -> String {
    Style::new().for_stderr().cyan().dim().apply_to(PREFIX).to_string()
}

fn is_numeric(arg: &str) -> bool {
    arg.bytes().any(|b| b.is_ascii_digit()) && arg.parse::<f64>().is_ok()
}

/// Options win over numbers, so `-1` reads as a flag.
fn arg_style(arg: &str) -> Style {
    let style = Style::new().for_stderr();
    if arg.starts_with('-') {
        style.dim()
    } else if is_numeric(arg) {
        style.color256(208)
    } else if arg.contains(char::is_whitespace) {
        style.green().underlined()
    } else {
        style
    }
}

/// One styled line for `command`, at most `max(width - 10, 16)` columns.
///
/// The program turns green when it differs from the one in `previous`.
pub fn render(command: &Command, previous: Option<&Command>, width: usize) -> String {
    let program = Style::new().for_stderr().bold();
    let program = match previous {
        Some(prev) if prev.program() != command.program() => program.green(),
        _ => program.yellow(),
    };

    let mut line = prefix();
    line.push_str(&program.apply_to(command.program()).to_string());
    for arg in command.args() {
        line.push(' ');
        line.push_str(&arg_style(arg).apply_to(arg).to_string());
    }

    let budget = width.saturating_sub(10).max(MIN_WIDTH);
    truncate_str(&line, budget, "…").into_owned()
}

/// Announces everything on stderr.
pub struct ConsoleReporter {
    term: Term,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { term: Term::stderr() }
    }

    fn width(&self) -> usize {
        self.term.size_checked().map_or(80, |(_, cols)| usize::from(cols))
    }

    // Reporting never fails; a closed stderr just loses the line.
    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn command(&self, command: &Command, previous: Option<&Command>) {
        self.line(&render(command, previous, self.width()));
    }

    fn matched(&self, module: &str) {
        let module = Style::new().for_stderr().magenta().apply_to(module);
        self.line(&format!("{}match {module}", prefix()));
    }

    fn note(&self, module: &str, message: &str) {
        let module = Style::new().for_stderr().magenta().apply_to(module);
        self.line(&format!("{}{module}: {message}", prefix()));
    }

    fn ended(&self) {
        let text = Style::new().for_stderr().red().apply_to("end processing");
        self.line(&format!("{}{text}", prefix()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::{measure_text_width, strip_ansi_codes};

    fn cmd(argv: &[&str]) -> Command {
        Command::new(argv.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_plain_text() {
        let line = render(&cmd(&["ls", "-la", "my dir", "42"]), None, 120);
        assert_eq!(strip_ansi_codes(&line), "pew: ls -la my dir 42");
    }

    #[test]
    fn test_truncated_to_width() {
        let long: Vec<String> = std::iter::once("cc".to_string())
            .chain((0..40).map(|i| format!("file{i}.c")))
            .collect();
        let line = render(&Command::new(long).unwrap(), None, 40);

        assert!(measure_text_width(&line) <= 30);
        assert!(strip_ansi_codes(&line).ends_with('…'));
    }

    #[test]
    fn test_narrow_terminal_keeps_minimum() {
        let line = render(&cmd(&["program-with-a-long-name"]), None, 4);
        assert_eq!(measure_text_width(&line), MIN_WIDTH);
    }

    #[test]
    fn test_short_line_untouched() {
        let line = render(&cmd(&["./foo", "bar"]), Some(&cmd(&["foo", "bar"])), 80);
        assert_eq!(strip_ansi_codes(&line), "pew: ./foo bar");
    }

    #[test]
    fn test_arg_styles() {
        let base = Style::new().for_stderr();
        assert_eq!(arg_style("-1"), base.clone().dim());
        assert_eq!(arg_style("--jobs"), base.clone().dim());
        assert_eq!(arg_style("42"), base.clone().color256(208));
        assert_eq!(arg_style("my dir"), base.clone().green().underlined());
        assert_eq!(arg_style("main.c"), base);
    }

    #[test]
    fn test_numeric_detection() {
        assert!(is_numeric("42"));
        assert!(is_numeric("-1.5"));
        assert!(!is_numeric("-O2"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("nan"));
    }
}
