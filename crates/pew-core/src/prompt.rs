//! Interactive confirmation and free-text prompts.

use crate::error::PromptError;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use std::cell::RefCell;
use std::collections::VecDeque;

pub trait Prompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError>;

    fn input(&self, message: &str, default: &str) -> Result<String, PromptError>;
}

/// Terminal prompts drawn on stderr.
#[derive(Default)]
pub struct TermPrompter {
    theme: ColorfulTheme,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn from_dialoguer(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(io) => io.into(),
    }
}

impl Prompter for TermPrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact_on(&Term::stderr())
            .map_err(from_dialoguer)
    }

    fn input(&self, message: &str, default: &str) -> Result<String, PromptError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .default(default.to_string())
            .interact_text_on(&Term::stderr())
            .map_err(from_dialoguer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Text(String),
    Interrupt,
}

/// Answers prompts from a fixed script.
///
/// Once the script runs out every confirmation is declined and every
/// input takes its default, so an empty script is a safe non-interactive
/// prompter.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Messages of every prompt issued so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next(&self, message: &str) -> Option<Answer> {
        self.asked.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str, _default: bool) -> Result<bool, PromptError> {
        match self.next(message) {
            Some(Answer::Yes) => Ok(true),
            Some(Answer::Interrupt) => Err(PromptError::Interrupted),
            Some(Answer::No) | Some(Answer::Text(_)) | None => Ok(false),
        }
    }

    fn input(&self, message: &str, default: &str) -> Result<String, PromptError> {
        match self.next(message) {
            Some(Answer::Text(text)) => Ok(text),
            Some(Answer::Interrupt) => Err(PromptError::Interrupted),
            _ => Ok(default.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let p = ScriptedPrompter::new([Answer::Yes, Answer::Text("/opt".into()), Answer::No]);
        assert!(p.confirm("first?", false).unwrap());
        assert_eq!(p.input("where?", "~/bin").unwrap(), "/opt");
        assert!(!p.confirm("again?", true).unwrap());
        assert_eq!(p.asked(), ["first?", "where?", "again?"]);
    }

    #[test]
    fn test_exhausted_script_declines_and_defaults() {
        let p = ScriptedPrompter::default();
        assert!(!p.confirm("install?", true).unwrap());
        assert_eq!(p.input("where?", "~/bin").unwrap(), "~/bin");
    }

    #[test]
    fn test_scripted_interrupt() {
        let p = ScriptedPrompter::new([Answer::Interrupt]);
        assert!(matches!(p.confirm("install?", true), Err(PromptError::Interrupted)));
    }
}
