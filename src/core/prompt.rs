// ─── Confirmation Gate ───
// Turns a yes/no question plus a default into a boolean. Reading one line
// from the terminal is the only external dependency, kept behind a trait
// so tests can script answers.

use std::io::{BufRead, Write};

use crate::core::error::{InstallerError, InstallerResult};

/// Where a confirmation's answer comes from.
pub trait AnswerSource {
    fn read_line(&mut self) -> std::io::Result<String>;
}

/// Production source: one line from stdin.
pub struct StdinAnswers;

impl AnswerSource for StdinAnswers {
    fn read_line(&mut self) -> std::io::Result<String> {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAnswer {
    Yes,
    No,
}

impl DefaultAnswer {
    fn hint(self) -> &'static str {
        match self {
            DefaultAnswer::Yes => "[Y/n]",
            DefaultAnswer::No => "[y/N]",
        }
    }

    fn as_bool(self) -> bool {
        matches!(self, DefaultAnswer::Yes)
    }
}

/// Ask a yes/no question. An empty answer resolves to the default, as does
/// anything that is not an explicit yes or no.
pub fn confirm(
    input: &mut dyn AnswerSource,
    question: &str,
    default: DefaultAnswer,
) -> InstallerResult<bool> {
    print!("{} {} ", question, default.hint());
    std::io::stdout().flush()?;

    let answer = input.read_line()?;
    Ok(resolve(&answer, default))
}

/// Like `confirm`, but a declined answer aborts the run. Used only for the
/// install-blocking top-level question.
pub fn confirm_or_abort(
    input: &mut dyn AnswerSource,
    question: &str,
    default: DefaultAnswer,
) -> InstallerResult<()> {
    if confirm(input, question, default)? {
        Ok(())
    } else {
        Err(InstallerError::UserDeclined)
    }
}

fn resolve(answer: &str, default: DefaultAnswer) -> bool {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default.as_bool(),
    }
}

/// Scripted answers for tests; tracks how many lines were consumed.
#[cfg(test)]
pub(crate) struct ScriptedAnswers {
    answers: Vec<String>,
    next: usize,
}

#[cfg(test)]
impl ScriptedAnswers {
    pub(crate) fn new<const N: usize>(answers: [&str; N]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            next: 0,
        }
    }

    pub(crate) fn consumed(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
impl AnswerSource for ScriptedAnswers {
    fn read_line(&mut self) -> std::io::Result<String> {
        let Some(answer) = self.answers.get(self.next) else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "no scripted answer left",
            ));
        };
        self.next += 1;
        Ok(answer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_resolves_to_default() {
        assert!(resolve("", DefaultAnswer::Yes));
        assert!(!resolve("", DefaultAnswer::No));
        assert!(resolve("\n", DefaultAnswer::Yes));
        assert!(!resolve("\n", DefaultAnswer::No));
    }

    #[test]
    fn explicit_answers_override_default() {
        assert!(resolve("y", DefaultAnswer::No));
        assert!(resolve("YES", DefaultAnswer::No));
        assert!(!resolve("n", DefaultAnswer::Yes));
        assert!(!resolve("No\n", DefaultAnswer::Yes));
    }

    #[test]
    fn unrecognised_answer_falls_back_to_default() {
        assert!(resolve("whatever", DefaultAnswer::Yes));
        assert!(!resolve("whatever", DefaultAnswer::No));
    }

    #[test]
    fn confirm_reads_one_line() {
        let mut input = ScriptedAnswers::new(["", "n"]);
        assert!(confirm(&mut input, "Proceed?", DefaultAnswer::Yes).unwrap());
        assert!(!confirm(&mut input, "Proceed?", DefaultAnswer::Yes).unwrap());
        assert_eq!(input.consumed(), 2);
    }

    #[test]
    fn declined_confirmation_aborts() {
        let mut input = ScriptedAnswers::new(["n"]);
        let err = confirm_or_abort(&mut input, "Proceed?", DefaultAnswer::Yes).unwrap_err();
        assert!(err.is_user_declined());
    }

    #[test]
    fn accepted_confirmation_does_not_abort() {
        let mut input = ScriptedAnswers::new([""]);
        confirm_or_abort(&mut input, "Proceed?", DefaultAnswer::Yes).unwrap();
    }
}
