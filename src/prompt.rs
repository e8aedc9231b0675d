//! Interactive and scripted choosers
//!
//! Every decision the organizer cannot take on its own goes through a
//! [`Chooser`]: picking a sort preset, confirming a duplicate, or selecting a
//! replacement track in manual mode.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};

/// Synchronous request/response decision source
pub trait Chooser {
    /// Pick one of `options` by index, or `None` when `allow_none` is set.
    ///
    /// Returning [`Error::Aborted`] ends the whole run.
    fn choose(&mut self, prompt: &str, options: &[String], allow_none: bool)
        -> Result<Option<usize>>;

    /// Yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Ask for exactly one of `options`, rejecting any answer outside them
pub fn choose_one(chooser: &mut dyn Chooser, prompt: &str, options: &[String]) -> Result<usize> {
    match chooser.choose(prompt, options, false)? {
        Some(i) if i < options.len() => Ok(i),
        Some(i) => Err(Error::AmbiguousChoice {
            index: i,
            options: options.len(),
        }),
        None => Err(Error::ChoiceRequired {
            options: options.len(),
        }),
    }
}

/// Numbered menu on a line-based terminal
pub struct TerminalChooser<R, W> {
    input: R,
    output: W,
}

impl TerminalChooser<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Aborted);
        }
        Ok(line.trim().to_lowercase())
    }
}

impl<R: BufRead, W: Write> Chooser for TerminalChooser<R, W> {
    fn choose(
        &mut self,
        prompt: &str,
        options: &[String],
        allow_none: bool,
    ) -> Result<Option<usize>> {
        // nothing to decide
        if options.len() == 1 && !allow_none {
            return Ok(Some(0));
        }

        writeln!(self.output, "{}", prompt)?;
        if allow_none {
            writeln!(self.output, "  0) None")?;
        }
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, option)?;
        }
        writeln!(self.output, "  q) Abort")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let answer = self.read_answer()?;
            if answer == "q" {
                return Err(Error::Aborted);
            }

            match answer.parse::<usize>() {
                Ok(0) if allow_none => return Ok(None),
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => writeln!(
                    self.output,
                    "Please enter a number between {} and {}, or q to abort.",
                    if allow_none { 0 } else { 1 },
                    options.len()
                )?,
            }
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };

        loop {
            write!(self.output, "{} {} ", prompt, hint)?;
            self.output.flush()?;

            match self.read_answer()?.as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }
}

/// Chooser answering from prepared queues, aborting once they run dry
#[derive(Debug, Default)]
pub struct ScriptedChooser {
    choices: VecDeque<Option<usize>>,
    confirmations: VecDeque<bool>,
    /// Prompts received, with the options offered for each
    pub asked: Vec<(String, Vec<String>)>,
}

impl ScriptedChooser {
    pub fn new(choices: impl IntoIterator<Item = Option<usize>>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_confirmations(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.confirmations = answers.into_iter().collect();
        self
    }
}

impl Chooser for ScriptedChooser {
    fn choose(
        &mut self,
        prompt: &str,
        options: &[String],
        _allow_none: bool,
    ) -> Result<Option<usize>> {
        self.asked.push((prompt.to_string(), options.to_vec()));
        self.choices.pop_front().ok_or(Error::Aborted)
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
        self.asked.push((prompt.to_string(), Vec::new()));
        self.confirmations.pop_front().ok_or(Error::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["First".to_string(), "Second".to_string()]
    }

    fn terminal(input: &str) -> TerminalChooser<&[u8], Vec<u8>> {
        TerminalChooser::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_terminal_choose() {
        let mut chooser = terminal("2\n");
        assert_eq!(chooser.choose("Pick", &options(), false).unwrap(), Some(1));

        let menu = String::from_utf8(chooser.output).unwrap();
        assert!(menu.contains("1) First"));
        assert!(menu.contains("q) Abort"));
        assert!(!menu.contains("0) None"));
    }

    #[test]
    fn test_terminal_none_and_retry() {
        let mut chooser = terminal("7\nabc\n0\n");
        assert_eq!(chooser.choose("Pick", &options(), true).unwrap(), None);
    }

    #[test]
    fn test_terminal_zero_without_none_is_rejected() {
        let mut chooser = terminal("0\n1\n");
        assert_eq!(chooser.choose("Pick", &options(), false).unwrap(), Some(0));
    }

    #[test]
    fn test_terminal_single_option_skips_prompt() {
        let mut chooser = terminal("");
        let only = vec!["Only".to_string()];
        assert_eq!(chooser.choose("Pick", &only, false).unwrap(), Some(0));
        assert!(chooser.output.is_empty());
    }

    #[test]
    fn test_terminal_abort() {
        let mut chooser = terminal("q\n");
        assert!(matches!(
            chooser.choose("Pick", &options(), true),
            Err(Error::Aborted)
        ));

        let mut chooser = terminal("");
        assert!(matches!(
            chooser.choose("Pick", &options(), true),
            Err(Error::Aborted)
        ));
    }

    #[test]
    fn test_terminal_confirm() {
        assert!(terminal("\n").confirm("Proceed?", true).unwrap());
        assert!(!terminal("\n").confirm("Proceed?", false).unwrap());
        assert!(terminal("maybe\nYes\n").confirm("Proceed?", false).unwrap());
        assert!(!terminal("n\n").confirm("Proceed?", true).unwrap());
    }

    #[test]
    fn test_choose_one() {
        let mut chooser = ScriptedChooser::new([Some(1), Some(2), None]);

        assert_eq!(choose_one(&mut chooser, "a", &options()).unwrap(), 1);
        assert!(matches!(
            choose_one(&mut chooser, "b", &options()),
            Err(Error::AmbiguousChoice { index: 2, options: 2 })
        ));
        assert!(matches!(
            choose_one(&mut chooser, "c", &options()),
            Err(Error::ChoiceRequired { options: 2 })
        ));
    }

    #[test]
    fn test_missing_answer_message() {
        let mut chooser = ScriptedChooser::new([None]);
        let err = choose_one(&mut chooser, "Pick", &options()).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("answer is required"));
        assert!(!message.contains("Choice 0"));
    }

    #[test]
    fn test_scripted() {
        let mut chooser = ScriptedChooser::new([Some(1), None]).with_confirmations([true]);

        assert_eq!(chooser.choose("a", &options(), true).unwrap(), Some(1));
        assert_eq!(chooser.choose("b", &options(), true).unwrap(), None);
        assert!(chooser.confirm("c", false).unwrap());
        assert!(matches!(
            chooser.choose("d", &options(), true),
            Err(Error::Aborted)
        ));
        assert_eq!(chooser.asked.len(), 4);
        assert_eq!(chooser.asked[0].1, options());
    }
}
