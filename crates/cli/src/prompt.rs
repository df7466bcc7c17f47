// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented question and answer over any reader/writer pair
//!
//! Answers are validated by the caller's parser. A rejected answer prints
//! `invalid input: ...` and the same question is asked again; only a closed
//! input or a broken terminal ends the loop.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use thermo_core::InputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before an answer was given")]
    Closed,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Asks questions on `output` and reads answers from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line of information
    pub fn say(&mut self, line: impl Display) -> Result<(), PromptError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Ask a question and return the raw answer, surrounding whitespace removed
    pub fn line(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Err(PromptError::Closed);
        }
        Ok(answer.trim().to_string())
    }

    /// Ask until `parse` accepts the answer
    pub fn ask<T, E: Display>(
        &mut self,
        question: &str,
        mut parse: impl FnMut(&str) -> Result<T, E>,
    ) -> Result<T, PromptError> {
        loop {
            let answer = self.line(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(question, answer = %answer, error = %e, "answer rejected");
                    writeln!(self.output, "invalid input: {}", e)?;
                }
            }
        }
    }

    /// Like [`Prompter::ask`], an empty answer takes `default` when there is one
    pub fn ask_or<T: Display, E: Display>(
        &mut self,
        question: &str,
        default: Option<T>,
        mut parse: impl FnMut(&str) -> Result<T, E>,
    ) -> Result<T, PromptError> {
        let Some(default) = default else {
            return self.ask(question, parse);
        };
        let question = format!("{} [{}]", question, default);
        let mut default = Some(default);
        self.ask(&question, |answer: &str| match default.take() {
            Some(value) if answer.is_empty() => Ok(value),
            taken => {
                default = taken;
                parse(answer)
            }
        })
    }

    /// Yes/no question; an empty answer takes `default`
    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool, PromptError> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        self.ask(&format!("{} {}", question, hint), |answer: &str| {
            match answer.to_ascii_lowercase().as_str() {
                "" => Ok(default),
                "y" | "yes" => Ok(true),
                "n" | "no" => Ok(false),
                _ => Err(InputError::UnknownChoice {
                    input: answer.to_string(),
                    expected: "y, n",
                }),
            }
        })
    }

    /// Free-text answer where an empty line means "none"
    pub fn optional(&mut self, question: &str) -> Result<Option<String>, PromptError> {
        let answer = self.line(question)?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
