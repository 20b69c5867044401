//! Scripted console for driving interactive flows in tests.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::port::Console;

/// One recorded console event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Printed(String),
    Prompted(String),
}

/// Replays queued answers and records the transcript.
///
/// Reading past the last queued answer is an error, so a test that
/// under-scripts a flow fails instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    transcript: Vec<Event>,
    completions: Vec<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Queue more answers.
    pub fn push<S: Into<String>>(&mut self, answer: S) {
        self.answers.push_back(answer.into());
    }

    /// Answers not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn transcript(&self) -> &[Event] {
        &self.transcript
    }

    /// Prompts shown so far, in order.
    #[must_use]
    pub fn prompts(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|event| match event {
                Event::Prompted(prompt) => Some(prompt.as_str()),
                Event::Printed(_) => None,
            })
            .collect()
    }

    /// Lines printed so far, in order.
    #[must_use]
    pub fn printed(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|event| match event {
                Event::Printed(line) => Some(line.as_str()),
                Event::Prompted(_) => None,
            })
            .collect()
    }

    /// Completion candidates offered with each prompt.
    #[must_use]
    pub fn completions(&self) -> &[Vec<String>] {
        &self.completions
    }
}

impl Console for ScriptedConsole {
    fn print(&mut self, line: &str) -> Result<()> {
        self.transcript.push(Event::Printed(line.to_string()));
        Ok(())
    }

    fn read_line(&mut self, prompt: &str, completions: &[String]) -> Result<String> {
        self.transcript.push(Event::Prompted(prompt.to_string()));
        self.completions.push(completions.to_vec());
        self.answers.pop_front().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("script exhausted at prompt {prompt:?}"),
            ))
        })
    }
}
