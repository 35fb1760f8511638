//! A scripted [`Prompter`] for driving input collection and whole sessions in tests.

use super::Prompter;
use crate::error::{AppError, Result};
use std::collections::VecDeque;

/// Replays canned answers in order and records every prompt it was shown.
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Number of prompts shown so far.
    pub fn asked(&self) -> usize {
        self.prompts.len()
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        // Running dry ends the test instead of looping on re-prompts forever.
        self.answers
            .pop_front()
            .ok_or_else(|| AppError::Cli(format!("no scripted answer for prompt: {}", prompt)))
    }
}
