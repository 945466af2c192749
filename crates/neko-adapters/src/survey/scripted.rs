//! Survey answering from a queue of prepared answers.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use neko_core::{
    application::{ApplicationError, ports::Survey},
    error::{NekoError, NekoResult},
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Select(usize),
    Confirm(bool),
    Input(String),
    /// Use whatever default the prompt offers.
    Default,
    /// Behave as if the operator pressed Ctrl-C.
    Cancel,
}

/// Pops one [`Answer`] per prompt; an exhausted queue cancels.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSurvey {
    answers: Arc<Mutex<VecDeque<Answer>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSurvey {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().collect())),
            prompts: Arc::default(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn next(&self, prompt: &str) -> NekoResult<Answer> {
        self.prompts
            .lock()
            .map_err(|_| poisoned())?
            .push(prompt.to_string());
        let answer = self
            .answers
            .lock()
            .map_err(|_| poisoned())?
            .pop_front()
            .unwrap_or(Answer::Cancel);
        debug!(prompt, ?answer, "Scripted answer");
        Ok(answer)
    }
}

fn poisoned() -> NekoError {
    NekoError::Internal {
        message: "scripted survey lock poisoned".into(),
    }
}

fn unexpected(prompt: &str, answer: &Answer) -> NekoError {
    NekoError::Internal {
        message: format!("scripted answer {answer:?} does not fit prompt '{prompt}'"),
    }
}

impl Survey for ScriptedSurvey {
    fn select(&self, prompt: &str, options: &[String], default: usize) -> NekoResult<usize> {
        match self.next(prompt)? {
            Answer::Select(idx) if idx < options.len() => Ok(idx),
            Answer::Default => Ok(default),
            Answer::Cancel => Err(ApplicationError::SurveyCancelled.into()),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> NekoResult<bool> {
        match self.next(prompt)? {
            Answer::Confirm(yes) => Ok(yes),
            Answer::Default => Ok(default),
            Answer::Cancel => Err(ApplicationError::SurveyCancelled.into()),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn input(&self, prompt: &str, default: &str) -> NekoResult<String> {
        match self.next(prompt)? {
            Answer::Input(text) => Ok(text),
            Answer::Default => Ok(default.to_string()),
            Answer::Cancel => Err(ApplicationError::SurveyCancelled.into()),
            other => Err(unexpected(prompt, &other)),
        }
    }
}
