//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::answer::{Answer, AnswerError, AnswerService};
use crate::core::Session;

/// Replays canned results in order and records every query it was asked.
/// Once the script runs out it answers with `Answer::Missing`.
pub struct ScriptedService {
    script: Mutex<VecDeque<Result<Answer, AnswerError>>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn new(script: Vec<Result<Answer, AnswerError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn ask(&self, query: &str) -> Result<Answer, AnswerError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Answer::Missing))
    }
}

/// A service whose requests never complete.
pub struct HangingService;

#[async_trait]
impl AnswerService for HangingService {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn ask(&self, _query: &str) -> Result<Answer, AnswerError> {
        std::future::pending().await
    }
}

/// A session holding `turns` completed question/answer pairs.
pub fn session_with_turns(turns: &[(&str, &str)]) -> Session {
    use crate::core::{Action, update};

    let mut session = Session::new();
    for (question, answer) in turns {
        update(&mut session, Action::Submit(question.to_string()));
        update(
            &mut session,
            Action::AnswerReceived(Ok(Answer::Text(answer.to_string()))),
        );
    }
    session
}
