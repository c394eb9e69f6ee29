//! Async driver for one turn at a time.
//!
//! `TurnController` runs the same reducer the TUI uses, but awaits the
//! Answer Service inline instead of spawning a task. Useful for headless
//! callers and for exercising whole turns in tests.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::answer::{Answer, AnswerError, AnswerService};

use super::action::{Action, Effect, update};
use super::state::{Session, SessionView};

/// Which branch a completed turn took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The service returned an answer.
    Answered,
    /// The service responded without an answer; fallback text was used.
    Fallback,
    /// The exchange failed; the apology was appended and `last_error` set.
    Failed,
}

impl TurnOutcome {
    fn of(result: &Result<Answer, AnswerError>) -> Self {
        match result {
            Ok(Answer::Text(_)) => TurnOutcome::Answered,
            Ok(Answer::Missing) => TurnOutcome::Fallback,
            Err(_) => TurnOutcome::Failed,
        }
    }
}

/// Why a submission was ignored. No state changed in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    EmptyInput,
    /// A previous request never completed.
    Busy,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejected::EmptyInput => write!(f, "nothing to send"),
            Rejected::Busy => write!(f, "still waiting for the previous answer"),
        }
    }
}

impl std::error::Error for Rejected {}

pub struct TurnController {
    session: Session,
    service: Arc<dyn AnswerService>,
}

impl TurnController {
    pub fn new(service: Arc<dyn AnswerService>) -> Self {
        Self {
            session: Session::new(),
            service,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> SessionView<'_> {
        self.session.view()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        update(&mut self.session, Action::InputChanged(text.into()));
    }

    /// Submits `text` and drives the turn to completion.
    ///
    /// If this future is dropped before it resolves, the session stays
    /// `Waiting` and every later submission is rejected with `Busy`.
    pub async fn submit(&mut self, text: &str) -> Result<TurnOutcome, Rejected> {
        let rejection = if text.trim().is_empty() {
            Rejected::EmptyInput
        } else {
            Rejected::Busy
        };

        let query = match update(&mut self.session, Action::Submit(text.to_string())) {
            Effect::Ask(query) => query,
            _ => {
                debug!("Submission rejected: {}", rejection);
                return Err(rejection);
            }
        };

        let result = self.service.ask(&query).await;
        let outcome = TurnOutcome::of(&result);
        update(&mut self.session, Action::AnswerReceived(result));
        Ok(outcome)
    }

    /// Submits whatever is currently in the draft.
    pub async fn submit_pending(&mut self) -> Result<TurnOutcome, Rejected> {
        let text = self.session.pending_input().to_string();
        self.submit(&text).await
    }
}
