//! # Actions
//!
//! Everything that can happen in CampusGPT becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The backend replies? That's `Action::AnswerReceived(result)`.
//!
//! `update()` applies an action to the session and returns an [`Effect`]
//! describing the I/O the caller must perform. No I/O happens here.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```
//!
//! ## Turn state machine
//!
//! ```text
//!            Submit(valid text)
//!   ┌──────┐ ─────────────────▶ ┌─────────┐
//!   │ Idle │                    │ Waiting │
//!   └──────┘ ◀───────────────── └─────────┘
//!            AnswerReceived(_)
//! ```
//!
//! `Submit` while `Waiting`, or with blank text, changes nothing.

use log::{debug, info, warn};

use crate::answer::{Answer, AnswerError};

use super::message::Role;
use super::state::{Phase, Session};

/// Assistant reply appended when a turn fails.
pub const APOLOGY_MESSAGE: &str = "Sorry, I'm having trouble connecting to the server. \
    Please make sure the backend is running and try again.";

pub const STATUS_ASKING: &str = "Asking...";
pub const STATUS_READY: &str = "Ready";
pub const STATUS_CONNECTION_ERROR: &str = "Connection error";

#[derive(Debug)]
pub enum Action {
    /// The draft text changed (keystroke, paste, ...).
    InputChanged(String),
    /// The user asked to send the given text.
    Submit(String),
    /// The outstanding request finished, one way or another.
    AnswerReceived(Result<Answer, AnswerError>),
    /// Hide the error banner.
    DismissError,
    Quit,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Send this (already trimmed) query to the Answer Service.
    Ask(String),
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    match action {
        Action::InputChanged(text) => {
            session.pending_input = text;
            Effect::None
        }
        Action::Submit(text) => begin_turn(session, &text),
        Action::AnswerReceived(outcome) => {
            finish_turn(session, outcome);
            Effect::None
        }
        Action::DismissError => {
            session.last_error = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn begin_turn(session: &mut Session, text: &str) -> Effect {
    let query = text.trim();
    if query.is_empty() {
        debug!("Ignoring blank submission");
        return Effect::None;
    }
    if session.is_waiting() {
        debug!("Ignoring submission while a request is outstanding");
        return Effect::None;
    }

    let id = session.push(Role::User, query.to_string());
    session.pending_input.clear();
    session.phase = Phase::Waiting;
    session.last_error = None;
    session.status_message = STATUS_ASKING.to_string();

    info!("Turn started (message={}, history_len={})", id, session.history().len());
    Effect::Ask(query.to_string())
}

fn finish_turn(session: &mut Session, outcome: Result<Answer, AnswerError>) {
    if !session.is_waiting() {
        warn!("Dropping answer received with no outstanding turn: {:?}", outcome);
        return;
    }

    match outcome {
        Ok(answer) => {
            let missing = answer == Answer::Missing;
            let id = session.push(Role::Assistant, answer.into_content());
            if missing {
                info!("Turn finished without an answer field, using fallback (message={})", id);
            } else {
                info!("Turn finished with answer (message={})", id);
            }
            session.status_message = STATUS_READY.to_string();
        }
        Err(e) => {
            let id = session.push(Role::Assistant, APOLOGY_MESSAGE.to_string());
            warn!("Turn failed ({:?}, message={}): {}", e.kind(), id, e);
            session.last_error = Some(e.to_string());
            session.status_message = STATUS_CONNECTION_ERROR.to_string();
        }
    }

    session.phase = Phase::Idle;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::NO_ANSWER_FALLBACK;

    fn contents(session: &Session) -> Vec<(Role, &str)> {
        session
            .history()
            .iter()
            .map(|m| (m.role(), m.content()))
            .collect()
    }

    fn waiting_session(question: &str) -> Session {
        let mut session = Session::new();
        update(&mut session, Action::Submit(question.to_string()));
        session
    }

    #[test]
    fn test_submit_appends_trimmed_user_message() {
        let mut session = Session::new();
        session.pending_input = "  library hours \n".to_string();

        let effect = update(&mut session, Action::Submit("  library hours \n".to_string()));

        assert_eq!(effect, Effect::Ask("library hours".to_string()));
        assert_eq!(contents(&session), vec![(Role::User, "library hours")]);
        assert!(session.pending_input().is_empty());
        assert!(session.is_waiting());
        assert_eq!(session.status_message(), STATUS_ASKING);
    }

    #[test]
    fn test_submit_clears_previous_error() {
        let mut session = Session::new();
        session.last_error = Some("old failure".to_string());

        update(&mut session, Action::Submit("again".to_string()));

        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_blank_submit_is_noop() {
        for blank in ["", "   ", "\n\t "] {
            let mut session = Session::new();
            session.pending_input = blank.to_string();
            session.last_error = Some("keep me".to_string());

            let effect = update(&mut session, Action::Submit(blank.to_string()));

            assert_eq!(effect, Effect::None);
            assert!(session.history().is_empty());
            assert_eq!(session.pending_input(), blank);
            assert_eq!(session.phase(), Phase::Idle);
            assert_eq!(session.last_error(), Some("keep me"));
        }
    }

    #[test]
    fn test_submit_while_waiting_is_rejected() {
        let mut session = waiting_session("first");
        update(&mut session, Action::InputChanged("second".to_string()));

        let effect = update(&mut session, Action::Submit("second".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(contents(&session), vec![(Role::User, "first")]);
        assert_eq!(session.pending_input(), "second");
        assert!(session.is_waiting());
    }

    #[test]
    fn test_typing_is_allowed_while_waiting() {
        let mut session = waiting_session("first");
        let effect = update(&mut session, Action::InputChanged("next question".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(session.pending_input(), "next question");
    }

    #[test]
    fn test_answer_completes_turn() {
        let mut session = waiting_session("library hours");

        update(
            &mut session,
            Action::AnswerReceived(Ok(Answer::Text("Library opens at 8am".to_string()))),
        );

        assert_eq!(
            contents(&session),
            vec![
                (Role::User, "library hours"),
                (Role::Assistant, "Library opens at 8am"),
            ]
        );
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.last_error().is_none());
        assert_eq!(session.status_message(), STATUS_READY);
    }

    #[test]
    fn test_missing_answer_uses_fallback_without_error() {
        let mut session = waiting_session("bar");

        update(&mut session, Action::AnswerReceived(Ok(Answer::Missing)));

        assert_eq!(session.history()[1].content(), NO_ANSWER_FALLBACK);
        assert!(session.last_error().is_none());
        assert!(!session.is_waiting());
    }

    #[test]
    fn test_failure_appends_apology_and_sets_error() {
        let mut session = waiting_session("foo");

        update(
            &mut session,
            Action::AnswerReceived(Err(AnswerError::Status {
                status: 500,
                message: "boom".to_string(),
            })),
        );

        assert_eq!(
            contents(&session),
            vec![(Role::User, "foo"), (Role::Assistant, APOLOGY_MESSAGE)]
        );
        assert_eq!(
            session.last_error(),
            Some("answer service returned HTTP 500: boom")
        );
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.status_message(), STATUS_CONNECTION_ERROR);
    }

    #[test]
    fn test_parse_failure_is_a_failed_turn() {
        let mut session = waiting_session("foo");
        update(
            &mut session,
            Action::AnswerReceived(Err(AnswerError::Parse("expected value".to_string()))),
        );
        assert_eq!(session.history()[1].content(), APOLOGY_MESSAGE);
        assert!(session.last_error().is_some());
    }

    #[test]
    fn test_answer_without_outstanding_turn_is_dropped() {
        let mut session = Session::new();

        update(&mut session, Action::AnswerReceived(Ok(Answer::Text("stray".to_string()))));

        assert!(session.history().is_empty());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_second_answer_for_same_turn_is_dropped() {
        let mut session = waiting_session("q");
        update(&mut session, Action::AnswerReceived(Ok(Answer::Text("one".to_string()))));
        update(&mut session, Action::AnswerReceived(Ok(Answer::Text("two".to_string()))));

        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].content(), "one");
    }

    #[test]
    fn test_history_only_grows_in_order() {
        let mut session = Session::new();
        let mut seen = Vec::new();
        for q in ["a", "b", "c"] {
            update(&mut session, Action::Submit(q.to_string()));
            update(&mut session, Action::AnswerReceived(Ok(Answer::Missing)));
            let ids: Vec<_> = session.history().iter().map(|m| m.id()).collect();
            assert!(ids.starts_with(&seen));
            seen = ids;
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_dismiss_error() {
        let mut session = Session::new();
        session.last_error = Some("x".to_string());
        assert_eq!(update(&mut session, Action::DismissError), Effect::None);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_quit() {
        let mut session = Session::new();
        assert_eq!(update(&mut session, Action::Quit), Effect::Quit);
    }
}
