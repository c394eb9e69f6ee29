//! # Session State
//!
//! All conversation state for one run of CampusGPT.
//!
//! ```text
//! Session
//! ├── history: Vec<Message>          // append-only, display order
//! ├── pending_input: String          // draft text
//! ├── phase: Phase                   // Idle | Waiting
//! ├── last_error: Option<String>     // banner text, cleared per turn
//! └── status_message: String         // title bar text
//! ```
//!
//! Fields are only mutated by `update()` in action.rs. Renderers get a
//! [`SessionView`], which has no way to write back.

use super::message::{Message, MessageId, Role};

pub const WELCOME_STATUS: &str = "Welcome to CampusGPT!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A request is outstanding. New submissions are rejected.
    Waiting,
}

#[derive(Debug)]
pub struct Session {
    history: Vec<Message>,
    pub(crate) pending_input: String,
    pub(crate) phase: Phase,
    pub(crate) last_error: Option<String>,
    pub(crate) status_message: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            pending_input: String::new(),
            phase: Phase::Idle,
            last_error: None,
            status_message: WELCOME_STATUS.to_string(),
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_waiting(&self) -> bool {
        self.phase == Phase::Waiting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Appends to history. The only way history can change.
    pub(crate) fn push(&mut self, role: Role, content: String) -> MessageId {
        let message = Message::new(role, content);
        let id = message.id();
        self.history.push(message);
        id
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            history: &self.history,
            pending_input: &self.pending_input,
            is_waiting: self.is_waiting(),
            last_error: self.last_error.as_deref(),
            status_message: &self.status_message,
        }
    }
}

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub history: &'a [Message],
    pub pending_input: &'a str,
    pub is_waiting: bool,
    pub last_error: Option<&'a str>,
    pub status_message: &'a str,
}
