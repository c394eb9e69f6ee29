//! # Answer Service
//!
//! Everything CampusGPT knows about the question-answering backend.
//! The backend is a black box: one GET per turn, one JSON object back.
//!
//! ```text
//!   core (update)  ──Effect::Ask(query)──▶  AnswerService::ask()
//!        ▲                                        │
//!        └──────Action::AnswerReceived(result)────┘
//! ```

pub mod http;
pub mod service;
pub mod types;

pub use http::{DEFAULT_BASE_URL, HttpAnswerService};
pub use service::{AnswerError, AnswerService, ErrorKind};
pub use types::{Answer, NO_ANSWER_FALLBACK};
