use std::fmt;

use async_trait::async_trait;

use super::types::Answer;

/// The two failure families a turn can run into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The exchange itself failed: unreachable host or non-success status.
    TransportFailure,
    /// The exchange completed but the body could not be read as JSON.
    MalformedResponse,
}

/// Errors that can occur while asking the Answer Service.
///
/// The `Display` output is shown to the user in the error banner, so it is
/// phrased for humans rather than for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    /// Network-level failure (DNS, connection refused, reset mid-body).
    Network(String),
    /// The service answered with a non-success status. The code is not
    /// interpreted: a 429 is handled exactly like a 500.
    Status { status: u16, message: String },
    /// The body was not valid JSON.
    Parse(String),
}

impl AnswerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnswerError::Network(_) | AnswerError::Status { .. } => ErrorKind::TransportFailure,
            AnswerError::Parse(_) => ErrorKind::MalformedResponse,
        }
    }
}

impl fmt::Display for AnswerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerError::Network(msg) => write!(f, "could not reach the answer service: {msg}"),
            AnswerError::Status { status, message } if message.is_empty() => {
                write!(f, "answer service returned HTTP {status}")
            }
            AnswerError::Status { status, message } => {
                write!(f, "answer service returned HTTP {status}: {message}")
            }
            AnswerError::Parse(msg) => {
                write!(f, "answer service sent an unreadable response: {msg}")
            }
        }
    }
}

impl std::error::Error for AnswerError {}

#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Short name used in logs and the title bar.
    fn name(&self) -> &str;

    /// Asks a single question. Exactly one outbound request per call, no retries.
    async fn ask(&self, query: &str) -> Result<Answer, AnswerError>;
}
