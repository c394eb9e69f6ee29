//! Wire types for the `/ask` endpoint.
//!
//! Success bodies look like `{"answer": "..."}`. Failed requests from the
//! backend carry `{"error": "..."}` next to a 500 status.

use serde::Deserialize;
use serde_json::Value;

/// Text substituted when the service responds without a usable answer.
pub const NO_ANSWER_FALLBACK: &str = "No answer provided";

/// What a well-formed response carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    /// The body was JSON but had no non-empty string under `answer`.
    Missing,
}

#[derive(Deserialize, Debug)]
struct AskResponse {
    answer: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: String,
}

impl Answer {
    /// Interprets a parsed JSON body. Any shape other than an object with a
    /// non-blank string `answer` is `Missing`, never an error.
    pub fn from_json(body: Value) -> Self {
        match serde_json::from_value::<AskResponse>(body) {
            Ok(AskResponse { answer: Some(text) }) if !text.trim().is_empty() => Answer::Text(text),
            _ => Answer::Missing,
        }
    }

    /// Message content to show for this answer.
    pub fn into_content(self) -> String {
        match self {
            Answer::Text(text) => text,
            Answer::Missing => NO_ANSWER_FALLBACK.to_string(),
        }
    }
}

/// Pulls the backend's `error` field out of a failure body, if it has one.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_field_is_used_verbatim() {
        let answer = Answer::from_json(json!({"answer": "Library opens at 8am"}));
        assert_eq!(answer, Answer::Text("Library opens at 8am".to_string()));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let answer = Answer::from_json(json!({"answer": "Yes", "sources": ["a", "b"]}));
        assert_eq!(answer, Answer::Text("Yes".to_string()));
    }

    #[test]
    fn empty_object_is_missing() {
        assert_eq!(Answer::from_json(json!({})), Answer::Missing);
    }

    #[test]
    fn blank_or_null_answer_is_missing() {
        assert_eq!(Answer::from_json(json!({"answer": ""})), Answer::Missing);
        assert_eq!(Answer::from_json(json!({"answer": "   "})), Answer::Missing);
        assert_eq!(Answer::from_json(json!({"answer": null})), Answer::Missing);
    }

    #[test]
    fn non_object_shapes_are_missing() {
        assert_eq!(Answer::from_json(json!({"answer": 42})), Answer::Missing);
        assert_eq!(Answer::from_json(json!(["answer"])), Answer::Missing);
        assert_eq!(Answer::from_json(json!("just a string")), Answer::Missing);
    }

    #[test]
    fn missing_content_is_fallback_text() {
        assert_eq!(Answer::Missing.into_content(), NO_ANSWER_FALLBACK);
        assert_eq!(Answer::Text("hi".into()).into_content(), "hi");
    }

    #[test]
    fn error_detail_reads_backend_error_field() {
        assert_eq!(
            error_detail(r#"{"error": "vector store offline"}"#).as_deref(),
            Some("vector store offline")
        );
        assert_eq!(error_detail("Internal Server Error"), None);
        assert_eq!(error_detail(r#"{"error": ""}"#), None);
    }
}
