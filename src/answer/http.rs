//! HTTP client for the local question-answering backend.
//!
//! One `GET {base_url}/ask?query=...` per turn. No auth, no retries, and no
//! client-side timeout: a request runs until the server or the OS gives up.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::service::{AnswerError, AnswerService};
use super::types::{Answer, error_detail};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Longest slice of a non-JSON error body carried into the banner text.
const MAX_ERROR_BODY_CHARS: usize = 200;

pub struct HttpAnswerService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnswerService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn ask_url(&self) -> String {
        format!("{}/ask", self.base_url)
    }
}

impl Default for HttpAnswerService {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Builds the banner message for a non-success response body.
fn status_message(body: &str) -> String {
    if let Some(detail) = error_detail(body) {
        return detail;
    }
    body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    fn name(&self) -> &str {
        "http"
    }

    async fn ask(&self, query: &str) -> Result<Answer, AnswerError> {
        info!("Asking {} (query_len={})", self.ask_url(), query.len());

        let response = self
            .client
            .get(self.ask_url())
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| AnswerError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Answer service response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| AnswerError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Answer service error: {} - {}", status.as_u16(), body);
            return Err(AnswerError::Status {
                status: status.as_u16(),
                message: status_message(&body),
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| AnswerError::Parse(e.to_string()))?;
        let answer = Answer::from_json(json);
        if answer == Answer::Missing {
            warn!("Answer service response had no usable answer field: {}", body);
        }
        Ok(answer)
    }
}
