use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::types::{HealthResponse, QueryRequest, QueryResponse, StatsResponse};

/// Errors from talking to the backend.
///
/// The UI never shows these to the user; a failed query becomes the
/// apology message and a failed status fetch leaves the status bar unset.
/// They exist for the log file.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The HTTP client could not be built (bad TLS setup, invalid URL).
    Config(String),
    /// Connection refused, DNS failure, reset mid-body.
    Network(String),
    /// The configured request timeout elapsed.
    Timeout,
    /// Backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body was not the JSON shape we expect.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "client config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Timeout => write!(f, "request timed out"),
            ApiError::Api { status, message } => {
                write!(f, "backend error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// The three backend operations the conversation view depends on.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> Result<HealthResponse, ApiError>;

    /// `GET /stats`
    async fn stats(&self) -> Result<StatsResponse, ApiError>;

    /// `POST /query` with `{ "question": ... }`. One attempt, no retry.
    async fn query(&self, question: &str) -> Result<QueryResponse, ApiError>;
}

/// `reqwest`-backed [`Backend`].
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Build a client for `base_url`. `timeout` of `None` means the request
    /// waits as long as the backend takes.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Check status and decode the body, keeping the error text of non-2xx
    /// responses for the log.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        debug!("Backend response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error: {} - {}", status, message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.client.get(self.url("health")).send().await?;
        Self::decode(response).await
    }

    async fn stats(&self) -> Result<StatsResponse, ApiError> {
        let response = self.client.get(self.url("stats")).send().await?;
        Self::decode(response).await
    }

    async fn query(&self, question: &str) -> Result<QueryResponse, ApiError> {
        info!("POST /query (question_len={})", question.len());
        let response = self
            .client
            .post(self.url("query"))
            .json(&QueryRequest { question })
            .send()
            .await?;
        let answer: QueryResponse = Self::decode(response).await?;
        info!(
            "Query answered: answer_len={}, sources={}",
            answer.answer.len(),
            answer.sources.len()
        );
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/", None).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.url("query"), "http://localhost:8000/query");
    }

    #[test]
    fn api_error_display() {
        let err = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "backend error (HTTP 500): boom");
        assert_eq!(ApiError::Timeout.to_string(), "request timed out");
    }
}
