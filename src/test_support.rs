//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, Backend, HealthResponse, QueryResponse, StatsResponse};
use crate::core::config::UiCopy;
use crate::core::state::App;

/// A backend that replays canned results and records the questions it saw.
pub struct StubBackend {
    pub health: Result<HealthResponse, ApiError>,
    pub stats: Result<StatsResponse, ApiError>,
    pub answer: Result<QueryResponse, ApiError>,
    pub questions: Mutex<Vec<String>>,
}

impl StubBackend {
    /// Everything fails with a network error.
    pub fn offline() -> Self {
        let down = || ApiError::Network("connection refused".to_string());
        Self {
            health: Err(down()),
            stats: Err(down()),
            answer: Err(down()),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(answer: QueryResponse) -> Self {
        Self {
            health: Ok(HealthResponse {
                database_connected: true,
                status: Some("healthy".to_string()),
                documents_loaded: Some(42),
            }),
            stats: Ok(StatsResponse {
                total_documents: 42,
                unique_sources: 7,
                sources: vec![],
            }),
            answer: Ok(answer),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn seen_questions(&self) -> Vec<String> {
        self.questions.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Backend for StubBackend {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.health.clone()
    }

    async fn stats(&self) -> Result<StatsResponse, ApiError> {
        self.stats.clone()
    }

    async fn query(&self, question: &str) -> Result<QueryResponse, ApiError> {
        if let Ok(mut q) = self.questions.lock() {
            q.push(question.to_string());
        }
        self.answer.clone()
    }
}

/// Creates a test App with the default product copy.
pub fn test_app() -> App {
    App::new(UiCopy::default())
}
