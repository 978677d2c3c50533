use serde::{Deserialize, Serialize};

/// `GET /health` response. The backend also reports `status` and
/// `documents_loaded`; only the connection flag drives the UI.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub database_connected: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub documents_loaded: Option<u64>,
}

/// `GET /stats` response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StatsResponse {
    pub total_documents: u64,
    pub unique_sources: u64,
    /// Distinct source document names. Older backends omit it.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// `POST /query` request body.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
}

/// A single citation as reported by the backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SourceRef {
    pub source: String,
    pub relevance_score: f64,
}

/// `POST /query` response. Extra fields (`question`, `context_used`) are ignored.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}
