//! # Backend API
//!
//! HTTP plumbing for the question-answering backend. Three endpoints,
//! all owned by the backend:
//!
//! ```text
//! GET  /health  → HealthResponse
//! GET  /stats   → StatsResponse
//! POST /query   → QueryResponse   (body: QueryRequest)
//! ```
//!
//! The [`Backend`] trait is the seam between the TUI and the network so the
//! event loop can be driven by a stub in tests.

pub mod client;
pub mod types;

pub use client::{ApiError, Backend, HttpBackend};
pub use types::{HealthResponse, QueryRequest, QueryResponse, SourceRef, StatsResponse};
