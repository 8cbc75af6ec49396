//! studymitra-server — HTTP server for the StudyMitra content store.
//!
//! Provides the REST API over chapters, quizzes, and admin login.
//! Storage and validation live in `studymitra-core`.

/// REST API layer: Axum router, HTTP handlers, models, audit logging, metrics.
pub mod api;
