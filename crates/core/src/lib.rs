//! # studymitra-core
//!
//! Content store for the StudyMitra learning site: chapters grouped by class
//! and subject, and multiple-choice quizzes. Records are held in memory and
//! mirrored to one JSON file per collection.
//!
//! This is the core library crate with zero async dependencies. The HTTP
//! service lives in `studymitra-server`.

/// Global configuration constants: file names, limits, and server defaults.
pub mod config;
/// Content types: `Chapter`, `Quiz`, `QuizQuestion`, and quiz grading.
pub mod content;
/// Store error type.
pub mod error;
/// Storage layer: record collections, the content store, and JSON persistence.
pub mod storage;
/// Shape validation for create payloads with field-level errors.
pub mod validate;

pub use error::StoreError;
