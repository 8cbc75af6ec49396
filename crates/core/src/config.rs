//! Global configuration constants for StudyMitra.
//!
//! File names, listing limits, and server defaults are defined here.
//! These are compile-time constants; runtime configuration is handled via CLI
//! arguments and environment variables in the server's `main.rs`.

/// File holding the chapter collection, relative to the data directory.
pub const CHAPTERS_FILE: &str = "chapters.json";

/// File holding the quiz collection, relative to the data directory.
pub const QUIZZES_FILE: &str = "quizzes.json";

/// Number of chapters returned by `GET /api/chapters/recent`.
pub const RECENT_CHAPTERS_LIMIT: usize = 6;

/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address. The admin surface has no real authentication, so
/// the server listens on loopback unless told otherwise.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default directory for the JSON collection files.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum HTTP request body size in bytes (10 MB).
pub const MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Maximum number of concurrent in-flight requests.
pub const MAX_CONCURRENT_REQUESTS: usize = 512;

/// Default graceful shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Interval between refreshes of the content gauges, in seconds.
pub const METRICS_REFRESH_SECS: u64 = 15;
