//! Prometheus metrics recording and background collection.

use metrics::{counter, gauge, histogram};
use std::time::Duration;
use studymitra_core::storage::Store;

/// Records HTTP request metrics.
pub fn record_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records a write operation metric.
pub fn record_write_operation(entity: &str, operation: &str) {
    counter!(
        "studymitra_operations_total",
        "entity" => entity.to_string(),
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Records an admin login attempt and its outcome.
pub fn record_login_attempt(outcome: &str) {
    counter!("studymitra_login_attempts_total", "outcome" => outcome.to_string()).increment(1);
}

/// Updates content-level Prometheus gauges.
pub fn update_content_metrics(store: &Store) {
    gauge!("studymitra_chapters_total").set(store.chapter_count() as f64);
    gauge!("studymitra_quizzes_total").set(store.quiz_count() as f64);
}
