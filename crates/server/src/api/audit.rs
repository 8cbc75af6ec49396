//! Structured audit logging for content changes and login attempts.
//!
//! Provides [`AuditContext`] (inserted by the request-id middleware into request
//! extensions) and [`audit_event`] for emitting structured audit log entries
//! with `target: "audit"`. Operators can filter/route audit events via
//! `RUST_LOG=audit=info`.

use axum::http::HeaderMap;

/// Identity and request context for audit logging.
///
/// Handlers extract it via `Option<Extension<AuditContext>>`.
#[derive(Clone, Debug)]
pub struct AuditContext {
    /// Who acted. `"anonymous"` unless a handler knows better (e.g. a masked login name).
    pub actor: String,
    /// Value of the `x-request-id` response header.
    pub request_id: String,
    /// Client IP from `X-Forwarded-For` / `X-Real-IP` headers, or "-".
    pub client_ip: String,
}

impl AuditContext {
    /// Same request context with a different actor.
    pub fn with_actor(&self, actor: String) -> Self {
        Self {
            actor,
            ..self.clone()
        }
    }
}

/// Mask a login name for safe logging: first 3 chars + "...".
pub fn mask_identity(name: &str) -> String {
    if name.chars().count() <= 3 {
        "***".to_string()
    } else {
        let prefix: String = name.chars().take(3).collect();
        format!("{}...", prefix)
    }
}

/// Extract client IP from request headers (X-Forwarded-For → X-Real-IP → "-").
pub fn extract_client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or("-").trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Emit a structured audit log entry.
///
/// All audit events use `target: "audit"` so they can be filtered independently
/// from operational logs (e.g. `RUST_LOG=audit=info`).
pub fn audit_event(ctx: &AuditContext, action: &str, resource: &str, detail: &str, outcome: &str) {
    tracing::info!(
        target: "audit",
        actor = %ctx.actor,
        request_id = %ctx.request_id,
        client_ip = %ctx.client_ip,
        action = %action,
        resource = %resource,
        detail = %detail,
        outcome = %outcome,
        "audit"
    );
}
