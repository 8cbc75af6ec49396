//! HTTP request handlers and shared application state.

use crate::api::audit::{audit_event, mask_identity, AuditContext};
use crate::api::errors::ApiError;
use crate::api::metrics;
use crate::api::models::*;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use studymitra_core::config;
use studymitra_core::content::{Chapter, Quiz, QuizGrade, UserView};
use studymitra_core::storage::Store;
use studymitra_core::validate;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Shared application state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub prometheus_handle: PrometheusHandle,
    pub start_time: Instant,
}

/// Parse a request body as JSON. Malformed JSON is a 400 carrying `message`.
fn parse_json(body: &Bytes, message: &str) -> Result<serde_json::Value, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Validation {
        message: message.to_string(),
        errors: vec![validate::FieldError {
            path: String::new(),
            message: format!("Malformed JSON: {}", e),
        }],
    })
}

/// Ids are UUIDs; anything else cannot name a record.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn audit(ctx: &Option<Extension<AuditContext>>, action: &str, resource: &str, detail: &str, outcome: &str) {
    if let Some(Extension(ref ctx)) = ctx {
        audit_event(ctx, action, resource, detail, outcome);
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        chapters: state.store.chapter_count(),
        quizzes: state.store.quiz_count(),
    })
}

/// `GET /metrics`
pub async fn metrics_endpoint(State(state): State<AppState>) -> String {
    state.prometheus_handle.render()
}

// ── Chapters ───────────────────────────────────────────────────────────

/// `GET /api/chapters`
pub async fn list_chapters(State(state): State<AppState>) -> Json<Vec<Chapter>> {
    Json(state.store.list_chapters())
}

/// `GET /api/chapters/recent`
pub async fn recent_chapters(State(state): State<AppState>) -> Json<Vec<Chapter>> {
    Json(state.store.list_recent_chapters(config::RECENT_CHAPTERS_LIMIT))
}

/// `GET /api/classes/:class_number/chapters`
pub async fn class_chapters(
    State(state): State<AppState>,
    Path(class_number): Path<String>,
) -> Result<Json<Vec<Chapter>>, ApiError> {
    let class_number: i64 = class_number
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid class number".into()))?;
    Ok(Json(state.store.list_chapters_by_class(class_number)))
}

/// `GET /api/chapters/:id`
pub async fn get_chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Chapter>, ApiError> {
    parse_id(&id)
        .and_then(|id| state.store.get_chapter(&id))
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Chapter not found".into()))
}

/// `POST /api/chapters`
pub async fn create_chapter(
    State(state): State<AppState>,
    audit_ctx: Option<Extension<AuditContext>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Chapter>), ApiError> {
    let payload = parse_json(&body, "Invalid chapter data")?;
    let new = validate::chapter_from_json(&payload).map_err(|errors| {
        audit(&audit_ctx, "create_chapter", "chapter", "invalid payload", "rejected");
        ApiError::Validation {
            message: "Invalid chapter data".into(),
            errors,
        }
    })?;

    let chapter = state.store.create_chapter(new).map_err(|e| {
        tracing::error!("Chapter write failed: {}", e);
        audit(&audit_ctx, "create_chapter", "chapter", "write failed", "error");
        ApiError::Internal("Failed to create chapter".into())
    })?;

    metrics::record_write_operation("chapter", "create");
    audit(
        &audit_ctx,
        "create_chapter",
        &format!("chapter/{}", chapter.id),
        &format!("class={} subject={}", chapter.class_number, chapter.subject),
        "success",
    );
    tracing::info!(id = %chapter.id, class = chapter.class_number, "Chapter created");
    Ok((StatusCode::CREATED, Json(chapter)))
}

/// `DELETE /api/chapters/:id`
pub async fn delete_chapter(
    State(state): State<AppState>,
    audit_ctx: Option<Extension<AuditContext>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Some(uuid) = parse_id(&id) else {
        return Err(ApiError::NotFound("Chapter not found".into()));
    };
    let deleted = state.store.delete_chapter(&uuid).map_err(|e| {
        tracing::error!("Chapter write failed: {}", e);
        ApiError::Internal("Failed to delete chapter".into())
    })?;
    if !deleted {
        return Err(ApiError::NotFound("Chapter not found".into()));
    }

    metrics::record_write_operation("chapter", "delete");
    audit(&audit_ctx, "delete_chapter", &format!("chapter/{}", uuid), "", "success");
    tracing::info!(id = %uuid, "Chapter deleted");
    Ok(Json(MessageResponse {
        message: "Chapter deleted successfully".to_string(),
    }))
}

// ── Quizzes ────────────────────────────────────────────────────────────

/// `GET /api/quizzes`
pub async fn list_quizzes(State(state): State<AppState>) -> Json<Vec<Quiz>> {
    Json(state.store.list_quizzes())
}

/// `GET /api/quizzes/:id`
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Quiz>, ApiError> {
    parse_id(&id)
        .and_then(|id| state.store.get_quiz(&id))
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Quiz not found".into()))
}

/// `POST /api/quizzes`
pub async fn create_quiz(
    State(state): State<AppState>,
    audit_ctx: Option<Extension<AuditContext>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Quiz>), ApiError> {
    let payload = parse_json(&body, "Invalid quiz data")?;
    let new = validate::quiz_from_json(&payload).map_err(|errors| {
        audit(&audit_ctx, "create_quiz", "quiz", "invalid payload", "rejected");
        ApiError::Validation {
            message: "Invalid quiz data".into(),
            errors,
        }
    })?;

    let quiz = state.store.create_quiz(new).map_err(|e| {
        tracing::error!("Quiz write failed: {}", e);
        audit(&audit_ctx, "create_quiz", "quiz", "write failed", "error");
        ApiError::Internal("Failed to create quiz".into())
    })?;

    metrics::record_write_operation("quiz", "create");
    audit(
        &audit_ctx,
        "create_quiz",
        &format!("quiz/{}", quiz.id),
        &format!("questions={} featured={}", quiz.questions.len(), quiz.featured),
        "success",
    );
    tracing::info!(id = %quiz.id, questions = quiz.questions.len(), "Quiz created");
    Ok((StatusCode::CREATED, Json(quiz)))
}

/// `DELETE /api/quizzes/:id`
pub async fn delete_quiz(
    State(state): State<AppState>,
    audit_ctx: Option<Extension<AuditContext>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Some(uuid) = parse_id(&id) else {
        return Err(ApiError::NotFound("Quiz not found".into()));
    };
    let deleted = state.store.delete_quiz(&uuid).map_err(|e| {
        tracing::error!("Quiz write failed: {}", e);
        ApiError::Internal("Failed to delete quiz".into())
    })?;
    if !deleted {
        return Err(ApiError::NotFound("Quiz not found".into()));
    }

    metrics::record_write_operation("quiz", "delete");
    audit(&audit_ctx, "delete_quiz", &format!("quiz/{}", uuid), "", "success");
    tracing::info!(id = %uuid, "Quiz deleted");
    Ok(Json(MessageResponse {
        message: "Quiz deleted successfully".to_string(),
    }))
}

/// `POST /api/quizzes/:id/grade`
pub async fn grade_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<QuizGrade>, ApiError> {
    let quiz = parse_id(&id)
        .and_then(|id| state.store.get_quiz(&id))
        .ok_or_else(|| ApiError::NotFound("Quiz not found".into()))?;
    let req: GradeRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid grading data: {}", e)))?;
    Ok(Json(quiz.grade(&req.answers)))
}

// ── Admin ──────────────────────────────────────────────────────────────

/// `POST /api/admin/login`
///
/// No admin account is ever stored, so every well-formed attempt ends in 401.
pub async fn admin_login(
    State(state): State<AppState>,
    audit_ctx: Option<Extension<AuditContext>>,
    body: Bytes,
) -> Result<Json<LoginResponse>, ApiError> {
    // A body that is not a JSON object carries no credentials.
    let req: LoginRequest = serde_json::from_slice(&body).unwrap_or_default();
    let Some((username, password)) = req.credentials() else {
        metrics::record_login_attempt("rejected");
        return Err(ApiError::BadRequest(
            "Username and password are required".into(),
        ));
    };

    let actor = match username.as_str() {
        Some(name) => mask_identity(name),
        None => mask_identity(&username.to_string()),
    };
    let ctx = audit_ctx.map(|Extension(ctx)| Extension(ctx.with_actor(actor)));

    // Non-string credentials name no account and fall through to 401.
    let authorized = match (username.as_str(), password.as_str()) {
        (Some(username), Some(password)) => {
            state.store.user_by_username(username).filter(|user| {
                user.password
                    .as_bytes()
                    .ct_eq(password.as_bytes())
                    .into()
            })
        }
        _ => None,
    };
    let Some(user) = authorized else {
        metrics::record_login_attempt("denied");
        audit(&ctx, "admin_login", "admin", "", "denied");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    };

    metrics::record_login_attempt("success");
    audit(&ctx, "admin_login", "admin", "", "success");
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: UserView::from(&user),
    }))
}
