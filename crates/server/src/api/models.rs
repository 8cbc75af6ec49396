//! Request and response data transfer objects for the REST API.
//!
//! Chapter and quiz bodies are the core content types themselves; this module
//! only holds the shapes that exist at the HTTP boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use studymitra_core::content::UserView;

/// Request body for `POST /api/admin/login`.
///
/// Fields are untyped so a credential of the wrong type still counts as
/// present. It just cannot match any account.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Value,
    #[serde(default)]
    pub password: Value,
}

impl LoginRequest {
    /// Both credentials, or `None` if either is blank.
    ///
    /// Blank means absent, `null`, `""`, `false` or `0`.
    pub fn credentials(&self) -> Option<(&Value, &Value)> {
        match (is_blank(&self.username), is_blank(&self.password)) {
            (false, false) => Some((&self.username, &self.password)),
            _ => None,
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserView,
}

/// Request body for `POST /api/quizzes/:id/grade`.
#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    /// Selected option index per question; `null` for unanswered.
    pub answers: Vec<Option<i64>>,
}

/// Generic success message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub chapters: usize,
    pub quizzes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn login(body: Value) -> LoginRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_credentials_present() {
        let req = login(json!({"username": "admin", "password": "secret"}));
        let (u, p) = req.credentials().unwrap();
        assert_eq!(u, "admin");
        assert_eq!(p, "secret");
    }

    #[test]
    fn test_non_string_credential_counts_as_present() {
        let req = login(json!({"username": "admin", "password": 12345}));
        assert!(req.credentials().is_some());
    }

    #[test]
    fn test_blank_credentials() {
        for body in [
            json!({"username": "admin"}),
            json!({"username": null, "password": "x"}),
            json!({"username": "", "password": "x"}),
            json!({"username": "admin", "password": false}),
            json!({"username": "admin", "password": 0}),
            json!({}),
        ] {
            assert!(login(body.clone()).credentials().is_none(), "{body}");
        }
        assert!(LoginRequest::default().credentials().is_none());
    }
}
