use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::db::QueryResult;
use crate::llm::TranslateError;
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub question: String,
    /// The generated SQL, echoed back for transparency.
    pub sql: String,
    #[serde(flatten)]
    pub result: QueryResult,
}

#[derive(Debug, Deserialize)]
pub struct ExecuteQueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: i64,
}

/// Full pipeline: normalize → translate → execute. Operator diagnostics go
/// to the log; the caller only sees the per-kind guidance message.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    info!("NL question: {}", payload.question);

    let sql = state.translator.translate(&payload.question).await.map_err(|e| {
        error!("Translation failed: {}", e);
        translate_error_response(&e)
    })?;

    let result = state.executor.execute(&sql).await.map_err(|e| {
        error!("Query execution failed: {}", e);
        (
            StatusCode::BAD_REQUEST,
            format!("Database error: {}", e.message),
        )
    })?;

    Ok(Json(AskResponse {
        question: payload.question,
        sql,
        result,
    }))
}

/// Raw SQL passthrough, bypassing the translator.
pub async fn execute_query(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExecuteQueryRequest>,
) -> Result<Json<QueryResult>, (StatusCode, String)> {
    info!("Executing SQL query: {}", payload.query);

    let result = state.executor.execute(&payload.query).await.map_err(|e| {
        error!("Query execution failed: {}", e);
        (
            StatusCode::BAD_REQUEST,
            format!("Database error: {}", e.message),
        )
    })?;

    Ok(Json(result))
}

pub async fn system_status(State(state): State<Arc<AppState>>) -> Json<SystemStatus> {
    let uptime = chrono::Utc::now() - state.startup_time;
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime.num_seconds(),
    })
}

/// One distinct user-facing message per failure kind, so the display
/// surface can give different guidance for a timeout versus a bad payload.
fn translate_error_response(err: &TranslateError) -> (StatusCode, String) {
    match err {
        TranslateError::Timeout(_) => (
            StatusCode::GATEWAY_TIMEOUT,
            "The AI server took too long to respond. Please try again shortly.".to_string(),
        ),
        TranslateError::Unreachable(_) => (
            StatusCode::BAD_GATEWAY,
            "Cannot reach the AI server. Check your internet or AI endpoint.".to_string(),
        ),
        TranslateError::UpstreamStatus(_, _) => (
            StatusCode::BAD_GATEWAY,
            "The AI server returned an error. Please try again later.".to_string(),
        ),
        TranslateError::InvalidResponse(_) => (
            StatusCode::BAD_GATEWAY,
            "The AI returned an unexpected response. Try rephrasing your question.".to_string(),
        ),
        TranslateError::ConfigError(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "The translator is not configured. Contact the operator.".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_error_kind_gets_a_distinct_message() {
        let errors = [
            TranslateError::Timeout("deadline".into()),
            TranslateError::Unreachable("refused".into()),
            TranslateError::UpstreamStatus(503, "busy".into()),
            TranslateError::InvalidResponse("no choices".into()),
            TranslateError::ConfigError("no key".into()),
        ];

        let messages: Vec<String> = errors
            .iter()
            .map(|e| translate_error_response(e).1)
            .collect();

        for (i, msg) in messages.iter().enumerate() {
            for other in &messages[i + 1..] {
                assert_ne!(msg, other);
            }
        }
    }

    #[test]
    fn test_timeout_maps_to_gateway_timeout() {
        let (status, msg) = translate_error_response(&TranslateError::Timeout("30s".into()));
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert!(msg.contains("too long"));
    }

    #[test]
    fn test_diagnostic_detail_never_reaches_the_user() {
        let (_, msg) = translate_error_response(&TranslateError::UpstreamStatus(
            500,
            "stack trace with internals".into(),
        ));
        assert!(!msg.contains("stack trace"));
    }
}
