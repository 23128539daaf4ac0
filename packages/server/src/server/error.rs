//! HTTP error type shared by every handler.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Request,
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use llm_client::LlmError;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::common::{DomainError, FieldError};

/// Error chain of a 500 response, carried as a response extension.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("AI service not configured")]
    LlmNotConfigured,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::LlmNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Llm(LlmError::Config(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Llm(LlmError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Llm(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(e) if is_unique_violation(e) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::Validation(details) => json!({
                "error": "Validation failed",
                "message": "Invalid request data",
                "details": details,
            }),
            ApiError::BadRequest(message) => json!({
                "error": "Bad Request",
                "message": message,
            }),
            ApiError::NotFound(message) => json!({
                "error": "Not Found",
                "message": message,
            }),
            ApiError::LlmNotConfigured => json!({
                "error": "AI service not configured",
                "message": "Please configure API keys for Gemini or OpenAI",
            }),
            ApiError::Llm(LlmError::Config(_)) => json!({
                "error": "Service Unavailable",
                "message": "AI service configuration error",
            }),
            ApiError::Llm(LlmError::Timeout(_)) => json!({
                "error": "Gateway Timeout",
                "message": "AI service request timed out",
            }),
            ApiError::Llm(_) => json!({
                "error": "Bad Gateway",
                "message": "AI service request failed",
            }),
            ApiError::Database(e) if is_unique_violation(e) => json!({
                "error": "Duplicate Entry",
                "message": "Record already exists",
            }),
            ApiError::Database(_) | ApiError::Internal(_) => internal_error_body(),
        }
    }

    fn debug_detail(&self) -> String {
        match self {
            ApiError::Internal(e) => format!("{:#}", e),
            other => other.to_string(),
        }
    }
}

fn internal_error_body() -> Value {
    json!({
        "error": "Internal Server Error",
        "message": "Internal Server Error",
    })
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self.debug_detail(), "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        let mut response = (status, Json(self.body())).into_response();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            response
                .extensions_mut()
                .insert(ErrorDetail(self.debug_detail()));
        }
        response
    }
}

/// Development-only middleware: add the error chain to 500 bodies under
/// `"debug"`.
pub async fn attach_debug_detail(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let Some(ErrorDetail(detail)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let mut body = internal_error_body();
    body["debug"] = Value::String(detail);
    (response.status(), Json(body)).into_response()
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<DomainError>() {
            Ok(DomainError::NotFound(message)) => return ApiError::NotFound(message),
            Ok(DomainError::LlmNotConfigured) => return ApiError::LlmNotConfigured,
            Err(err) => err,
        };
        let err = match err.downcast::<LlmError>() {
            Ok(llm) => return ApiError::Llm(llm),
            Err(err) => err,
        };
        match err.downcast::<sqlx::Error>() {
            Ok(db) => ApiError::Database(db),
            Err(err) => ApiError::Internal(err),
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(details: Vec<FieldError>) -> Self {
        ApiError::Validation(details)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
