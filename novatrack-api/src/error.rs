/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the
/// appropriate status code.
///
/// # Taxonomy
///
/// - `BadRequest` (400): malformed input, e.g. a malformed ticket id
/// - `ValidationError` (400): field-level failures, details returned
/// - `Conflict` (400): duplicate unique key (registration email)
/// - `Unauthorized` (401): missing/invalid session or rejected credentials
/// - `NotFound` (404): id does not resolve to a record
/// - `InternalError` (500): unexpected persistence/runtime failure; detail
///   is logged server-side and never returned to the client

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use novatrack_shared::validation::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Field-level validation failures (400)
    ValidationError(Vec<FieldError>),

    /// Duplicate unique key (400)
    Conflict(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404)
    NotFound(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional field-level validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::ValidationError(errors) => (
                // The product contract pins validation failures to 400.
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Datos inválidos".to_string(),
                Some(errors),
            ),
            ApiError::Conflict(msg) => (
                // Duplicate unique keys are also surfaced as 400.
                StatusCode::BAD_REQUEST,
                "conflict",
                msg,
                None,
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Ocurrió un error interno".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Registro no encontrado".to_string()),
            sqlx::Error::Database(db_err) => {
                // Unique constraint violations surface as conflicts.
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict(
                            "Este correo electrónico ya está registrado".to_string(),
                        );
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert session token errors to API errors
impl From<novatrack_shared::auth::jwt::JwtError> for ApiError {
    fn from(err: novatrack_shared::auth::jwt::JwtError) -> Self {
        match err {
            novatrack_shared::auth::jwt::JwtError::Expired => {
                ApiError::Unauthorized("La sesión expiró".to_string())
            }
            _ => ApiError::Unauthorized("Sesión inválida".to_string()),
        }
    }
}

/// Convert password errors to API errors
impl From<novatrack_shared::auth::password::PasswordError> for ApiError {
    fn from(err: novatrack_shared::auth::password::PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("ID inválido".to_string());
        assert_eq!(err.to_string(), "Bad request: ID inválido");

        let err = ApiError::NotFound("Novedad no encontrada".to_string());
        assert_eq!(err.to_string(), "Not found: Novedad no encontrada");
    }

    #[test]
    fn test_validation_error_display() {
        let errors = vec![
            FieldError::new("cedula", "La cédula solo debe contener números"),
            FieldError::new("celular", "El número de celular debe tener 10 dígitos"),
        ];

        let err = ApiError::ValidationError(errors);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = ApiError::ValidationError(vec![FieldError::new("correo", "inválido")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_maps_to_400() {
        let err = ApiError::Conflict("duplicado".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = ApiError::InternalError("connection refused to 10.0.0.5".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
