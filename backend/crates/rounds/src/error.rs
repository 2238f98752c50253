//! Rounds Error Types
//!
//! This module provides rounds-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Client-facing message for rejected credentials. Shared by the
/// unknown-email and wrong-password paths.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Correo o contraseña incorrectos";

/// Client-facing message for date/time parse failures
pub const INVALID_FORMAT_MESSAGE: &str = "Formato de fecha inválido";

/// Client-facing message for unusable coordinates
pub const INVALID_COORDINATE_MESSAGE: &str = "Coordenada inválida";

/// Client-facing message for every 5xx
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Rounds-specific result type alias
pub type RoundsResult<T> = Result<T, RoundsError>;

/// Rounds-specific error variants
#[derive(Debug, Error)]
pub enum RoundsError {
    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Id-based lookup miss
    #[error("{0} not found")]
    NotFound(String),

    /// Date/time string that doesn't match its expected format
    #[error("Invalid date/time format: {0}")]
    InvalidFormat(String),

    /// Non-finite or out-of-range latitude/longitude
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RoundsError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RoundsError::InvalidCredentials => ErrorKind::Unauthorized,
            RoundsError::NotFound(_) => ErrorKind::NotFound,
            RoundsError::InvalidFormat(_) | RoundsError::InvalidCoordinate(_) => {
                ErrorKind::BadRequest
            }
            RoundsError::Database(_) | RoundsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message safe to show the client
    pub fn client_message(&self) -> String {
        match self {
            RoundsError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            RoundsError::NotFound(what) => format!("{} no encontrada", what),
            RoundsError::InvalidFormat(_) => INVALID_FORMAT_MESSAGE.to_string(),
            RoundsError::InvalidCoordinate(_) => INVALID_COORDINATE_MESSAGE.to_string(),
            RoundsError::Database(_) | RoundsError::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.client_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            RoundsError::Database(e) => {
                tracing::error!(error = %e, "Rounds database error");
            }
            RoundsError::Internal(msg) => {
                tracing::error!(message = %msg, "Rounds internal error");
            }
            RoundsError::InvalidCredentials => {
                // Cause already logged by the login use case
                tracing::debug!("Rejected login");
            }
            RoundsError::InvalidFormat(detail) => {
                tracing::warn!(detail = %detail, "Rejected malformed date/time");
            }
            RoundsError::InvalidCoordinate(detail) => {
                tracing::warn!(detail = %detail, "Rejected coordinate");
            }
            RoundsError::NotFound(_) => {
                tracing::debug!(error = %self, "Rounds lookup miss");
            }
        }
    }
}

impl IntoResponse for RoundsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<tokio::task::JoinError> for RoundsError {
    fn from(err: tokio::task::JoinError) -> Self {
        RoundsError::Internal(format!("Blocking task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(RoundsError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(RoundsError::NotFound("Ronda".into()).kind().status_code(), 404);
        assert_eq!(RoundsError::InvalidFormat("x".into()).kind().status_code(), 400);
        assert_eq!(RoundsError::InvalidCoordinate("x".into()).kind().status_code(), 400);
        assert_eq!(RoundsError::Internal("x".into()).kind().status_code(), 500);
        assert_eq!(
            RoundsError::Database(sqlx::Error::PoolTimedOut).kind().status_code(),
            500
        );
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let err = RoundsError::Internal("connection reset by peer".into()).to_app_error();
        assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);

        let err = RoundsError::Database(sqlx::Error::PoolClosed).to_app_error();
        assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(
            RoundsError::InvalidCredentials.client_message(),
            "Correo o contraseña incorrectos"
        );
        assert_eq!(
            RoundsError::InvalidFormat("date \"03-11-2025\"".into()).client_message(),
            "Formato de fecha inválido"
        );
        assert_eq!(
            RoundsError::InvalidCoordinate("latitude 123.4".into()).client_message(),
            "Coordenada inválida"
        );
        assert_eq!(
            RoundsError::NotFound("Ronda".into()).client_message(),
            "Ronda no encontrada"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = RoundsError::InvalidFormat("bad".into()).into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
