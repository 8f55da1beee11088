//! Axum-specific error types and mappings.
//!
//! This module provides the error type for the Axum adapter and mappings
//! from `CoreError` and its layers to HTTP status codes and response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use petpal_core::map::MapSessionError;
use petpal_core::{CoreError, GatewayError, RegistryError};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Conflict with the current state (duplicate id, unmounted map).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Service unavailable (e.g., the AI gateway is down).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(msg) => {
                tracing::error!(target: "petpal.http", error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Registry(e) => e.into(),
            CoreError::Map(e) => e.into(),
            CoreError::Gateway(e) => e.into(),
            CoreError::Settings(e) => Self::BadRequest(e.to_string()),
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::NotFound(msg) => Self::NotFound(msg),
            CoreError::Configuration(msg) => Self::Internal(format!("Config: {msg}")),
        }
    }
}

impl From<RegistryError> for HttpError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(_) => Self::NotFound(err.to_string()),
            RegistryError::Duplicate(_) => Self::Conflict(err.to_string()),
            RegistryError::InvalidDraft(e) => Self::BadRequest(e.to_string()),
            RegistryError::Empty => Self::Internal(err.to_string()),
        }
    }
}

impl From<MapSessionError> for HttpError {
    fn from(err: MapSessionError) -> Self {
        match err {
            MapSessionError::CategoryUnavailable { .. } | MapSessionError::InvalidCoordinate(_) => {
                Self::BadRequest(err.to_string())
            }
            MapSessionError::FacilityNotFound(_) => Self::NotFound(err.to_string()),
            MapSessionError::Released => Self::Conflict(err.to_string()),
        }
    }
}

impl From<GatewayError> for HttpError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Configuration { message } => Self::Internal(message),
            other => Self::ServiceUnavailable(other.to_string()),
        }
    }
}
