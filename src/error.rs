//! @ai:module:intent Define error types for the telemetry API
//! @ai:module:layer domain
//! @ai:module:public_api ApiError, ValidationErrors, Result
//! @ai:module:stateless true

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// @ai:intent Field name to messages mapping for rejected payloads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// @ai:intent Create an empty error set
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Record a message against a field
    /// @ai:effects state:write
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// @ai:intent Messages recorded for a field
    /// @ai:effects pure
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// @ai:intent Names of all fields with errors
    /// @ai:effects pure
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// @ai:intent Convert into a result, failing when any field was rejected
    /// @ai:effects pure
    pub fn into_result<T>(self, value: T) -> Result<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// @ai:intent Unified error type for store, aggregation and HTTP operations
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid payload: {0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    MissingParameter(String),

    #[error("Not found.")]
    NotFound,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Request could not be decoded at all
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: StatusCode::BAD_REQUEST,
            detail: rejection.body_text(),
        }
    }
}

// Ids are numeric, so an id that does not parse names no record.
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::NotFound
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::StoreUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::StoreUnavailable(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for ApiError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        ApiError::StoreUnavailable("store call timed out".to_string())
    }
}

impl ApiError {
    /// @ai:intent HTTP status for this error
    /// @ai:effects pure
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::Validation(errors) => (status, Json(errors)).into_response(),
            ApiError::MissingParameter(message) => {
                (status, Json(serde_json::json!({ "error": message }))).into_response()
            }
            ApiError::NotFound => {
                (status, Json(serde_json::json!({ "detail": "Not found." }))).into_response()
            }
            ApiError::StoreUnavailable(message) => {
                tracing::error!(error = %message, "store unavailable");
                (status, Json(serde_json::json!({ "error": message }))).into_response()
            }
            ApiError::Rejected { detail, .. } => {
                (status, Json(serde_json::json!({ "detail": detail }))).into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collect_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("array_size", "This field is required.");
        errors.add("swaps", "A valid integer is required.");
        errors.add("swaps", "Ensure this value is greater than or equal to 0.");

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["array_size", "swaps"]);
        assert_eq!(errors.field("swaps").unwrap().len(), 2);

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["array_size"][0], "This field is required.");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(7).unwrap(), 7);

        let mut errors = ValidationErrors::new();
        errors.add("name", "This field may not be blank.");
        assert!(matches!(errors.into_result(()), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MissingParameter("Type parameter is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::StoreUnavailable("down".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Rejected {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                detail: "Expected request with `Content-Type: application/json`".into(),
            }
            .status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }
}
