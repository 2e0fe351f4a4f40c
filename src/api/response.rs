//! Response types for the SplitBill API.
//!
//! This module defines the success bodies and the error response structures
//! for the HTTP API, including the mapping from engine errors to status codes.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, ValidationError};
use crate::models::SplitAllocation;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response for a request that is well-formed JSON but incomplete.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        let code = match &error {
            ValidationError::InvalidAmount { .. } => "INVALID_AMOUNT",
            ValidationError::NoParticipants => "NO_PARTICIPANTS",
            ValidationError::SplitExceedsTotal { .. } => "SPLIT_EXCEEDS_TOTAL",
            ValidationError::SplitBelowTotal { .. } => "SPLIT_BELOW_TOTAL",
            ValidationError::MissingParticipant { .. } => "MISSING_PARTICIPANT",
            ValidationError::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            ValidationError::SplitMismatch { .. } => "SPLIT_MISMATCH",
        };
        ApiErrorResponse {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: ApiError::new(code, error.to_string()),
        }
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Validation(err) => err.into(),
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    error.to_string(),
                ),
            },
            EngineError::GroupNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("GROUP_NOT_FOUND", error.to_string()),
            },
            EngineError::ExpenseNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EXPENSE_NOT_FOUND", error.to_string()),
            },
            EngineError::NotAGroupMember { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("NOT_A_GROUP_MEMBER", error.to_string()),
            },
            EngineError::DeleteNotPermitted { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::with_details(
                    "DELETE_NOT_PERMITTED",
                    error.to_string(),
                    "Only the participant who paid may delete an expense",
                ),
            },
            EngineError::StoreUnavailable { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STORE_UNAVAILABLE",
                    "Expense store unavailable",
                    error.to_string(),
                ),
            },
        }
    }
}

/// Body returned by `POST /api/splits/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitPreviewResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the allocation.
    pub engine_version: String,
    /// The computed split and its audit steps.
    pub allocation: SplitAllocation,
}

impl SplitPreviewResponse {
    /// Wraps an allocation with a fresh calculation id and timestamp.
    pub fn new(allocation: SplitAllocation) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            allocation,
        }
    }
}

/// Body returned by `POST /api/splits/validate` when the split is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateSplitResponse {
    /// Always true; rejected splits produce an error body instead.
    pub valid: bool,
}

/// Body returned by `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_validation_errors_map_to_422_with_codes() {
        let cases = vec![
            (
                ValidationError::InvalidAmount {
                    input: "x".to_string(),
                },
                "INVALID_AMOUNT",
            ),
            (ValidationError::NoParticipants, "NO_PARTICIPANTS"),
            (
                ValidationError::SplitExceedsTotal {
                    total: Decimal::new(5000, 2),
                    allocated: Decimal::new(6000, 2),
                },
                "SPLIT_EXCEEDS_TOTAL",
            ),
            (
                ValidationError::SplitBelowTotal {
                    total: Decimal::new(5000, 2),
                    allocated: Decimal::new(4000, 2),
                },
                "SPLIT_BELOW_TOTAL",
            ),
            (
                ValidationError::MissingParticipant {
                    missing: vec!["c".to_string()],
                    unexpected: vec![],
                    duplicated: vec![],
                },
                "MISSING_PARTICIPANT",
            ),
            (
                ValidationError::NegativeAmount {
                    participant_id: "b".to_string(),
                    amount: Decimal::new(-100, 2),
                },
                "NEGATIVE_AMOUNT",
            ),
            (
                ValidationError::SplitMismatch {
                    total: Decimal::new(10000, 2),
                    sum: Decimal::new(9998, 2),
                },
                "SPLIT_MISMATCH",
            ),
        ];

        for (error, code) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_wrapped_validation_error_keeps_its_code() {
        let engine_error: EngineError = ValidationError::NoParticipants.into();
        let response: ApiErrorResponse = engine_error.into();
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "NO_PARTICIPANTS");
    }

    #[test]
    fn test_engine_errors_map_to_status() {
        let not_found: ApiErrorResponse = EngineError::GroupNotFound {
            group_id: "g".to_string(),
        }
        .into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.error.code, "GROUP_NOT_FOUND");

        let forbidden: ApiErrorResponse = EngineError::DeleteNotPermitted {
            expense_id: "e".to_string(),
            participant_id: "bob".to_string(),
        }
        .into();
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

        let unavailable: ApiErrorResponse = EngineError::StoreUnavailable {
            message: "poisoned".to_string(),
        }
        .into();
        assert_eq!(unavailable.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
