//! Response types for the Cap Table Engine API.
//!
//! This module defines the success envelope, the error response structures
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::CapTableResult;

/// Success envelope for the `/compute` endpoint.
///
/// Wraps the deterministic engine result with per-request metadata; the
/// wall-clock fields live here, not on the engine result, so identical
/// inputs still produce bit-identical engine outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeResponse {
    /// Unique identifier for this computation.
    pub calculation_id: Uuid,
    /// When the computation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the computation.
    pub engine_version: String,
    /// The cap table computation result.
    pub result: CapTableResult,
}

impl ComputeResponse {
    /// Wraps an engine result with fresh request metadata.
    pub fn new(result: CapTableResult) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            result,
        }
    }
}

/// Response body for the `/scenarios` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioListResponse {
    /// The names of the preloaded scenarios, sorted.
    pub scenarios: Vec<String>,
}

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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidRound {
                round,
                field,
                message,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_ROUND",
                    format!("Invalid round '{}': field '{}' {}", round, field, message),
                    "The round data contains invalid financial inputs",
                ),
            },
            EngineError::InvalidCompany { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_COMPANY",
                    format!("Invalid company field '{}': {}", field, message),
                    "The company data contains invalid information",
                ),
            },
            EngineError::FounderNotFound { name, round } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "FOUNDER_NOT_FOUND",
                    format!("Founder not found: '{}'", name),
                    format!("Round '{}' references a founder that does not exist", round),
                ),
            },
            EngineError::SafeConversion { round, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "SAFE_CONVERSION_ERROR",
                    format!("SAFE conversion failed for round '{}'", round),
                    message,
                ),
            },
            EngineError::Arithmetic {
                round,
                stage,
                message,
            } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "ARITHMETIC_ERROR",
                    format!("Arithmetic error in round '{}' at stage {}", round, stage),
                    message,
                ),
            },
            EngineError::Calculation { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CALCULATION_ERROR",
                    "Calculation failed",
                    message,
                ),
            },
            EngineError::ScenarioNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "SCENARIO_ERROR",
                    "Scenario error",
                    format!("Scenario file not found: {}", path),
                ),
            },
            EngineError::ScenarioParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "SCENARIO_ERROR",
                    "Scenario parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}
