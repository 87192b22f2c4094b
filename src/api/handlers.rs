//! HTTP request handlers for the Cap Table Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_cap_table;
use crate::models::{Company, Founder, FundingRound};

use super::request::ComputeRequest;
use super::response::{ApiError, ApiErrorResponse, ComputeResponse, ScenarioListResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/compute", post(compute_handler))
        .route("/scenarios", get(scenarios_handler))
        .with_state(state)
}

/// Handler for POST /compute endpoint.
///
/// Accepts a compute request and returns the cap table result wrapped in a
/// metadata envelope.
async fn compute_handler(
    payload: Result<Json<ComputeRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compute request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // Convert request types to domain types
    let company: Company = request.company.into();
    let founders: Vec<Founder> = request.founders.into_iter().map(Into::into).collect();
    let rounds: Vec<FundingRound> = request.rounds.into_iter().map(Into::into).collect();

    match compute_cap_table(&company, &founders, &rounds, request.exit_value) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                company = %company.name,
                rounds_count = rounds.len(),
                total_shares = result.total_shares,
                current_valuation = %result.current_valuation,
                warnings = result.warnings.len(),
                "Computation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ComputeResponse::new(result)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Computation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for GET /scenarios endpoint.
///
/// Lists the names of the scenarios preloaded into the application state.
async fn scenarios_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = ScenarioListResponse {
        scenarios: state.scenarios().names(),
    };
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}
