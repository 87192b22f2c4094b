//! HTTP API for the Cap Table Engine.
//!
//! A thin axum layer over the calculation pipeline; it owns no computation.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CompanyRequest, ComputeRequest, FounderRequest, RoundRequest};
pub use response::{ApiError, ApiErrorResponse, ComputeResponse, ScenarioListResponse};
pub use state::AppState;
