//! Application state for the Cap Table Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ScenarioLibrary;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the preloaded scenario library.
#[derive(Clone)]
pub struct AppState {
    /// Scenarios available through the listing endpoint.
    scenarios: Arc<ScenarioLibrary>,
}

impl AppState {
    /// Creates a new application state with the given scenario library.
    pub fn new(scenarios: ScenarioLibrary) -> Self {
        Self {
            scenarios: Arc::new(scenarios),
        }
    }

    /// Returns a reference to the scenario library.
    pub fn scenarios(&self) -> &ScenarioLibrary {
        &self.scenarios
    }
}
