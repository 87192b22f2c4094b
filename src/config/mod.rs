//! Scenario configuration for the Cap Table Engine.
//!
//! Scenarios — a company, its founders, the funding round sequence and a
//! target exit value — can be kept on disk as YAML files and loaded here
//! for the API layer, integration tests and benchmarks.

mod loader;
mod types;

pub use loader::{ScenarioLibrary, load_scenario};
pub use types::Scenario;
