//! Scenario loading functionality.
//!
//! Loads [`Scenario`] definitions from YAML files, either one at a time or
//! as a whole directory forming a named library.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::Scenario;

/// Loads a single scenario from a YAML file.
///
/// # Errors
///
/// Returns [`EngineError::ScenarioNotFound`] when the file cannot be read
/// and [`EngineError::ScenarioParseError`] when it is not valid scenario
/// YAML.
///
/// # Example
///
/// ```no_run
/// use captable_engine::config::load_scenario;
///
/// let scenario = load_scenario("./scenarios/demo.yaml")?;
/// println!("loaded scenario '{}'", scenario.name);
/// # Ok::<(), captable_engine::error::EngineError>(())
/// ```
pub fn load_scenario<P: AsRef<Path>>(path: P) -> EngineResult<Scenario> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ScenarioNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ScenarioParseError {
        path: path_str,
        message: e.to_string(),
    })
}

/// A named collection of scenarios loaded from a directory.
///
/// Every `.yaml` file in the directory is loaded and keyed by its
/// scenario `name` field; names are kept sorted for deterministic listing.
#[derive(Debug, Clone, Default)]
pub struct ScenarioLibrary {
    scenarios: BTreeMap<String, Scenario>,
}

impl ScenarioLibrary {
    /// Loads every `.yaml` scenario in the directory.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ScenarioNotFound`] when the directory cannot
    /// be read, and propagates any per-file load error.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> EngineResult<Self> {
        let dir = dir.as_ref();
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ScenarioNotFound {
            path: dir_str.clone(),
        })?;

        let mut scenarios = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ScenarioNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let scenario = load_scenario(&path)?;
                scenarios.insert(scenario.name.clone(), scenario);
            }
        }

        Ok(Self { scenarios })
    }

    /// Builds a library from already-parsed scenarios.
    pub fn from_scenarios(items: impl IntoIterator<Item = Scenario>) -> Self {
        Self {
            scenarios: items
                .into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
        }
    }

    /// Looks up a scenario by name.
    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.get(name)
    }

    /// The scenario names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.scenarios.keys().cloned().collect()
    }

    /// Number of scenarios in the library.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// True when the library holds no scenarios.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
