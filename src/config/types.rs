//! Scenario file types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Company, Founder, FundingRound};

/// A complete worked scenario: everything one pipeline run needs.
///
/// # Example
///
/// ```
/// use captable_engine::config::Scenario;
///
/// let yaml = r#"
/// name: demo
/// company:
///   name: Acme
///   total_shares: 10000000
///   esop_pool_percent: "10"
/// founders:
///   - name: alice
///     shares: 9000000
/// rounds: []
/// exit_value: "10000000"
/// "#;
/// let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(scenario.name, "demo");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// The scenario's name, unique within a library.
    pub name: String,
    /// The company snapshot.
    pub company: Company,
    /// The founders.
    pub founders: Vec<Founder>,
    /// The funding round sequence.
    #[serde(default)]
    pub rounds: Vec<FundingRound>,
    /// The target exit value to project against.
    pub exit_value: Decimal,
}
