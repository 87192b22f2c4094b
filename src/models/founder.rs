//! Founder model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a founder holding shares in the company.
///
/// A founder's nominal share count is not altered by dilution (dilution is a
/// relative effect of the growing denominator); only an explicit secondary
/// sale moves shares out of a founder's balance, and that adjustment happens
/// on the engine's own working copy, never on this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Founder {
    /// The founder's name, unique within a scenario.
    pub name: String,
    /// Shares held (non-negative integer).
    pub shares: u64,
    /// Ownership percentage at the time the founder was recorded.
    ///
    /// Informational only; drifts from the computed current ownership as
    /// rounds are applied.
    #[serde(default)]
    pub initial_ownership_percent: Option<Decimal>,
}
