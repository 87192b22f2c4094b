//! Error types for the Cap Table Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during cap table computation.

use std::fmt;

use thiserror::Error;

/// The accumulation stage at which an arithmetic failure occurred.
///
/// Named in [`EngineError::Arithmetic`] so a failure can be traced back to
/// the exact share-issuance effect that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Share issuance for a priced round.
    PricedIssuance,
    /// SAFE conversion at its trigger event.
    SafeConversion,
    /// ESOP pool expansion attached to a round.
    EsopAdjustment,
    /// Founder-to-investor share transfer.
    SecondarySale,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::PricedIssuance => "priced-issuance",
            Stage::SafeConversion => "safe-conversion",
            Stage::EsopAdjustment => "esop-adjustment",
            Stage::SecondarySale => "secondary-sale",
        };
        f.write_str(name)
    }
}

/// The main error type for the Cap Table Engine.
///
/// All hard failures abort the whole computation (fail-closed); partial
/// totals are never returned. Over-allocation is deliberately *not* an
/// error — it is reported as a warning on successful results.
///
/// # Example
///
/// ```
/// use captable_engine::error::EngineError;
///
/// let error = EngineError::InvalidRound {
///     round: "Series A".to_string(),
///     field: "investment_amount".to_string(),
///     message: "must be positive".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid round 'Series A': field 'investment_amount' must be positive"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A round carried malformed or non-positive financial inputs.
    #[error("Invalid round '{round}': field '{field}' {message}")]
    InvalidRound {
        /// The name of the offending round.
        round: String,
        /// The field that failed validation.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A SAFE's conversion trigger could not be resolved against the
    /// supplied round sequence.
    #[error("SAFE conversion failed for round '{round}': {message}")]
    SafeConversion {
        /// The name of the SAFE round.
        round: String,
        /// A description of why the trigger could not be resolved.
        message: String,
    },

    /// An intermediate value was non-finite, negative where a share count
    /// is required, or overflowed Decimal range.
    #[error("Arithmetic error in round '{round}' at stage {stage}: {message}")]
    Arithmetic {
        /// The round being processed when the failure occurred.
        round: String,
        /// The accumulation stage that produced the failure.
        stage: Stage,
        /// A description of the failed operation.
        message: String,
    },

    /// The company record carried malformed or non-positive inputs.
    #[error("Invalid company field '{field}': {message}")]
    InvalidCompany {
        /// The field that failed validation.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A founder named by a secondary sale does not exist in the input set.
    #[error("Founder not found: '{name}' (referenced by round '{round}')")]
    FounderNotFound {
        /// The founder name that could not be resolved.
        name: String,
        /// The round whose secondary sale referenced the founder.
        round: String,
    },

    /// A general calculation error occurred outside round accumulation.
    #[error("Calculation error: {message}")]
    Calculation {
        /// A description of the calculation error.
        message: String,
    },

    /// Scenario file was not found at the specified path.
    #[error("Scenario file not found: {path}")]
    ScenarioNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Scenario file could not be parsed.
    #[error("Failed to parse scenario file '{path}': {message}")]
    ScenarioParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
