//! Calculation pipeline for the Cap Table Engine.
//!
//! Three stages, each a pure transform over in-memory data: round
//! normalization, sequential capitalization accumulation, and ownership/exit
//! projection. [`compute_cap_table`] runs the whole pipeline. No stage
//! retains state between invocations; recomputing from scratch is the only
//! update mechanism.

mod accumulate;
mod normalize;
mod project;
mod safe_conversion;
mod validate;

pub use accumulate::{Accumulation, FounderHolding, RoundHolding, accumulate};
pub use normalize::{NormalizedPricedRound, NormalizedRound, normalize, normalize_priced};
pub use project::{Projection, project};
pub use safe_conversion::{SafeConversionOutcome, convert_safe};

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{CapTableResult, Company, Founder, FundingRound};

/// Computes the full cap table: accumulated totals, ownership breakdown and
/// exit projection.
///
/// The single entry point consumed by the application layer. Inputs are
/// plain records and are never mutated; rounds are processed in ascending
/// `order` with ties preserving input order. Hard failures return a typed
/// [`crate::error::EngineError`]; warnings ride on the successful result.
///
/// # Examples
///
/// ```
/// use captable_engine::calculation::compute_cap_table;
/// use captable_engine::models::{Company, Founder};
/// use rust_decimal::Decimal;
///
/// let company = Company {
///     name: "Acme".to_string(),
///     total_shares: 10_000_000,
///     valuation: None,
///     esop_pool_percent: Decimal::new(10, 0),
/// };
/// let founders = vec![Founder {
///     name: "alice".to_string(),
///     shares: 9_000_000,
///     initial_ownership_percent: None,
/// }];
///
/// let result =
///     compute_cap_table(&company, &founders, &[], Decimal::new(10_000_000, 0)).unwrap();
/// assert_eq!(result.breakdown.founders[0].ownership_percent, Decimal::new(90, 0));
/// ```
pub fn compute_cap_table(
    company: &Company,
    founders: &[Founder],
    rounds: &[FundingRound],
    exit_value: Decimal,
) -> EngineResult<CapTableResult> {
    let acc = accumulate(company, founders, rounds, Some(exit_value))?;
    let projection = project(&acc, exit_value)?;

    Ok(CapTableResult {
        current_valuation: acc.current_valuation,
        total_shares: acc.total_shares,
        breakdown: projection.breakdown,
        exit: projection.exit,
        unconverted_safes: acc.unconverted_safes,
        warnings: projection.warnings,
    })
}
