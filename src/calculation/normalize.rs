//! Round normalization.
//!
//! Resolves a round's pre-money/post-money pair and, for priced rounds, the
//! price-per-share and shares issued. SAFE rounds pass through unresolved;
//! their conversion logic lives in [`super::safe_conversion`].

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult, Stage};
use crate::models::{FundingRound, PricedTerms, RoundKind, ValuationBasis};

use super::validate::{div, ensure_positive, floor_to_shares};

/// A priced round with its valuation pair and issuance resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPricedRound {
    /// Company valuation before the investment.
    pub pre_money: Decimal,
    /// Company valuation after the investment.
    pub post_money: Decimal,
    /// Pre-money valuation divided by shares outstanding before the round.
    pub price_per_share: Decimal,
    /// `floor(investment_amount / price_per_share)`.
    pub shares_issued: u64,
}

/// The outcome of normalizing a round of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRound {
    /// A priced round with issuance fully resolved.
    Priced(NormalizedPricedRound),
    /// A SAFE held in its unconverted state.
    Safe,
}

/// Normalizes a funding round against the current share count.
///
/// `shares_outstanding_before` is the running total supplied by the
/// accumulator, not a property of the round itself.
///
/// # Errors
///
/// Fails closed with [`EngineError::InvalidRound`] when the investment
/// amount or the resolved pre-money valuation is non-positive, or when no
/// shares are outstanding to price the round against.
pub fn normalize(
    round: &FundingRound,
    shares_outstanding_before: u64,
) -> EngineResult<NormalizedRound> {
    match &round.kind {
        RoundKind::Priced(terms) => Ok(NormalizedRound::Priced(normalize_priced(
            &round.name,
            terms,
            shares_outstanding_before,
        )?)),
        RoundKind::Safe(_) => Ok(NormalizedRound::Safe),
    }
}

/// Normalizes a priced round: resolves the valuation pair and issuance.
pub fn normalize_priced(
    round_name: &str,
    terms: &PricedTerms,
    shares_outstanding_before: u64,
) -> EngineResult<NormalizedPricedRound> {
    ensure_positive(terms.investment_amount, round_name, "investment_amount")?;

    let (pre_money, post_money) = match terms.valuation_basis {
        ValuationBasis::PreMoney => {
            ensure_positive(terms.valuation, round_name, "valuation")?;
            (terms.valuation, terms.valuation + terms.investment_amount)
        }
        ValuationBasis::PostMoney => {
            let pre = terms.valuation - terms.investment_amount;
            ensure_positive(pre, round_name, "pre_money")?;
            (pre, terms.valuation)
        }
    };

    if shares_outstanding_before == 0 {
        return Err(EngineError::InvalidRound {
            round: round_name.to_string(),
            field: "shares_outstanding".to_string(),
            message: "no shares outstanding before round".to_string(),
        });
    }

    let price_per_share = div(
        pre_money,
        Decimal::from(shares_outstanding_before),
        round_name,
        Stage::PricedIssuance,
    )?;
    let shares_issued = floor_to_shares(
        div(
            terms.investment_amount,
            price_per_share,
            round_name,
            Stage::PricedIssuance,
        )?,
        round_name,
        Stage::PricedIssuance,
    )?;

    Ok(NormalizedPricedRound {
        pre_money,
        post_money,
        price_per_share,
        shares_issued,
    })
}
