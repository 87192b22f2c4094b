//! Funding round models.
//!
//! A round is a tagged union of priced and SAFE terms so the accumulator can
//! pattern-match exhaustively on the round kind. ESOP adjustments and founder
//! secondary sales are optional sub-records attached uniformly to any round.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a priced round's stated valuation is pre-money or post-money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationBasis {
    /// The stated valuation excludes this round's investment.
    PreMoney,
    /// The stated valuation includes this round's investment.
    PostMoney,
}

/// The event that converts a SAFE into shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionTrigger {
    /// Converts when the next priced round occurs.
    NextRound,
    /// Converts at the exit event.
    Exit,
    /// Converts at an IPO. No IPO event exists in this engine's input
    /// model, so these SAFEs always remain outstanding liabilities.
    Ipo,
}

/// Terms of a priced round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedTerms {
    /// The amount invested in this round.
    pub investment_amount: Decimal,
    /// The stated valuation for this round.
    pub valuation: Decimal,
    /// Whether `valuation` is pre-money or post-money.
    pub valuation_basis: ValuationBasis,
}

/// Terms of a SAFE (Simple Agreement for Future Equity).
///
/// A SAFE never issues shares directly; it converts at its trigger event at
/// the lower of the cap-implied and discount-implied prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeTerms {
    /// The amount invested under the SAFE.
    pub investment_amount: Decimal,
    /// The valuation cap.
    pub valuation_cap: Decimal,
    /// The discount off the triggering round's price, as a percentage (0-100).
    pub discount_percent: Decimal,
    /// The event that converts this SAFE.
    pub trigger: ConversionTrigger,
}

/// The kind-specific terms of a funding round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundKind {
    /// A financing event with an explicit share price, issuing shares
    /// immediately.
    Priced(PricedTerms),
    /// A convertible instrument that defers share issuance until a trigger
    /// event.
    Safe(SafeTerms),
}

/// An ESOP pool expansion attached to a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsopAdjustment {
    /// Number of shares added to the pool.
    pub additional_shares: u64,
    /// When true the added shares are counted before this round's investor
    /// price calculation, diluting the new investor too; when false they are
    /// added after, diluting only existing holders.
    pub is_pre_money: bool,
}

/// A founder secondary sale attached to a round.
///
/// Shares transfer from the named founder to the round's investor pool at
/// the stated price, with no effect on total shares outstanding or company
/// valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondarySale {
    /// The name of the selling founder.
    pub founder_name: String,
    /// Number of shares transferred.
    pub shares_sold: u64,
    /// Agreed price per share for the transfer.
    pub price_per_share: Decimal,
}

/// A single funding round in the company's financing history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRound {
    /// Display name of the round (e.g. "Seed", "Series A").
    pub name: String,
    /// Processing order; ties are broken by input order.
    pub order: i32,
    /// The kind-specific round terms.
    #[serde(flatten)]
    pub kind: RoundKind,
    /// Optional ESOP pool expansion applied with this round.
    #[serde(default)]
    pub esop_adjustment: Option<EsopAdjustment>,
    /// Optional founder secondary sale settled with this round.
    #[serde(default)]
    pub secondary_sale: Option<SecondarySale>,
}

impl FundingRound {
    /// The amount invested in this round, regardless of kind.
    pub fn investment_amount(&self) -> Decimal {
        match &self.kind {
            RoundKind::Priced(terms) => terms.investment_amount,
            RoundKind::Safe(terms) => terms.investment_amount,
        }
    }
}
