//! Sequential capitalization accumulation.
//!
//! Walks the funding rounds in ascending `order` (stable for ties, which is
//! load-bearing: share price depends on shares outstanding so far), folding
//! an accumulator of running total shares and running valuation through each
//! round's share-issuance effects.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult, Stage};
use crate::models::{
    Company, ConversionTrigger, Founder, FundingRound, RoundKind, SafeTerms, UnconvertedSafe,
};

use super::normalize::normalize_priced;
use super::safe_conversion::convert_safe;
use super::validate::{add_shares, div, ensure_discount_range, ensure_positive};

/// A founder's working share balance during accumulation.
///
/// Starts as a copy of the input [`Founder`] record; only secondary sales
/// move it.
#[derive(Debug, Clone, PartialEq)]
pub struct FounderHolding {
    /// The founder's name.
    pub name: String,
    /// Current share balance.
    pub shares: u64,
}

/// The shares a round's investor pool ended up holding.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundHolding {
    /// The round's name.
    pub round_name: String,
    /// Shares issued, converted, or acquired via secondary sale.
    pub shares: u64,
    /// The amount invested in the round.
    pub investment_amount: Decimal,
    /// The price the shares were issued or converted at; `None` while a
    /// SAFE remains unconverted.
    pub price_per_share: Option<Decimal>,
}

/// The accumulated state after all rounds have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulation {
    /// Total shares outstanding.
    pub total_shares: u64,
    /// Running valuation; ratchets upward from priced-round post-money
    /// values only.
    pub current_valuation: Decimal,
    /// ESOP pool shares, including any round-attached top-ups.
    pub esop_shares: u64,
    /// Founder balances after secondary sales.
    pub founders: Vec<FounderHolding>,
    /// Per-round investor holdings, in processing order.
    pub rounds: Vec<RoundHolding>,
    /// SAFEs whose trigger never fired.
    pub unconverted_safes: Vec<UnconvertedSafe>,
}

/// A SAFE waiting for its trigger event.
struct PendingSafe {
    holding_index: usize,
    round_name: String,
    terms: SafeTerms,
}

/// Accumulates the capitalization state over the ordered round sequence.
///
/// `exit_value` feeds exit-triggered SAFE conversions; pass `None` when no
/// exit event is being modelled, in which case an exit-triggered SAFE is a
/// [`EngineError::SafeConversion`] failure.
///
/// The inputs are never mutated; founder balances are adjusted on a working
/// copy.
pub fn accumulate(
    company: &Company,
    founders: &[Founder],
    rounds: &[FundingRound],
    exit_value: Option<Decimal>,
) -> EngineResult<Accumulation> {
    validate_company(company)?;

    let mut total_shares = company.total_shares;
    let mut esop_shares = company.esop_shares();
    let mut current_valuation = company.valuation.unwrap_or(Decimal::ZERO);
    let mut founder_holdings: Vec<FounderHolding> = founders
        .iter()
        .map(|f| FounderHolding {
            name: f.name.clone(),
            shares: f.shares,
        })
        .collect();
    let mut round_holdings: Vec<RoundHolding> = Vec::with_capacity(rounds.len());
    let mut pending_safes: Vec<PendingSafe> = Vec::new();
    let mut unconverted: Vec<UnconvertedSafe> = Vec::new();

    // Stable sort: ties in `order` preserve input order.
    let mut ordered: Vec<&FundingRound> = rounds.iter().collect();
    ordered.sort_by_key(|r| r.order);

    for round in ordered {
        // A pre-money pool top-up is counted before this round's price
        // calculation, so it dilutes the new investor too.
        if let Some(adj) = &round.esop_adjustment {
            if adj.is_pre_money {
                total_shares = add_shares(
                    total_shares,
                    adj.additional_shares,
                    &round.name,
                    Stage::EsopAdjustment,
                )?;
                esop_shares = add_shares(
                    esop_shares,
                    adj.additional_shares,
                    &round.name,
                    Stage::EsopAdjustment,
                )?;
            }
        }

        let holding_index = round_holdings.len();
        match &round.kind {
            RoundKind::Priced(terms) => {
                let norm = normalize_priced(&round.name, terms, total_shares)?;
                total_shares = add_shares(
                    total_shares,
                    norm.shares_issued,
                    &round.name,
                    Stage::PricedIssuance,
                )?;
                if norm.post_money > current_valuation {
                    current_valuation = norm.post_money;
                }
                round_holdings.push(RoundHolding {
                    round_name: round.name.clone(),
                    shares: norm.shares_issued,
                    investment_amount: terms.investment_amount,
                    price_per_share: Some(norm.price_per_share),
                });

                // This priced round is the trigger event for every SAFE
                // queued so far with a next-round trigger.
                let (to_convert, remaining): (Vec<_>, Vec<_>) = pending_safes
                    .into_iter()
                    .partition(|p| p.terms.trigger == ConversionTrigger::NextRound);
                pending_safes = remaining;
                for safe in to_convert {
                    let outcome = convert_safe(
                        &safe.round_name,
                        &safe.terms,
                        total_shares,
                        norm.price_per_share,
                    )?;
                    total_shares = add_shares(
                        total_shares,
                        outcome.shares_issued,
                        &safe.round_name,
                        Stage::SafeConversion,
                    )?;
                    let holding = &mut round_holdings[safe.holding_index];
                    holding.shares = add_shares(
                        holding.shares,
                        outcome.shares_issued,
                        &safe.round_name,
                        Stage::SafeConversion,
                    )?;
                    holding.price_per_share = Some(outcome.conversion_price);
                }
            }
            RoundKind::Safe(terms) => {
                // Fail closed on malformed terms now rather than at a
                // trigger that may never fire.
                ensure_positive(terms.investment_amount, &round.name, "investment_amount")?;
                ensure_positive(terms.valuation_cap, &round.name, "valuation_cap")?;
                ensure_discount_range(terms.discount_percent, &round.name, "discount_percent")?;

                round_holdings.push(RoundHolding {
                    round_name: round.name.clone(),
                    shares: 0,
                    investment_amount: terms.investment_amount,
                    price_per_share: None,
                });
                pending_safes.push(PendingSafe {
                    holding_index,
                    round_name: round.name.clone(),
                    terms: terms.clone(),
                });
            }
        }

        if let Some(adj) = &round.esop_adjustment {
            if !adj.is_pre_money {
                total_shares = add_shares(
                    total_shares,
                    adj.additional_shares,
                    &round.name,
                    Stage::EsopAdjustment,
                )?;
                esop_shares = add_shares(
                    esop_shares,
                    adj.additional_shares,
                    &round.name,
                    Stage::EsopAdjustment,
                )?;
            }
        }

        // A transfer, not an issuance: total shares and valuation are
        // unaffected.
        if let Some(sale) = &round.secondary_sale {
            let founder = founder_holdings
                .iter_mut()
                .find(|f| f.name == sale.founder_name)
                .ok_or_else(|| EngineError::FounderNotFound {
                    name: sale.founder_name.clone(),
                    round: round.name.clone(),
                })?;
            if sale.shares_sold > founder.shares {
                return Err(EngineError::Arithmetic {
                    round: round.name.clone(),
                    stage: Stage::SecondarySale,
                    message: format!(
                        "shares_sold ({}) exceeds founder '{}' balance ({})",
                        sale.shares_sold, founder.name, founder.shares
                    ),
                });
            }
            founder.shares -= sale.shares_sold;
            let holding = &mut round_holdings[holding_index];
            holding.shares = add_shares(
                holding.shares,
                sale.shares_sold,
                &round.name,
                Stage::SecondarySale,
            )?;
        }
    }

    // End of sequence: resolve exit-triggered SAFEs, report the rest as
    // outstanding liabilities.
    for safe in pending_safes {
        match safe.terms.trigger {
            ConversionTrigger::Exit => {
                let exit = exit_value.ok_or_else(|| EngineError::SafeConversion {
                    round: safe.round_name.clone(),
                    message: "exit trigger but no exit value supplied".to_string(),
                })?;
                if total_shares == 0 {
                    return Err(EngineError::SafeConversion {
                        round: safe.round_name.clone(),
                        message: "no shares outstanding at exit".to_string(),
                    });
                }
                let exit_price = div(
                    exit,
                    Decimal::from(total_shares),
                    &safe.round_name,
                    Stage::SafeConversion,
                )?;
                let outcome =
                    convert_safe(&safe.round_name, &safe.terms, total_shares, exit_price)?;
                total_shares = add_shares(
                    total_shares,
                    outcome.shares_issued,
                    &safe.round_name,
                    Stage::SafeConversion,
                )?;
                let holding = &mut round_holdings[safe.holding_index];
                holding.shares = add_shares(
                    holding.shares,
                    outcome.shares_issued,
                    &safe.round_name,
                    Stage::SafeConversion,
                )?;
                holding.price_per_share = Some(outcome.conversion_price);
            }
            ConversionTrigger::NextRound | ConversionTrigger::Ipo => {
                unconverted.push(UnconvertedSafe {
                    round_name: safe.round_name,
                    investment_amount: safe.terms.investment_amount,
                    valuation_cap: safe.terms.valuation_cap,
                    trigger: safe.terms.trigger,
                });
            }
        }
    }

    Ok(Accumulation {
        total_shares,
        current_valuation,
        esop_shares,
        founders: founder_holdings,
        rounds: round_holdings,
        unconverted_safes: unconverted,
    })
}

fn validate_company(company: &Company) -> EngineResult<()> {
    if company.total_shares == 0 {
        return Err(EngineError::InvalidCompany {
            field: "total_shares".to_string(),
            message: "must be positive".to_string(),
        });
    }
    if company.esop_pool_percent < Decimal::ZERO || company.esop_pool_percent > Decimal::ONE_HUNDRED
    {
        return Err(EngineError::InvalidCompany {
            field: "esop_pool_percent".to_string(),
            message: format!("must be in [0, 100], got {}", company.esop_pool_percent),
        });
    }
    Ok(())
}
