//! SAFE conversion pricing.
//!
//! A SAFE converts at the lower of two implied prices: the valuation cap
//! spread over the shares outstanding before conversion, and the triggering
//! price less the agreed discount.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult, Stage};
use crate::models::SafeTerms;

use super::validate::{div, ensure_discount_range, ensure_positive, floor_to_shares, mul};

/// The outcome of converting a SAFE at its trigger event.
#[derive(Debug, Clone, PartialEq)]
pub struct SafeConversionOutcome {
    /// `valuation_cap / total_shares_before_conversion`.
    pub cap_implied_price: Decimal,
    /// `triggering_price * (1 - discount_percent / 100)`.
    pub discount_implied_price: Decimal,
    /// The lower of the two implied prices; the price the SAFE converts at.
    pub conversion_price: Decimal,
    /// `floor(investment_amount / conversion_price)`.
    pub shares_issued: u64,
}

/// Converts a SAFE against a triggering price.
///
/// `total_shares_before_conversion` is the running total at the moment the
/// trigger fires; `triggering_price` is the triggering round's price per
/// share (or the exit share price for exit-triggered SAFEs).
///
/// # Errors
///
/// Fails closed with [`EngineError::InvalidRound`] for non-positive terms or
/// a discount outside `[0, 100)`, and with [`EngineError::SafeConversion`]
/// when no shares are outstanding to spread the cap over.
pub fn convert_safe(
    round_name: &str,
    terms: &SafeTerms,
    total_shares_before_conversion: u64,
    triggering_price: Decimal,
) -> EngineResult<SafeConversionOutcome> {
    ensure_positive(terms.investment_amount, round_name, "investment_amount")?;
    ensure_positive(terms.valuation_cap, round_name, "valuation_cap")?;
    ensure_discount_range(terms.discount_percent, round_name, "discount_percent")?;

    if total_shares_before_conversion == 0 {
        return Err(EngineError::SafeConversion {
            round: round_name.to_string(),
            message: "no shares outstanding before conversion".to_string(),
        });
    }
    if triggering_price <= Decimal::ZERO {
        return Err(EngineError::SafeConversion {
            round: round_name.to_string(),
            message: format!("non-positive triggering price {}", triggering_price),
        });
    }

    let cap_implied_price = div(
        terms.valuation_cap,
        Decimal::from(total_shares_before_conversion),
        round_name,
        Stage::SafeConversion,
    )?;
    let discount_factor = Decimal::ONE - terms.discount_percent / Decimal::ONE_HUNDRED;
    let discount_implied_price = mul(
        triggering_price,
        discount_factor,
        round_name,
        Stage::SafeConversion,
    )?;

    // Lower implied price wins: more shares for the SAFE holder.
    let conversion_price = cap_implied_price.min(discount_implied_price);
    let shares_issued = floor_to_shares(
        div(
            terms.investment_amount,
            conversion_price,
            round_name,
            Stage::SafeConversion,
        )?,
        round_name,
        Stage::SafeConversion,
    )?;

    Ok(SafeConversionOutcome {
        cap_implied_price,
        discount_implied_price,
        conversion_price,
        shares_issued,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConversionTrigger;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn safe_terms(investment: &str, cap: &str, discount: &str) -> SafeTerms {
        SafeTerms {
            investment_amount: dec(investment),
            valuation_cap: dec(cap),
            discount_percent: dec(discount),
            trigger: ConversionTrigger::NextRound,
        }
    }

    /// SC-001: discount price wins when lower than cap price
    #[test]
    fn test_discount_price_wins_when_lower() {
        // cap price = 5,000,000 / 500,000 = 10.00
        // discount price = 10.00 * 0.80 = 8.00
        let terms = safe_terms("400000", "5000000", "20");
        let outcome = convert_safe("SAFE 2024", &terms, 500_000, dec("10")).unwrap();

        assert_eq!(outcome.cap_implied_price, dec("10"));
        assert_eq!(outcome.discount_implied_price, dec("8.00"));
        assert_eq!(outcome.conversion_price, dec("8.00"));
        assert_eq!(outcome.shares_issued, 50_000);
    }

    /// SC-002: cap price wins when lower than discount price
    #[test]
    fn test_cap_price_wins_when_lower() {
        // cap price = 5,000,000 / 10,000,000 = 0.50
        // discount price = 1.00 * 0.80 = 0.80
        let terms = safe_terms("500000", "5000000", "20");
        let outcome = convert_safe("SAFE 2024", &terms, 10_000_000, dec("1")).unwrap();

        assert_eq!(outcome.cap_implied_price, dec("0.5"));
        assert_eq!(outcome.conversion_price, dec("0.5"));
        assert_eq!(outcome.shares_issued, 1_000_000);
    }

    /// SC-003: zero discount uses the triggering price as-is
    #[test]
    fn test_zero_discount_uses_triggering_price() {
        let terms = safe_terms("100000", "100000000", "0");
        let outcome = convert_safe("SAFE 2024", &terms, 1_000_000, dec("2")).unwrap();

        assert_eq!(outcome.discount_implied_price, dec("2"));
        assert_eq!(outcome.shares_issued, 50_000);
    }

    /// SC-004: converted shares are floored
    #[test]
    fn test_converted_shares_floored() {
        // conversion price 0.30; 100,000 / 0.30 = 333,333.3...
        let terms = safe_terms("100000", "300000", "0");
        let outcome = convert_safe("SAFE 2024", &terms, 1_000_000, dec("5")).unwrap();

        assert_eq!(outcome.conversion_price, dec("0.3"));
        assert_eq!(outcome.shares_issued, 333_333);
    }

    #[test]
    fn test_zero_shares_before_conversion_fails() {
        let terms = safe_terms("100000", "5000000", "20");
        let result = convert_safe("SAFE 2024", &terms, 0, dec("1"));

        match result.unwrap_err() {
            EngineError::SafeConversion { round, .. } => {
                assert_eq!(round, "SAFE 2024");
            }
            other => panic!("Expected SafeConversion, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_triggering_price_fails() {
        let terms = safe_terms("100000", "5000000", "20");
        assert!(convert_safe("SAFE 2024", &terms, 1_000_000, Decimal::ZERO).is_err());
    }

    #[test]
    fn test_full_discount_is_invalid() {
        let terms = safe_terms("100000", "5000000", "100");
        match convert_safe("SAFE 2024", &terms, 1_000_000, dec("1")).unwrap_err() {
            EngineError::InvalidRound { field, .. } => {
                assert_eq!(field, "discount_percent");
            }
            other => panic!("Expected InvalidRound, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_investment_is_invalid() {
        let terms = safe_terms("0", "5000000", "20");
        assert!(convert_safe("SAFE 2024", &terms, 1_000_000, dec("1")).is_err());
    }
}
