//! Shared numeric and validation helpers.
//!
//! All Decimal arithmetic that can overflow or divide by zero goes through
//! these wrappers so failures surface as typed errors naming the round and
//! stage instead of panicking or silently coercing to zero.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult, Stage};

/// Fails with `InvalidRound` unless `value` is strictly positive.
pub(crate) fn ensure_positive(value: Decimal, round: &str, field: &str) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(EngineError::InvalidRound {
            round: round.to_string(),
            field: field.to_string(),
            message: format!("must be positive, got {}", value),
        });
    }
    Ok(())
}

/// Fails with `InvalidRound` unless `0 <= value < 100`.
///
/// Used for SAFE discounts; a 100% discount would imply a zero conversion
/// price.
pub(crate) fn ensure_discount_range(value: Decimal, round: &str, field: &str) -> EngineResult<()> {
    if value < Decimal::ZERO || value >= Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidRound {
            round: round.to_string(),
            field: field.to_string(),
            message: format!("must be in [0, 100), got {}", value),
        });
    }
    Ok(())
}

/// Checked Decimal division mapped to `ArithmeticError`.
pub(crate) fn div(
    numerator: Decimal,
    denominator: Decimal,
    round: &str,
    stage: Stage,
) -> EngineResult<Decimal> {
    if denominator.is_zero() {
        return Err(EngineError::Arithmetic {
            round: round.to_string(),
            stage,
            message: format!("division of {} by zero", numerator),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| EngineError::Arithmetic {
            round: round.to_string(),
            stage,
            message: format!("overflow dividing {} by {}", numerator, denominator),
        })
}

/// Checked Decimal multiplication mapped to `ArithmeticError`.
pub(crate) fn mul(a: Decimal, b: Decimal, round: &str, stage: Stage) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| EngineError::Arithmetic {
        round: round.to_string(),
        stage,
        message: format!("overflow multiplying {} by {}", a, b),
    })
}

/// Floors a Decimal to a whole non-negative share count.
pub(crate) fn floor_to_shares(value: Decimal, round: &str, stage: Stage) -> EngineResult<u64> {
    if value < Decimal::ZERO {
        return Err(EngineError::Arithmetic {
            round: round.to_string(),
            stage,
            message: format!("negative share count {}", value),
        });
    }
    value
        .floor()
        .to_u64()
        .ok_or_else(|| EngineError::Arithmetic {
            round: round.to_string(),
            stage,
            message: format!("share count {} out of range", value),
        })
}

/// Checked share-count addition mapped to `ArithmeticError`.
pub(crate) fn add_shares(a: u64, b: u64, round: &str, stage: Stage) -> EngineResult<u64> {
    a.checked_add(b).ok_or_else(|| EngineError::Arithmetic {
        round: round.to_string(),
        stage,
        message: format!("share count overflow adding {} to {}", b, a),
    })
}
