//! Ownership and exit projection.
//!
//! Turns the accumulated capitalization state into the four-class ownership
//! breakdown, evaluated at the current valuation and at a target exit value.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CapTableWarning, ExitResult, FounderStake, InvestorStake, OwnershipBreakdown, PoolStake,
};

use super::accumulate::Accumulation;

/// The projector's output: breakdown, exit figures and any warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// The four-class ownership breakdown.
    pub breakdown: OwnershipBreakdown,
    /// Exit projection figures.
    pub exit: ExitResult,
    /// Warnings attached to the result.
    pub warnings: Vec<CapTableWarning>,
}

/// One stakeholder class evaluated at both valuations.
struct ClassFigures {
    ownership_percent: Decimal,
    current_value: Decimal,
    exit_value: Decimal,
}

/// Projects the ownership breakdown and exit outcome.
///
/// Pure and deterministic: identical inputs always produce identical
/// outputs. Over-allocation (class shares summing past total shares) is
/// reported as a warning with the available class clamped to zero, not as a
/// hard failure.
pub fn project(acc: &Accumulation, exit_value: Decimal) -> EngineResult<Projection> {
    if acc.total_shares == 0 {
        return Err(EngineError::Calculation {
            message: "cannot project ownership with zero total shares".to_string(),
        });
    }
    let total = Decimal::from(acc.total_shares);
    let share_price = checked_div(exit_value, total)?;

    let figures = |shares: u64| -> EngineResult<ClassFigures> {
        let ownership_percent =
            checked_mul(checked_div(Decimal::from(shares), total)?, Decimal::ONE_HUNDRED)?;
        let fraction = checked_div(ownership_percent, Decimal::ONE_HUNDRED)?;
        Ok(ClassFigures {
            ownership_percent,
            current_value: checked_mul(fraction, acc.current_valuation)?,
            exit_value: checked_mul(fraction, exit_value)?,
        })
    };

    let mut founders = Vec::with_capacity(acc.founders.len());
    let mut allocated: u128 = 0;
    for holding in &acc.founders {
        allocated += u128::from(holding.shares);
        let f = figures(holding.shares)?;
        founders.push(FounderStake {
            name: holding.name.clone(),
            shares: holding.shares,
            ownership_percent: f.ownership_percent,
            current_value: f.current_value,
            exit_value: f.exit_value,
        });
    }

    let mut investors = Vec::with_capacity(acc.rounds.len());
    for holding in &acc.rounds {
        allocated += u128::from(holding.shares);
        let f = figures(holding.shares)?;
        let return_multiple = if holding.investment_amount > Decimal::ZERO {
            checked_div(f.exit_value, holding.investment_amount)?
        } else {
            Decimal::ZERO
        };
        investors.push(InvestorStake {
            round_name: holding.round_name.clone(),
            shares: holding.shares,
            ownership_percent: f.ownership_percent,
            investment_amount: holding.investment_amount,
            current_value: f.current_value,
            exit_value: f.exit_value,
            return_multiple,
        });
    }

    allocated += u128::from(acc.esop_shares);
    let esop_figures = figures(acc.esop_shares)?;
    let esop = PoolStake {
        shares: acc.esop_shares,
        ownership_percent: esop_figures.ownership_percent,
        current_value: esop_figures.current_value,
        exit_value: esop_figures.exit_value,
    };

    let mut warnings = Vec::new();
    let available_shares = if allocated > u128::from(acc.total_shares) {
        let excess = allocated - u128::from(acc.total_shares);
        warnings.push(CapTableWarning::over_allocation(
            allocated.try_into().unwrap_or(u64::MAX),
            acc.total_shares,
            excess.try_into().unwrap_or(u64::MAX),
        ));
        0
    } else {
        // Fits in u64: allocated <= total_shares.
        (u128::from(acc.total_shares) - allocated) as u64
    };
    let available_figures = figures(available_shares)?;
    let available = PoolStake {
        shares: available_shares,
        ownership_percent: available_figures.ownership_percent,
        current_value: available_figures.current_value,
        exit_value: available_figures.exit_value,
    };

    Ok(Projection {
        breakdown: OwnershipBreakdown {
            founders,
            investors,
            esop,
            available,
        },
        exit: ExitResult {
            exit_value,
            total_shares: acc.total_shares,
            share_price,
        },
        warnings,
    })
}

fn checked_div(a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_div(b).ok_or_else(|| EngineError::Calculation {
        message: format!("overflow or division by zero dividing {} by {}", a, b),
    })
}

fn checked_mul(a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| EngineError::Calculation {
        message: format!("overflow multiplying {} by {}", a, b),
    })
}
