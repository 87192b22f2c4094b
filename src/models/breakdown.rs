//! Ownership breakdown and result models.
//!
//! These are the outputs of a pipeline run: the four-class ownership
//! breakdown (founders, per-round investors, ESOP pool, available shares),
//! the exit projection, and any warnings attached to a successful result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ConversionTrigger;

/// A founder's position in the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FounderStake {
    /// The founder's name.
    pub name: String,
    /// Shares held after any secondary sales.
    pub shares: u64,
    /// Ownership percentage of total shares outstanding (0-100).
    pub ownership_percent: Decimal,
    /// Dollar value at the current valuation.
    pub current_value: Decimal,
    /// Dollar value at the target exit.
    pub exit_value: Decimal,
}

/// A round investor's position in the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorStake {
    /// The name of the round this investor participated in.
    pub round_name: String,
    /// Shares held: issued, converted, or acquired via secondary sale.
    pub shares: u64,
    /// Ownership percentage of total shares outstanding (0-100).
    pub ownership_percent: Decimal,
    /// The amount invested in the round.
    pub investment_amount: Decimal,
    /// Dollar value at the current valuation.
    pub current_value: Decimal,
    /// Dollar value at the target exit.
    pub exit_value: Decimal,
    /// Exit value divided by investment amount; zero when nothing was
    /// invested.
    pub return_multiple: Decimal,
}

/// An aggregate stakeholder class (ESOP pool or available shares).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolStake {
    /// Shares in this class.
    pub shares: u64,
    /// Ownership percentage of total shares outstanding (0-100).
    pub ownership_percent: Decimal,
    /// Dollar value at the current valuation.
    pub current_value: Decimal,
    /// Dollar value at the target exit.
    pub exit_value: Decimal,
}

/// The full four-class ownership breakdown.
///
/// Invariant: the classes' share counts sum to total shares outstanding
/// exactly, and their ownership percentages sum to 100 within a small
/// tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipBreakdown {
    /// Per-founder positions.
    pub founders: Vec<FounderStake>,
    /// Per-round investor positions, in processing order.
    pub investors: Vec<InvestorStake>,
    /// The ESOP pool aggregate.
    pub esop: PoolStake,
    /// Authorized-but-unallocated shares, clamped at zero.
    pub available: PoolStake,
}

/// Exit projection figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitResult {
    /// The target exit value the breakdown was evaluated at.
    pub exit_value: Decimal,
    /// Total shares outstanding at exit.
    pub total_shares: u64,
    /// Exit value divided by total shares outstanding.
    pub share_price: Decimal,
}

/// A SAFE that reached the end of the sequence without converting.
///
/// Reported separately as an outstanding liability; contributes zero shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnconvertedSafe {
    /// The SAFE round's name.
    pub round_name: String,
    /// The amount invested under the SAFE.
    pub investment_amount: Decimal,
    /// The valuation cap.
    pub valuation_cap: Decimal,
    /// The trigger that never fired.
    pub trigger: ConversionTrigger,
}

/// A warning attached to a successful computation.
///
/// Warnings indicate conditions the caller may want to surface as validation
/// hints; they never abort the computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapTableWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

impl CapTableWarning {
    /// Warning code for allocations exceeding authorized shares.
    pub const OVER_ALLOCATION: &'static str = "OVER_ALLOCATION";

    /// Creates an over-allocation warning.
    ///
    /// Raised when the sum of founder, investor and ESOP shares exceeds
    /// total shares outstanding; `excess` is the raw overshoot before the
    /// available class was clamped to zero.
    pub fn over_allocation(allocated: u64, total_shares: u64, excess: u64) -> Self {
        Self {
            code: Self::OVER_ALLOCATION.to_string(),
            message: format!(
                "allocated shares ({}) exceed total shares outstanding ({}) by {}",
                allocated, total_shares, excess
            ),
        }
    }
}

/// The complete result of a cap table computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapTableResult {
    /// The running valuation after the final priced round (or the company's
    /// own valuation if no priced round ratcheted it).
    pub current_valuation: Decimal,
    /// Total shares outstanding after all rounds.
    pub total_shares: u64,
    /// The four-class ownership breakdown, carrying both current and exit
    /// dollar values per class.
    pub breakdown: OwnershipBreakdown,
    /// Exit projection figures.
    pub exit: ExitResult,
    /// SAFEs that never reached their trigger.
    pub unconverted_safes: Vec<UnconvertedSafe>,
    /// Warnings attached to the result.
    pub warnings: Vec<CapTableWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_over_allocation_warning_message() {
        let warning = CapTableWarning::over_allocation(11_000_000, 10_000_000, 1_000_000);
        assert_eq!(warning.code, "OVER_ALLOCATION");
        assert_eq!(
            warning.message,
            "allocated shares (11000000) exceed total shares outstanding (10000000) by 1000000"
        );
    }

    #[test]
    fn test_warning_serialization() {
        let warning = CapTableWarning::over_allocation(11, 10, 1);
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"OVER_ALLOCATION\""));
    }

    #[test]
    fn test_result_serialization_round_trip() {
        let result = CapTableResult {
            current_valuation: dec("10000000"),
            total_shares: 11_100_000,
            breakdown: OwnershipBreakdown {
                founders: vec![FounderStake {
                    name: "alice".to_string(),
                    shares: 9_000_000,
                    ownership_percent: dec("81.08"),
                    current_value: dec("8108000"),
                    exit_value: dec("8108000"),
                }],
                investors: vec![InvestorStake {
                    round_name: "Series A".to_string(),
                    shares: 1_100_000,
                    ownership_percent: dec("9.91"),
                    investment_amount: dec("1000000"),
                    current_value: dec("991000"),
                    exit_value: dec("991000"),
                    return_multiple: dec("0.991"),
                }],
                esop: PoolStake {
                    shares: 1_000_000,
                    ownership_percent: dec("9.01"),
                    current_value: dec("901000"),
                    exit_value: dec("901000"),
                },
                available: PoolStake {
                    shares: 0,
                    ownership_percent: dec("0"),
                    current_value: dec("0"),
                    exit_value: dec("0"),
                },
            },
            exit: ExitResult {
                exit_value: dec("10000000"),
                total_shares: 11_100_000,
                share_price: dec("0.90"),
            },
            unconverted_safes: vec![],
            warnings: vec![],
        };

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: CapTableResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }

    #[test]
    fn test_unconverted_safe_serialization() {
        let safe = UnconvertedSafe {
            round_name: "SAFE 2024".to_string(),
            investment_amount: dec("500000"),
            valuation_cap: dec("5000000"),
            trigger: ConversionTrigger::Ipo,
        };

        let json = serde_json::to_string(&safe).unwrap();
        assert!(json.contains("\"round_name\":\"SAFE 2024\""));
        assert!(json.contains("\"trigger\":\"ipo\""));
    }
}
