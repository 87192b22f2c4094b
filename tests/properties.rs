//! Property-based tests over the calculation pipeline.
//!
//! Generates randomized company/founder/round inputs that are structurally
//! valid (no over-allocation) and checks the invariants that must hold for
//! every such input: share conservation, percentage closure, idempotence,
//! monotonic dilution and the upward-only valuation ratchet.

use proptest::prelude::*;
use rust_decimal::Decimal;

use captable_engine::calculation::compute_cap_table;
use captable_engine::models::{
    CapTableResult, Company, Founder, FundingRound, PricedTerms, RoundKind, ValuationBasis,
};

#[derive(Debug, Clone)]
struct Inputs {
    company: Company,
    founders: Vec<Founder>,
    rounds: Vec<FundingRound>,
    exit_value: Decimal,
}

fn priced_round(name: String, order: i32, investment: u64, pre_money: u64) -> FundingRound {
    FundingRound {
        name,
        order,
        kind: RoundKind::Priced(PricedTerms {
            investment_amount: Decimal::from(investment),
            valuation: Decimal::from(pre_money),
            valuation_basis: ValuationBasis::PreMoney,
        }),
        esop_adjustment: None,
        secondary_sale: None,
    }
}

prop_compose! {
    fn arb_inputs()(
        total_shares in 1_000_000u64..50_000_000,
        esop_percent in 0u64..=20,
        founder_frac in 0u64..=100,
        round_terms in prop::collection::vec(
            (10_000u64..5_000_000, 1_000_000u64..50_000_000),
            0..5,
        ),
        exit in 1_000_000u64..100_000_000,
    ) -> Inputs {
        // Founder shares are carved out of what the pool leaves behind, so
        // the generated cap table is never over-allocated.
        let esop_shares = total_shares * esop_percent / 100;
        let founder_shares = (total_shares - esop_shares) * founder_frac / 100;

        let rounds = round_terms
            .into_iter()
            .enumerate()
            .map(|(i, (investment, pre_money))| {
                priced_round(format!("Round {}", i + 1), i as i32 + 1, investment, pre_money)
            })
            .collect();

        Inputs {
            company: Company {
                name: "Acme".to_string(),
                total_shares,
                valuation: None,
                esop_pool_percent: Decimal::from(esop_percent),
            },
            founders: vec![Founder {
                name: "alice".to_string(),
                shares: founder_shares,
                initial_ownership_percent: None,
            }],
            rounds,
            exit_value: Decimal::from(exit),
        }
    }
}

fn compute(inputs: &Inputs) -> CapTableResult {
    compute_cap_table(
        &inputs.company,
        &inputs.founders,
        &inputs.rounds,
        inputs.exit_value,
    )
    .unwrap()
}

fn class_share_sum(result: &CapTableResult) -> u64 {
    let b = &result.breakdown;
    b.founders.iter().map(|f| f.shares).sum::<u64>()
        + b.investors.iter().map(|i| i.shares).sum::<u64>()
        + b.esop.shares
        + b.available.shares
}

fn class_percent_sum(result: &CapTableResult) -> Decimal {
    let b = &result.breakdown;
    b.founders
        .iter()
        .map(|f| f.ownership_percent)
        .sum::<Decimal>()
        + b.investors
            .iter()
            .map(|i| i.ownership_percent)
            .sum::<Decimal>()
        + b.esop.ownership_percent
        + b.available.ownership_percent
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Class shares always sum to total shares outstanding exactly.
    #[test]
    fn prop_share_conservation(inputs in arb_inputs()) {
        let result = compute(&inputs);
        prop_assert_eq!(class_share_sum(&result), result.total_shares);
    }

    /// Class ownership percentages always close to 100%.
    #[test]
    fn prop_percentage_closure(inputs in arb_inputs()) {
        let result = compute(&inputs);
        let sum = class_percent_sum(&result);
        let epsilon = Decimal::new(1, 6);
        prop_assert!(
            (sum - Decimal::ONE_HUNDRED).abs() < epsilon,
            "percentages sum to {}",
            sum
        );
    }

    /// Per-class exit values always sum back to the exit value.
    #[test]
    fn prop_exit_value_conservation(inputs in arb_inputs()) {
        let result = compute(&inputs);
        let b = &result.breakdown;
        let sum = b.founders.iter().map(|f| f.exit_value).sum::<Decimal>()
            + b.investors.iter().map(|i| i.exit_value).sum::<Decimal>()
            + b.esop.exit_value
            + b.available.exit_value;
        let epsilon = Decimal::new(1, 6);
        prop_assert!(
            (sum - inputs.exit_value).abs() < epsilon,
            "exit values sum to {} for exit {}",
            sum,
            inputs.exit_value
        );
    }

    /// Identical inputs yield identical outputs.
    #[test]
    fn prop_idempotence(inputs in arb_inputs()) {
        prop_assert_eq!(compute(&inputs), compute(&inputs));
    }

    /// Every issuing round can only shrink a founder's slice.
    #[test]
    fn prop_monotonic_dilution(inputs in arb_inputs()) {
        prop_assume!(!inputs.rounds.is_empty());

        let mut truncated = inputs.clone();
        truncated.rounds.pop();

        let fewer = compute(&truncated);
        let more = compute(&inputs);
        prop_assert!(
            more.breakdown.founders[0].ownership_percent
                <= fewer.breakdown.founders[0].ownership_percent
        );
    }

    /// The running valuation is the maximum post-money seen, never less.
    #[test]
    fn prop_valuation_ratchets_upward(inputs in arb_inputs()) {
        prop_assume!(!inputs.rounds.is_empty());

        let result = compute(&inputs);
        let max_post_money = inputs
            .rounds
            .iter()
            .map(|r| match &r.kind {
                RoundKind::Priced(terms) => terms.valuation + terms.investment_amount,
                RoundKind::Safe(_) => Decimal::ZERO,
            })
            .max()
            .unwrap();
        prop_assert_eq!(result.current_valuation, max_post_money);
    }

    /// Investor return multiples are never negative.
    #[test]
    fn prop_return_multiples_non_negative(inputs in arb_inputs()) {
        let result = compute(&inputs);
        for investor in &result.breakdown.investors {
            prop_assert!(investor.return_multiple >= Decimal::ZERO);
        }
    }
}
