//! Data models for the Cap Table Engine.
//!
//! All entities here are plain records created by the caller and passed in
//! as immutable inputs for one pipeline invocation; the engine produces new
//! result values and never mutates its inputs.

mod breakdown;
mod company;
mod founder;
mod funding_round;

pub use breakdown::{
    CapTableResult, CapTableWarning, ExitResult, FounderStake, InvestorStake, OwnershipBreakdown,
    PoolStake, UnconvertedSafe,
};
pub use company::Company;
pub use founder::Founder;
pub use funding_round::{
    ConversionTrigger, EsopAdjustment, FundingRound, PricedTerms, RoundKind, SafeTerms,
    SecondarySale, ValuationBasis,
};
