//! Request types for the Cap Table Engine API.
//!
//! This module defines the JSON request structures for the `/compute`
//! endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Company, EsopAdjustment, Founder, FundingRound, RoundKind, SecondarySale};

/// Request body for the `/compute` endpoint.
///
/// Contains everything needed for one cap table computation: the company,
/// its founders, the funding round sequence, and the target exit value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// The company snapshot.
    pub company: CompanyRequest,
    /// The founders.
    pub founders: Vec<FounderRequest>,
    /// The funding rounds, ordered by their `order` field.
    #[serde(default)]
    pub rounds: Vec<RoundRequest>,
    /// The target exit value to project against.
    pub exit_value: Decimal,
}

/// Company information in a compute request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRequest {
    /// The company name.
    pub name: String,
    /// Total authorized shares.
    pub total_shares: u64,
    /// Current valuation, if any.
    #[serde(default)]
    pub valuation: Option<Decimal>,
    /// ESOP pool size as a percentage of total shares (0-100).
    pub esop_pool_percent: Decimal,
}

/// Founder information in a compute request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FounderRequest {
    /// The founder's name.
    pub name: String,
    /// Shares held.
    pub shares: u64,
    /// Ownership percentage at the time the founder was recorded.
    #[serde(default)]
    pub initial_ownership_percent: Option<Decimal>,
}

/// Funding round information in a compute request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRequest {
    /// The round's name.
    pub name: String,
    /// Processing order; ties preserve input order.
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

impl From<CompanyRequest> for Company {
    fn from(req: CompanyRequest) -> Self {
        Company {
            name: req.name,
            total_shares: req.total_shares,
            valuation: req.valuation,
            esop_pool_percent: req.esop_pool_percent,
        }
    }
}

impl From<FounderRequest> for Founder {
    fn from(req: FounderRequest) -> Self {
        Founder {
            name: req.name,
            shares: req.shares,
            initial_ownership_percent: req.initial_ownership_percent,
        }
    }
}

impl From<RoundRequest> for FundingRound {
    fn from(req: RoundRequest) -> Self {
        FundingRound {
            name: req.name,
            order: req.order,
            kind: req.kind,
            esop_adjustment: req.esop_adjustment,
            secondary_sale: req.secondary_sale,
        }
    }
}
