//! Company model.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Represents the company whose cap table is being computed.
///
/// The ESOP pool is expressed as a percentage of total authorized shares;
/// the engine only ever reads it, never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// The company name.
    pub name: String,
    /// Total authorized shares (positive integer).
    pub total_shares: u64,
    /// Current valuation, if the company has one before any priced round.
    #[serde(default)]
    pub valuation: Option<Decimal>,
    /// ESOP pool size as a percentage of total shares (0-100).
    pub esop_pool_percent: Decimal,
}

impl Company {
    /// Returns the number of shares reserved for the ESOP pool.
    ///
    /// Computed as `floor(total_shares * esop_pool_percent / 100)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use captable_engine::models::Company;
    /// use rust_decimal::Decimal;
    ///
    /// let company = Company {
    ///     name: "Acme".to_string(),
    ///     total_shares: 10_000_000,
    ///     valuation: None,
    ///     esop_pool_percent: Decimal::new(10, 0),
    /// };
    /// assert_eq!(company.esop_shares(), 1_000_000);
    /// ```
    pub fn esop_shares(&self) -> u64 {
        let pool = Decimal::from(self.total_shares) * self.esop_pool_percent
            / Decimal::ONE_HUNDRED;
        pool.floor().to_u64().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_company(total_shares: u64, esop_percent: &str) -> Company {
        Company {
            name: "Acme".to_string(),
            total_shares,
            valuation: None,
            esop_pool_percent: dec(esop_percent),
        }
    }

    #[test]
    fn test_esop_shares_ten_percent() {
        let company = create_test_company(10_000_000, "10");
        assert_eq!(company.esop_shares(), 1_000_000);
    }

    #[test]
    fn test_esop_shares_floors_fractional_result() {
        // 12.5% of 1,000,001 = 125,000.125
        let company = create_test_company(1_000_001, "12.5");
        assert_eq!(company.esop_shares(), 125_000);
    }

    #[test]
    fn test_esop_shares_zero_pool() {
        let company = create_test_company(10_000_000, "0");
        assert_eq!(company.esop_shares(), 0);
    }

    #[test]
    fn test_deserialize_company_without_valuation() {
        let json = r#"{
            "name": "Acme",
            "total_shares": 10000000,
            "esop_pool_percent": "10"
        }"#;

        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company.name, "Acme");
        assert_eq!(company.total_shares, 10_000_000);
        assert_eq!(company.valuation, None);
        assert_eq!(company.esop_pool_percent, dec("10"));
    }

    #[test]
    fn test_serialize_company_round_trip() {
        let company = Company {
            name: "Acme".to_string(),
            total_shares: 10_000_000,
            valuation: Some(dec("5000000")),
            esop_pool_percent: dec("10"),
        };

        let json = serde_json::to_string(&company).unwrap();
        let deserialized: Company = serde_json::from_str(&json).unwrap();
        assert_eq!(company, deserialized);
    }
}
