use crate::core::error::{LedgerError, LedgerResult};
use crate::core::vendor::MembershipTier;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Commission rates retained by the association, per membership tier.
///
/// Defaults to 20% for members and 30% for everyone else. Rates are
/// fractions in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use fair_settlement::core::vendor::MembershipTier;
/// use fair_settlement::settlement::commission::CommissionTable;
/// use rust_decimal_macros::dec;
///
/// let mut table = CommissionTable::default();
/// assert_eq!(table.rate_for(MembershipTier::Member), dec!(0.20));
///
/// table.set_rate(MembershipTier::Member, dec!(0.15)).unwrap();
/// assert_eq!(table.rate_for(MembershipTier::Member), dec!(0.15));
/// assert!(table.set_rate(MembershipTier::NonMember, dec!(1.5)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommissionTable {
    rates: BTreeMap<MembershipTier, Decimal>,
}

impl CommissionTable {
    pub const MEMBER_RATE: Decimal = dec!(0.20);
    pub const NON_MEMBER_RATE: Decimal = dec!(0.30);

    /// Build a table from explicit rates.
    pub fn new(member: Decimal, non_member: Decimal) -> LedgerResult<Self> {
        let mut table = Self::default();
        table.set_rate(MembershipTier::Member, member)?;
        table.set_rate(MembershipTier::NonMember, non_member)?;
        Ok(table)
    }

    /// Load a table from JSON such as `{"member": "0.20", "non_member": "0.30"}`.
    ///
    /// Tiers missing from the document keep their default rate.
    pub fn from_json(json: &str) -> LedgerResult<Self> {
        let loaded: CommissionTable = serde_json::from_str(json)?;
        let mut table = Self::default();
        for (tier, rate) in loaded.rates {
            table.set_rate(tier, rate)?;
        }
        Ok(table)
    }

    pub fn set_rate(&mut self, tier: MembershipTier, rate: Decimal) -> LedgerResult<()> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(LedgerError::InvalidRate(rate));
        }
        self.rates.insert(tier, rate);
        Ok(())
    }

    pub fn rate_for(&self, tier: MembershipTier) -> Decimal {
        self.rates
            .get(&tier)
            .copied()
            .unwrap_or_else(|| default_rate(tier))
    }

    /// Rate as a percentage, for display.
    pub fn percent_for(&self, tier: MembershipTier) -> f64 {
        (self.rate_for(tier) * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    }
}

impl Default for CommissionTable {
    fn default() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(MembershipTier::Member, Self::MEMBER_RATE);
        rates.insert(MembershipTier::NonMember, Self::NON_MEMBER_RATE);
        Self { rates }
    }
}

fn default_rate(tier: MembershipTier) -> Decimal {
    match tier {
        MembershipTier::Member => CommissionTable::MEMBER_RATE,
        MembershipTier::NonMember => CommissionTable::NON_MEMBER_RATE,
    }
}
