use crate::core::money::format_brl;
use crate::core::payment::PaymentMethod;
use crate::core::vendor::MembershipTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount and number of sales for one payment method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTotal {
    pub amount: Decimal,
    pub count: usize,
}

impl MethodTotal {
    pub(crate) fn add(&mut self, amount: Decimal) {
        self.amount += amount;
        self.count += 1;
    }
}

/// Per-method totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBreakdown {
    pub pix: MethodTotal,
    pub cash: MethodTotal,
    pub credit: MethodTotal,
}

impl MethodBreakdown {
    pub fn get(&self, method: PaymentMethod) -> &MethodTotal {
        match method {
            PaymentMethod::Pix => &self.pix,
            PaymentMethod::Cash => &self.cash,
            PaymentMethod::Credit => &self.credit,
        }
    }

    pub(crate) fn get_mut(&mut self, method: PaymentMethod) -> &mut MethodTotal {
        match method {
            PaymentMethod::Pix => &mut self.pix,
            PaymentMethod::Cash => &mut self.cash,
            PaymentMethod::Credit => &mut self.credit,
        }
    }

    pub fn total_count(&self) -> usize {
        self.pix.count + self.cash.count + self.credit.count
    }

    pub fn total_amount(&self) -> Decimal {
        self.pix.amount + self.cash.amount + self.credit.amount
    }
}

/// Who owes whom once commission is taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum BalanceStatus {
    /// The vendor has no operations yet.
    NotCalculated,
    /// Balance is exactly zero.
    Settled,
    /// Positive balance; carries the amount owed.
    AssociationOwesVendor(Decimal),
    /// Negative balance; carries the absolute amount owed.
    VendorOwesAssociation(Decimal),
}

impl BalanceStatus {
    pub fn from_balance(balance: Decimal, has_operations: bool) -> Self {
        if !has_operations {
            BalanceStatus::NotCalculated
        } else if balance > Decimal::ZERO {
            BalanceStatus::AssociationOwesVendor(balance)
        } else if balance < Decimal::ZERO {
            BalanceStatus::VendorOwesAssociation(balance.abs())
        } else {
            BalanceStatus::Settled
        }
    }

    /// Amount that has to change hands, zero when nothing is owed.
    pub fn amount_due(&self) -> Decimal {
        match self {
            BalanceStatus::AssociationOwesVendor(amount)
            | BalanceStatus::VendorOwesAssociation(amount) => *amount,
            BalanceStatus::NotCalculated | BalanceStatus::Settled => Decimal::ZERO,
        }
    }

    pub fn message(&self) -> String {
        match self {
            BalanceStatus::NotCalculated => "not yet calculated".to_string(),
            BalanceStatus::Settled => "accounts settled, nothing owed either way.".to_string(),
            BalanceStatus::AssociationOwesVendor(amount) => {
                format!("association owes vendor {}", format_brl(*amount))
            }
            BalanceStatus::VendorOwesAssociation(amount) => {
                format!("vendor owes association {}", format_brl(*amount))
            }
        }
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Cash reconciliation of one vendor at one fair.
///
/// Derived from the vendor's operations on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub tier: MembershipTier,
    /// Fraction of sales retained by the association.
    pub commission_rate: Decimal,
    pub total_sold: Decimal,
    pub by_method: MethodBreakdown,
    /// Cash and card sales, physically with the vendor.
    pub held_by_vendor: Decimal,
    /// PIX sales, already in the association's account.
    pub held_by_association: Decimal,
    pub total_commission: Decimal,
    /// What the vendor keeps after commission.
    pub total_profit: Decimal,
    /// Positive: association pays the vendor. Negative: vendor pays in.
    pub balance: Decimal,
    pub status: BalanceStatus,
}

impl Settlement {
    pub fn operation_count(&self) -> usize {
        self.by_method.total_count()
    }

    pub fn message(&self) -> String {
        self.status.message()
    }

    /// Check the accounting identities that hold for every settlement.
    pub fn is_consistent(&self) -> bool {
        self.held_by_vendor + self.held_by_association == self.total_sold
            && self.by_method.total_amount() == self.total_sold
            && self.total_commission == self.total_sold * self.commission_rate
            && self.total_profit == self.total_sold - self.total_commission
            && self.balance == self.total_sold - self.held_by_vendor - self.total_commission
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Settlement ({}) ===", self.tier)?;
        writeln!(f, "Total Sold:        {}", format_brl(self.total_sold))?;
        writeln!(f, "Commission:        {}", format_brl(self.total_commission))?;
        writeln!(f, "Profit:            {}", format_brl(self.total_profit))?;
        writeln!(f, "Held by Vendor:    {}", format_brl(self.held_by_vendor))?;
        writeln!(f, "Held by Assoc.:    {}", format_brl(self.held_by_association))?;
        writeln!(f, "Balance:           {}", format_brl(self.balance))?;
        write!(f, "{}", self.status)
    }
}
