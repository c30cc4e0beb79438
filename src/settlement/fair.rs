use crate::core::ledger::OperationSource;
use crate::core::money::format_brl;
use crate::core::vendor::{EventId, Vendor};
use crate::settlement::calculator::SettlementCalculator;
use crate::settlement::result::{BalanceStatus, Settlement};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One vendor's row in a fair summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSettlement {
    pub vendor: Vendor,
    pub settlement: Settlement,
}

/// Settlements of every vendor registered at one fair, with totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairSummary {
    pub event: EventId,
    /// Ordered by vendor id.
    pub vendors: Vec<VendorSettlement>,
    pub total_sold: Decimal,
    pub total_commission: Decimal,
    pub held_by_association: Decimal,
    pub held_by_vendors: Decimal,
    /// Sum of positive balances: what the association pays out.
    pub owed_to_vendors: Decimal,
    /// Sum of negative balances, as a positive number: what vendors pay in.
    pub owed_by_vendors: Decimal,
}

impl FairSummary {
    /// Settle every vendor at `event` and add up the results.
    pub fn build<S>(source: &S, calculator: &SettlementCalculator, event: &EventId) -> Self
    where
        S: OperationSource + ?Sized,
    {
        let mut summary = FairSummary {
            event: event.clone(),
            vendors: Vec::new(),
            total_sold: Decimal::ZERO,
            total_commission: Decimal::ZERO,
            held_by_association: Decimal::ZERO,
            held_by_vendors: Decimal::ZERO,
            owed_to_vendors: Decimal::ZERO,
            owed_by_vendors: Decimal::ZERO,
        };

        for vendor in source.vendors_at(event) {
            let settlement =
                calculator.calculate(source.operations_for(event, &vendor.id), vendor.tier());

            summary.total_sold += settlement.total_sold;
            summary.total_commission += settlement.total_commission;
            summary.held_by_association += settlement.held_by_association;
            summary.held_by_vendors += settlement.held_by_vendor;
            match settlement.status {
                BalanceStatus::AssociationOwesVendor(amount) => summary.owed_to_vendors += amount,
                BalanceStatus::VendorOwesAssociation(amount) => summary.owed_by_vendors += amount,
                BalanceStatus::NotCalculated | BalanceStatus::Settled => {}
            }

            summary.vendors.push(VendorSettlement {
                vendor: vendor.clone(),
                settlement,
            });
        }

        debug!(
            "fair {}: {} vendors, sold={} commission={}",
            event,
            summary.vendors.len(),
            summary.total_sold,
            summary.total_commission
        );
        summary
    }

    /// Net cash the association receives from vendors once every
    /// balance is paid. Negative when it pays out more than it collects.
    pub fn net_due_to_association(&self) -> Decimal {
        self.owed_by_vendors - self.owed_to_vendors
    }

    /// Vendors that recorded at least one operation.
    pub fn active_vendor_count(&self) -> usize {
        self.vendors
            .iter()
            .filter(|row| row.settlement.status != BalanceStatus::NotCalculated)
            .count()
    }

    /// Fair totals agree with the per-vendor rows, and the association
    /// ends with exactly its commission once balances are paid.
    pub fn is_consistent(&self) -> bool {
        let row_sold: Decimal = self.vendors.iter().map(|r| r.settlement.total_sold).sum();
        let row_commission: Decimal = self
            .vendors
            .iter()
            .map(|r| r.settlement.total_commission)
            .sum();
        row_sold == self.total_sold
            && row_commission == self.total_commission
            && self.held_by_association + self.held_by_vendors == self.total_sold
            && self.held_by_association + self.net_due_to_association() == self.total_commission
    }
}

impl fmt::Display for FairSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Fair {} ===", self.event)?;
        writeln!(f, "Vendors:           {} ({} active)", self.vendors.len(), self.active_vendor_count())?;
        writeln!(f, "Total Sold:        {}", format_brl(self.total_sold))?;
        writeln!(f, "Commission:        {}", format_brl(self.total_commission))?;
        writeln!(f, "Held by Assoc.:    {}", format_brl(self.held_by_association))?;
        writeln!(f, "Held by Vendors:   {}", format_brl(self.held_by_vendors))?;
        writeln!(f, "Owed to Vendors:   {}", format_brl(self.owed_to_vendors))?;
        writeln!(f, "Owed by Vendors:   {}", format_brl(self.owed_by_vendors))?;

        writeln!(f, "\n--- Vendors ---")?;
        for row in &self.vendors {
            writeln!(
                f,
                "  {:<10} {:<24} {:>16}  {}",
                row.vendor.id.as_str(),
                row.vendor.name,
                format_brl(row.settlement.total_sold),
                row.settlement.status
            )?;
        }
        Ok(())
    }
}
