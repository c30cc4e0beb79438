use crate::core::error::{LedgerError, LedgerResult};
use crate::core::ledger::OperationSource;
use crate::core::money::format_brl;
use crate::core::operation::Operation;
use crate::core::payment::PaymentMethod;
use crate::core::vendor::{EventId, Vendor, VendorId};
use crate::settlement::calculator::SettlementCalculator;
use crate::settlement::result::Settlement;
use rust_decimal::Decimal;
use std::fmt;

/// Printable statement for one vendor at one fair: summary cards,
/// payment-method breakdown, operation table and the balance line.
#[derive(Debug, Clone)]
pub struct SettlementReport<'a> {
    pub event: &'a EventId,
    pub vendor: &'a Vendor,
    pub operations: Vec<&'a Operation>,
    pub settlement: Settlement,
}

impl<'a> SettlementReport<'a> {
    pub fn build<S>(
        source: &'a S,
        calculator: &SettlementCalculator,
        event: &'a EventId,
        vendor: &VendorId,
    ) -> LedgerResult<Self>
    where
        S: OperationSource + ?Sized,
    {
        let record = source
            .vendor(event, vendor)
            .ok_or_else(|| LedgerError::VendorNotRegistered {
                event: event.clone(),
                vendor: vendor.clone(),
            })?;
        let operations = source.operations_for(event, vendor);
        let settlement = calculator.calculate(operations.iter().copied(), record.tier());
        Ok(Self {
            event,
            vendor: record,
            operations,
            settlement,
        })
    }
}

impl fmt::Display for SettlementReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.settlement;

        writeln!(f, "=== {} ({}) @ {} ===", self.vendor.name, self.vendor.id, self.event)?;
        writeln!(
            f,
            "Tier: {}  |  Commission rate: {}%",
            s.tier,
            (s.commission_rate * Decimal::ONE_HUNDRED).normalize()
        )?;
        if !self.vendor.banking.is_empty() {
            writeln!(f, "Banking: {}", self.vendor.banking)?;
        }

        writeln!(f)?;
        writeln!(f, "[ Total Sold ]  {}", format_brl(s.total_sold))?;
        writeln!(f, "[ Commission ]  {}", format_brl(s.total_commission))?;
        writeln!(f, "[ Profit     ]  {}", format_brl(s.total_profit))?;

        writeln!(f, "\n--- By Payment Method ---")?;
        for method in PaymentMethod::ALL {
            let total = s.by_method.get(method);
            writeln!(
                f,
                "  {:<8} {:>16}  ({} sales)",
                method.label(),
                format_brl(total.amount),
                total.count
            )?;
        }

        writeln!(f, "\n--- Operations ---")?;
        if self.operations.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for op in &self.operations {
            writeln!(
                f,
                "  {}  {:<8} {:>14}  {:<24} {}",
                op.created_at().format("%Y-%m-%d %H:%M"),
                op.method().label(),
                format_brl(op.amount()),
                op.product_label(),
                op.customer_name().unwrap_or("-")
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Held by vendor:       {}", format_brl(s.held_by_vendor))?;
        writeln!(f, "Held by association:  {}", format_brl(s.held_by_association))?;
        write!(f, "Balance: {}", s.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::EventLedger;
    use crate::core::vendor::BankingDetails;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_sections() {
        let fair = EventId::new("FEIRA-1");
        let mut ledger = EventLedger::new();
        ledger.register_vendor(
            fair.clone(),
            Vendor::new(VendorId::new("V-1"), "Ana", true).with_banking(BankingDetails {
                pix_key: Some("ana@example.org".to_string()),
                ..Default::default()
            }),
        );
        ledger
            .record(
                Operation::new(VendorId::new("V-1"), fair.clone(), PaymentMethod::Pix, dec!(100), "Bolo")
                    .unwrap()
                    .with_customer("Rui"),
            )
            .unwrap();
        ledger
            .record(
                Operation::new(VendorId::new("V-1"), fair.clone(), PaymentMethod::Cash, dec!(50), "Doce")
                    .unwrap(),
            )
            .unwrap();

        let report = SettlementReport::build(
            &ledger,
            &SettlementCalculator::default(),
            &fair,
            &VendorId::new("V-1"),
        )
        .unwrap();
        let text = report.to_string();

        assert!(text.contains("=== Ana (V-1) @ FEIRA-1 ==="));
        assert!(text.contains("Commission rate: 20%"));
        assert!(text.contains("PIX ana@example.org"));
        assert!(text.contains("[ Total Sold ]  R$ 150,00"));
        assert!(text.contains("[ Commission ]  R$ 30,00"));
        assert!(text.contains("[ Profit     ]  R$ 120,00"));
        assert!(text.contains("Bolo"));
        assert!(text.contains("Rui"));
        assert!(text.ends_with("Balance: association owes vendor R$ 70,00"));
    }

    #[test]
    fn test_report_for_idle_vendor() {
        let fair = EventId::new("FEIRA-1");
        let mut ledger = EventLedger::new();
        ledger.register_vendor(fair.clone(), Vendor::new(VendorId::new("V-2"), "Bia", false));

        let report = SettlementReport::build(
            &ledger,
            &SettlementCalculator::default(),
            &fair,
            &VendorId::new("V-2"),
        )
        .unwrap();
        let text = report.to_string();
        assert!(text.contains("(none)"));
        assert!(!text.contains("Banking:"));
        assert!(text.ends_with("Balance: not yet calculated"));
    }
}
