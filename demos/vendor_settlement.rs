//! Settle a single vendor after a fair.
//!
//! Walks through the three typical outcomes: the association owes the
//! vendor, the vendor owes the association, and nothing recorded yet.

use fair_settlement::core::vendor::BankingDetails;
use fair_settlement::prelude::*;
use fair_settlement::settlement::report::SettlementReport;
use rust_decimal_macros::dec;

fn main() -> LedgerResult<()> {
    let fair = EventId::new("FEIRA-2024-05");
    let mut ledger = EventLedger::new();

    let ana = VendorId::new("V-001");
    let bruno = VendorId::new("V-002");
    let carla = VendorId::new("V-003");

    ledger.register_vendor(
        fair.clone(),
        Vendor::new(ana.clone(), "Ana Souza", true).with_banking(BankingDetails {
            bank: Some("001".to_string()),
            pix_key: Some("ana@example.org".to_string()),
            ..Default::default()
        }),
    );
    ledger.register_vendor(fair.clone(), Vendor::new(bruno.clone(), "Bruno Lima", false));
    ledger.register_vendor(fair.clone(), Vendor::new(carla.clone(), "Carla Dias", true));

    ledger.record(
        Operation::new(ana.clone(), fair.clone(), PaymentMethod::Pix, dec!(100), "Geleia")?
            .with_customer("Rui"),
    )?;
    ledger.record(Operation::new(ana.clone(), fair.clone(), PaymentMethod::Cash, dec!(50), "Geleia")?)?;
    ledger.record(Operation::new(bruno.clone(), fair.clone(), PaymentMethod::Cash, dec!(100), "Cerâmica")?)?;

    let calculator = SettlementCalculator::default();
    for vendor in [&ana, &bruno, &carla] {
        let report = SettlementReport::build(&ledger, &calculator, &fair, vendor)?;
        println!("{}\n", report);
    }

    Ok(())
}
