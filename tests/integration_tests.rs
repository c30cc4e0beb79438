use fair_settlement::core::error::LedgerError;
use fair_settlement::core::ledger::{EventLedger, OperationSource};
use fair_settlement::core::money::{format_brl, parse_brl};
use fair_settlement::core::operation::Operation;
use fair_settlement::core::payment::PaymentMethod;
use fair_settlement::core::vendor::{EventId, MembershipTier, Vendor, VendorId};
use fair_settlement::import::{import_json, ImportDocument};
use fair_settlement::settlement::calculator::SettlementCalculator;
use fair_settlement::settlement::commission::CommissionTable;
use fair_settlement::settlement::fair::FairSummary;
use fair_settlement::settlement::report::SettlementReport;
use fair_settlement::settlement::result::BalanceStatus;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const FAIR_JSON: &str = r#"{
    "vendors": [
        { "event": "FEIRA-2024-05", "id": "V-001", "name": "Ana Souza", "member": true,
          "bank": "001", "agency": "1234-5", "account": "98765-0", "pix_key": "ana@example.org" },
        { "event": "FEIRA-2024-05", "id": "V-002", "name": "Bruno Lima", "member": false },
        { "event": "FEIRA-2024-05", "id": "V-003", "name": "Carla Dias", "member": true }
    ],
    "operations": [
        { "event": "FEIRA-2024-05", "vendor": "V-001", "method": "PIX", "amount": "100.00", "product": "Geleia" },
        { "event": "FEIRA-2024-05", "vendor": "V-001", "method": "DINHEIRO", "amount": "50.00", "product": "Geleia" },
        { "event": "FEIRA-2024-05", "vendor": "V-002", "method": "DINHEIRO", "amount": "100.00", "product": "Cerâmica" },
        { "event": "FEIRA-2024-05", "vendor": "V-003", "method": "PIX", "amount": "200.00", "product": "Mel" }
    ]
}"#;

fn fair() -> EventId {
    EventId::new("FEIRA-2024-05")
}

/// Full pipeline: import → ledger → settle each vendor → fair summary.
#[test]
fn full_pipeline_fair_scenarios() {
    let ledger = import_json(FAIR_JSON).unwrap();
    let calculator = SettlementCalculator::default();

    // Member, PIX 100 + CASH 50
    let ana = calculator
        .settle_vendor(&ledger, &fair(), &VendorId::new("V-001"))
        .unwrap();
    assert_eq!(ana.total_sold, dec!(150));
    assert_eq!(ana.held_by_association, dec!(100));
    assert_eq!(ana.held_by_vendor, dec!(50));
    assert_eq!(ana.total_commission, dec!(30));
    assert_eq!(ana.balance, dec!(70));
    assert_eq!(ana.message(), "association owes vendor R$ 70,00");

    // Non-member, CASH 100
    let bruno = calculator
        .settle_vendor(&ledger, &fair(), &VendorId::new("V-002"))
        .unwrap();
    assert_eq!(bruno.total_commission, dec!(30));
    assert_eq!(bruno.held_by_vendor, dec!(100));
    assert_eq!(bruno.balance, dec!(-30));
    assert_eq!(bruno.message(), "vendor owes association R$ 30,00");

    // Member, PIX 200
    let carla = calculator
        .settle_vendor(&ledger, &fair(), &VendorId::new("V-003"))
        .unwrap();
    assert_eq!(carla.held_by_vendor, Decimal::ZERO);
    assert_eq!(carla.total_commission, dec!(40));
    assert_eq!(carla.balance, dec!(160));
    assert_eq!(carla.message(), "association owes vendor R$ 160,00");

    let summary = FairSummary::build(&ledger, &calculator, &fair());
    assert!(summary.is_consistent());
    assert_eq!(summary.total_sold, dec!(450));
    assert_eq!(summary.total_commission, dec!(100));
    assert_eq!(summary.owed_to_vendors, dec!(230));
    assert_eq!(summary.owed_by_vendors, dec!(30));
}

/// Edits to the ledger show up in the next settlement; nothing is cached.
#[test]
fn settlement_follows_ledger_edits() {
    let mut ledger = import_json(FAIR_JSON).unwrap();
    let calculator = SettlementCalculator::default();
    let bruno = VendorId::new("V-002");

    let before = calculator.settle_vendor(&ledger, &fair(), &bruno).unwrap();
    assert_eq!(before.balance, dec!(-30));

    let id = ledger.operations_for(&fair(), &bruno)[0].id();
    ledger.edit_operation(id, PaymentMethod::Pix, dec!(100)).unwrap();
    let after = calculator.settle_vendor(&ledger, &fair(), &bruno).unwrap();
    assert_eq!(after.held_by_vendor, Decimal::ZERO);
    assert_eq!(after.balance, dec!(70));

    ledger.remove_operation(id).unwrap();
    let emptied = calculator.settle_vendor(&ledger, &fair(), &bruno).unwrap();
    assert_eq!(emptied.status, BalanceStatus::NotCalculated);
}

/// A vendor registered at a fair with no sales is "not yet calculated".
#[test]
fn registered_vendor_without_sales() {
    let mut ledger = EventLedger::new();
    ledger.register_vendor(fair(), Vendor::new(VendorId::new("V-9"), "Dora", false));

    let settlement = SettlementCalculator::default()
        .settle_vendor(&ledger, &fair(), &VendorId::new("V-9"))
        .unwrap();
    assert_eq!(settlement.total_sold, Decimal::ZERO);
    assert_eq!(settlement.message(), "not yet calculated");
}

/// Custom commission tiers flow through to every vendor.
#[test]
fn custom_rate_table() {
    let ledger = import_json(FAIR_JSON).unwrap();
    let rates = CommissionTable::from_json(r#"{"member": "0.10", "non_member": "0.15"}"#).unwrap();
    let calculator = SettlementCalculator::new(rates);

    let ana = calculator
        .settle_vendor(&ledger, &fair(), &VendorId::new("V-001"))
        .unwrap();
    assert_eq!(ana.tier, MembershipTier::Member);
    assert_eq!(ana.total_commission, dec!(15));
    assert_eq!(ana.balance, dec!(85));

    let bruno = calculator
        .settle_vendor(&ledger, &fair(), &VendorId::new("V-002"))
        .unwrap();
    assert_eq!(bruno.total_commission, dec!(15));
    assert_eq!(bruno.balance, dec!(-15));
}

/// Unrecognised payment methods are rejected at import, not bucketed.
#[test]
fn unknown_payment_method_rejected() {
    let json = r#"{
        "vendors": [{ "event": "F", "id": "V", "name": "X" }],
        "operations": [{ "event": "F", "vendor": "V", "method": "NEGOCIADO", "amount": "10" }]
    }"#;
    match import_json(json) {
        Err(LedgerError::ImportRow { row: 1, source }) => {
            assert!(matches!(*source, LedgerError::UnknownPaymentMethod(_)));
        }
        _ => panic!("expected an import row error"),
    }
    assert!("NEGOCIADO".parse::<PaymentMethod>().is_err());
}

/// Operations built in code go through the same amount check as imports.
#[test]
fn negative_operation_rejected() {
    let result = Operation::new(
        VendorId::new("V-001"),
        fair(),
        PaymentMethod::Cash,
        dec!(-10),
        "Devolução",
    );
    assert!(matches!(result, Err(LedgerError::NegativeAmount(_))));
}

/// The printed statement carries the banking reference and the balance line.
#[test]
fn report_renders_statement() {
    let ledger = import_json(FAIR_JSON).unwrap();
    let fair = fair();
    let report = SettlementReport::build(
        &ledger,
        &SettlementCalculator::default(),
        &fair,
        &VendorId::new("V-001"),
    )
    .unwrap();
    let text = report.to_string();

    assert!(text.contains("Ana Souza"));
    assert!(text.contains("agency 1234-5"));
    assert!(text.contains("PIX ana@example.org"));
    assert!(text.ends_with("association owes vendor R$ 70,00"));
}

/// Settlements serialize with decimal strings and a tagged status.
#[test]
fn settlement_serializes() {
    let ledger = import_json(FAIR_JSON).unwrap();
    let settlement = SettlementCalculator::default()
        .settle_vendor(&ledger, &fair(), &VendorId::new("V-002"))
        .unwrap();

    let json = serde_json::to_value(&settlement).unwrap();
    assert_eq!(json["total_sold"], "100.00");
    assert_eq!(json["tier"], "non_member");
    assert_eq!(json["status"]["kind"], "vendor_owes_association");
    assert_eq!(json["by_method"]["cash"]["count"], 1);

    let summary = FairSummary::build(&ledger, &SettlementCalculator::default(), &fair());
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["vendors"].as_array().map(|v| v.len()), Some(3));
}

/// Exporting a ledger and importing it again yields identical settlements.
#[test]
fn export_reimport_preserves_settlements() {
    let ledger = import_json(FAIR_JSON).unwrap();
    let json = ImportDocument::from_ledger(&ledger).to_json().unwrap();
    let again = import_json(&json).unwrap();

    let calculator = SettlementCalculator::default();
    assert_eq!(
        FairSummary::build(&ledger, &calculator, &fair()),
        FairSummary::build(&again, &calculator, &fair())
    );
}

/// Displayed balances parse back to the same cents.
#[test]
fn displayed_balance_parses_back() {
    let ledger = import_json(FAIR_JSON).unwrap();
    let summary = FairSummary::build(&ledger, &SettlementCalculator::default(), &fair());
    for row in &summary.vendors {
        let shown = format_brl(row.settlement.balance);
        assert_eq!(parse_brl(&shown).unwrap(), row.settlement.balance);
    }
}

/// Amounts too large to add up safely stop at import instead of reaching
/// the calculator.
#[test]
fn oversized_import_rejected_before_settlement() {
    let json = r#"{
        "vendors": [{ "event": "F", "id": "V", "name": "X", "member": true }],
        "operations": [
            { "event": "F", "vendor": "V", "method": "PIX", "amount": "50000000000000000000000000000" },
            { "event": "F", "vendor": "V", "method": "PIX", "amount": "50000000000000000000000000000" }
        ]
    }"#;
    match import_json(json) {
        Err(LedgerError::ImportRow { row: 1, source }) => {
            assert!(matches!(*source, LedgerError::AmountTooLarge(_)));
        }
        _ => panic!("expected an import row error"),
    }
}

/// A serialized operation with a negative amount does not deserialize.
#[test]
fn negative_operation_not_deserialized() {
    let op = Operation::new(VendorId::new("V-001"), fair(), PaymentMethod::Pix, dec!(5), "Mel").unwrap();
    let mut json = serde_json::to_value(&op).unwrap();
    json["amount"] = serde_json::Value::from("-500");
    assert!(serde_json::from_value::<Operation>(json).is_err());
}
