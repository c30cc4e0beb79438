//! Bulk import of vendors and operations from JSON.
//!
//! ```json
//! {
//!   "vendors": [
//!     { "event": "FEIRA-2024-05", "id": "V-001", "name": "Ana", "member": true,
//!       "pix_key": "ana@example.org" }
//!   ],
//!   "operations": [
//!     { "event": "FEIRA-2024-05", "vendor": "V-001", "method": "PIX",
//!       "amount": "35.90", "product": "Geleia", "customer": "Rui" }
//!   ]
//! }
//! ```
//!
//! Amounts may be JSON numbers, plain decimal strings, or BRL strings
//! (`"R$ 1.234,50"`). A string without `R$` or a comma is read as a plain
//! decimal, so `"1.234"` is 1.234, not one thousand two hundred thirty-four.
//! Rows are numbered from 1 in error messages.

use crate::core::error::{LedgerError, LedgerResult};
use crate::core::ledger::{EventLedger, OperationSource};
use crate::core::money::parse_amount;
use crate::core::operation::Operation;
use crate::core::payment::PaymentMethod;
use crate::core::vendor::{BankingDetails, EventId, Vendor, VendorId};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub vendors: Vec<VendorRow>,
    #[serde(default)]
    pub operations: Vec<OperationRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorRow {
    pub event: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub member: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub event: String,
    pub vendor: String,
    pub method: String,
    pub amount: AmountField,
    #[serde(default)]
    pub product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// An amount as written in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    Text(String),
    Number(serde_json::Number),
}

impl AmountField {
    pub fn to_decimal(&self) -> LedgerResult<Decimal> {
        match self {
            AmountField::Text(text) => parse_amount(text),
            AmountField::Number(number) => parse_amount(&number.to_string()),
        }
    }
}

/// Outcome of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub vendors: usize,
    pub operations: usize,
}

impl ImportDocument {
    pub fn from_json(json: &str) -> LedgerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Snapshot a ledger in import format.
    pub fn from_ledger(ledger: &EventLedger) -> Self {
        let mut doc = ImportDocument::default();
        for event in ledger.events() {
            for vendor in ledger.vendors_at(event) {
                doc.vendors.push(VendorRow {
                    event: event.to_string(),
                    id: vendor.id.to_string(),
                    name: vendor.name.clone(),
                    member: vendor.member,
                    bank: vendor.banking.bank.clone(),
                    agency: vendor.banking.agency.clone(),
                    account: vendor.banking.account.clone(),
                    pix_key: vendor.banking.pix_key.clone(),
                });
            }
        }
        for op in ledger.operations() {
            doc.operations.push(OperationRow {
                id: Some(op.id()),
                event: op.event().to_string(),
                vendor: op.vendor().to_string(),
                method: op.method().label().to_uppercase(),
                amount: AmountField::Text(op.amount().to_string()),
                product: op.product_label().to_string(),
                customer: op.customer_name().map(str::to_string),
                note: op.note().map(str::to_string),
            });
        }
        doc
    }

    /// Load every row into `ledger`. Stops at the first bad operation row.
    pub fn apply(self, ledger: &mut EventLedger) -> LedgerResult<ImportStats> {
        let mut stats = ImportStats::default();

        for row in self.vendors {
            let banking = BankingDetails {
                bank: row.bank,
                agency: row.agency,
                account: row.account,
                pix_key: row.pix_key,
            };
            let vendor = Vendor::new(VendorId::new(row.id), row.name, row.member).with_banking(banking);
            ledger.register_vendor(EventId::new(row.event), vendor);
            stats.vendors += 1;
        }

        for (index, row) in self.operations.into_iter().enumerate() {
            let row_number = index + 1;
            let operation = row.into_operation().and_then(|op| ledger.record(op));
            if let Err(source) = operation {
                warn!("import stopped at operation row {}: {}", row_number, source);
                return Err(LedgerError::ImportRow {
                    row: row_number,
                    source: Box::new(source),
                });
            }
            stats.operations += 1;
        }

        info!(
            "imported {} vendors and {} operations",
            stats.vendors, stats.operations
        );
        Ok(stats)
    }
}

impl OperationRow {
    fn into_operation(self) -> LedgerResult<Operation> {
        let method: PaymentMethod = self.method.parse()?;
        let amount = self.amount.to_decimal()?;
        let vendor = VendorId::new(self.vendor);
        let event = EventId::new(self.event);

        let mut op = match self.id {
            Some(id) => Operation::with_id(id, vendor, event, method, amount, self.product)?,
            None => Operation::new(vendor, event, method, amount, self.product)?,
        };
        if let Some(customer) = self.customer {
            op = op.with_customer(customer);
        }
        if let Some(note) = self.note {
            op = op.with_note(note);
        }
        Ok(op)
    }
}

/// Parse a JSON document into a fresh ledger.
pub fn import_json(json: &str) -> LedgerResult<EventLedger> {
    let mut ledger = EventLedger::new();
    ImportDocument::from_json(json)?.apply(&mut ledger)?;
    Ok(ledger)
}

/// Read and import a JSON file.
pub fn import_file(path: impl AsRef<Path>) -> LedgerResult<EventLedger> {
    let content = fs::read_to_string(path)?;
    import_json(&content)
}
