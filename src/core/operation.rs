use crate::core::error::{LedgerError, LedgerResult};
use crate::core::payment::PaymentMethod;
use crate::core::vendor::{EventId, VendorId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest amount a single operation may carry: `i64::MAX` centavos.
pub fn max_amount() -> Decimal {
    Decimal::new(i64::MAX, 2)
}

/// A single sale recorded at a fair.
///
/// Operations are the raw ledger the settlement is derived from. Once
/// recorded they only change through an explicit edit.
///
/// # Examples
///
/// ```
/// use fair_settlement::core::operation::Operation;
/// use fair_settlement::core::payment::PaymentMethod;
/// use fair_settlement::core::vendor::{EventId, VendorId};
/// use rust_decimal_macros::dec;
///
/// let sale = Operation::new(
///     VendorId::new("V-001"),
///     EventId::new("FEIRA-2024-05"),
///     PaymentMethod::Pix,
///     dec!(35.90),
///     "Geleia de goiaba",
/// ).unwrap();
///
/// assert_eq!(sale.amount(), dec!(35.90));
/// assert!(Operation::new(
///     VendorId::new("V-001"),
///     EventId::new("FEIRA-2024-05"),
///     PaymentMethod::Cash,
///     dec!(-1),
///     "Troco",
/// ).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredOperation")]
pub struct Operation {
    id: Uuid,
    vendor: VendorId,
    event: EventId,
    method: PaymentMethod,
    /// Sale value, between zero and [`max_amount`].
    amount: Decimal,
    product_label: String,
    customer_name: Option<String>,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl Operation {
    /// Create a new operation, rejecting negative or oversized amounts.
    pub fn new(
        vendor: VendorId,
        event: EventId,
        method: PaymentMethod,
        amount: Decimal,
        product_label: impl Into<String>,
    ) -> LedgerResult<Self> {
        Self::with_id(Uuid::new_v4(), vendor, event, method, amount, product_label)
    }

    /// Create an operation with a specific ID (useful for imports and tests).
    pub fn with_id(
        id: Uuid,
        vendor: VendorId,
        event: EventId,
        method: PaymentMethod,
        amount: Decimal,
        product_label: impl Into<String>,
    ) -> LedgerResult<Self> {
        validate_amount(amount)?;
        Ok(Self {
            id,
            vendor,
            event,
            method,
            amount,
            product_label: product_label.into(),
            customer_name: None,
            note: None,
            created_at: Utc::now(),
        })
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer_name = Some(customer.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Apply an explicit correction to method and amount.
    pub(crate) fn amend(&mut self, method: PaymentMethod, amount: Decimal) -> LedgerResult<()> {
        validate_amount(amount)?;
        self.method = method;
        self.amount = amount;
        Ok(())
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn vendor(&self) -> &VendorId {
        &self.vendor
    }

    pub fn event(&self) -> &EventId {
        &self.event
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn product_label(&self) -> &str {
        &self.product_label
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub(crate) fn validate_amount(amount: Decimal) -> LedgerResult<()> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount(amount));
    }
    if amount > max_amount() {
        return Err(LedgerError::AmountTooLarge(amount));
    }
    Ok(())
}

/// Serialized shape of an [`Operation`]; deserializing goes through
/// the same amount check as [`Operation::with_id`].
#[derive(Deserialize)]
struct StoredOperation {
    id: Uuid,
    vendor: VendorId,
    event: EventId,
    method: PaymentMethod,
    amount: Decimal,
    product_label: String,
    customer_name: Option<String>,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<StoredOperation> for Operation {
    type Error = LedgerError;

    fn try_from(stored: StoredOperation) -> LedgerResult<Self> {
        validate_amount(stored.amount)?;
        Ok(Self {
            id: stored.id,
            vendor: stored.vendor,
            event: stored.event,
            method: stored.method,
            amount: stored.amount,
            product_label: stored.product_label,
            customer_name: stored.customer_name,
            note: stored.note,
            created_at: stored.created_at,
        })
    }
}
