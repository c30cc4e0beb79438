use crate::core::vendor::{EventId, VendorId};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised at the ingestion and ledger boundary.
///
/// The settlement calculator itself never fails; everything that can go
/// wrong is caught here, before operations reach it.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("operation amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("operation amount {0} exceeds the largest accepted sale")]
    AmountTooLarge(Decimal),

    #[error("unknown payment method '{0}' (expected PIX, DINHEIRO or CREDITO)")]
    UnknownPaymentMethod(String),

    #[error("invalid money value '{0}'")]
    InvalidMoney(String),

    #[error("commission rate must be between 0 and 1, got {0}")]
    InvalidRate(Decimal),

    #[error("vendor {vendor} is not registered at event {event}")]
    VendorNotRegistered { event: EventId, vendor: VendorId },

    #[error("operation {0} not found")]
    OperationNotFound(Uuid),

    #[error("import row {row}: {source}")]
    ImportRow {
        row: usize,
        #[source]
        source: Box<LedgerError>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_import_row_message_includes_cause() {
        let err = LedgerError::ImportRow {
            row: 3,
            source: Box::new(LedgerError::NegativeAmount(dec!(-1))),
        };
        assert_eq!(
            err.to_string(),
            "import row 3: operation amount must not be negative, got -1"
        );
    }

    #[test]
    fn test_vendor_not_registered_message() {
        let err = LedgerError::VendorNotRegistered {
            event: EventId::new("FEIRA-2024-05"),
            vendor: VendorId::new("V-7"),
        };
        assert!(err.to_string().contains("V-7"));
        assert!(err.to_string().contains("FEIRA-2024-05"));
    }
}
